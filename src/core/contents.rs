//! The container aggregate: an ordered sequence of pockets owned by an item.
//!
//! Placement is first-fit in pocket order. Every mutation goes through
//! `&mut` access to the owned pockets, so a successful insert or removal is
//! visible on the aggregate afterwards.

use crate::domain::ports::{Pocket, PocketType};
use crate::domain::units::{Mass, Volume};
use crate::utils::error::{ContentsError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemContents<P> {
    nestable: bool,
    contents: VecDeque<P>,
}

impl<P> Default for ItemContents<P> {
    fn default() -> Self {
        Self {
            nestable: true,
            contents: VecDeque::new(),
        }
    }
}

/// A nullable handle to an item held somewhere else.
#[derive(Debug)]
pub struct ItemLocation<'a, I> {
    target: Option<&'a I>,
}

impl<'a, I> ItemLocation<'a, I> {
    pub fn new(target: &'a I) -> Self {
        Self {
            target: Some(target),
        }
    }

    pub fn null() -> Self {
        Self { target: None }
    }

    pub fn is_valid(&self) -> bool {
        self.target.is_some()
    }

    pub fn get(&self) -> Option<&'a I> {
        self.target
    }
}

impl<I> Clone for ItemLocation<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for ItemLocation<'_, I> {}

impl<P> ItemContents<P> {
    pub fn new(pockets: impl IntoIterator<Item = P>) -> Self {
        Self {
            nestable: true,
            contents: pockets.into_iter().collect(),
        }
    }

    pub fn with_nestable(mut self, nestable: bool) -> Self {
        self.nestable = nestable;
        self
    }

    /// Whether the owning item may itself go inside another pocket.
    pub fn nestable(&self) -> bool {
        self.nestable
    }

    pub fn pockets(&self) -> impl Iterator<Item = &P> {
        self.contents.iter()
    }

    pub fn pocket_count(&self) -> usize {
        self.contents.len()
    }

    pub fn has_no_pockets(&self) -> bool {
        self.contents.is_empty()
    }

    /// No pockets and nestable, i.e. what a missing record loads as.
    pub fn is_default(&self) -> bool {
        self.contents.is_empty() && self.nestable
    }
}

impl<P: DeserializeOwned> ItemContents<P> {
    /// Reads `{ "nestable": bool?, "contents": [pocket, ...] }`.
    ///
    /// `nestable` falls back to `true`; a missing `contents` is a
    /// [`ContentsError::MissingField`].
    pub fn load(data: &serde_json::Value) -> Result<Self> {
        let object = data.as_object().ok_or_else(|| ContentsError::ValidationError {
            message: "container record must be a JSON object".to_string(),
        })?;

        let nestable = match object.get("nestable") {
            None | Some(serde_json::Value::Null) => true,
            Some(value) => bool::deserialize(value)?,
        };

        let pockets = object
            .get("contents")
            .ok_or_else(|| ContentsError::MissingField {
                field: "contents".to_string(),
            })?;
        let contents =
            VecDeque::<P>::deserialize(pockets).map_err(ContentsError::from_json)?;

        tracing::trace!("Loaded container with {} pockets", contents.len());
        Ok(Self { nestable, contents })
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let data: serde_json::Value = serde_json::from_str(input)?;
        Self::load(&data)
    }
}

// Nested aggregates (inside items) go through `load` too, so every level
// reports a missing `contents` the same way.
impl<'de, P: DeserializeOwned> Deserialize<'de> for ItemContents<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::load(&value).map_err(serde::de::Error::custom)
    }
}

impl<P: Serialize> ItemContents<P> {
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<P: Pocket> ItemContents<P> {
    /// Positional comparison: same pocket count and each pocket stacks with
    /// the pocket at the same index. Reordered pockets do not stack.
    pub fn stacks_with(&self, rhs: &Self) -> bool {
        self.contents.len() == rhs.contents.len()
            && self
                .contents
                .iter()
                .zip(rhs.contents.iter())
                .all(|(a, b)| a.stacks_with(b))
    }

    /// True if any pocket would accept `item`. Advisory only.
    pub fn can_contain(&self, item: &P::Item) -> bool {
        self.contents.iter().any(|pocket| pocket.can_contain(item))
    }

    /// True when there are no pockets, or when *any* pocket is empty.
    ///
    /// Note this is not "every pocket is empty": `[full, empty]` reports true.
    pub fn empty(&self) -> bool {
        self.contents.is_empty() || self.contents.iter().any(|pocket| pocket.empty())
    }

    pub fn all_items(&self) -> Vec<&P::Item> {
        self.contents
            .iter()
            .flat_map(|pocket| pocket.all_items())
            .collect()
    }

    /// Mutable counterpart of [`ItemContents::all_items`]; visits the same
    /// items in the same order.
    pub fn for_each_item_mut(&mut self, mut f: impl FnMut(&mut P::Item)) {
        for pocket in self.contents.iter_mut() {
            pocket.for_each_item_mut(&mut f);
        }
    }

    pub fn item_size_modifier(&self) -> Volume {
        self.contents
            .iter()
            .map(|pocket| pocket.item_size_modifier())
            .sum()
    }

    pub fn item_weight_modifier(&self) -> Mass {
        self.contents
            .iter()
            .map(|pocket| pocket.item_weight_modifier())
            .sum()
    }

    pub fn remove_item(&mut self, item: &P::Item) -> Option<P::Item> {
        for (index, pocket) in self.contents.iter_mut().enumerate() {
            if let Some(removed) = pocket.remove_item(item) {
                tracing::debug!("Removed item from pocket {}", index);
                return Some(removed);
            }
        }
        tracing::debug!("No pocket holds the item to remove");
        None
    }

    pub fn remove_located(&mut self, location: ItemLocation<'_, P::Item>) -> Option<P::Item> {
        let target = location.get()?;
        self.remove_item(target)
    }

    pub fn clear_items(&mut self) {
        for pocket in self.contents.iter_mut() {
            pocket.clear_items();
        }
    }

    /// First-fit insert. Each pocket re-validates acceptance itself.
    pub fn insert_item(&mut self, item: &P::Item) -> bool {
        for (index, pocket) in self.contents.iter_mut().enumerate() {
            if pocket.insert_item(item) {
                tracing::debug!("Inserted item into pocket {}", index);
                return true;
            }
        }
        tracing::debug!("No pocket accepted the item");
        false
    }

    /// Places `item` without acceptance checks into the legacy pocket,
    /// creating one at the front of the sequence if none exists.
    pub fn insert_legacy(&mut self, item: P::Item) {
        if let Some(pocket) = self
            .contents
            .iter_mut()
            .find(|pocket| pocket.is_type(PocketType::Legacy))
        {
            pocket.add(item);
            return;
        }

        let mut legacy = P::legacy();
        legacy.add(item);
        self.contents.push_front(legacy);
        tracing::debug!(
            "Created legacy pocket, container now has {} pockets",
            self.contents.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pocket::ItemPocket;
    use crate::core::item::Item;

    fn small(id: &str) -> Item {
        Item::new(id, Volume::from_milliliter(100), Mass::from_gram(50))
    }

    fn full_pocket(id: &str) -> ItemPocket {
        let mut pocket = ItemPocket::new(PocketType::Container);
        pocket.add(small(id));
        pocket
    }

    #[test]
    fn test_load_defaults_nestable_to_true() {
        let contents: ItemContents<ItemPocket> =
            ItemContents::load(&serde_json::json!({ "contents": [] })).unwrap();
        assert!(contents.nestable());
        assert_eq!(contents.pocket_count(), 0);
    }

    #[test]
    fn test_load_missing_contents_fails() {
        let err = ItemContents::<ItemPocket>::load(&serde_json::json!({ "nestable": false }))
            .unwrap_err();
        assert!(matches!(err, ContentsError::MissingField { ref field } if field == "contents"));
    }

    #[test]
    fn test_load_rejects_non_object() {
        assert!(matches!(
            ItemContents::<ItemPocket>::load(&serde_json::json!([1, 2])),
            Err(ContentsError::ValidationError { .. })
        ));
        assert!(matches!(
            ItemContents::<ItemPocket>::load(&serde_json::json!({"nestable": "yes", "contents": []})),
            Err(ContentsError::SerializationError(_))
        ));
    }

    #[test]
    fn test_nested_missing_contents_is_missing_field() {
        let record = serde_json::json!({
            "contents": [{
                "pocket_type": "container",
                "contents": [{
                    "id": "bag",
                    "volume": "1 L",
                    "weight": "100 g",
                    "contents": { "nestable": true }
                }]
            }]
        });
        let err = ItemContents::<ItemPocket>::load(&record).unwrap_err();
        assert!(matches!(err, ContentsError::MissingField { ref field } if field == "contents"));
    }

    #[test]
    fn test_nested_null_nestable_defaults_to_true() {
        let record = serde_json::json!({
            "nestable": null,
            "contents": [{
                "pocket_type": "container",
                "contents": [{
                    "id": "bag",
                    "volume": "1 L",
                    "weight": "100 g",
                    "contents": { "nestable": null, "contents": [] }
                }]
            }]
        });
        let contents = ItemContents::<ItemPocket>::load(&record).unwrap();
        assert!(contents.nestable());
        assert!(contents.all_items()[0].contents.nestable());
    }

    #[test]
    fn test_serialize_emits_both_fields() {
        let contents = ItemContents::new([ItemPocket::new(PocketType::Magazine)]).with_nestable(false);
        let value = serde_json::to_value(&contents).unwrap();
        assert_eq!(value["nestable"], serde_json::json!(false));
        assert_eq!(value["contents"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_is_existential_over_pockets() {
        let none: ItemContents<ItemPocket> = ItemContents::default();
        assert!(none.empty());

        let mixed = ItemContents::new([full_pocket("a"), ItemPocket::new(PocketType::Container)]);
        assert!(mixed.empty());

        let full = ItemContents::new([full_pocket("a"), full_pocket("b")]);
        assert!(!full.empty());
    }

    #[test]
    fn test_remove_located_null_handle() {
        let mut contents = ItemContents::new([full_pocket("a")]);
        assert!(contents.remove_located(ItemLocation::null()).is_none());
        assert_eq!(contents.all_items().len(), 1);

        let target = small("a");
        let removed = contents.remove_located(ItemLocation::new(&target));
        assert_eq!(removed, Some(target));
        assert!(contents.all_items().is_empty());
    }

    #[test]
    fn test_for_each_item_mut_matches_all_items_order() {
        let mut inner = ItemPocket::new(PocketType::Container);
        inner.add(small("nested"));
        let bag = small("bag").with_contents(ItemContents::new([inner]));

        let mut first = ItemPocket::new(PocketType::Container);
        first.add(bag);
        let mut contents = ItemContents::new([first, full_pocket("last")]);

        let ids: Vec<String> = contents.all_items().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec!["bag", "nested", "last"]);

        let mut visited = Vec::new();
        contents.for_each_item_mut(|item| {
            visited.push(item.id.clone());
            item.id.push_str("-seen");
        });
        assert_eq!(visited, ids);
        assert!(contents.all_items().iter().all(|i| i.id.ends_with("-seen")));
    }

    #[test]
    fn test_clear_items_keeps_pockets() {
        let mut contents = ItemContents::new([full_pocket("a"), full_pocket("b")]);
        contents.clear_items();
        assert_eq!(contents.pocket_count(), 2);
        assert!(contents.all_items().is_empty());
        contents.clear_items();
        assert_eq!(contents.pocket_count(), 2);
    }

    #[test]
    fn test_insert_legacy_reuses_existing_legacy_pocket() {
        let mut contents = ItemContents::new([ItemPocket::new(PocketType::Container)]);
        contents.insert_legacy(small("a"));
        contents.insert_legacy(small("b"));
        assert_eq!(contents.pocket_count(), 2);
        let first = contents.pockets().next().unwrap();
        assert!(first.is_type(PocketType::Legacy));
        assert_eq!(first.all_items().len(), 2);
    }
}
