use crate::core::contents::ItemContents;
use crate::core::pocket::ItemPocket;
use crate::domain::units::{Mass, Volume};
use serde::{Deserialize, Serialize};

/// An object that can be stored in a pocket, and may itself carry pockets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub volume: Volume,
    pub weight: Mass,
    #[serde(default, skip_serializing_if = "ItemContents::is_default")]
    pub contents: ItemContents<ItemPocket>,
}

impl Item {
    pub fn new(id: impl Into<String>, volume: Volume, weight: Mass) -> Self {
        Self {
            id: id.into(),
            volume,
            weight,
            contents: ItemContents::default(),
        }
    }

    pub fn with_contents(mut self, contents: ItemContents<ItemPocket>) -> Self {
        self.contents = contents;
        self
    }

    /// Base volume plus whatever the item's own pockets add.
    pub fn total_volume(&self) -> Volume {
        self.volume + self.contents.item_size_modifier()
    }

    pub fn total_weight(&self) -> Mass {
        self.weight + self.contents.item_weight_modifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::PocketType;

    #[test]
    fn test_totals_include_contents() {
        let pocket = ItemPocket::new(PocketType::Container);
        let mut bag = Item::new("bag", Volume::from_milliliter(500), Mass::from_gram(100))
            .with_contents(ItemContents::new([pocket]));
        assert!(bag
            .contents
            .insert_item(&Item::new("rock", Volume::from_milliliter(250), Mass::from_gram(400))));

        assert_eq!(bag.total_volume(), Volume::from_milliliter(750));
        assert_eq!(bag.total_weight(), Mass::from_gram(500));
    }

    #[test]
    fn test_contents_omitted_when_no_pockets() {
        let rock = Item::new("rock", Volume::from_milliliter(250), Mass::from_gram(400));
        let json = serde_json::to_value(&rock).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "rock", "volume": "250 ml", "weight": "400 g"})
        );
        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, rock);
    }
}
