use crate::core::item::Item;
use crate::domain::ports::{Pocket, PocketType};
use crate::domain::units::{Mass, Volume};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Reference pocket with optional volume, weight and item-count limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPocket {
    pocket_type: PocketType,
    #[serde(default, skip_serializing_if = "is_false")]
    rigid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_contains_volume: Option<Volume>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_contains_weight: Option<Mass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_item_count: Option<usize>,
    #[serde(default)]
    contents: Vec<Item>,
}

impl ItemPocket {
    pub fn new(pocket_type: PocketType) -> Self {
        Self {
            pocket_type,
            rigid: false,
            max_contains_volume: None,
            max_contains_weight: None,
            max_item_count: None,
            contents: Vec::new(),
        }
    }

    pub fn with_max_volume(mut self, volume: Volume) -> Self {
        self.max_contains_volume = Some(volume);
        self
    }

    pub fn with_max_weight(mut self, weight: Mass) -> Self {
        self.max_contains_weight = Some(weight);
        self
    }

    pub fn with_max_items(mut self, count: usize) -> Self {
        self.max_item_count = Some(count);
        self
    }

    /// A rigid pocket does not grow its owner's volume when filled.
    pub fn with_rigid(mut self, rigid: bool) -> Self {
        self.rigid = rigid;
        self
    }

    pub fn contained_volume(&self) -> Volume {
        self.contents.iter().map(Item::total_volume).sum()
    }

    pub fn contained_weight(&self) -> Mass {
        self.contents.iter().map(Item::total_weight).sum()
    }
}

impl Pocket for ItemPocket {
    type Item = Item;

    fn legacy() -> Self {
        Self::new(PocketType::Legacy)
    }

    fn pocket_type(&self) -> PocketType {
        self.pocket_type
    }

    fn can_contain(&self, item: &Item) -> bool {
        if !item.contents.nestable() {
            return false;
        }
        if self.pocket_type == PocketType::Legacy {
            return true;
        }
        if let Some(max) = self.max_item_count {
            if self.contents.len() >= max {
                return false;
            }
        }
        if let Some(max) = self.max_contains_volume {
            if self.contained_volume() + item.total_volume() > max {
                return false;
            }
        }
        if let Some(max) = self.max_contains_weight {
            if self.contained_weight() + item.total_weight() > max {
                return false;
            }
        }
        true
    }

    fn insert_item(&mut self, item: &Item) -> bool {
        if !self.can_contain(item) {
            return false;
        }
        self.contents.push(item.clone());
        true
    }

    fn add(&mut self, item: Item) {
        self.contents.push(item);
    }

    fn remove_item(&mut self, item: &Item) -> Option<Item> {
        let index = self.contents.iter().position(|stored| stored == item)?;
        Some(self.contents.remove(index))
    }

    fn all_items(&self) -> Vec<&Item> {
        let mut items = Vec::new();
        for item in &self.contents {
            items.push(item);
            items.extend(item.contents.all_items());
        }
        items
    }

    fn for_each_item_mut(&mut self, f: &mut dyn FnMut(&mut Item)) {
        for item in self.contents.iter_mut() {
            f(item);
            item.contents.for_each_item_mut(&mut *f);
        }
    }

    fn item_size_modifier(&self) -> Volume {
        if self.rigid {
            Volume::zero()
        } else {
            self.contained_volume()
        }
    }

    fn item_weight_modifier(&self) -> Mass {
        self.contained_weight()
    }

    fn empty(&self) -> bool {
        self.contents.is_empty()
    }

    fn stacks_with(&self, other: &Self) -> bool {
        self.pocket_type == other.pocket_type && self.contents == other.contents
    }

    fn clear_items(&mut self) {
        self.contents.clear();
    }
}
