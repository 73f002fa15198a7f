use crate::domain::units::{Mass, Volume};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Category tag of a pocket. `Legacy` is reserved for the catch-all pocket
/// created when items are placed without going through acceptance rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PocketType {
    Container,
    Magazine,
    Corpse,
    Software,
    #[serde(alias = "LEGACY_CONTAINER")]
    Legacy,
}

/// A single storage slot with its own acceptance rules.
///
/// The container aggregate only ever talks to pockets through this trait, so
/// capacity arithmetic stays inside each implementation.
pub trait Pocket {
    type Item;

    /// Creates an empty pocket of the reserved legacy category.
    fn legacy() -> Self
    where
        Self: Sized;

    fn pocket_type(&self) -> PocketType;

    fn is_type(&self, ty: PocketType) -> bool {
        self.pocket_type() == ty
    }

    /// Whether `item` would be accepted right now. Must not mutate.
    fn can_contain(&self, item: &Self::Item) -> bool;

    /// Validated insert; re-checks acceptance and returns whether the item was stored.
    fn insert_item(&mut self, item: &Self::Item) -> bool;

    /// Forced insert, bypassing acceptance checks.
    fn add(&mut self, item: Self::Item);

    /// Removes the first stored item equal to `item`.
    fn remove_item(&mut self, item: &Self::Item) -> Option<Self::Item>;

    /// Every item held by this pocket, transitively, in storage order.
    fn all_items(&self) -> Vec<&Self::Item>;

    /// Visits the same items as [`Pocket::all_items`], in the same order, with mutable access.
    fn for_each_item_mut(&mut self, f: &mut dyn FnMut(&mut Self::Item));

    fn item_size_modifier(&self) -> Volume;

    fn item_weight_modifier(&self) -> Mass;

    fn empty(&self) -> bool;

    fn stacks_with(&self, other: &Self) -> bool;

    fn clear_items(&mut self);
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
