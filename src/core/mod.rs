pub mod contents;
pub mod engine;
pub mod item;
pub mod pocket;

pub use crate::core::item::Item;
pub use crate::domain::ports::{Pocket, PocketType, Storage};
pub use crate::domain::units::{Mass, Volume};
pub use crate::utils::error::Result;
