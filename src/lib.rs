pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, Operation};

pub use core::{
    contents::{ItemContents, ItemLocation},
    engine::{ContentsEngine, ContentsReport},
    item::Item,
    pocket::ItemPocket,
};
pub use domain::{
    ports::{Pocket, PocketType, Storage},
    units::{Mass, Volume},
};
pub use utils::error::{ContentsError, Result};
