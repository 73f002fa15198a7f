use crate::config::Operation;
use crate::core::contents::ItemContents;
use crate::core::item::Item;
use crate::core::pocket::ItemPocket;
use crate::core::Storage;
use crate::domain::units::{Mass, Volume};
use crate::utils::error::{ContentsError, Result};
use serde::Serialize;

/// Snapshot of a container after an operation ran.
#[derive(Debug, Clone, Serialize)]
pub struct ContentsReport {
    pub pocket_count: usize,
    pub nestable: bool,
    pub empty: bool,
    pub item_size_modifier: Volume,
    pub item_weight_modifier: Mass,
    pub items: Vec<String>,
    /// `Some(false)` when an insert was rejected or a removal found nothing.
    pub succeeded: Option<bool>,
}

impl ContentsReport {
    pub fn from_contents(contents: &ItemContents<ItemPocket>, succeeded: Option<bool>) -> Self {
        Self {
            pocket_count: contents.pocket_count(),
            nestable: contents.nestable(),
            empty: contents.empty(),
            item_size_modifier: contents.item_size_modifier(),
            item_weight_modifier: contents.item_weight_modifier(),
            items: contents.all_items().iter().map(|item| item.id.clone()).collect(),
            succeeded,
        }
    }
}

pub struct ContentsEngine<S: Storage> {
    storage: S,
}

impl<S: Storage> ContentsEngine<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn load_container(&self, path: &str) -> Result<ItemContents<ItemPocket>> {
        let data = self.storage.read_file(path).await?;
        let value: serde_json::Value = serde_json::from_slice(&data)?;
        let contents = ItemContents::load(&value)?;
        tracing::info!(
            "Loaded container from {} ({} pockets)",
            path,
            contents.pocket_count()
        );
        Ok(contents)
    }

    pub async fn load_item(&self, path: &str) -> Result<Item> {
        let data = self.storage.read_file(path).await?;
        serde_json::from_slice(&data).map_err(ContentsError::from_json)
    }

    pub async fn save_container(
        &self,
        path: &str,
        contents: &ItemContents<ItemPocket>,
        pretty: bool,
    ) -> Result<()> {
        let json = if pretty {
            contents.to_json_pretty()?
        } else {
            contents.to_json_string()?
        };
        self.storage.write_file(path, json.as_bytes()).await?;
        tracing::info!("Saved container to {}", path);
        Ok(())
    }

    /// Applies `operation` in place and reports the resulting state.
    pub async fn apply(
        &self,
        contents: &mut ItemContents<ItemPocket>,
        operation: &Operation,
    ) -> Result<ContentsReport> {
        let succeeded = match operation {
            Operation::Inspect => None,
            Operation::Insert(path) => {
                let item = self.load_item(path).await?;
                let accepted = contents.insert_item(&item);
                if accepted {
                    tracing::info!("Inserted '{}'", item.id);
                } else {
                    tracing::warn!("No pocket accepted '{}'", item.id);
                }
                Some(accepted)
            }
            Operation::InsertLegacy(path) => {
                let item = self.load_item(path).await?;
                tracing::info!("Inserting '{}' through the legacy pocket", item.id);
                contents.insert_legacy(item);
                Some(true)
            }
            Operation::Remove(path) => {
                let item = self.load_item(path).await?;
                let removed = contents.remove_item(&item).is_some();
                if removed {
                    tracing::info!("Removed '{}'", item.id);
                } else {
                    tracing::warn!("'{}' not found in any pocket", item.id);
                }
                Some(removed)
            }
            Operation::Clear => {
                contents.clear_items();
                tracing::info!("Cleared {} pockets", contents.pocket_count());
                Some(true)
            }
        };

        Ok(ContentsReport::from_contents(contents, succeeded))
    }

    pub async fn run(
        &self,
        input: &str,
        operation: &Operation,
        output: Option<&str>,
        pretty: bool,
    ) -> Result<ContentsReport> {
        let mut contents = self.load_container(input).await?;
        let report = self.apply(&mut contents, operation).await?;
        if let Some(output) = output {
            self.save_container(output, &contents, pretty).await?;
        }
        Ok(report)
    }
}
