pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::{ContentsError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "item-contents")]
#[command(about = "Inspect and edit multi-pocket item containers")]
pub struct CliConfig {
    /// Container JSON file to load
    #[arg(long)]
    pub input: Option<String>,

    /// Where to write the container after the operation
    #[arg(long)]
    pub output: Option<String>,

    /// Item JSON file to insert (first-fit)
    #[arg(long)]
    pub insert: Option<String>,

    /// Insert through the legacy catch-all pocket instead of first-fit
    #[arg(long, requires = "insert")]
    pub legacy: bool,

    /// Item JSON file to remove
    #[arg(long, conflicts_with = "insert")]
    pub remove: Option<String>,

    /// Clear every pocket
    #[arg(long)]
    pub clear: bool,

    /// Pretty-print written JSON
    #[arg(long)]
    pub pretty: bool,

    /// Optional TOML config file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// What the tool should do to the loaded container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "item")]
pub enum Operation {
    Inspect,
    Insert(String),
    InsertLegacy(String),
    Remove(String),
    Clear,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn operation(&self) -> Operation {
        match (&self.insert, &self.remove) {
            (Some(path), _) if self.legacy => Operation::InsertLegacy(path.clone()),
            (Some(path), _) => Operation::Insert(path.clone()),
            (None, Some(path)) => Operation::Remove(path.clone()),
            (None, None) if self.clear => Operation::Clear,
            (None, None) => Operation::Inspect,
        }
    }

    /// 套用 TOML 設定中命令列未指定的值
    pub fn merge_toml(&mut self, toml: &toml_config::TomlConfig) {
        if self.input.is_none() {
            self.input = toml.input_path().map(str::to_string);
        }
        if self.output.is_none() {
            self.output = toml.output_path().map(str::to_string);
        }
        if !self.pretty {
            self.pretty = toml.pretty();
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let input = self.input.as_deref().ok_or_else(|| ContentsError::ConfigError {
            message: "no input container given (use --input or [input].path)".to_string(),
        })?;
        validate_path("input", input)?;

        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        if let Some(path) = &self.insert {
            validate_path("insert", path)?;
        }
        if let Some(path) = &self.remove {
            validate_path("remove", path)?;
        }
        if self.clear && (self.insert.is_some() || self.remove.is_some()) {
            return Err(ContentsError::ConfigError {
                message: "--clear cannot be combined with --insert or --remove".to_string(),
            });
        }
        Ok(())
    }
}
