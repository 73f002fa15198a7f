use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentsError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid unit value '{value}': {reason}")]
    InvalidUnit { value: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {message}")]
    TomlError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Schema,
    Data,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

const MISSING_FIELD_PREFIX: &str = "Missing required field: ";

impl ContentsError {
    /// Maps a `serde_json` error, recovering a `MissingField` raised by a
    /// nested record (serde carries it as a plain message).
    pub fn from_json(err: serde_json::Error) -> Self {
        if err.is_data() {
            let message = err.to_string();
            if let Some(field) = message
                .strip_prefix(MISSING_FIELD_PREFIX)
                .and_then(|rest| rest.split_whitespace().next())
            {
                return ContentsError::MissingField {
                    field: field.to_string(),
                };
            }
        }
        ContentsError::SerializationError(err)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ContentsError::MissingField { .. } | ContentsError::SerializationError(_) => {
                ErrorCategory::Schema
            }
            ContentsError::InvalidUnit { .. } | ContentsError::ValidationError { .. } => {
                ErrorCategory::Data
            }
            ContentsError::IoError(_) => ErrorCategory::Io,
            ContentsError::TomlError { .. }
            | ContentsError::ConfigError { .. }
            | ContentsError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Schema | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ContentsError::MissingField { field } => {
                format!("Add the '{}' field to the container record", field)
            }
            ContentsError::InvalidUnit { .. } => {
                "Write volumes as '<n> ml' / '<n> L' and masses as '<n> mg' / '<n> g' / '<n> kg'"
                    .to_string()
            }
            ContentsError::SerializationError(_) => {
                "Check that the input file is valid JSON in the expected shape".to_string()
            }
            ContentsError::IoError(_) => {
                "Check that the file exists and the path is readable/writable".to_string()
            }
            ContentsError::TomlError { .. } => "Check the TOML syntax of the config file".to_string(),
            ContentsError::ConfigError { .. } | ContentsError::InvalidConfigValueError { .. } => {
                "Review the command line arguments and config file values".to_string()
            }
            ContentsError::ValidationError { .. } => "Fix the reported value and retry".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ContentsError::MissingField { field } => {
                format!("The container data is missing '{}'", field)
            }
            ContentsError::IoError(e) => format!("Could not access file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentsError>;
