use std::path::PathBuf;

use crate::config::ConfigError;
use crate::setting::ValueKind;
use thiserror::Error;

/// Top-level error type for the wp-debug-mode library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("unable to find {file_name} above {start}")]
    ConfigNotFound { start: PathBuf, file_name: String },

    #[error("no active document to search from")]
    NoActiveDocument,

    #[error("{constant} is not defined in the config file")]
    SettingNotFound { constant: &'static str },

    #[error("{constant} is defined as '{found}', expected {expected}")]
    UnexpectedShape {
        constant: &'static str,
        expected: ValueKind,
        found: String,
    },

    #[error("unknown setting: {0}")]
    UnregisteredSetting(String),

    #[error("invalid value {value:?} for {setting}: {reason}")]
    InvalidValue {
        setting: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("prompt failed: {source}")]
    Prompt { source: std::io::Error },

    #[error("failed to run '{program}': {reason}")]
    Launch { program: String, reason: String },
}
