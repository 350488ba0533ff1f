//! Layered configuration for the tool itself.
//!
//! This is the tool's own configuration (which file to look for, how to
//! reveal it), not the `wp-config.php` being edited.

mod builder;
mod env;
mod error;
mod file;
mod settings;
mod source;

pub use builder::Config;
pub use env::EnvSource;
pub use error::ConfigError;
pub use file::FileSource;
pub use settings::ToolSettings;
pub use source::{ConfigEntry, ConfigSource};
