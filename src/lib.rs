pub mod command;
pub mod config;
pub mod context;
pub mod document;
mod error;
pub mod locate;
pub mod notice;
pub mod setting;

pub use command::{Command, Outcome};
pub use config::{Config, ConfigError, ToolSettings};
pub use context::AppContext;
pub use document::ConfigDocument;
pub use error::Error;
pub use locate::{locate, ConfigLocation};
pub use notice::StatusNotice;
