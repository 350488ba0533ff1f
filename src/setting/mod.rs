//! Reading and rewriting `define` constants in `wp-config.php` text.
//!
//! Everything here is a pure function over the file content; reading and
//! writing the file itself lives in [`crate::document`].

mod access;
mod registry;
mod statement;

pub use access::{get, require, set};
pub use registry::{
    definitions, lookup, toggled, SettingDefinition, ValueKind, ENVIRONMENT_TYPES,
};
pub use statement::{statements, Literal, Statement, Statements};
