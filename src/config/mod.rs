//! Application configuration
//!
//! [`Settings`] locates the config document; [`ConfigStore`] caches its
//! contents.

mod settings;
mod store;

pub use settings::{CONFIG_FILE_PATH_VAR, DEFAULT_CONFIG_FILE, Settings, SourceLocator};
pub use store::{ConfigStore, read_document};
