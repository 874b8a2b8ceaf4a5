//! Built-in health checks

pub mod config;
pub mod system_info;

pub use config::ConfigFileCheck;
pub use system_info::SystemInfoCheck;
