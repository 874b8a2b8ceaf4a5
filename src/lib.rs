//! App Info
//!
//! On-demand health and build metadata for a running process: a registry of
//! health checks classified into a tri-state status, a lazily loaded JSON
//! config document, and a snapshot that combines both with host identity.
//!
//! # Example
//!
//! ```no_run
//! use app_info::AppInfo;
//!
//! let info = AppInfo::new();
//! info.register_fn(|| true);
//!
//! let snapshot = info.snapshot();
//! println!("{}", serde_json::to_string(&snapshot).unwrap());
//! ```

/// Locating and caching the JSON config document
pub mod config;

/// Error types and failure reporters
pub mod error;

/// Health check registry and status classification
pub mod health;

/// The service object tying registry, config and host together
pub mod service;

/// Snapshot composition and host/clock collaborators
pub mod snapshot;

pub use error::{ErrorReporter, InfoError, MemoryReporter, TracingReporter};
pub use health::{HealthCheck, HealthRegistry, HealthReport, StatusCode};
pub use service::AppInfo;
pub use snapshot::Snapshot;
