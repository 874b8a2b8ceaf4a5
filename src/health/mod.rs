//! Health check registry and status classification
//!
//! Checks are registered once and evaluated on demand. Every check runs on
//! each pass, in registration order; a check that errors or panics counts as
//! unhealthy and the pass continues.
//!
//! # Example
//!
//! ```
//! use app_info::health::{HealthRegistry, StatusCode};
//!
//! let registry = HealthRegistry::new();
//! registry.register_named("database", || true);
//! registry.register_named("cache", || false);
//!
//! assert_eq!(registry.evaluate(), StatusCode::Degraded);
//! ```

pub mod check;
pub mod checks;
pub mod registry;
pub mod reporter;
pub mod status;

pub use check::{CheckOutcome, CheckRecord, FnCheck, HealthCheck, IntoCheckOutcome};
pub use registry::{HealthRegistry, HealthReport};
pub use reporter::{format_report, print_report};
pub use status::StatusCode;
