//! Error types and the failure-reporting collaborator
//!
//! Nothing in this crate returns these errors to the caller of `evaluate`,
//! `load` or `snapshot`. They are handed to an [`ErrorReporter`] instead.

use std::path::PathBuf;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::warn;

/// Failures observed while evaluating checks or loading configuration
#[derive(Debug, Error)]
pub enum InfoError {
    /// A health check returned an error
    #[error("health check '{check}' failed: {reason}")]
    CheckFailed { check: String, reason: String },

    /// A health check panicked
    #[error("health check '{check}' panicked: {message}")]
    CheckPanicked { check: String, message: String },

    /// The config document could not be read
    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config document is not valid JSON
    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The config document parsed, but its top level is not an object
    #[error("config file {} does not contain a JSON object", .path.display())]
    ConfigNotObject { path: PathBuf },

    /// The settings layer could not resolve the config location
    #[error("failed to resolve settings: {0}")]
    Settings(#[from] config::ConfigError),
}

impl InfoError {
    /// Returns true for failures raised by a health check
    pub fn is_check_failure(&self) -> bool {
        matches!(
            self,
            InfoError::CheckFailed { .. } | InfoError::CheckPanicked { .. }
        )
    }

    /// Returns true for failures raised while loading configuration
    pub fn is_config_failure(&self) -> bool {
        matches!(
            self,
            InfoError::ConfigRead { .. }
                | InfoError::ConfigParse { .. }
                | InfoError::ConfigNotObject { .. }
                | InfoError::Settings(_)
        )
    }
}

/// Receives failures that were isolated instead of propagated
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &InfoError);
}

/// Reports failures as `tracing` warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &InfoError) {
        match error {
            InfoError::CheckFailed { check, .. } | InfoError::CheckPanicked { check, .. } => {
                warn!(check = %check, error = %error, "Health check counted as unhealthy");
            }
            _ => warn!(error = %error, "Config left unchanged"),
        }
    }
}

/// Keeps the rendered text of every reported failure
#[derive(Debug, Default)]
pub struct MemoryReporter {
    entries: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the messages reported so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drops all recorded messages
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl ErrorReporter for MemoryReporter {
    fn report(&self, error: &InfoError) {
        self.entries.lock().push(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_records_in_order() {
        let reporter = MemoryReporter::new();
        reporter.report(&InfoError::CheckFailed {
            check: "db".to_string(),
            reason: "connection refused".to_string(),
        });
        reporter.report(&InfoError::ConfigNotObject {
            path: PathBuf::from("config.json"),
        });

        let messages = reporter.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "health check 'db' failed: connection refused");
        assert_eq!(
            messages[1],
            "config file config.json does not contain a JSON object"
        );

        reporter.clear();
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_error_classification() {
        let check = InfoError::CheckPanicked {
            check: "cache".to_string(),
            message: "boom".to_string(),
        };
        assert!(check.is_check_failure());
        assert!(!check.is_config_failure());

        let read = InfoError::ConfigRead {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(read.is_config_failure());
        assert!(!read.is_check_failure());
    }
}
