//! Config document health check

use crate::config::{SourceLocator, read_document};
use crate::health::check::HealthCheck;

/// Checks that the config document can be read and parsed
///
/// Reads the file on every call without touching any [`ConfigStore`]
/// cache, so it notices a document that broke after startup.
///
/// [`ConfigStore`]: crate::config::ConfigStore
pub struct ConfigFileCheck {
    locator: SourceLocator,
}

impl ConfigFileCheck {
    /// Creates a check against the `CONFIG_FILE_PATH` location
    pub fn new() -> Self {
        Self::with_locator(SourceLocator::Environment)
    }

    pub fn with_locator(locator: SourceLocator) -> Self {
        Self { locator }
    }
}

impl Default for ConfigFileCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthCheck for ConfigFileCheck {
    fn name(&self) -> &str {
        "Configuration"
    }

    fn check(&self) -> anyhow::Result<bool> {
        let path = self.locator.resolve()?;
        let document = read_document(&path)?;
        Ok(!document.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let check = ConfigFileCheck::with_locator(SourceLocator::fixed(&path));

        assert!(check.check().is_err());

        std::fs::write(&path, "{}").unwrap();
        assert!(!check.check().unwrap());

        std::fs::write(&path, r#"{"Version":"1.0.0"}"#).unwrap();
        assert!(check.check().unwrap());
    }
}
