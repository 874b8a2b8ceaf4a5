//! Lazily loaded key/value store backed by a JSON document

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::settings::{DEFAULT_CONFIG_FILE, SourceLocator};
use crate::error::{ErrorReporter, InfoError, TracingReporter};

/// Cached mapping of config keys to JSON values
///
/// An empty mapping means "not loaded yet": [`ConfigStore::ensure_loaded`]
/// loads again on every call until the mapping holds at least one key. Once
/// non-empty it is never reloaded implicitly, even if the file changes.
pub struct ConfigStore {
    values: RwLock<Map<String, Value>>,
    locator: SourceLocator,
    reporter: Arc<dyn ErrorReporter>,
}

impl ConfigStore {
    /// Creates an empty store that resolves `CONFIG_FILE_PATH` at load time
    pub fn new() -> Self {
        Self::with_locator(SourceLocator::Environment)
    }

    /// Creates an empty store that always reads `path`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::with_locator(SourceLocator::Fixed(path.into()))
    }

    pub fn with_locator(locator: SourceLocator) -> Self {
        Self {
            values: RwLock::new(Map::new()),
            locator,
            reporter: Arc::new(TracingReporter),
        }
    }

    /// Replaces the failure reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn locator(&self) -> &SourceLocator {
        &self.locator
    }

    /// Loads the document from the resolved location
    ///
    /// Failures are reported and leave the current mapping untouched.
    pub fn load(&self) {
        let path = match self.locator.resolve() {
            Ok(path) => path,
            Err(e) => {
                self.reporter.report(&e);
                PathBuf::from(DEFAULT_CONFIG_FILE)
            }
        };
        self.load_from(path);
    }

    /// Loads the document at `path`, reporting any failure
    pub fn load_from(&self, path: impl AsRef<Path>) {
        if let Err(e) = self.try_load_from(path) {
            self.reporter.report(&e);
        }
    }

    /// Loads the document at `path` and returns the number of keys read
    ///
    /// The mapping is replaced as a whole, and only after the document
    /// parsed into a JSON object.
    pub fn try_load_from(&self, path: impl AsRef<Path>) -> Result<usize, InfoError> {
        let path = path.as_ref();
        let map = read_document(path)?;

        let keys = map.len();
        *self.values.write() = map;
        info!(path = %path.display(), keys, "Loaded config");

        Ok(keys)
    }

    /// Loads if the mapping is empty; otherwise does nothing
    pub fn ensure_loaded(&self) {
        let empty = self.values.read().is_empty();
        if empty {
            debug!("Config empty, loading");
            self.load();
        }
    }

    /// Looks up `key`, falling back to `default`. Never loads.
    pub fn get(&self, key: &str, default: impl Into<Value>) -> Value {
        self.values
            .read()
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    /// Looks up `key` as text
    ///
    /// Strings are returned as-is; any other JSON value is rendered as JSON.
    pub fn get_str(&self, key: &str, default: &str) -> String {
        match self.values.read().get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => default.to_string(),
        }
    }

    /// Clears the mapping so the next [`ConfigStore::ensure_loaded`] reloads
    pub fn invalidate(&self) {
        self.values.write().clear();
    }

    /// Returns true once a non-empty document has been loaded
    pub fn is_loaded(&self) -> bool {
        !self.values.read().is_empty()
    }

    /// Returns a copy of the current mapping
    pub fn values(&self) -> Map<String, Value> {
        self.values.read().clone()
    }
}

/// Reads and parses the JSON object stored at `path`
pub fn read_document(path: &Path) -> Result<Map<String, Value>, InfoError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InfoError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value =
        serde_json::from_str(&contents).map_err(|source| InfoError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    match document {
        Value::Object(map) => Ok(map),
        _ => Err(InfoError::ConfigNotObject {
            path: path.to_path_buf(),
        }),
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::error::MemoryReporter;

    fn write_doc(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_document() {
        let file = write_doc(r#"{"Version":"1.2.3","Replicas":3}"#);
        let store = ConfigStore::with_path(file.path());

        store.load();

        assert!(store.is_loaded());
        assert_eq!(store.get("Version", "Unknown"), json!("1.2.3"));
        assert_eq!(store.get("Missing", "Unknown"), json!("Unknown"));
        assert_eq!(store.get("Replicas", 0), json!(3));
        assert_eq!(store.get_str("Replicas", "Unknown"), "3");
        assert_eq!(store.get_str("Version", "Unknown"), "1.2.3");
    }

    #[test]
    fn test_missing_file_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Arc::new(MemoryReporter::new());
        let store =
            ConfigStore::with_path(dir.path().join("absent.json")).with_reporter(reporter.clone());

        store.load();

        assert!(!store.is_loaded());
        assert_eq!(reporter.len(), 1);
        assert!(reporter.messages()[0].starts_with("failed to read config file"));
    }

    #[test]
    fn test_malformed_document_leaves_mapping_unchanged() {
        let good = write_doc(r#"{"ApplicationName":"billing"}"#);
        let bad = write_doc(r#"{"ApplicationName":"other", "Vers"#);
        let reporter = Arc::new(MemoryReporter::new());
        let store = ConfigStore::with_path(good.path()).with_reporter(reporter.clone());

        store.load();
        store.load_from(bad.path());

        assert_eq!(store.get_str("ApplicationName", "Unknown"), "billing");
        assert_eq!(reporter.len(), 1);
        assert!(reporter.messages()[0].starts_with("failed to parse config file"));
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let file = write_doc(r#"["not", "an", "object"]"#);
        let store = ConfigStore::with_path(file.path());

        let err = store.try_load_from(file.path()).unwrap_err();
        assert!(matches!(err, InfoError::ConfigNotObject { .. }));
        assert!(!store.is_loaded());
    }

    #[test]
    fn test_ensure_loaded_retries_while_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let reporter = Arc::new(MemoryReporter::new());
        let store = ConfigStore::with_path(&path).with_reporter(reporter.clone());

        store.ensure_loaded();
        store.ensure_loaded();
        assert_eq!(reporter.len(), 2);

        std::fs::write(&path, r#"{"Version":"2.0.0"}"#).unwrap();
        store.ensure_loaded();
        assert_eq!(store.get_str("Version", "Unknown"), "2.0.0");

        // Cached once non-empty, even though the file changed
        std::fs::write(&path, r#"{"Version":"3.0.0"}"#).unwrap();
        store.ensure_loaded();
        assert_eq!(store.get_str("Version", "Unknown"), "2.0.0");
        assert_eq!(reporter.len(), 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let file = write_doc(r#"{"Version":"1.0.0"}"#);
        let store = ConfigStore::with_path(file.path());
        store.ensure_loaded();

        std::fs::write(file.path(), r#"{"Version":"1.1.0"}"#).unwrap();
        store.invalidate();
        assert!(!store.is_loaded());

        store.ensure_loaded();
        assert_eq!(store.get_str("Version", "Unknown"), "1.1.0");
    }

    #[test]
    fn test_get_never_loads() {
        let file = write_doc(r#"{"Version":"1.0.0"}"#);
        let store = ConfigStore::with_path(file.path());

        assert_eq!(store.get_str("Version", "Unknown"), "Unknown");
        assert!(!store.is_loaded());
    }
}
