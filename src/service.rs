//! The app-info service object

use std::sync::{Arc, OnceLock};

use crate::config::ConfigStore;
use crate::error::{ErrorReporter, TracingReporter};
use crate::health::checks::{ConfigFileCheck, SystemInfoCheck};
use crate::health::{HealthCheck, HealthRegistry, HealthReport, IntoCheckOutcome, StatusCode};
use crate::snapshot::{self, Clock, HostIdentity, LocalClock, Snapshot, SystemHost};

/// Owns one health registry, one config store and the host collaborators
///
/// Build one at startup and pass it by reference, or use
/// [`AppInfo::global`] for a lazily created process-wide instance.
pub struct AppInfo {
    registry: HealthRegistry,
    config: ConfigStore,
    reporter: Arc<dyn ErrorReporter>,
    host: Box<dyn HostIdentity>,
    clock: Box<dyn Clock>,
}

static GLOBAL: OnceLock<AppInfo> = OnceLock::new();

impl AppInfo {
    /// Creates a service reading `CONFIG_FILE_PATH` and the running host
    pub fn new() -> Self {
        Self::with_reporter(Arc::new(TracingReporter))
    }

    /// Creates a service whose registry and config store share `reporter`
    pub fn with_reporter(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            registry: HealthRegistry::with_reporter(reporter.clone()),
            config: ConfigStore::new().with_reporter(reporter.clone()),
            reporter,
            host: Box::new(SystemHost),
            clock: Box::new(LocalClock),
        }
    }

    /// Returns the process-wide instance, creating it on first use
    pub fn global() -> &'static AppInfo {
        GLOBAL.get_or_init(AppInfo::new)
    }

    /// Replaces the config store
    ///
    /// The new store reports through this service's reporter.
    pub fn with_config(mut self, config: ConfigStore) -> Self {
        self.config = config.with_reporter(self.reporter.clone());
        self
    }

    /// Replaces the host identity source
    pub fn with_host<H: HostIdentity + 'static>(mut self, host: H) -> Self {
        self.host = Box::new(host);
        self
    }

    /// Replaces the clock used for the snapshot timestamp
    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Adds a check while building the service
    pub fn add_check<C: HealthCheck + 'static>(self, check: C) -> Self {
        self.registry.register(check);
        self
    }

    /// Adds the built-in config document and system info checks
    ///
    /// The config check reads from the same location as the config store.
    pub fn with_default_checks(self) -> Self {
        let locator = self.config.locator().clone();
        self.add_check(ConfigFileCheck::with_locator(locator))
            .add_check(SystemInfoCheck::new())
    }

    /// Appends a check to the registry
    pub fn register<C: HealthCheck + 'static>(&self, check: C) {
        self.registry.register(check);
    }

    /// Appends a closure returning `bool` or `Result<bool, E>`
    pub fn register_fn<F, R>(&self, func: F)
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: IntoCheckOutcome,
    {
        self.registry.register_fn(func);
    }

    /// The health registry
    pub fn registry(&self) -> &HealthRegistry {
        &self.registry
    }

    /// The config store
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Evaluates every registered check
    pub fn status(&self) -> StatusCode {
        self.registry.evaluate()
    }

    /// Builds a fresh snapshot. Never fails; missing inputs become defaults.
    ///
    /// Config is loaded before the checks run, so checks that read it see
    /// the document on the first snapshot too.
    pub fn snapshot(&self) -> Snapshot {
        self.config.ensure_loaded();
        self.compose(self.registry.evaluate())
    }

    /// Builds a snapshot together with the per-check report behind its status
    ///
    /// Each check still runs exactly once.
    pub fn inspect(&self) -> (Snapshot, HealthReport) {
        self.config.ensure_loaded();
        let report = self.registry.run();
        (self.compose(report.status()), report)
    }

    fn compose(&self, status: StatusCode) -> Snapshot {
        snapshot::compose(status, &self.config, self.host.as_ref(), self.clock.as_ref())
    }
}

impl Default for AppInfo {
    fn default() -> Self {
        Self::new()
    }
}
