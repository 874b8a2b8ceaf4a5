//! Registry that evaluates health checks and classifies the result

use std::any::Any;
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::debug;

use super::check::{CheckOutcome, CheckRecord, FnCheck, HealthCheck, IntoCheckOutcome};
use super::status::StatusCode;
use crate::error::{ErrorReporter, InfoError, TracingReporter};

/// Results from one evaluation pass over the registry
#[derive(Debug, Clone)]
pub struct HealthReport {
    /// Per-check records, in registration order
    pub records: Vec<CheckRecord>,
    /// Total number of checks run
    pub total: usize,
    /// Number of checks that returned `true`
    pub healthy: usize,
    /// Number of checks that returned `false`, errored or panicked
    pub unhealthy: usize,
}

impl HealthReport {
    /// Classifies this pass
    pub fn status(&self) -> StatusCode {
        StatusCode::classify(self.healthy, self.unhealthy)
    }

    /// Number of checks that errored or panicked
    pub fn failures(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.outcome.is_failure())
            .count()
    }
}

/// Ordered, append-only collection of health checks
pub struct HealthRegistry {
    checks: RwLock<Vec<Arc<dyn HealthCheck>>>,
    reporter: Arc<dyn ErrorReporter>,
}

impl HealthRegistry {
    /// Creates an empty registry that reports failures through `tracing`
    pub fn new() -> Self {
        Self::with_reporter(Arc::new(TracingReporter))
    }

    /// Creates an empty registry with a custom failure reporter
    pub fn with_reporter(reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            checks: RwLock::new(Vec::new()),
            reporter,
        }
    }

    /// Appends a check. Registering the same check twice runs it twice.
    pub fn register<C: HealthCheck + 'static>(&self, check: C) {
        self.register_shared(Arc::new(check));
    }

    /// Appends a check that is shared with other owners
    pub fn register_shared(&self, check: Arc<dyn HealthCheck>) {
        self.checks.write().push(check);
    }

    /// Appends a closure returning `bool` or `Result<bool, E>`
    pub fn register_fn<F, R>(&self, func: F)
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: IntoCheckOutcome,
    {
        self.register(FnCheck::new(func));
    }

    /// Appends a closure with a display name
    pub fn register_named<F, R>(&self, name: impl Into<Cow<'static, str>>, func: F)
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: IntoCheckOutcome,
    {
        self.register(FnCheck::named(name, func));
    }

    pub fn len(&self) -> usize {
        self.checks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.read().is_empty()
    }

    /// Runs every check once and classifies the result
    pub fn evaluate(&self) -> StatusCode {
        self.run().status()
    }

    /// Runs every check once, in registration order, on the calling thread
    ///
    /// The check list is copied out of the lock first, so a check may call
    /// [`HealthRegistry::register`]; the new entry takes part from the next
    /// pass on. A check that never returns blocks the pass.
    pub fn run(&self) -> HealthReport {
        let checks: Vec<Arc<dyn HealthCheck>> = self.checks.read().clone();

        let mut records = Vec::with_capacity(checks.len());
        let mut healthy = 0;
        let mut unhealthy = 0;

        for check in checks {
            let start = Instant::now();
            let outcome = self.invoke(check.as_ref());
            let duration = start.elapsed();

            if outcome.is_healthy() {
                healthy += 1;
            } else {
                unhealthy += 1;
            }
            debug!(check = check.name(), ?outcome, ?duration, "Health check finished");

            records.push(CheckRecord::new(check.name(), outcome).with_duration(duration));
        }

        let total = records.len();

        HealthReport {
            records,
            total,
            healthy,
            unhealthy,
        }
    }

    fn invoke(&self, check: &dyn HealthCheck) -> CheckOutcome {
        match panic::catch_unwind(AssertUnwindSafe(|| check.check())) {
            Ok(Ok(true)) => CheckOutcome::Healthy,
            Ok(Ok(false)) => CheckOutcome::Unhealthy,
            Ok(Err(e)) => {
                let reason = format!("{e:#}");
                self.reporter.report(&InfoError::CheckFailed {
                    check: check.name().to_string(),
                    reason: reason.clone(),
                });
                CheckOutcome::Failed(reason)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                self.reporter.report(&InfoError::CheckPanicked {
                    check: check.name().to_string(),
                    message: message.clone(),
                });
                CheckOutcome::Failed(message)
            }
        }
    }
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
