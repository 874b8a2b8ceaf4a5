//! Core health check trait and types

use std::borrow::Cow;
use std::time::Duration;

/// Outcome of a single health check invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Check returned `true`
    Healthy,
    /// Check returned `false`
    Unhealthy,
    /// Check returned an error or panicked
    Failed(String),
}

impl CheckOutcome {
    /// Returns true only for [`CheckOutcome::Healthy`]
    pub fn is_healthy(&self) -> bool {
        matches!(self, CheckOutcome::Healthy)
    }

    /// Returns true if the check errored or panicked
    pub fn is_failure(&self) -> bool {
        matches!(self, CheckOutcome::Failed(_))
    }

    /// Returns the outcome as a colored string
    pub fn as_colored_str(&self) -> String {
        use colored::Colorize;
        match self {
            CheckOutcome::Healthy => "HEALTHY".green().to_string(),
            CheckOutcome::Unhealthy => "UNHEALTHY".red().to_string(),
            CheckOutcome::Failed(_) => "FAILED".red().bold().to_string(),
        }
    }
}

/// Result of one check within an evaluation pass
#[derive(Debug, Clone)]
pub struct CheckRecord {
    /// Display name of the check
    pub name: String,
    /// What the check reported
    pub outcome: CheckOutcome,
    /// How long the check took
    pub duration: Duration,
}

impl CheckRecord {
    pub fn new(name: impl Into<String>, outcome: CheckOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
            duration: Duration::ZERO,
        }
    }

    /// Sets the duration for this record
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// A check of one dependency or resource
///
/// `Ok(true)` counts as healthy. `Ok(false)`, an error, or a panic all count
/// as unhealthy.
pub trait HealthCheck: Send + Sync {
    /// Perform the health check
    fn check(&self) -> anyhow::Result<bool>;

    /// Name used in logs and reports
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// Values a closure-based check may return
pub trait IntoCheckOutcome {
    fn into_check_result(self) -> anyhow::Result<bool>;
}

impl IntoCheckOutcome for bool {
    fn into_check_result(self) -> anyhow::Result<bool> {
        Ok(self)
    }
}

impl<E> IntoCheckOutcome for Result<bool, E>
where
    E: Into<anyhow::Error>,
{
    fn into_check_result(self) -> anyhow::Result<bool> {
        self.map_err(Into::into)
    }
}

/// Adapts a zero-argument closure into a [`HealthCheck`]
pub struct FnCheck<F> {
    name: Cow<'static, str>,
    func: F,
}

impl<F, R> FnCheck<F>
where
    F: Fn() -> R + Send + Sync,
    R: IntoCheckOutcome,
{
    pub fn new(func: F) -> Self {
        Self {
            name: Cow::Borrowed("anonymous"),
            func,
        }
    }

    pub fn named(name: impl Into<Cow<'static, str>>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F, R> HealthCheck for FnCheck<F>
where
    F: Fn() -> R + Send + Sync,
    R: IntoCheckOutcome,
{
    fn check(&self) -> anyhow::Result<bool> {
        (self.func)().into_check_result()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
