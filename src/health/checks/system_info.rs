//! System information health check

use sysinfo::System;
use tracing::debug;

use crate::health::check::HealthCheck;

/// Checks that the host reports CPUs and enough available memory
pub struct SystemInfoCheck {
    min_available_bytes: u64,
}

impl SystemInfoCheck {
    /// Requires at least 64 MiB of available memory
    pub fn new() -> Self {
        Self::with_min_available(64 * 1024 * 1024)
    }

    pub fn with_min_available(min_available_bytes: u64) -> Self {
        Self {
            min_available_bytes,
        }
    }
}

impl Default for SystemInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthCheck for SystemInfoCheck {
    fn name(&self) -> &str {
        "System Info"
    }

    fn check(&self) -> anyhow::Result<bool> {
        let mut sys = System::new_all();
        sys.refresh_all();

        let logical_cores = sys.cpus().len();
        if logical_cores == 0 {
            anyhow::bail!("unable to detect CPU cores");
        }

        let available = sys.available_memory();
        debug!(
            logical_cores,
            available_mb = available / 1_048_576,
            total_mb = sys.total_memory() / 1_048_576,
            "System info gathered"
        );

        Ok(available >= self.min_available_bytes)
    }
}
