//! Point-in-time application snapshot
//!
//! Combines health status, build metadata from the config store, and host
//! identity. Host and clock lookups sit behind [`HostIdentity`] and [`Clock`] so
//! they can be pinned in tests.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sysinfo::System;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::config::ConfigStore;
use crate::health::StatusCode;

/// Value used for any field that cannot be determined
pub const UNKNOWN: &str = "Unknown";

/// Config keys read into the snapshot
pub mod keys {
    pub const APPLICATION_NAME: &str = "ApplicationName";
    pub const APPLICATION_TYPE: &str = "ApplicationType";
    pub const BUILD_DATE: &str = "BuildDate";
    pub const VERSION: &str = "Version";
}

/// Naive local time with microseconds, e.g. `2024-03-01T14:05:09.120034`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Operating system identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OsInfo {
    /// Platform family (`posix`, `nt`)
    pub name: String,
    /// System name and kernel release, e.g. `Linux 6.8.0`
    pub version: String,
}

/// Snapshot of application status and identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Snapshot {
    pub application_name: String,
    pub application_type: String,
    pub build_date: String,
    pub machine_name: String,
    #[serde(rename = "OS")]
    pub os: OsInfo,
    pub status: StatusCode,
    pub timestamp: String,
    pub version: String,
}

/// Source of host identity
pub trait HostIdentity: Send + Sync {
    fn machine_name(&self) -> String;
    fn os(&self) -> OsInfo;
}

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads host identity from the running system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl SystemHost {
    /// Creates a host identity source for the running system
    pub fn new() -> Self {
        Self
    }

    /// Platform family as `posix` or `nt`
    fn platform_name() -> &'static str {
        match std::env::consts::FAMILY {
            "unix" => "posix",
            "windows" => "nt",
            other => other,
        }
    }

    fn system_name() -> &'static str {
        match std::env::consts::OS {
            "linux" => "Linux",
            "macos" => "Darwin",
            "windows" => "Windows",
            "freebsd" => "FreeBSD",
            "netbsd" => "NetBSD",
            "openbsd" => "OpenBSD",
            other => other,
        }
    }
}

impl HostIdentity for SystemHost {
    fn machine_name(&self) -> String {
        System::host_name().unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn os(&self) -> OsInfo {
        let release = System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string());
        OsInfo {
            name: Self::platform_name().to_string(),
            version: format!("{} {}", Self::system_name(), release),
        }
    }
}

/// Wall clock in the local timezone, without offset
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Builds a snapshot from an already computed status
///
/// Reads whatever the config store holds; call
/// [`ConfigStore::ensure_loaded`] first to load it.
pub fn compose(
    status: StatusCode,
    config: &ConfigStore,
    host: &dyn HostIdentity,
    clock: &dyn Clock,
) -> Snapshot {
    Snapshot {
        application_name: config.get_str(keys::APPLICATION_NAME, UNKNOWN),
        application_type: config.get_str(keys::APPLICATION_TYPE, UNKNOWN),
        build_date: config.get_str(keys::BUILD_DATE, UNKNOWN),
        machine_name: host.machine_name(),
        os: host.os(),
        status,
        timestamp: clock.now().format(TIMESTAMP_FORMAT).to_string(),
        version: config.get_str(keys::VERSION, UNKNOWN),
    }
}

/// Formats a snapshot as a two-column table
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Field", "Value"]);
    builder.push_record(["Application", snapshot.application_name.as_str()]);
    builder.push_record(["Type", snapshot.application_type.as_str()]);
    builder.push_record(["Version", snapshot.version.as_str()]);
    builder.push_record(["Build date", snapshot.build_date.as_str()]);
    builder.push_record(["Machine", snapshot.machine_name.as_str()]);
    builder.push_record(["OS", &format!("{} ({})", snapshot.os.version, snapshot.os.name)]);
    builder.push_record(["Status", &snapshot.status.as_colored_str()]);
    builder.push_record(["Timestamp", snapshot.timestamp.as_str()]);

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
