//! Tri-state classification of overall health

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Overall process health, serialized as its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum StatusCode {
    /// No check reported unhealthy
    Healthy = 10,
    /// Some checks healthy, some not
    Degraded = 20,
    /// No check reported healthy
    Unhealthy = 30,
}

impl StatusCode {
    /// Classifies one evaluation pass from its counts
    ///
    /// Zero unhealthy wins over zero healthy, so an empty registry is
    /// [`StatusCode::Healthy`].
    pub fn classify(healthy: usize, unhealthy: usize) -> Self {
        if unhealthy == 0 {
            StatusCode::Healthy
        } else if healthy == 0 {
            StatusCode::Unhealthy
        } else {
            StatusCode::Degraded
        }
    }

    /// Numeric code: 10, 20 or 30
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parses a numeric code back into a status
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            10 => Some(StatusCode::Healthy),
            20 => Some(StatusCode::Degraded),
            30 => Some(StatusCode::Unhealthy),
            _ => None,
        }
    }

    /// Process exit code: 0 = healthy, 1 = unhealthy, 2 = degraded
    pub fn exit_code(self) -> i32 {
        match self {
            StatusCode::Healthy => 0,
            StatusCode::Unhealthy => 1,
            StatusCode::Degraded => 2,
        }
    }

    /// Upper-case label, e.g. `DEGRADED`
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Healthy => "HEALTHY",
            StatusCode::Degraded => "DEGRADED",
            StatusCode::Unhealthy => "UNHEALTHY",
        }
    }

    /// Returns the status as a colored string
    pub fn as_colored_str(self) -> String {
        use colored::Colorize;
        match self {
            StatusCode::Healthy => self.as_str().green().bold().to_string(),
            StatusCode::Degraded => self.as_str().yellow().bold().to_string(),
            StatusCode::Unhealthy => self.as_str().red().bold().to_string(),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        StatusCode::from_code(code).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown status code {code}, expected 10, 20 or 30"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(StatusCode::classify(0, 0), StatusCode::Healthy);
        assert_eq!(StatusCode::classify(3, 0), StatusCode::Healthy);
        assert_eq!(StatusCode::classify(0, 2), StatusCode::Unhealthy);
        assert_eq!(StatusCode::classify(1, 1), StatusCode::Degraded);
        assert_eq!(StatusCode::classify(5, 1), StatusCode::Degraded);
    }

    #[test]
    fn test_numeric_codes() {
        assert_eq!(StatusCode::Healthy.code(), 10);
        assert_eq!(StatusCode::Degraded.code(), 20);
        assert_eq!(StatusCode::Unhealthy.code(), 30);
        assert_eq!(StatusCode::from_code(20), Some(StatusCode::Degraded));
        assert_eq!(StatusCode::from_code(15), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(StatusCode::Healthy.as_str(), "HEALTHY");
        assert_eq!(StatusCode::Degraded.as_str(), "DEGRADED");
        assert_eq!(StatusCode::Unhealthy.as_str(), "UNHEALTHY");
        assert_eq!(StatusCode::Degraded.to_string(), "DEGRADED (20)");
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&StatusCode::Degraded).unwrap(), "20");
        let parsed: StatusCode = serde_json::from_str("30").unwrap();
        assert_eq!(parsed, StatusCode::Unhealthy);
        assert!(serde_json::from_str::<StatusCode>("40").is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(StatusCode::Healthy.exit_code(), 0);
        assert_eq!(StatusCode::Unhealthy.exit_code(), 1);
        assert_eq!(StatusCode::Degraded.exit_code(), 2);
    }
}
