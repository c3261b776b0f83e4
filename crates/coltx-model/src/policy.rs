//! Column policies.
//!
//! A [`Policy`] decides what happens when a transformer meets a column-set
//! anomaly: an input column that is absent from the frame, or an output
//! column that already exists.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How a column-set anomaly is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// Fail the call before any mutation happens.
    #[default]
    Raise,
    /// Emit a warning and continue (missing columns are dropped from the
    /// working set, existing columns are overwritten).
    Warn,
    /// Continue silently.
    Ignore,
}

impl Policy {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Raise => "raise",
            Policy::Warn => "warn",
            Policy::Ignore => "ignore",
        }
    }

    /// Parse a missing-column policy, labelling the error accordingly.
    pub fn parse_missing(value: &str) -> Result<Self, ConfigError> {
        Self::parse_named(value, "missing_policy")
    }

    /// Parse an existing-column policy, labelling the error accordingly.
    pub fn parse_exist(value: &str) -> Result<Self, ConfigError> {
        Self::parse_named(value, "exist_policy")
    }

    fn parse_named(value: &str, name: &'static str) -> Result<Self, ConfigError> {
        match value {
            "raise" => Ok(Policy::Raise),
            "warn" => Ok(Policy::Warn),
            "ignore" => Ok(Policy::Ignore),
            _ => Err(ConfigError::InvalidPolicy {
                name,
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_named(s, "policy")
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
