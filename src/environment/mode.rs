//! Runtime modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EnvgateError;

/// The runtime mode a process runs in.
///
/// Modes form a closed set and are compared by exact value. A process
/// that was never told otherwise runs in [`Mode::Prod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Local development.
    Dev,
    /// System integration testing.
    Sit,
    /// User acceptance testing.
    Uat,
    /// Production.
    #[default]
    Prod,
}

impl Mode {
    /// All known modes, in declaration order.
    pub const ALL: [Mode; 4] = [Mode::Dev, Mode::Sit, Mode::Uat, Mode::Prod];

    /// Lower-case name used in manifests and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Dev => "dev",
            Mode::Sit => "sit",
            Mode::Uat => "uat",
            Mode::Prod => "prod",
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Mode::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Mode::Prod)
    }
}

impl FromStr for Mode {
    type Err = EnvgateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EnvgateError::UnknownMode {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name().to_ascii_uppercase())
    }
}

impl Serialize for Mode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("prod".parse::<Mode>().unwrap(), Mode::Prod);
        assert_eq!("PROD".parse::<Mode>().unwrap(), Mode::Prod);
        assert_eq!("Dev".parse::<Mode>().unwrap(), Mode::Dev);
        assert_eq!(" uat ".parse::<Mode>().unwrap(), Mode::Uat);
    }

    #[test]
    fn parse_unknown_mode_fails() {
        let err = "staging".parse::<Mode>().unwrap_err();
        assert!(matches!(err, EnvgateError::UnknownMode { value } if value == "staging"));
    }

    #[test]
    fn display_is_upper_case() {
        assert_eq!(Mode::Dev.to_string(), "DEV");
        assert_eq!(Mode::Sit.to_string(), "SIT");
        assert_eq!(Mode::Prod.to_string(), "PROD");
    }

    #[test]
    fn default_is_prod() {
        assert_eq!(Mode::default(), Mode::Prod);
        assert!(Mode::default().is_prod());
        assert!(!Mode::default().is_dev());
    }

    #[test]
    fn serializes_as_lower_case_name() {
        assert_eq!(serde_json::to_string(&Mode::Uat).unwrap(), "\"uat\"");
    }

    #[test]
    fn deserializes_any_case() {
        let mode: Mode = serde_yaml::from_str("DEV").unwrap();
        assert_eq!(mode, Mode::Dev);
        assert!(serde_yaml::from_str::<Mode>("nightly").is_err());
    }
}
