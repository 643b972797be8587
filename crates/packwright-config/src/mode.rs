//! Build mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Development or production. Fixed for the duration of one assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    /// Derive the mode from an environment value such as `NODE_ENV`.
    ///
    /// Only the exact value `production` selects production; anything else,
    /// including an unset variable, is development.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => Mode::Production,
            _ => Mode::Development,
        }
    }

    pub fn is_development(self) -> bool {
        self == Mode::Development
    }

    pub fn is_production(self) -> bool {
        self == Mode::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            other => Err(format!("Invalid mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_value_only_production_is_production() {
        assert_eq!(Mode::from_env_value(Some("production")), Mode::Production);
        assert_eq!(Mode::from_env_value(Some("development")), Mode::Development);
        assert_eq!(Mode::from_env_value(Some("test")), Mode::Development);
        assert_eq!(Mode::from_env_value(None), Mode::Development);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Production".parse::<Mode>().unwrap(), Mode::Production);
        assert_eq!("dev".parse::<Mode>().unwrap(), Mode::Development);
        assert!("staging".parse::<Mode>().is_err());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Mode::Production.to_string(), "production");
        assert_eq!(
            serde_json::to_value(Mode::Development).unwrap(),
            serde_json::json!("development")
        );
    }
}
