//! Runtime configuration.
//!
//! There is exactly one knob: whether transfers are switched off while the
//! service is under construction. It comes from the environment.

use thiserror::Error;

pub const UNDER_CONSTRUCTION_VAR: &str = "UNDER_CONSTRUCTION";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a boolean, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// When set, every transfer is refused with `ServiceUnavailable`.
    pub under_construction: bool,
}

impl Config {
    /// Read the configuration from the process environment.
    /// An unset variable means transfers are enabled.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    // Split from `from_env` so tests don't have to mutate the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let under_construction = match lookup(UNDER_CONSTRUCTION_VAR) {
            Some(value) => parse_flag(UNDER_CONSTRUCTION_VAR, &value)?,
            None => false,
        };

        Ok(Self { under_construction })
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}
