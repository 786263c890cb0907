//! Crate configuration
//!
//! Controls when raising an error captures a call-stack snapshot. Settings
//! come from TOML text, the `XCP_TRACE_CAPTURE` environment variable, or are
//! installed once per process with [`install`].

use std::env::{self, VarError};
use std::str::FromStr;

use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable read by [`Config::from_env`]
pub const TRACE_CAPTURE_ENV: &str = "XCP_TRACE_CAPTURE";

static INSTALLED: OnceCell<Config> = OnceCell::new();

static FROM_ENV: Lazy<Config> = Lazy::new(|| match Config::from_env() {
    Ok(config) => config,
    Err(err) => {
        tracing::warn!("Ignoring {}: {}", TRACE_CAPTURE_ENV, err);
        Config::default()
    }
});

/// Errors produced while loading or installing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Config already installed")]
    AlreadyInstalled,
}

/// When to capture a call stack on raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceCapture {
    /// Never capture
    Never,
    /// Follow `RUST_LIB_BACKTRACE` / `RUST_BACKTRACE`
    #[serde(rename = "env")]
    Environment,
    /// Always capture
    #[default]
    Always,
}

impl FromStr for TraceCapture {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" | "off" | "0" => Ok(TraceCapture::Never),
            "env" | "environment" => Ok(TraceCapture::Environment),
            "always" | "on" | "1" => Ok(TraceCapture::Always),
            _ => Err(ConfigError::InvalidValue {
                key: TRACE_CAPTURE_ENV,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub trace_capture: TraceCapture,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from the environment; unset variables keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(TRACE_CAPTURE_ENV) {
            Ok(value) => Ok(Config {
                trace_capture: value.parse()?,
            }),
            Err(VarError::NotPresent) => Ok(Config::default()),
            Err(VarError::NotUnicode(value)) => Err(ConfigError::InvalidValue {
                key: TRACE_CAPTURE_ENV,
                value: value.to_string_lossy().into_owned(),
            }),
        }
    }
}

/// Install the process-wide config. Only the first call succeeds.
pub fn install(config: Config) -> Result<(), ConfigError> {
    INSTALLED
        .set(config)
        .map_err(|_| ConfigError::AlreadyInstalled)?;
    tracing::debug!(trace_capture = ?config.trace_capture, "xcp config installed");
    Ok(())
}

/// Installed config, or the environment's when none was installed.
pub fn current() -> Config {
    INSTALLED.get().copied().unwrap_or_else(|| *FROM_ENV)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_captures_always() {
        assert_eq!(Config::default().trace_capture, TraceCapture::Always);
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml_str("trace_capture = \"never\"").unwrap();
        assert_eq!(config.trace_capture, TraceCapture::Never);

        let config = Config::from_toml_str("trace_capture = \"env\"").unwrap();
        assert_eq!(config.trace_capture, TraceCapture::Environment);

        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_toml_rejects_unknown_policy() {
        let err = Config::from_toml_str("trace_capture = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("OFF".parse::<TraceCapture>().unwrap(), TraceCapture::Never);
        assert_eq!(" env ".parse::<TraceCapture>().unwrap(), TraceCapture::Environment);
        assert_eq!("1".parse::<TraceCapture>().unwrap(), TraceCapture::Always);
        assert!(matches!(
            "maybe".parse::<TraceCapture>(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
