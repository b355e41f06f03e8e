//! Environment-driven configuration shared by every service in the
//! workspace: typed errors, the deployment environment switch, and the
//! `FromEnv` convention config structs implement.

pub mod server;
pub mod tracing;

use std::env;
use thiserror::Error;

/// What can go wrong while reading configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Deployment environment, selected by `APP_ENV`.
///
/// Anything other than `production` (case-insensitive) is treated as
/// development, so a typo degrades to the safe, verbose mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    /// Local development: pretty logs, no HTTPS assumptions
    Development,
    /// Deployed: JSON logs, HTTPS-only features enabled
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    // Whether HTTPS-only features (secure cookies etc.) should be on
    pub fn use_https(&self) -> bool {
        self.is_production()
    }
}

/// Static application identity, baked in at compile time.
///
/// Construct with the [`app_info!`] macro from the crate that owns the
/// binary so the name and version come from that crate's manifest.
#[derive(Clone, Copy, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Build an [`AppInfo`] from the calling crate's Cargo manifest.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Convention for config structs that load themselves from the
/// environment. Keeps `Config::from_env()` composition uniform across
/// services.
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Read an environment variable, falling back to `default` when unset.
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a required environment variable.
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert!(env.is_development());
            assert!(!env.use_https());
        });
    }

    #[test]
    fn test_environment_production_any_case() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert!(Environment::from_env().is_production());
            });
        }
    }

    #[test]
    fn test_environment_unknown_values_stay_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert!(Environment::from_env().is_development());
        });
    }

    #[test]
    fn test_app_info_macro() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("SOME_VAR", Some("set"), || {
            assert_eq!(env_or_default("SOME_VAR", "fallback"), "set");
        });
        temp_env::with_var_unset("SOME_VAR", || {
            assert_eq!(env_or_default("SOME_VAR", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_env_required() {
        temp_env::with_var("NEEDED_VAR", Some("present"), || {
            assert_eq!(env_required("NEEDED_VAR").unwrap(), "present");
        });
        temp_env::with_var_unset("NEEDED_VAR", || {
            let err = env_required("NEEDED_VAR").unwrap_err();
            assert!(err.to_string().contains("NEEDED_VAR"));
        });
    }
}
