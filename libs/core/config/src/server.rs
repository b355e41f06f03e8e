use crate::{env_or_default, ConfigError, FromEnv};

/// Bind address for HTTP servers.
///
/// Defaults to all interfaces on port 8080; override with `HOST`/`PORT`.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// "host:port", as accepted by `TcpListener::bind`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", "0.0.0.0");
        let port_raw = env_or_default("PORT", "8080");
        let port = port_raw
            .parse::<u16>()
            .map_err(|e| ConfigError::ParseError {
                key: "PORT".to_string(),
                details: e.to_string(),
            })?;

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", 8080)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_unset() {
        temp_env::with_vars([("HOST", None::<&str>), ("PORT", None::<&str>)], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.address(), "0.0.0.0:8080");
        });
    }

    #[test]
    fn test_env_overrides() {
        temp_env::with_vars([("HOST", Some("127.0.0.1")), ("PORT", Some("3003"))], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 3003);
        });
    }

    #[test]
    fn test_port_must_be_numeric() {
        temp_env::with_var("PORT", Some("eighty"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("PORT"));
        });
    }

    #[test]
    fn test_port_must_fit_u16() {
        temp_env::with_var("PORT", Some("70000"), || {
            assert!(ServerConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_manual_construction() {
        let config = ServerConfig::new("localhost", 9000);
        assert_eq!(config.address(), "localhost:9000");
    }
}
