//! Server configuration.

use serde::Deserialize;
use std::net::SocketAddr;

use super::ConfigValidationError;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: Environment,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> Environment {
    Environment::Development
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.host.is_empty() {
            return Err(ConfigValidationError::new("server.host", "must not be empty"));
        }
        if self.port == 0 {
            return Err(ConfigValidationError::new("server.port", "must be non-zero"));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigValidationError::new("server", format!("invalid address: {}", e)))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
