//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values use the `INKPRESS` prefix with
//! `__` (double underscore) separating nested sections.
//!
//! # Example
//!
//! ```no_run
//! use inkpress::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod email;
mod error;
mod generator;
mod redis;
mod server;
mod shipping;
mod storage;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ConfigValidationError};
pub use generator::GeneratorConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use shipping::{SenderAddress, ShippingConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Redis configuration (rate limiter backend)
    #[serde(default)]
    pub redis: RedisConfig,

    /// Object storage configuration (R2 or in-memory)
    pub storage: StorageConfig,

    /// Shipping configuration (sender address, package, carriers)
    #[serde(default)]
    pub shipping: ShippingConfig,

    /// Print-file generator configuration
    pub generator: GeneratorConfig,

    /// Email configuration (Resend)
    #[serde(default)]
    pub email: EmailConfig,

    /// Admin authentication configuration
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// 1. Loads `.env` if present (for development)
    /// 2. Reads environment variables with the `INKPRESS` prefix
    /// 3. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `INKPRESS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `INKPRESS__DATABASE__URL=...` -> `database.url = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("INKPRESS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.storage.validate()?;
        self.shipping.validate()?;
        self.generator.validate()?;
        self.auth.validate()?;
        Ok(())
    }

    /// Check if running in production environment.
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
