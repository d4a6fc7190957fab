//! Database configuration.

use serde::Deserialize;

use super::ConfigValidationError;

/// PostgreSQL connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigValidationError::new(
                "database.url",
                "must be a postgres:// or postgresql:// URL",
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigValidationError::new(
                "database.max_connections",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_postgres_urls() {
        let config = DatabaseConfig {
            url: "postgresql://app@localhost/inkpress".to_string(),
            max_connections: 10,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        let config = DatabaseConfig {
            url: "mysql://app@localhost/inkpress".to_string(),
            max_connections: 10,
        };
        assert!(config.validate().is_err());
    }
}
