//! Admin authentication configuration.

use secrecy::SecretString;
use serde::Deserialize;

use super::ConfigValidationError;

/// Admin JWT verification configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: SecretString,
    #[serde(default)]
    pub audience: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        use secrecy::ExposeSecret;
        if self.jwt_secret.expose_secret().len() < 16 {
            return Err(ConfigValidationError::new(
                "auth.jwt_secret",
                "must be at least 16 characters",
            ));
        }
        Ok(())
    }
}
