//! Print-file generator configuration.

use serde::Deserialize;

use super::ConfigValidationError;

/// External print-file generator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigValidationError::new(
                "generator.base_url",
                "must be an http(s) URL",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_http_url() {
        let config = GeneratorConfig {
            base_url: "ftp://render.example".to_string(),
            api_key: None,
        };
        assert!(config.validate().is_err());
    }
}
