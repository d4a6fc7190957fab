//! Email configuration (Resend).

use serde::Deserialize;

/// Email sender configuration.
///
/// Optional: without an API key the no-op notifier is used.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub resend_api_key: Option<String>,
    #[serde(default = "default_from")]
    pub from_address: String,
}

fn default_from() -> String {
    "orders@inkpress.example".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            from_address: default_from(),
        }
    }
}

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        self.resend_api_key
            .as_deref()
            .map(|k| !k.is_empty())
            .unwrap_or(false)
    }
}
