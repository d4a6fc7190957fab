//! HTTP client for the external print-file generator.
//!
//! The generator rasterizes a source image to the requested physical size
//! at 300 DPI and returns a time-limited download URL for the result.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::OrderId;
use crate::domain::order::PrintSize;
use crate::ports::{GeneratedPrintFile, GeneratorError, PrintFileGenerator};

/// Generator service configuration.
#[derive(Clone)]
pub struct PrintFileGeneratorConfig {
    pub base_url: String,
    pub api_key: SecretString,
}

impl PrintFileGeneratorConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: SecretString::new(api_key.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(rename = "downloadUrl")]
    download_url: String,
    #[serde(rename = "fileName")]
    file_name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateErrorBody {
    error: Option<String>,
}

/// Print-file generator client.
pub struct HttpPrintFileGenerator {
    config: PrintFileGeneratorConfig,
    http_client: reqwest::Client,
}

impl HttpPrintFileGenerator {
    pub fn new(config: PrintFileGeneratorConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PrintFileGenerator for HttpPrintFileGenerator {
    async fn generate(
        &self,
        source: &[u8],
        order_id: &OrderId,
        size: PrintSize,
    ) -> Result<GeneratedPrintFile, GeneratorError> {
        if self.config.base_url.is_empty() {
            return Err(GeneratorError::NotConfigured(
                "generator base_url is empty".to_string(),
            ));
        }

        let url = format!(
            "{}/render?order={}&size={}&dpi={}",
            self.config.base_url,
            order_id,
            size,
            PrintSize::DPI
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(source.to_vec())
            .send()
            .await
            .map_err(|e| GeneratorError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: GenerateErrorBody = response
                .json()
                .await
                .unwrap_or(GenerateErrorBody { error: None });
            return Err(GeneratorError::Generation(body.error.unwrap_or_else(
                || format!("generator returned status {}", status.as_u16()),
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Transport(e.to_string()))?;

        Ok(GeneratedPrintFile {
            download_url: body.download_url,
            file_name: body.file_name,
        })
    }
}
