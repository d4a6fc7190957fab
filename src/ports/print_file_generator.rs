//! Print-file generator port.
//!
//! The generator is an external service that rasterizes a transformed
//! source image into a production-ready file (300 DPI, sRGB) for a given
//! physical size. The core treats it as opaque: bytes in, a download
//! handle out.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::OrderId;
use crate::domain::order::PrintSize;

/// Handle to a generated print-ready file.
#[derive(Debug, Clone)]
pub struct GeneratedPrintFile {
    /// Time-limited URL the caller fetches the file from.
    pub download_url: String,
    pub file_name: String,
}

/// Error from the print-file generator.
#[derive(Debug, Clone, Error)]
pub enum GeneratorError {
    #[error("Print-file generator is not configured: {0}")]
    NotConfigured(String),

    #[error("Print-file generation failed: {0}")]
    Generation(String),

    #[error("Generator request failed: {0}")]
    Transport(String),
}

/// Port for the external print-file generator.
#[async_trait]
pub trait PrintFileGenerator: Send + Sync {
    /// Rasterizes `source` for `size`, returning a handle to the result.
    async fn generate(
        &self,
        source: &[u8],
        order_id: &OrderId,
        size: PrintSize,
    ) -> Result<GeneratedPrintFile, GeneratorError>;
}
