//! Archive assembler port.
//!
//! Bundles named byte buffers into a single downloadable archive.

use thiserror::Error;

/// A named file to include in an archive.
#[derive(Debug, Clone)]
pub struct ArchiveFile {
    /// Path inside the archive; `/` separators create folders.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Error during archive assembly.
#[derive(Debug, Error)]
#[error("Archive assembly failed: {0}")]
pub struct ArchiveError(pub String);

/// Port for archive assembly.
///
/// Assembly is CPU-bound and synchronous; callers in async contexts run it
/// inline (archives stay well under request-size limits).
pub trait ArchiveAssembler: Send + Sync {
    /// Bundles `files` into one archive, preserving entry order.
    fn assemble(&self, files: Vec<ArchiveFile>) -> Result<Vec<u8>, ArchiveError>;

    /// Generates a unique, collision-resistant archive file name ending in
    /// the archive's extension.
    fn file_name(&self) -> String;
}
