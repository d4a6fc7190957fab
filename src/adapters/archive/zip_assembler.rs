//! ZIP archive assembler.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::domain::foundation::Timestamp;
use crate::ports::{ArchiveAssembler, ArchiveError, ArchiveFile};

/// Assembles print files into a deflate-compressed ZIP archive.
pub struct ZipArchiveAssembler;

impl ZipArchiveAssembler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZipArchiveAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveAssembler for ZipArchiveAssembler {
    fn assemble(&self, files: Vec<ArchiveFile>) -> Result<Vec<u8>, ArchiveError> {
        let mut buf = Cursor::new(Vec::new());
        let mut writer = ZipWriter::new(&mut buf);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for file in &files {
            writer
                .start_file(file.name.as_str(), options)
                .map_err(|e| ArchiveError(e.to_string()))?;
            writer
                .write_all(&file.bytes)
                .map_err(|e| ArchiveError(e.to_string()))?;
        }

        writer.finish().map_err(|e| ArchiveError(e.to_string()))?;

        Ok(buf.into_inner())
    }

    /// `print-files-{YYYY-MM-DD}-{unix_millis}.zip`
    fn file_name(&self) -> String {
        let now = Timestamp::now();
        format!(
            "print-files-{}-{}.zip",
            now.date_string(),
            now.as_unix_millis()
        )
    }
}
