//! Ephemeral bulk-operation types.

mod manifest;

pub use manifest::{ArchiveManifest, ManifestEntry, ManifestOutcome};
