//! Orchestration services shared by handlers.

mod print_file_packager;

pub use print_file_packager::{PackageOutcome, PackagedFile, PrintFilePackager};
