//! Archive assembly adapters.

mod zip_assembler;

pub use zip_assembler::ZipArchiveAssembler;
