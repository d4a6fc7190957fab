//! Supported physical print sizes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Physical size of a printed artwork.
///
/// The production pipeline only accepts the ISO A-series sizes below;
/// anything else is skipped during print-file packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrintSize {
    A5,
    A4,
    A3,
    A2,
}

impl PrintSize {
    /// All supported sizes, smallest first.
    pub const ALL: [PrintSize; 4] = [PrintSize::A5, PrintSize::A4, PrintSize::A3, PrintSize::A2];

    /// Pixel dimensions (width, height) at 300 DPI, portrait orientation.
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        match self {
            PrintSize::A5 => (1748, 2480),
            PrintSize::A4 => (2480, 3508),
            PrintSize::A3 => (3508, 4961),
            PrintSize::A2 => (4961, 7016),
        }
    }

    /// Print resolution in dots per inch.
    pub const DPI: u32 = 300;

    pub fn as_str(&self) -> &'static str {
        match self {
            PrintSize::A5 => "A5",
            PrintSize::A4 => "A4",
            PrintSize::A3 => "A3",
            PrintSize::A2 => "A2",
        }
    }
}

impl fmt::Display for PrintSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrintSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A5" => Ok(PrintSize::A5),
            "A4" => Ok(PrintSize::A4),
            "A3" => Ok(PrintSize::A3),
            "A2" => Ok(PrintSize::A2),
            other => Err(ValidationError::invalid_format(
                "size",
                format!("Unsupported print size '{}'", other),
            )),
        }
    }
}
