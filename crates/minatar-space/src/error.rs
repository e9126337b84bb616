//! Error types for grid construction.

use std::fmt;

/// Errors arising from grid or mask construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero cells.
    EmptySpace,
    /// A dimension does not fit the signed coordinate range.
    DimensionTooLarge {
        /// The offending dimension.
        value: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "grid must have at least one cell"),
            Self::DimensionTooLarge { value } => {
                write!(f, "grid dimension {value} exceeds i32::MAX")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
