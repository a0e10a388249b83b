// ============================================================================
// Numeric Errors
// Error types for limb-based fixed-point construction and extraction
// ============================================================================

use std::fmt;

/// Errors that can occur while building or reading fixed-point values.
///
/// Arithmetic itself never reports `Overflow`: a value that outgrows its
/// layout carries a sticky overflow flag instead. The error only surfaces
/// when an overflowed value is converted to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Construction input outside the accepted domain
    InvalidArgument,
    /// Integer extraction from an overflowed value
    Overflow,
    /// Operands built with different limb layouts
    LayoutMismatch,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::InvalidArgument => {
                write!(f, "invalid argument: input outside the accepted domain")
            },
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: value exceeded its limb layout")
            },
            NumericError::LayoutMismatch => write!(f, "layout mismatch between operands"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
