//! Error types for draw2d-rust.
//!
//! Only API contract violations surface as errors. Degenerate geometry
//! (zero-length segments, empty arcs, non-finite coordinates) is dropped
//! silently while the path is built.

use thiserror::Error;

/// Result type alias using Draw2dError.
pub type Draw2dResult<T> = Result<T, Draw2dError>;

/// Errors raised by the drawing API.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Draw2dError {
    /// Line width must not be negative.
    #[error("Negative line width: {0}")]
    NegativeLineWidth(f64),

    /// Dash entries must not be negative.
    #[error("Invalid dash pattern: entry {index} is {value}")]
    InvalidDashPattern { index: usize, value: f64 },

    /// Unknown line cap name or code.
    #[error("Invalid line cap: {0}")]
    InvalidLineCap(String),

    /// Unknown line join name or code.
    #[error("Invalid line join: {0}")]
    InvalidLineJoin(String),

    /// Unknown fill rule name or code.
    #[error("Invalid fill rule: {0}")]
    InvalidFillRule(String),

    /// Flattening tolerance must be finite and positive.
    #[error("Invalid flattening tolerance: {0} (must be > 0)")]
    InvalidTolerance(f64),

    /// Miter limit must be finite and at least 1.
    #[error("Invalid miter limit: {0} (must be >= 1)")]
    InvalidMiterLimit(f64),

    /// Raster buffer is too small for the requested dimensions.
    #[error("Invalid dimensions: width={width}, height={height}, stride={stride}, buffer length={len}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        stride: usize,
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Draw2dError::NegativeLineWidth(-2.0).to_string(),
            "Negative line width: -2"
        );
        assert_eq!(
            Draw2dError::InvalidDashPattern {
                index: 1,
                value: -3.0
            }
            .to_string(),
            "Invalid dash pattern: entry 1 is -3"
        );
        assert!(Draw2dError::InvalidMiterLimit(0.5)
            .to_string()
            .contains("0.5"));
    }
}
