//! Error types for core buffer operations.
//!
//! The [`Error`] enum covers the failure modes the core types can actually
//! produce: buffer shape validation and element access. Everything here uses
//! [`thiserror`] for the `std::error::Error` and `Display` implementations.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or accessing results.
#[derive(Debug, Error)]
pub enum Error {
    /// A buffer was handed over with a length that does not match its
    /// declared domain and kind.
    #[error("buffer size mismatch: expected {expected} floats, got {actual}")]
    BufferSizeMismatch {
        /// Element count implied by domain and kind.
        expected: usize,
        /// Element count actually supplied.
        actual: usize,
    },

    /// A domain with zero width or height was used where pixels are required.
    #[error("invalid domain: {width}x{height}")]
    InvalidDomain {
        /// Domain width in pixels.
        width: u32,
        /// Domain height in pixels.
        height: u32,
    },

    /// Pixel coordinates outside the result's domain.
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} domain")]
    OutOfBounds {
        /// X coordinate of the access.
        x: u32,
        /// Y coordinate of the access.
        y: u32,
        /// Domain width in pixels.
        width: u32,
        /// Domain height in pixels.
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::BufferSizeMismatch {
            expected: 12,
            actual: 4,
        };
        assert!(err.to_string().contains("12"));

        let err = Error::OutOfBounds {
            x: 100,
            y: 50,
            width: 80,
            height: 60,
        };
        assert!(err.to_string().contains("100"));
    }
}
