//! Error types for isomesh_core operations.
//!
//! Provides a simple error enum with no external dependencies for no_std compatibility.

use core::fmt;

/// Error types that can occur during isomesh_core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// The number of samples does not match `(resolution + 1)^3`.
    FieldSizeMismatch {
        /// The number of samples required by the resolution.
        expected: usize,
        /// The number of samples provided.
        got: usize,
    },
    /// The resolution is zero or too large to address every vertex slot with a `u32`.
    ResolutionOutOfRange {
        /// The rejected resolution (cells per axis).
        resolution: u32,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::FieldSizeMismatch { expected, got } => {
                write!(
                    f,
                    "scalar field size mismatch: expected {} samples, got {}",
                    expected, got
                )
            }
            CoreError::ResolutionOutOfRange { resolution } => {
                write!(
                    f,
                    "resolution {} is outside the addressable range 1..={}",
                    resolution,
                    crate::coords::MAX_RESOLUTION
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn test_error_display() {
        use std::format;

        let err = CoreError::FieldSizeMismatch {
            expected: 27,
            got: 8,
        };
        assert_eq!(
            format!("{}", err),
            "scalar field size mismatch: expected 27 samples, got 8"
        );

        let err = CoreError::ResolutionOutOfRange { resolution: 0 };
        assert_eq!(
            format!("{}", err),
            "resolution 0 is outside the addressable range 1..=710"
        );
    }

    #[test]
    fn test_error_equality() {
        let err1 = CoreError::ResolutionOutOfRange { resolution: 0 };
        let err2 = CoreError::ResolutionOutOfRange { resolution: 0 };
        let err3 = CoreError::ResolutionOutOfRange { resolution: 1000 };

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
