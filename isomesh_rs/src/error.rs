//! Error types for isomesh_rs operations.

use thiserror::Error;

use isomesh_core::CoreError;

/// Errors that can occur while generating a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IsoMeshError {
    /// A configuration value is outside its accepted range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },

    /// The dedicated rayon pool could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),

    /// A scalar field failed validation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl IsoMeshError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        IsoMeshError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for IsoMeshError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        IsoMeshError::ThreadPool(err.to_string())
    }
}

/// Result type alias for isomesh_rs operations.
pub type Result<T> = core::result::Result<T, IsoMeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IsoMeshError::invalid("grid_size", "must be at least 1");
        assert_eq!(
            format!("{}", err),
            "invalid configuration: grid_size must be at least 1"
        );

        let err = IsoMeshError::from(CoreError::FieldSizeMismatch {
            expected: 27,
            got: 3,
        });
        assert!(format!("{}", err).contains("expected 27 samples, got 3"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            IsoMeshError::invalid("surface_level", "x"),
            IsoMeshError::invalid("surface_level", "x")
        );
        assert_ne!(
            IsoMeshError::invalid("surface_level", "x"),
            IsoMeshError::ThreadPool("x".to_string())
        );
    }
}
