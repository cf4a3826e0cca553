//! Error types for transformation compilation and request signing
//!
//! Every failure in this crate is local and synchronous: it is raised at the
//! call that made the mistake and is never retried or deferred to render time.

use thiserror::Error;

/// Errors raised while building transformations or signing requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// A value of the wrong shape was supplied at a call site
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// Signing was attempted without a configured secret
    #[error("Missing signing secret: {hint}")]
    MissingSecret { hint: String },

    /// Two options that cannot be combined were both set
    #[error("Constraint '{rule}' violated: {message}")]
    ConstraintViolation { rule: String, message: String },

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TransformError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        TransformError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_secret(hint: impl Into<String>) -> Self {
        TransformError::MissingSecret { hint: hint.into() }
    }

    pub fn constraint(rule: impl Into<String>, message: impl Into<String>) -> Self {
        TransformError::ConstraintViolation {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// True for errors that point at configuration rather than the call site
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TransformError::MissingSecret { .. } | TransformError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = TransformError::invalid_input("radius", "expected 1 to 4 values");
        assert_eq!(
            err.to_string(),
            "Invalid input for 'radius': expected 1 to 4 values"
        );
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_missing_secret_display() {
        let err = TransformError::missing_secret("set signing.api_secret");
        assert_eq!(
            err.to_string(),
            "Missing signing secret: set signing.api_secret"
        );
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_constraint_violation_display() {
        let err = TransformError::constraint("sizes", "cannot combine with auto breakpoints");
        assert_eq!(
            err.to_string(),
            "Constraint 'sizes' violated: cannot combine with auto breakpoints"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = TransformError::Config("bad yaml".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad yaml");
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransformError>();
    }
}
