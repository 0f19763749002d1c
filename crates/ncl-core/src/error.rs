//! Error and diagnostic system for the NCL object model.
//!
//! Two kinds of failure exist in this crate:
//!
//! - [`ModelError`] is returned immediately by setters and constructors
//!   when a value can never be valid (a malformed identifier, a negative
//!   count). The element is left unchanged.
//! - [`Diagnostic`]s are accumulated per element by resolution and
//!   validation, split into errors and warnings inside a [`Diagnostics`]
//!   list. They never abort processing.
//!
//! # Example
//!
//! ```
//! # use ncl_core::error::{Diagnostic, Diagnostics, ErrorCode};
//! let mut diagnostics = Diagnostics::new();
//! diagnostics.emit(
//!     Diagnostic::error("missing required attribute `role`")
//!         .with_code(ErrorCode::E200)
//!         .with_help("add a `role` attribute"),
//! );
//! assert!(diagnostics.has_errors());
//! ```

mod diagnostic;
mod diagnostics;
mod error_code;
mod severity;

pub use diagnostic::Diagnostic;
pub use diagnostics::Diagnostics;
pub use error_code::ErrorCode;
pub use severity::Severity;

/// Errors raised synchronously by element setters and value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The value does not follow the identifier syntax.
    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),

    /// The value is outside the domain accepted by the attribute.
    #[error("invalid value `{value}` for `{attribute}`: {reason}")]
    InvalidArgument {
        attribute: &'static str,
        value: String,
        reason: String,
    },
}

impl ModelError {
    pub(crate) fn invalid_argument(
        attribute: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            attribute,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// The diagnostic code describing this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ModelError::InvalidIdentifier(_) => ErrorCode::E100,
            ModelError::InvalidArgument { .. } => ErrorCode::E101,
        }
    }
}

impl From<ModelError> for Diagnostic {
    fn from(error: ModelError) -> Self {
        let code = error.code();
        Diagnostic::error(error.to_string()).with_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = ModelError::InvalidIdentifier("1abc".to_string());
        assert_eq!(err.to_string(), "invalid identifier `1abc`");

        let err = ModelError::invalid_argument("min", -1, "must not be negative");
        assert_eq!(
            err.to_string(),
            "invalid value `-1` for `min`: must not be negative"
        );
    }

    #[test]
    fn test_model_error_into_diagnostic() {
        let diag: Diagnostic = ModelError::InvalidIdentifier("a b".to_string()).into();

        assert!(diag.severity().is_error());
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.to_string(), "error[E100]: invalid identifier `a b`");
    }
}
