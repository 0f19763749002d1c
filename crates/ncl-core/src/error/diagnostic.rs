//! The core diagnostic type.
//!
//! A [`Diagnostic`] represents a single error or warning attached to an
//! element of the document, with an optional error code and help text.

use std::fmt;

use crate::error::{ErrorCode, Severity};

/// A diagnostic message produced by resolution or validation.
///
/// # Example
///
/// ```text
/// error[E200]: <simpleCondition> is missing required attribute `role`
///    = help: add a `role` attribute naming the condition
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    help: Option<String>,
    offset: Option<usize>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use ncl_core::error::{Diagnostic, ErrorCode};
    /// let diag = Diagnostic::error("context `c1` refers to itself")
    ///     .with_code(ErrorCode::E204)
    ///     .with_help("point `refer` at another context");
    /// assert!(diag.severity().is_error());
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Byte offset into the source text, for diagnostics raised while
    /// reading markup.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set the byte offset into the source text.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            help: None,
            offset: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E200]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.help().is_none());
        assert!(diag.offset().is_none());
    }

    #[test]
    fn test_diagnostic_builders() {
        let diag = Diagnostic::warning("unknown attribute `colour`")
            .with_code(ErrorCode::E102)
            .with_help("did you mean `color`?");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.code(), Some(ErrorCode::E102));
        assert_eq!(diag.help(), Some("did you mean `color`?"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error("missing `id`").with_code(ErrorCode::E200);
        assert_eq!(diag.to_string(), "error[E200]: missing `id`");

        let diag = Diagnostic::warning("empty base");
        assert_eq!(diag.to_string(), "warning: empty base");
    }
}
