//! Per-element diagnostic lists.
//!
//! Every element of a document owns a [`Diagnostics`] value holding the
//! errors and warnings produced for it and for its descendants.

use crate::error::Diagnostic;

/// Errors and warnings accumulated for one element, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic in the list matching its severity.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.errors.push(diagnostic);
        } else {
            self.warnings.push(diagnostic);
        }
    }

    /// Append every diagnostic of `other`, keeping its order.
    pub fn merge(&mut self, other: &Diagnostics) {
        self.errors.extend_from_slice(&other.errors);
        self.warnings.extend_from_slice(&other.warnings);
    }

    /// Remove all recorded diagnostics.
    pub fn clear(&mut self) {
        self.errors.clear();
        self.warnings.clear();
    }

    /// Keep only the diagnostics for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&Diagnostic) -> bool) {
        self.errors.retain(&mut keep);
        self.warnings.retain(&mut keep);
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Returns `true` if at least one error was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if neither errors nor warnings were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Total number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Iterate over errors first, then warnings.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.emit(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_retain_filters_both_lists() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.emit(Diagnostic::error("kept").with_code(ErrorCode::E200));
        diagnostics.emit(Diagnostic::warning("dropped").with_code(ErrorCode::E300));
        diagnostics.emit(Diagnostic::warning("uncoded"));

        diagnostics.retain(|d| !d.code().is_some_and(|code| code.is_resolution()));

        assert_eq!(diagnostics.errors().len(), 1);
        assert_eq!(diagnostics.warnings().len(), 1);
        assert_eq!(diagnostics.warnings()[0].message(), "uncoded");
    }

    #[test]
    fn test_diagnostics_split_by_severity() {
        let mut diagnostics = Diagnostics::new();

        diagnostics.emit(Diagnostic::error("error 1"));
        diagnostics.emit(Diagnostic::warning("warning 1"));
        diagnostics.emit(Diagnostic::error("error 2"));

        assert_eq!(diagnostics.errors().len(), 2);
        assert_eq!(diagnostics.warnings().len(), 1);
        assert_eq!(diagnostics.len(), 3);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.errors()[1].message(), "error 2");
    }

    #[test]
    fn test_diagnostics_warnings_only() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.emit(Diagnostic::warning("unresolved").with_code(ErrorCode::E300));

        assert!(!diagnostics.has_errors());
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn test_diagnostics_merge_appends_in_order() {
        let mut parent = Diagnostics::new();
        parent.emit(Diagnostic::error("own"));

        let mut child = Diagnostics::new();
        child.emit(Diagnostic::error("child"));
        child.emit(Diagnostic::warning("child warning"));

        parent.merge(&child);

        let messages: Vec<_> = parent.iter().map(Diagnostic::message).collect();
        assert_eq!(messages, ["own", "child", "child warning"]);
    }

    #[test]
    fn test_diagnostics_clear() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.extend([Diagnostic::error("a"), Diagnostic::warning("b")]);
        diagnostics.clear();

        assert!(diagnostics.is_empty());
    }
}
