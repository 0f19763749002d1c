//! Error types for NCL document loading.
//!
//! This module provides the main error type [`NclError`] which wraps the
//! error conditions of reading, checking and configuring.

use thiserror::Error;

use ncl_core::error::{Diagnostic, Diagnostics};
use ncl_parser::ParseError;

/// The main error type for NCL operations.
#[derive(Debug, Error)]
pub enum NclError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Validation rejected the document. Holds every diagnostic of the
    /// document, errors and warnings alike.
    #[error("{}", summary(.diagnostics))]
    Invalid { diagnostics: Diagnostics },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NclError {
    /// The diagnostics behind this error, if it carries any.
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        match self {
            NclError::Parse(err) => err.diagnostics().iter().collect(),
            NclError::Invalid { diagnostics } => diagnostics.iter().collect(),
            NclError::Config(_) => Vec::new(),
        }
    }
}

fn summary(diagnostics: &Diagnostics) -> String {
    let errors = diagnostics.errors().len();
    let warnings = diagnostics.warnings().len();
    match diagnostics.iter().next() {
        Some(first) => format!(
            "invalid document ({errors} errors, {warnings} warnings): {first}"
        ),
        None => "invalid document".to_string(),
    }
}
