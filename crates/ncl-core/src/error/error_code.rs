//! Error codes for the NCL diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Text source errors
//! - `E1xx` - Construction errors
//! - `E2xx` - Validation errors
//! - `E3xx` - Resolution errors

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Text Source Errors (E0xx)
    // =========================================================================
    /// Malformed markup.
    ///
    /// The text could not be read as a tag, comment or declaration.
    E001,

    /// Mismatched end tag.
    ///
    /// An end tag does not close the most recently opened element.
    E002,

    /// Unclosed element.
    ///
    /// The input ended while elements were still open.
    E003,

    /// Unexpected end tag.
    ///
    /// An end tag was found with no element open.
    E004,

    // =========================================================================
    // Construction Errors (E1xx)
    // =========================================================================
    /// Invalid identifier.
    ///
    /// An identifier attribute does not follow the identifier syntax.
    E100,

    /// Invalid attribute value.
    ///
    /// The value is outside the domain of the attribute (unknown token,
    /// negative count, malformed duration).
    E101,

    /// Unknown attribute.
    ///
    /// The attribute is not defined for this element and was ignored.
    E102,

    /// Unexpected element.
    ///
    /// The element may not appear inside its parent and was skipped
    /// together with its content.
    E103,

    /// Duplicate element.
    ///
    /// A child with the same key already exists in a key-ordered
    /// collection; the new child was rejected.
    E104,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Missing required attribute.
    E200,

    /// Forbidden attribute.
    ///
    /// The attribute is not allowed given the values of other attributes.
    E201,

    /// Conflicting attributes.
    ///
    /// Two attributes carry values that contradict each other.
    E202,

    /// Invalid child count.
    ///
    /// A required child is missing or a collection is empty.
    E203,

    /// Self reference.
    ///
    /// An element refers to itself or to one of its own descendants.
    E204,

    /// Reference out of scope.
    ///
    /// A reference points at an element outside the scope allowed for it.
    E205,

    /// Type mismatch.
    ///
    /// A subtype does not belong to the declared type.
    E206,

    /// Wrong parameter kind.
    ///
    /// A link holds a bind parameter or a bind holds a link parameter.
    E207,

    // =========================================================================
    // Resolution Errors (E3xx)
    // =========================================================================
    /// Unresolved reference.
    ///
    /// No element with the referenced identifier exists in the lookup scope.
    E300,

    /// Missing lookup scope.
    ///
    /// The base or enclosing element a reference resolves against is absent.
    E301,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Text source errors
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            // Construction errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            // Validation errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E207 => "E207",
            // Resolution errors
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Returns `true` for codes the reference resolver emits.
    pub fn is_resolution(&self) -> bool {
        matches!(self, ErrorCode::E300 | ErrorCode::E301)
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Text source errors
            ErrorCode::E001 => "malformed markup",
            ErrorCode::E002 => "mismatched end tag",
            ErrorCode::E003 => "unclosed element",
            ErrorCode::E004 => "unexpected end tag",
            // Construction errors
            ErrorCode::E100 => "invalid identifier",
            ErrorCode::E101 => "invalid attribute value",
            ErrorCode::E102 => "unknown attribute",
            ErrorCode::E103 => "unexpected element",
            ErrorCode::E104 => "duplicate element",
            // Validation errors
            ErrorCode::E200 => "missing required attribute",
            ErrorCode::E201 => "forbidden attribute",
            ErrorCode::E202 => "conflicting attributes",
            ErrorCode::E203 => "invalid child count",
            ErrorCode::E204 => "self reference",
            ErrorCode::E205 => "reference out of scope",
            ErrorCode::E206 => "type mismatch",
            ErrorCode::E207 => "wrong parameter kind",
            // Resolution errors
            ErrorCode::E300 => "unresolved reference",
            ErrorCode::E301 => "missing lookup scope",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
