//! Identifier management using string interning for efficient storage and comparison
//!
//! This module provides the [`Id`] type. Every element identifier, parameter
//! name and property name in a document is an [`Id`]; constructing one checks
//! the language's identifier syntax, so a value of this type is always valid.

use std::{
    cmp::Ordering,
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

use crate::error::ModelError;

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> std::sync::MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Returns `true` if `name` follows the identifier syntax.
///
/// An identifier starts with a letter or `_` and continues with letters,
/// digits, `_`, `-` or `.`.
///
/// # Examples
///
/// ```
/// use ncl_core::identifier::is_valid_identifier;
///
/// assert!(is_valid_identifier("video1"));
/// assert!(is_valid_identifier("system.language"));
/// assert!(!is_valid_identifier("1video"));
/// assert!(!is_valid_identifier("my video"));
/// ```
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Interned identifier.
///
/// Equality and hashing work on the interned symbol; ordering compares the
/// underlying strings so that key-ordered collections iterate
/// lexicographically.
///
/// # Examples
///
/// ```
/// use ncl_core::identifier::Id;
///
/// let id = Id::parse("mainVideo").unwrap();
/// assert_eq!(id, "mainVideo");
/// assert!(Id::parse("main video").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` after checking the identifier syntax.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidIdentifier`] when `name` is not a valid
    /// identifier.
    pub fn parse(name: &str) -> Result<Self, ModelError> {
        if !is_valid_identifier(name) {
            return Err(ModelError::InvalidIdentifier(name.to_string()));
        }
        Ok(Self::intern(name))
    }

    fn intern(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Runs `f` with the string form of this identifier.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let value = interner.resolve(self.0).unwrap_or_default();
        f(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.with_str(str::to_string);
        f.write_str(&value)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.with_str(str::to_string);
        f.debug_tuple("Id").field(&value).finish()
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        let interner = interner();
        let left = interner.resolve(self.0).unwrap_or_default();
        let right = interner.resolve(other.0).unwrap_or_default();
        left.cmp(right)
    }
}

impl std::str::FromStr for Id {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
