use std::{fmt, str::FromStr};

use crate::error::ModelError;

/// Upper bound on how many binds may play a role.
///
/// Stored as a count, or [`Cardinality::Unbounded`], which serializes as the
/// token `unbounded`. In numeric form an unbounded cardinality is `-1`, and
/// any negative count is read as unbounded.
///
/// # Examples
///
/// ```
/// use ncl_core::value::Cardinality;
///
/// assert_eq!(Cardinality::from_count(-1), Ok(Cardinality::Unbounded));
/// assert!(Cardinality::from_count(1 << 40).is_err());
/// assert_eq!(Cardinality::Unbounded.to_string(), "unbounded");
/// assert_eq!("unbounded".parse(), Ok(Cardinality::Unbounded));
/// assert_eq!(Cardinality::Unbounded.as_count(), -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Count(u32),
    Unbounded,
}

impl Cardinality {
    /// Numeric form of [`Cardinality::Unbounded`].
    pub const UNBOUNDED: i64 = -1;

    /// Interpret a numeric count; negative values mean unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] for counts above `u32::MAX`.
    pub fn from_count(count: i64) -> Result<Self, ModelError> {
        if count < 0 {
            return Ok(Cardinality::Unbounded);
        }
        u32::try_from(count)
            .map(Cardinality::Count)
            .map_err(|_| ModelError::invalid_argument("max", count, "count is too large"))
    }

    /// Numeric form, with `-1` for unbounded.
    pub fn as_count(&self) -> i64 {
        match self {
            Cardinality::Count(count) => i64::from(*count),
            Cardinality::Unbounded => Self::UNBOUNDED,
        }
    }

    /// Returns `true` if exactly one bind may play the role.
    pub fn is_one(&self) -> bool {
        matches!(self, Cardinality::Count(1))
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Cardinality::Count(1)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Count(count) => write!(f, "{count}"),
            Cardinality::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl FromStr for Cardinality {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value == "unbounded" {
            return Ok(Cardinality::Unbounded);
        }
        let count = value.parse::<i64>().map_err(|_| {
            ModelError::invalid_argument("max", s, "expected a number or `unbounded`")
        })?;
        Self::from_count(count)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_unbounded_round_trip() {
        let text = Cardinality::from_count(-1).unwrap().to_string();
        assert_eq!(text, "unbounded");
        assert_eq!(text.parse::<Cardinality>().unwrap().as_count(), -1);
    }

    #[test]
    fn test_negative_text_is_unbounded() {
        assert_eq!("-7".parse(), Ok(Cardinality::Unbounded));
        assert!("many".parse::<Cardinality>().is_err());
    }

    #[test]
    fn test_count_too_large_is_rejected() {
        let too_large = i64::from(u32::MAX) + 1;

        assert!(matches!(
            Cardinality::from_count(too_large),
            Err(ModelError::InvalidArgument { .. })
        ));
        assert!("4294967296".parse::<Cardinality>().is_err());
        assert_eq!(
            Cardinality::from_count(i64::from(u32::MAX)),
            Ok(Cardinality::Count(u32::MAX))
        );
    }

    #[test]
    fn test_default_is_one() {
        assert!(Cardinality::default().is_one());
    }

    proptest! {
        #[test]
        fn test_from_count_preserves_numeric_form(count in -1000i64..=i64::from(u32::MAX)) {
            let expected = if count < 0 { -1 } else { count };
            prop_assert_eq!(Cardinality::from_count(count).map(|c| c.as_count()), Ok(expected));
        }
    }
}
