use std::{fmt, str::FromStr};

use crate::error::ModelError;

/// A non-negative duration.
///
/// Parsed from either the seconds form (`"5s"`, `"2.5s"`) or the clock form
/// (`"01:30"`, `"1:02:03.5"`). Always displayed in the seconds form, which
/// is what serialized documents carry.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Time {
    seconds: f64,
}

impl Time {
    /// Create a duration from a number of seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] if `seconds` is negative or
    /// not finite.
    pub fn from_seconds(seconds: f64) -> Result<Self, ModelError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ModelError::invalid_argument(
                "time",
                seconds,
                "must be a finite, non-negative number of seconds",
            ));
        }
        Ok(Self { seconds })
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    fn parse_clock(value: &str) -> Option<f64> {
        let parts: Vec<&str> = value.split(':').collect();
        if parts.len() > 3 {
            return None;
        }
        let (last, units) = parts.split_last()?;
        let mut total = 0.0;
        for unit in units {
            let unit: u32 = unit.parse().ok()?;
            total = (total + f64::from(unit)) * 60.0;
        }
        Some(total + last.parse::<f64>().ok()?)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.seconds)
    }
}

impl FromStr for Time {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let seconds = if value.contains(':') {
            Self::parse_clock(value)
        } else {
            value.strip_suffix('s').and_then(|number| number.parse().ok())
        };
        match seconds {
            Some(seconds) => Self::from_seconds(seconds),
            None => Err(ModelError::invalid_argument(
                "time",
                s,
                "expected seconds such as `5s` or a clock value such as `00:05`",
            )),
        }
    }
}
