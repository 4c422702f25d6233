//! Error types for loading and validating game tunables.
//!
//! The simulation tick itself never fails: every input is generated
//! internally or clamped. Only the outer layers (reading a tuning file,
//! rejecting nonsensical values) report errors, through [`TuningError`].

use std::fmt;

/// Errors raised while loading or validating a [`crate::tuning::Tuning`].
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read.
    Io {
        /// Path that was being read.
        path: String,
        source: std::io::Error,
    },

    /// The tuning document is not valid JSON for the tuning schema.
    Parse(serde_json::Error),

    /// A `[min, max]` pair has `min > max`.
    InvalidRange {
        /// Dotted name of the offending field, e.g. `spawn.burst`.
        name: &'static str,
        min: f64,
        max: f64,
    },

    /// A size, interval or rate that must be strictly positive is not.
    NonPositive { name: &'static str, value: f64 },

    /// A probability outside `[0, 1]`.
    InvalidProbability { name: &'static str, value: f64 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io { path, source } => {
                write!(f, "failed to read tuning file '{}': {}", path, source)
            }
            TuningError::Parse(err) => write!(f, "invalid tuning document: {}", err),
            TuningError::InvalidRange { name, min, max } => write!(
                f,
                "range '{}' is inverted: min {} is greater than max {}",
                name, min, max
            ),
            TuningError::NonPositive { name, value } => {
                write!(f, "'{}' must be greater than zero (got {})", name, value)
            }
            TuningError::InvalidProbability { name, value } => {
                write!(f, "probability '{}' = {} is outside [0, 1]", name, value)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io { source, .. } => Some(source),
            TuningError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

/// Convenience alias: a `Result` using `TuningError` as the error type.
pub type TuningResult<T> = Result<T, TuningError>;

/// Returns an error unless `value > 0`.
pub fn ensure_positive(name: &'static str, value: f64) -> TuningResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::NonPositive { name, value })
    }
}

/// Returns an error unless `min <= max`.
pub fn ensure_range(name: &'static str, min: f64, max: f64) -> TuningResult<()> {
    if min <= max {
        Ok(())
    } else {
        Err(TuningError::InvalidRange { name, min, max })
    }
}

/// Returns an error unless `value` lies in `[0, 1]`.
pub fn ensure_probability(name: &'static str, value: f64) -> TuningResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::InvalidProbability { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_field_name() {
        let err = TuningError::NonPositive {
            name: "spawn.interval.normal_ms",
            value: 0.0,
        };
        assert!(err.to_string().contains("spawn.interval.normal_ms"));
    }

    #[test]
    fn test_validators() {
        assert!(ensure_positive("x", 1.0).is_ok());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_range("r", 1.0, 1.0).is_ok());
        assert!(ensure_range("r", 2.0, 1.0).is_err());
        assert!(ensure_probability("p", 0.0).is_ok());
        assert!(ensure_probability("p", 1.5).is_err());
    }
}
