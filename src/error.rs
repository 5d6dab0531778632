//! Error types for construction-time validation.
//!
//! Only configuration and capacity errors are represented here; both are
//! detected when a comparator or archive is built, before any solution is
//! processed. Usage errors (indexing out of range, computing bounds of an
//! empty population, comparing unranked solutions) are programmer errors and
//! panic instead — see the `# Panics` sections on the respective methods.

use thiserror::Error;

/// Errors reported when building comparators, archives, or weight
/// generators with invalid parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A scalarizing comparator was given an empty weight vector.
    #[error("weight vector must contain at least one weight")]
    EmptyWeights,

    /// A weight was negative, NaN, or infinite.
    #[error("weights must be finite and non-negative, got {0}")]
    InvalidWeight(f64),

    /// An epsilon value was zero, negative, NaN, or infinite.
    #[error("epsilon values must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    /// A scalarizing method name did not match any known method.
    #[error("unknown scalarizing method: {0:?}")]
    UnknownScalarizingMethod(String),

    /// A component required more objectives than were configured.
    #[error("{component} requires at least {minimum} objectives, got {actual}")]
    TooFewObjectives {
        /// The component that rejected the configuration.
        component: &'static str,
        /// The minimum number of objectives required.
        minimum: usize,
        /// The number of objectives actually configured.
        actual: usize,
    },

    /// `divisions^objectives` exceeds the representable grid index range.
    #[error("{divisions} divisions raised to {objectives} objectives overflows the grid index range")]
    GridIndexOverflow {
        /// The number of divisions per objective.
        divisions: usize,
        /// The number of objectives.
        objectives: usize,
    },

    /// A division count of zero was supplied.
    #[error("number of divisions must be at least 1")]
    InvalidDivisions,

    /// An archive capacity of zero was supplied.
    #[error("archive capacity must be at least 1")]
    ZeroCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::EmptyWeights.to_string(),
            "weight vector must contain at least one weight"
        );
        assert_eq!(
            Error::GridIndexOverflow {
                divisions: 256,
                objectives: 4
            }
            .to_string(),
            "256 divisions raised to 4 objectives overflows the grid index range"
        );
        assert_eq!(
            Error::UnknownScalarizingMethod("foo".into()).to_string(),
            "unknown scalarizing method: \"foo\""
        );
    }
}
