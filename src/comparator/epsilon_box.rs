//! Additive epsilon-box dominance.
//!
//! Divides each objective axis into boxes of width epsilon and compares
//! solutions by the Pareto relation on their box coordinates. Only one
//! solution may occupy a box: two solutions in the same box are ordered by
//! their Euclidean distance to the box's minimum corner, so the relation is
//! total within a box even for epsilon-incomparable points.
//!
//! References:
//!
//! - Laumanns et al. (2002), "Combining Convergence and Diversity in
//!   Evolutionary Multi-Objective Optimization", Evolutionary Computation
//!   10(3)

use super::{Dominance, DominanceComparator};
use crate::error::Error;
use crate::solution::Solution;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-objective epsilon values.
///
/// When fewer epsilons than objectives are supplied, the last value is
/// repeated for the remaining objectives. All values must be positive and
/// finite.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Epsilons(Vec<f64>);

impl Epsilons {
    /// Creates per-objective epsilon values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyWeights`] for an empty vector and
    /// [`Error::InvalidEpsilon`] for any non-positive or non-finite value.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self, Error> {
        let values = values.into();

        if values.is_empty() {
            return Err(Error::EmptyWeights);
        }

        for &value in &values {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidEpsilon(value));
            }
        }

        Ok(Self(values))
    }

    /// Creates a single epsilon applied to every objective.
    pub fn uniform(epsilon: f64) -> Result<Self, Error> {
        Self::new(vec![epsilon])
    }

    /// Returns the epsilon for objective `i`, repeating the last defined
    /// value when `i` is past the end.
    pub fn get(&self, i: usize) -> f64 {
        self.0[i.min(self.0.len() - 1)]
    }

    /// Returns the number of explicitly defined epsilon values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `false`; an `Epsilons` is never empty once constructed.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Result of an epsilon-box comparison.
///
/// `same_box` reports whether the two solutions occupied the same epsilon
/// box; the archive uses it to distinguish a same-box replacement from a
/// genuinely dominating insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpsilonBoxOutcome {
    /// The dominance decision.
    pub dominance: Dominance,

    /// `true` if both solutions fell in the same epsilon box.
    pub same_box: bool,
}

/// The additive epsilon-box dominance relation.
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonBoxComparator {
    epsilons: Epsilons,
}

impl EpsilonBoxComparator {
    /// Creates the relation with the given per-objective epsilons.
    pub fn new(epsilons: Epsilons) -> Self {
        Self { epsilons }
    }

    /// Creates the relation with a single epsilon for every objective.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEpsilon`] if `epsilon` is not positive and
    /// finite.
    pub fn uniform(epsilon: f64) -> Result<Self, Error> {
        Ok(Self::new(Epsilons::uniform(epsilon)?))
    }

    /// Returns the epsilon values used by this relation.
    pub fn epsilons(&self) -> &Epsilons {
        &self.epsilons
    }

    /// Compares two solutions, additionally reporting whether they occupy
    /// the same epsilon box.
    ///
    /// Solutions in different boxes are compared by Pareto dominance on
    /// their box coordinates. Solutions in the same box are ordered by
    /// distance to the box's minimum corner, the nearer one preferred; an
    /// exact tie prefers the second argument, so an archive keeps its
    /// incumbent.
    pub fn compare_boxed(&self, a: &Solution, b: &Solution) -> EpsilonBoxOutcome {
        debug_assert_eq!(
            a.number_of_objectives(),
            b.number_of_objectives(),
            "solutions must have the same number of objectives"
        );

        let mut left = false;
        let mut right = false;

        for i in 0..a.number_of_objectives() {
            let epsilon = self.epsilons.get(i);
            let index_a = (a.objective_value(i) / epsilon).floor();
            let index_b = (b.objective_value(i) / epsilon).floor();

            if index_a < index_b {
                left = true;

                if right {
                    return EpsilonBoxOutcome {
                        dominance: Dominance::Neither,
                        same_box: false,
                    };
                }
            } else if index_b < index_a {
                right = true;

                if left {
                    return EpsilonBoxOutcome {
                        dominance: Dominance::Neither,
                        same_box: false,
                    };
                }
            }
        }

        if !left && !right {
            let mut dist_a = 0.0;
            let mut dist_b = 0.0;

            for i in 0..a.number_of_objectives() {
                let epsilon = self.epsilons.get(i);
                let corner_a = (a.objective_value(i) / epsilon).floor() * epsilon;
                let corner_b = (b.objective_value(i) / epsilon).floor() * epsilon;

                let da = a.objective_value(i) - corner_a;
                let db = b.objective_value(i) - corner_b;
                dist_a += da * da;
                dist_b += db * db;
            }

            EpsilonBoxOutcome {
                dominance: if dist_a < dist_b {
                    Dominance::Left
                } else {
                    Dominance::Right
                },
                same_box: true,
            }
        } else if left {
            EpsilonBoxOutcome {
                dominance: Dominance::Left,
                same_box: false,
            }
        } else {
            EpsilonBoxOutcome {
                dominance: Dominance::Right,
                same_box: false,
            }
        }
    }
}

impl DominanceComparator for EpsilonBoxComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        self.compare_boxed(a, b).dominance
    }
}
