//! The candidate-solution record consumed by every comparator and archive.
//!
//! A [`Solution`] carries real-valued objectives (each tagged with an
//! optimization [`Sense`]), constraint-violation magnitudes, and an opaque
//! decision-variable vector. All comparison code in this crate reads the
//! *canonical* objective values, where smaller is always better; a
//! `Maximize` objective is negated on access.
//!
//! Ranking passes stash their results in typed attribute fields
//! ([`Solution::rank`], [`Solution::crowding_distance`],
//! [`Solution::normalized_objectives`]) rather than an untyped attribute
//! map, so downstream comparators read them without string lookups.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance threshold below which two solutions are considered duplicates,
/// and below which an objective axis is considered degenerate.
pub const EPS: f64 = 1e-10;

/// The optimization direction of a single objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sense {
    /// Smaller values are better (the canonical direction).
    #[default]
    Minimize,

    /// Larger values are better; negated for comparison.
    Maximize,
}

/// A candidate solution with evaluated objectives and constraints.
///
/// Solutions are compared only through their objective and constraint
/// values; the decision variables are opaque to this crate and matter only
/// for the duplicate-by-encoding policy.
///
/// # Examples
///
/// ```
/// use pareto_archive::solution::{Sense, Solution};
///
/// let s = Solution::with_objectives([0.25, 0.75])
///     .with_constraints([0.0])
///     .with_variables([1.0, 2.0, 3.0]);
///
/// assert!(s.is_feasible());
/// assert_eq!(s.objective_value(1), 0.75);
///
/// // A maximized objective is negated on canonical access.
/// let s = Solution::with_objectives([10.0]).with_senses([Sense::Maximize]);
/// assert_eq!(s.objective_value(0), -10.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    objectives: Vec<f64>,
    senses: Vec<Sense>,
    constraints: Vec<f64>,
    variables: Vec<f64>,
    rank: Option<usize>,
    crowding_distance: Option<f64>,
    normalized_objectives: Option<Vec<f64>>,
}

impl Solution {
    /// Creates a solution with the given raw objective values, all minimized.
    pub fn with_objectives(objectives: impl Into<Vec<f64>>) -> Self {
        let objectives = objectives.into();
        let senses = vec![Sense::Minimize; objectives.len()];

        Self {
            objectives,
            senses,
            ..Self::default()
        }
    }

    /// Sets the optimization direction of each objective.
    ///
    /// # Panics
    ///
    /// Panics if the number of senses differs from the number of objectives.
    pub fn with_senses(mut self, senses: impl Into<Vec<Sense>>) -> Self {
        let senses = senses.into();
        assert_eq!(
            senses.len(),
            self.objectives.len(),
            "expected one sense per objective"
        );
        self.senses = senses;
        self
    }

    /// Sets the constraint-violation magnitudes (0 = satisfied).
    pub fn with_constraints(mut self, constraints: impl Into<Vec<f64>>) -> Self {
        self.constraints = constraints.into();
        self
    }

    /// Sets the decision-variable vector.
    pub fn with_variables(mut self, variables: impl Into<Vec<f64>>) -> Self {
        self.variables = variables.into();
        self
    }

    /// Returns the number of objectives.
    pub fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Returns the number of constraints.
    pub fn number_of_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the canonical (smaller-is-better) value of objective `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    pub fn objective_value(&self, i: usize) -> f64 {
        match self.senses[i] {
            Sense::Minimize => self.objectives[i],
            Sense::Maximize => -self.objectives[i],
        }
    }

    /// Returns the canonical objective values as a new vector.
    pub fn objective_values(&self) -> Vec<f64> {
        (0..self.objectives.len())
            .map(|i| self.objective_value(i))
            .collect()
    }

    /// Returns the raw (un-negated) value of objective `i`.
    pub fn raw_objective(&self, i: usize) -> f64 {
        self.objectives[i]
    }

    /// Returns the optimization direction of objective `i`.
    pub fn sense(&self, i: usize) -> Sense {
        self.senses[i]
    }

    /// Returns the violation magnitude of constraint `i`.
    pub fn constraint_value(&self, i: usize) -> f64 {
        self.constraints[i]
    }

    /// Returns the decision-variable vector.
    pub fn variables(&self) -> &[f64] {
        &self.variables
    }

    /// Returns `true` if every constraint is satisfied.
    pub fn is_feasible(&self) -> bool {
        self.constraints.iter().all(|&c| c == 0.0)
    }

    /// Returns the sum of absolute constraint-violation magnitudes.
    pub fn constraint_violation(&self) -> f64 {
        self.constraints.iter().map(|c| c.abs()).sum()
    }

    /// Returns the Euclidean distance to `other` in canonical objective space.
    ///
    /// # Panics
    ///
    /// Panics if the two solutions have a different number of objectives.
    pub fn euclidean_distance(&self, other: &Solution) -> f64 {
        assert_eq!(
            self.number_of_objectives(),
            other.number_of_objectives(),
            "solutions must have the same number of objectives"
        );

        (0..self.objectives.len())
            .map(|i| {
                let d = self.objective_value(i) - other.objective_value(i);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Returns the Euclidean distance to `other` in decision-variable space.
    ///
    /// Used by the duplicate-by-encoding policy; zero when either solution
    /// has no variables.
    pub fn variable_distance(&self, other: &Solution) -> f64 {
        self.variables
            .iter()
            .zip(other.variables.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Returns the dominance-depth rank assigned by non-dominated sorting,
    /// or `None` if the solution has not been ranked.
    pub fn rank(&self) -> Option<usize> {
        self.rank
    }

    /// Sets the dominance-depth rank.
    pub fn set_rank(&mut self, rank: usize) {
        self.rank = Some(rank);
    }

    /// Returns the crowding distance assigned by non-dominated sorting,
    /// or `None` if it has not been computed.
    pub fn crowding_distance(&self) -> Option<f64> {
        self.crowding_distance
    }

    /// Sets the crowding distance.
    pub fn set_crowding_distance(&mut self, distance: f64) {
        self.crowding_distance = Some(distance);
    }

    /// Returns the ideal-point-translated objectives stored by the
    /// reference-vector-guided truncation, or `None` if not set.
    pub fn normalized_objectives(&self) -> Option<&[f64]> {
        self.normalized_objectives.as_deref()
    }

    /// Stores the ideal-point-translated objectives.
    pub fn set_normalized_objectives(&mut self, objectives: Vec<f64>) {
        self.normalized_objectives = Some(objectives);
    }
}
