//! Scalarizing (weighted-aggregate) comparators.
//!
//! Each relation here reduces the objective vector to a single fitness
//! scalar where smaller is better, then compares by that scalar — producing
//! a total order, unlike the partial Pareto relations. Weight vectors may be
//! shorter than the objective count; the last weight is repeated for the
//! remaining objectives.

use super::{Dominance, DominanceComparator};
use crate::error::Error;
use crate::solution::Solution;
use crate::vector;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default exponent for the vector-angle-distance-scaling relation.
const DEFAULT_VADS_EXPONENT: f64 = 100.0;

fn validate_weights(weights: &[f64]) -> Result<(), Error> {
    if weights.is_empty() {
        return Err(Error::EmptyWeights);
    }

    for &w in weights {
        if !w.is_finite() || w < 0.0 {
            return Err(Error::InvalidWeight(w));
        }
    }

    Ok(())
}

/// Returns the weight for objective `i`, repeating the last weight when the
/// vector is shorter than the objective count.
fn weight_of(weights: &[f64], i: usize) -> f64 {
    weights[i.min(weights.len() - 1)]
}

/// A dominance relation backed by a scalar fitness function.
pub trait AggregateComparator: DominanceComparator {
    /// Computes the scalar fitness of a solution (smaller is better).
    fn calculate(&self, solution: &Solution) -> f64;

    /// Returns the weight vector used by this relation.
    fn weights(&self) -> &[f64];
}

fn compare_by_fitness(c: &impl AggregateComparator, a: &Solution, b: &Solution) -> Dominance {
    let fa = c.calculate(a);
    let fb = c.calculate(b);

    if fa < fb {
        Dominance::Left
    } else if fb < fa {
        Dominance::Right
    } else {
        Dominance::Neither
    }
}

/// Weighted-sum scalarization: `fitness = sum(w_i * objective_i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearComparator {
    weights: Vec<f64>,
}

impl LinearComparator {
    /// Creates a weighted-sum relation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyWeights`] or [`Error::InvalidWeight`] for an
    /// empty, negative, or non-finite weight vector.
    pub fn new(weights: impl Into<Vec<f64>>) -> Result<Self, Error> {
        let weights = weights.into();
        validate_weights(&weights)?;
        Ok(Self { weights })
    }
}

impl Default for LinearComparator {
    /// Equal weights of `1.0` on every objective.
    fn default() -> Self {
        Self { weights: vec![1.0] }
    }
}

impl AggregateComparator for LinearComparator {
    fn calculate(&self, solution: &Solution) -> f64 {
        (0..solution.number_of_objectives())
            .map(|i| weight_of(&self.weights, i) * solution.objective_value(i))
            .sum()
    }

    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl DominanceComparator for LinearComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        compare_by_fitness(self, a, b)
    }
}

/// Weighted min-max scalarization: `fitness = max(w_i * objective_i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxComparator {
    weights: Vec<f64>,
}

impl MinMaxComparator {
    /// Creates a weighted min-max relation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyWeights`] or [`Error::InvalidWeight`] for an
    /// empty, negative, or non-finite weight vector.
    pub fn new(weights: impl Into<Vec<f64>>) -> Result<Self, Error> {
        let weights = weights.into();
        validate_weights(&weights)?;
        Ok(Self { weights })
    }
}

impl Default for MinMaxComparator {
    fn default() -> Self {
        Self { weights: vec![1.0] }
    }
}

impl AggregateComparator for MinMaxComparator {
    fn calculate(&self, solution: &Solution) -> f64 {
        (0..solution.number_of_objectives())
            .map(|i| weight_of(&self.weights, i) * solution.objective_value(i))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl DominanceComparator for MinMaxComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        compare_by_fitness(self, a, b)
    }
}

/// Weighted Tchebychev scalarization:
/// `fitness = max(w_i * |objective_i - reference_i|)`.
///
/// The reference point defaults to the origin; supply a utopia point via
/// [`with_reference`](Self::with_reference) to measure distance from it.
#[derive(Debug, Clone, PartialEq)]
pub struct TchebychevComparator {
    weights: Vec<f64>,
    reference: Vec<f64>,
}

impl TchebychevComparator {
    /// Creates a weighted Tchebychev relation with the origin as reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyWeights`] or [`Error::InvalidWeight`] for an
    /// empty, negative, or non-finite weight vector.
    pub fn new(weights: impl Into<Vec<f64>>) -> Result<Self, Error> {
        let weights = weights.into();
        validate_weights(&weights)?;
        Ok(Self {
            weights,
            reference: Vec::new(),
        })
    }

    /// Sets the reference (utopia) point. Missing entries are treated as 0.
    pub fn with_reference(mut self, reference: impl Into<Vec<f64>>) -> Self {
        self.reference = reference.into();
        self
    }

    fn reference_of(&self, i: usize) -> f64 {
        self.reference.get(i).copied().unwrap_or(0.0)
    }
}

impl AggregateComparator for TchebychevComparator {
    fn calculate(&self, solution: &Solution) -> f64 {
        (0..solution.number_of_objectives())
            .map(|i| {
                weight_of(&self.weights, i) * (solution.objective_value(i) - self.reference_of(i)).abs()
            })
            .fold(f64::NEG_INFINITY, f64::max)
    }

    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl DominanceComparator for TchebychevComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        compare_by_fitness(self, a, b)
    }
}

/// Vector-angle-distance scaling: `fitness = |f| / cos(angle(f, w))^q`.
///
/// Penalizes the objective vector's magnitude by its angular deviation from
/// the weight vector, steering the search along that direction. Larger
/// exponents `q` penalize deviation more sharply; the default is 100.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorAngleDistanceScalingComparator {
    weights: Vec<f64>,
    exponent: f64,
}

impl VectorAngleDistanceScalingComparator {
    /// Creates the relation with the default exponent of 100.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyWeights`] or [`Error::InvalidWeight`] for an
    /// empty, negative, or non-finite weight vector.
    pub fn new(weights: impl Into<Vec<f64>>) -> Result<Self, Error> {
        let weights = weights.into();
        validate_weights(&weights)?;
        Ok(Self {
            weights,
            exponent: DEFAULT_VADS_EXPONENT,
        })
    }

    /// Sets the angle-penalty exponent `q`.
    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }
}

impl AggregateComparator for VectorAngleDistanceScalingComparator {
    fn calculate(&self, solution: &Solution) -> f64 {
        let objectives = solution.objective_values();
        let magnitude = vector::magnitude(&objectives);

        if magnitude == 0.0 {
            return 0.0;
        }

        // Weight vectors may be shorter than the objective count.
        let weights: Vec<f64> = (0..objectives.len())
            .map(|i| weight_of(&self.weights, i))
            .collect();

        let cosine =
            vector::dot(&weights, &objectives) / (vector::magnitude(&weights) * magnitude);

        magnitude / cosine.powf(self.exponent)
    }

    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl DominanceComparator for VectorAngleDistanceScalingComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        compare_by_fitness(self, a, b)
    }
}

/// Names of the scalarizing relations, for configuration-driven selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScalarizingMethod {
    /// Weighted sum ([`LinearComparator`]).
    Linear,

    /// Weighted max ([`MinMaxComparator`]).
    MinMax,

    /// Weighted Tchebychev distance ([`TchebychevComparator`]).
    Tchebychev,

    /// Vector-angle-distance scaling
    /// ([`VectorAngleDistanceScalingComparator`]).
    VectorAngleDistanceScaling,
}

impl ScalarizingMethod {
    /// Builds the comparator for this method with the given weights.
    ///
    /// # Errors
    ///
    /// Returns the weight-validation errors of the underlying constructor.
    pub fn comparator(self, weights: Vec<f64>) -> Result<Box<dyn AggregateComparator>, Error> {
        Ok(match self {
            Self::Linear => Box::new(LinearComparator::new(weights)?),
            Self::MinMax => Box::new(MinMaxComparator::new(weights)?),
            Self::Tchebychev => Box::new(TchebychevComparator::new(weights)?),
            Self::VectorAngleDistanceScaling => {
                Box::new(VectorAngleDistanceScalingComparator::new(weights)?)
            }
        })
    }
}

impl FromStr for ScalarizingMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "min-max" | "minmax" => Ok(Self::MinMax),
            "tchebychev" | "chebyshev" => Ok(Self::Tchebychev),
            "vads" | "angle" => Ok(Self::VectorAngleDistanceScaling),
            _ => Err(Error::UnknownScalarizingMethod(s.to_string())),
        }
    }
}
