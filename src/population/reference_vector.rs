//! The reference-vector-guided population used by RVEA-style algorithms.

use crate::error::Error;
use crate::population::Population;
use crate::solution::Solution;
use crate::vector;
use crate::weights::{normal_boundary_weights, NormalBoundaryDivisions};
use tracing::debug;

/// Default rate-of-change exponent for the angle-penalized distance.
const DEFAULT_ALPHA: f64 = 2.0;

/// Minimum per-objective range used when rescaling reference vectors, so a
/// degenerate zero-width axis cannot collapse a direction.
const MIN_RANGE: f64 = 0.01;

/// A population that retains exactly one solution per reference direction.
///
/// Reference directions are generated from combinatorial divisions on the
/// unit simplex and normalized onto the positive orthant. Each
/// [`truncate`](Self::truncate) recomputes the ideal point, associates
/// every member with the direction nearest in angle, and keeps per
/// direction the member minimizing an angle-penalized distance — trading
/// convergence early in the run for diversity late in the run as the
/// scaling factor grows from 0 to 1.
///
/// References:
///
/// - Cheng, Jin, Olhofer & Sendhoff (2016), "A Reference Vector Guided
///   Evolutionary Algorithm for Many-objective Optimization", IEEE
///   Transactions on Evolutionary Computation
pub struct ReferenceVectorGuidedPopulation {
    inner: Population,
    number_of_objectives: usize,
    divisions: NormalBoundaryDivisions,
    alpha: f64,
    scaling_factor: f64,
    original_weights: Vec<Vec<f64>>,
    weights: Vec<Vec<f64>>,
    min_angles: Vec<f64>,
    ideal_point: Vec<f64>,
}

impl ReferenceVectorGuidedPopulation {
    /// Creates an empty population with reference directions generated from
    /// the given divisions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooFewObjectives`] when fewer than two objectives
    /// are configured.
    pub fn new(
        number_of_objectives: usize,
        divisions: NormalBoundaryDivisions,
    ) -> Result<Self, Error> {
        if number_of_objectives < 2 {
            return Err(Error::TooFewObjectives {
                component: "reference vector guided population",
                minimum: 2,
                actual: number_of_objectives,
            });
        }

        let original_weights: Vec<Vec<f64>> =
            normal_boundary_weights(number_of_objectives, &divisions)
                .iter()
                .map(|w| vector::normalize(w))
                .collect();

        let weights = original_weights.clone();
        let min_angles = smallest_angles(&weights);

        Ok(Self {
            inner: Population::new(),
            number_of_objectives,
            divisions,
            alpha: DEFAULT_ALPHA,
            scaling_factor: 0.0,
            original_weights,
            weights,
            min_angles,
            ideal_point: vec![f64::INFINITY; number_of_objectives],
        })
    }

    /// Sets the `alpha` exponent controlling how quickly the angle penalty
    /// ramps up over the run.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Returns the divisions used to generate the reference directions.
    pub fn divisions(&self) -> &NormalBoundaryDivisions {
        &self.divisions
    }

    /// Returns the `alpha` exponent.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the current scaling factor.
    pub fn scaling_factor(&self) -> f64 {
        self.scaling_factor
    }

    /// Sets the scaling factor of the angle-penalized distance, clamped to
    /// `[0, 1]`. Intended to be driven with `generation / max_generations`:
    /// smaller values favor convergence, larger values diversity.
    pub fn set_scaling_factor(&mut self, scaling_factor: f64) {
        self.scaling_factor = scaling_factor.clamp(0.0, 1.0);
    }

    /// Returns the number of reference directions.
    pub fn number_of_reference_vectors(&self) -> usize {
        self.weights.len()
    }

    /// Rescales each original reference direction by the current
    /// per-objective objective range (floored at 0.01), re-normalizes, and
    /// recomputes the per-direction minimum angles used by the penalty
    /// term.
    pub fn adapt(&mut self) {
        let mut min = vec![f64::INFINITY; self.number_of_objectives];
        let mut max = vec![f64::NEG_INFINITY; self.number_of_objectives];

        for solution in &self.inner {
            for i in 0..self.number_of_objectives {
                min[i] = min[i].min(solution.objective_value(i));
                max[i] = max[i].max(solution.objective_value(i));
            }
        }

        self.weights = self
            .original_weights
            .iter()
            .map(|weight| {
                let scaled: Vec<f64> = weight
                    .iter()
                    .enumerate()
                    .map(|(i, w)| w * (max[i] - min[i]).max(MIN_RANGE))
                    .collect();

                vector::normalize(&scaled)
            })
            .collect();

        self.min_angles = smallest_angles(&self.weights);

        debug!(
            vectors = self.weights.len(),
            "adapted reference vectors to objective ranges"
        );
    }

    /// Truncates the population so that at most one solution remains per
    /// reference direction; directions with no associated member contribute
    /// no survivor.
    ///
    /// # Panics
    ///
    /// Panics if a member has a different number of objectives than this
    /// population was configured with.
    pub fn truncate(&mut self) {
        self.calculate_ideal_point();
        self.translate_by_ideal_point();

        let associations = self.associate();
        let mut survivors = Vec::new();

        for (direction, members) in associations.iter().enumerate() {
            if !members.is_empty() {
                let keep = self.select(members, direction);
                survivors.push(self.inner[keep].clone());
            }
        }

        debug!(
            members = self.inner.len(),
            survivors = survivors.len(),
            "truncated to one survivor per reference vector"
        );

        self.inner.clear();
        self.inner.add_all(survivors);
    }

    /// Recomputes the ideal point as the per-objective minimum.
    fn calculate_ideal_point(&mut self) {
        self.ideal_point = vec![f64::INFINITY; self.number_of_objectives];

        for solution in &self.inner {
            assert_eq!(
                solution.number_of_objectives(),
                self.number_of_objectives,
                "solution objective count does not match this population"
            );

            for i in 0..self.number_of_objectives {
                self.ideal_point[i] = self.ideal_point[i].min(solution.objective_value(i));
            }
        }
    }

    /// Stores each member's ideal-point-translated objectives in its
    /// normalized-objectives attribute, leaving the objectives themselves
    /// untouched.
    fn translate_by_ideal_point(&mut self) {
        let ideal = self.ideal_point.clone();

        for solution in self.inner.iter_mut() {
            let translated: Vec<f64> = (0..ideal.len())
                .map(|i| solution.objective_value(i) - ideal[i])
                .collect();

            solution.set_normalized_objectives(translated);
        }
    }

    /// Associates every member with the reference direction of maximum
    /// cosine similarity. A degenerate all-zero objective vector (a member
    /// equal to the ideal point) defaults to direction 0.
    fn associate(&self) -> Vec<Vec<usize>> {
        let mut result = vec![Vec::new(); self.weights.len()];

        for (index, solution) in self.inner.iter().enumerate() {
            let objectives = solution
                .normalized_objectives()
                .expect("members are translated before association");

            let mut best: Option<usize> = None;
            let mut best_cosine = f64::NEG_INFINITY;

            for (direction, weight) in self.weights.iter().enumerate() {
                let cosine = cosine(weight, objectives);

                if cosine > best_cosine {
                    best_cosine = cosine;
                    best = Some(direction);
                }
            }

            result[best.unwrap_or(0)].push(index);
        }

        result
    }

    /// Selects the member with the smallest angle-penalized distance among
    /// the feasible candidates, falling back to the smallest summed
    /// constraint violation when every candidate is infeasible.
    fn select(&self, members: &[usize], direction: usize) -> usize {
        let weight = &self.weights[direction];
        let mut min_distance = f64::INFINITY;
        let mut selected: Option<usize> = None;

        for &index in members {
            let solution = &self.inner[index];

            if solution.is_feasible() {
                let objectives = solution
                    .normalized_objectives()
                    .expect("members are translated before selection");

                let penalty = self.number_of_objectives as f64
                    * self.scaling_factor.powf(self.alpha)
                    * acosine(weight, objectives)
                    / self.min_angles[direction];

                let distance = vector::magnitude(objectives) * (1.0 + penalty);

                if distance < min_distance {
                    min_distance = distance;
                    selected = Some(index);
                }
            }
        }

        if selected.is_none() {
            for &index in members {
                let distance = self.inner[index].constraint_violation();

                if distance < min_distance {
                    min_distance = distance;
                    selected = Some(index);
                }
            }
        }

        selected.expect("association lists contain at least one member")
    }

    /// Appends a solution; no invariant is enforced until
    /// [`truncate`](Self::truncate) runs.
    pub fn add(&mut self, solution: Solution) {
        self.inner.add(solution);
    }

    /// Appends every solution from the iterator.
    pub fn add_all(&mut self, solutions: impl IntoIterator<Item = Solution>) {
        self.inner.add_all(solutions);
    }

    /// Removes all solutions.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Returns the number of solutions.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the population contains no solutions.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the solution at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> &Solution {
        self.inner.get(index)
    }

    /// Iterates over the solutions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.inner.iter()
    }
}

impl<'a> IntoIterator for &'a ReferenceVectorGuidedPopulation {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cosine between a unit direction and a point; the point need not be
/// normalized.
fn cosine(line: &[f64], point: &[f64]) -> f64 {
    vector::dot(point, line) / vector::magnitude(point)
}

/// Angle between a unit direction and a point.
fn acosine(line: &[f64], point: &[f64]) -> f64 {
    cosine(line, point).clamp(-1.0, 1.0).acos()
}

/// The smallest pairwise angle from each direction to any other.
fn smallest_angles(weights: &[Vec<f64>]) -> Vec<f64> {
    (0..weights.len())
        .map(|i| {
            let mut smallest = f64::INFINITY;

            for (j, other) in weights.iter().enumerate() {
                if i != j {
                    smallest = smallest.min(acosine(&weights[i], other));
                }
            }

            smallest
        })
        .collect()
}
