//! Reference-direction generation on the unit simplex.
//!
//! The normal-boundary-intersection (NBI) lattice places `C(M + d - 1, d)`
//! evenly spaced points on the unit simplex for `M` objectives and `d`
//! divisions. For many objectives a single-layer lattice either explodes or
//! leaves the interior empty, so the two-layer scheme of Deb & Jain (2014)
//! combines a sparse boundary layer with an inner layer shrunk toward the
//! centroid.
//!
//! References:
//!
//! - Das & Dennis (1998), "Normal-boundary intersection: A new method for
//!   generating the Pareto surface in nonlinear multicriteria optimization
//!   problems", SIAM J. Optimization 8(3)
//! - Deb & Jain (2014), "An Evolutionary Many-Objective Optimization
//!   Algorithm Using Reference-Point-Based Nondominated Sorting Approach",
//!   IEEE Transactions on Evolutionary Computation 18(4)

use crate::error::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Division counts for the NBI lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalBoundaryDivisions {
    outer: usize,
    inner: usize,
}

impl NormalBoundaryDivisions {
    /// Single-layer lattice with the given number of divisions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDivisions`] if `divisions` is zero.
    pub fn new(divisions: usize) -> Result<Self, Error> {
        if divisions == 0 {
            return Err(Error::InvalidDivisions);
        }

        Ok(Self {
            outer: divisions,
            inner: 0,
        })
    }

    /// Two-layer lattice with separate outer and inner division counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDivisions`] if `outer` is zero.
    pub fn two_layer(outer: usize, inner: usize) -> Result<Self, Error> {
        if outer == 0 {
            return Err(Error::InvalidDivisions);
        }

        Ok(Self { outer, inner })
    }

    /// Default division counts for the given number of objectives,
    /// producing a reference set of manageable size at any dimension.
    pub fn for_objectives(number_of_objectives: usize) -> Self {
        let (outer, inner) = match number_of_objectives {
            0 | 1 => (100, 0),
            2 => (99, 0),
            3 => (12, 0),
            4 => (8, 0),
            5 => (6, 0),
            6 => (4, 1),
            7..=10 => (3, 2),
            _ => (2, 1),
        };

        Self { outer, inner }
    }

    /// Returns the number of outer divisions.
    pub fn outer_divisions(&self) -> usize {
        self.outer
    }

    /// Returns the number of inner divisions (0 = single layer).
    pub fn inner_divisions(&self) -> usize {
        self.inner
    }

    /// Returns `true` if the two-layer scheme is used.
    pub fn is_two_layer(&self) -> bool {
        self.inner > 0
    }

    /// Returns the number of reference points the lattice will produce for
    /// the given number of objectives.
    pub fn number_of_reference_points(&self, number_of_objectives: usize) -> usize {
        let mut count = binomial(number_of_objectives + self.outer - 1, self.outer);

        if self.inner > 0 {
            count += binomial(number_of_objectives + self.inner - 1, self.inner);
        }

        count
    }
}

/// `C(n, k)` computed with widening arithmetic.
fn binomial(n: usize, k: usize) -> usize {
    let k = k.min(n - k);
    let mut result: u128 = 1;

    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
    }

    result as usize
}

/// Generates the NBI reference directions for the given number of
/// objectives and divisions. Every weight sums to 1; two-layer inner
/// points are shrunk halfway toward the centroid.
pub fn normal_boundary_weights(
    number_of_objectives: usize,
    divisions: &NormalBoundaryDivisions,
) -> Vec<Vec<f64>> {
    let mut weights = generate_layer(number_of_objectives, divisions.outer_divisions());

    if divisions.is_two_layer() {
        let mut inner = generate_layer(number_of_objectives, divisions.inner_divisions());

        for weight in &mut inner {
            for value in weight.iter_mut() {
                *value = (1.0 / number_of_objectives as f64 + *value) / 2.0;
            }
        }

        weights.append(&mut inner);
    }

    weights
}

fn generate_layer(number_of_objectives: usize, divisions: usize) -> Vec<Vec<f64>> {
    let mut result = Vec::new();
    let mut weight = vec![0.0; number_of_objectives];

    generate_recursive(
        &mut result,
        &mut weight,
        number_of_objectives,
        divisions,
        divisions,
        0,
    );

    result
}

fn generate_recursive(
    weights: &mut Vec<Vec<f64>>,
    weight: &mut Vec<f64>,
    number_of_objectives: usize,
    left: usize,
    total: usize,
    index: usize,
) {
    if index == number_of_objectives - 1 {
        weight[index] = left as f64 / total as f64;
        weights.push(weight.clone());
    } else {
        for i in 0..=left {
            weight[index] = i as f64 / total as f64;
            generate_recursive(weights, weight, number_of_objectives, left - i, total, index + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_divisions() {
        assert_eq!(NormalBoundaryDivisions::new(0), Err(Error::InvalidDivisions));
        assert_eq!(
            NormalBoundaryDivisions::two_layer(0, 2),
            Err(Error::InvalidDivisions)
        );
    }

    #[test]
    fn test_count_matches_binomial() {
        // C(2 + 4 - 1, 4) = C(5, 4) = 5 points for 2 objectives, 4 divisions.
        let divisions = NormalBoundaryDivisions::new(4).unwrap();
        assert_eq!(divisions.number_of_reference_points(2), 5);

        // C(3 + 12 - 1, 12) = C(14, 12) = 91 points for 3 objectives.
        let divisions = NormalBoundaryDivisions::new(12).unwrap();
        assert_eq!(divisions.number_of_reference_points(3), 91);
    }

    #[test]
    fn test_generated_count_matches_prediction() {
        for m in 2..=4 {
            let divisions = NormalBoundaryDivisions::for_objectives(m);
            let weights = normal_boundary_weights(m, &divisions);

            assert_eq!(weights.len(), divisions.number_of_reference_points(m));
        }
    }

    #[test]
    fn test_weights_lie_on_the_simplex() {
        let divisions = NormalBoundaryDivisions::new(4).unwrap();
        let weights = normal_boundary_weights(3, &divisions);

        for weight in &weights {
            let sum: f64 = weight.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "weight {weight:?} sums to {sum}");
            assert!(weight.iter().all(|&w| (0.0..=1.0).contains(&w)));
        }
    }

    #[test]
    fn test_two_objective_lattice_is_evenly_spaced() {
        let divisions = NormalBoundaryDivisions::new(4).unwrap();
        let weights = normal_boundary_weights(2, &divisions);

        assert_eq!(weights.len(), 5);
        for (i, weight) in weights.iter().enumerate() {
            assert!((weight[0] - i as f64 / 4.0).abs() < 1e-12);
            assert!((weight[1] - (4 - i) as f64 / 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_two_layer_inner_points_are_interior() {
        let divisions = NormalBoundaryDivisions::two_layer(2, 1).unwrap();
        let weights = normal_boundary_weights(3, &divisions);

        assert_eq!(weights.len(), divisions.number_of_reference_points(3));

        // The inner layer is shrunk toward the centroid, so no inner point
        // touches the simplex boundary.
        let outer_count = binomial(3 + 2 - 1, 2);
        for weight in &weights[outer_count..] {
            assert!(weight.iter().all(|&w| w > 0.0));
            let sum: f64 = weight.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }
}
