//! The adaptive grid archive.

use crate::comparator::{Dominance, DominanceComparator, ParetoDominance};
use crate::error::Error;
use crate::population::Population;
use crate::solution::Solution;
use std::collections::HashMap;
use tracing::debug;

/// A capacity-bounded non-dominated archive using an adaptive grid for
/// density estimation.
///
/// Normalized objective space is partitioned into `divisions^objectives`
/// uniform cells, each tracking how many members it holds. When an accepted
/// candidate pushes the archive past its capacity, a member of the most
/// crowded cell is evicted — unless the candidate's own cell is the most
/// crowded, in which case the candidate itself is rejected. The grid bounds
/// are recomputed whenever the archive empties or a member falls outside
/// them.
///
/// References:
///
/// - Knowles & Corne (2000), "Approximating the Nondominated Front using
///   the Pareto Archived Evolution Strategy", Evolutionary Computation 8(2)
/// - Knowles & Corne (2003), "Properties of an Adaptive Archiving Algorithm
///   for Storing Nondominated Vectors", IEEE Transactions on Evolutionary
///   Computation 7(2)
///
/// # Examples
///
/// ```
/// use pareto_archive::population::AdaptiveGridArchive;
/// use pareto_archive::solution::Solution;
///
/// let mut archive = AdaptiveGridArchive::new(100, 2, 8).unwrap();
/// archive.add(Solution::with_objectives([0.0, 1.0]));
/// archive.add(Solution::with_objectives([1.0, 0.0]));
///
/// assert_eq!(archive.len(), 2);
/// assert!(archive.len() <= archive.capacity());
/// ```
pub struct AdaptiveGridArchive {
    inner: Population,
    comparator: ParetoDominance,
    capacity: usize,
    number_of_objectives: usize,
    divisions: usize,
    minimum: Vec<f64>,
    maximum: Vec<f64>,
    density: HashMap<usize, usize>,
}

impl AdaptiveGridArchive {
    /// Creates an empty archive holding at most `capacity` solutions over
    /// `number_of_objectives` objectives, splitting each objective into
    /// `divisions` grid divisions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] or [`Error::InvalidDivisions`] for
    /// zero parameters, [`Error::TooFewObjectives`] for zero objectives,
    /// and [`Error::GridIndexOverflow`] when `divisions^objectives` exceeds
    /// the representable index range — detected here, before any solution
    /// is processed.
    pub fn new(
        capacity: usize,
        number_of_objectives: usize,
        divisions: usize,
    ) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        if divisions == 0 {
            return Err(Error::InvalidDivisions);
        }

        if number_of_objectives == 0 {
            return Err(Error::TooFewObjectives {
                component: "adaptive grid archive",
                minimum: 1,
                actual: number_of_objectives,
            });
        }

        let mut cells: usize = 1;

        for _ in 0..number_of_objectives {
            cells = cells
                .checked_mul(divisions)
                .ok_or(Error::GridIndexOverflow {
                    divisions,
                    objectives: number_of_objectives,
                })?;
        }

        let mut archive = Self {
            inner: Population::new(),
            comparator: ParetoDominance::new(),
            capacity,
            number_of_objectives,
            divisions,
            minimum: Vec::new(),
            maximum: Vec::new(),
            density: HashMap::new(),
        };

        archive.adapt();
        Ok(archive)
    }

    /// Returns the maximum number of solutions this archive retains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of divisions per objective.
    pub fn number_of_divisions(&self) -> usize {
        self.divisions
    }

    /// Returns the grid-cell index of the solution, or `None` when it lies
    /// outside the current grid bounds.
    ///
    /// Cell coordinates are `floor(divisions * (v_i - min_i) / (max_i -
    /// min_i))`, with a value exactly at the upper bound mapped into the
    /// last division; the composite index weights coordinate `i` by
    /// `divisions^i`.
    pub fn find_index(&self, solution: &Solution) -> Option<usize> {
        let mut index = 0;
        let mut stride = 1;

        for i in 0..self.number_of_objectives {
            let value = solution.objective_value(i);

            if value < self.minimum[i] || value > self.maximum[i] {
                return None;
            }

            let range = self.maximum[i] - self.minimum[i];
            let mut cell = (self.divisions as f64 * ((value - self.minimum[i]) / range)) as usize;

            if cell == self.divisions {
                cell -= 1;
            }

            index += cell * stride;
            stride *= self.divisions;
        }

        Some(index)
    }

    /// Returns the number of members occupying the given grid cell.
    pub fn density(&self, index: usize) -> usize {
        self.density.get(&index).copied().unwrap_or(0)
    }

    /// Attempts to insert a candidate, returning whether it was retained.
    ///
    /// The non-dominated rule applies first: members dominated by the
    /// candidate are evicted and a dominated candidate is rejected. A
    /// retained candidate that pushes the archive over capacity triggers
    /// crowding-based eviction; ties on maximum density reject the
    /// candidate rather than an incumbent.
    pub fn add(&mut self, candidate: Solution) -> bool {
        let mut i = 0;

        while i < self.inner.len() {
            match self.comparator.compare(&candidate, &self.inner[i]) {
                Dominance::Left => self.remove_at(i),
                Dominance::Right => return false,
                Dominance::Neither => i += 1,
            }
        }

        if self.inner.is_empty() {
            self.inner.add(candidate);
            self.adapt();
            return true;
        }

        self.inner.add(candidate);

        let index = match self.find_index(&self.inner[self.inner.len() - 1]) {
            Some(index) => {
                *self.density.entry(index).or_insert(0) += 1;
                index
            }
            None => {
                // The candidate falls outside the current bounds; regrow
                // the grid around the new membership.
                self.adapt();
                self.find_index(&self.inner[self.inner.len() - 1])
                    .expect("candidate lies within freshly adapted bounds")
            }
        };

        if self.inner.len() <= self.capacity {
            return true;
        }

        if self.density(index) == self.max_density() {
            // The candidate sits in the most crowded cell; undo its
            // insertion rather than evicting an incumbent.
            self.remove_at(self.inner.len() - 1);
            false
        } else {
            let victim = self.densest_member();
            self.remove_at(victim);
            true
        }
    }

    /// Removes and returns the solution at `index`, updating the cell
    /// densities. A cell emptied by the removal triggers a full grid
    /// readaptation, since the overall bounds may now be stale.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Solution {
        let solution = self.inner[index].clone();
        self.remove_at(index);
        solution
    }

    /// Removes all solutions and resets the grid.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.adapt();
    }

    /// Returns the number of solutions.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the archive contains no solutions.
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

    /// Iterates over the solutions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.inner.iter()
    }

    fn remove_at(&mut self, index: usize) {
        let cell = self.find_index(&self.inner[index]);
        self.inner.remove(index);

        if let Some(cell) = cell {
            let remaining = self.density(cell) as i64 - 1;
            self.density.insert(cell, remaining.max(0) as usize);

            if remaining == 0 {
                self.adapt();
            }
        }
    }

    /// Recomputes the grid bounds from the current membership and rebuilds
    /// the density map from scratch.
    fn adapt(&mut self) {
        if self.inner.is_empty() {
            // Sentinels that make every find_index probe miss.
            self.minimum = vec![f64::INFINITY; self.number_of_objectives];
            self.maximum = vec![f64::NEG_INFINITY; self.number_of_objectives];
        } else {
            self.minimum = self.inner.lower_bounds();
            self.maximum = self.inner.upper_bounds();
        }

        let cells: Vec<Option<usize>> = self.inner.iter().map(|s| self.find_index(s)).collect();

        self.density.clear();

        for cell in cells.into_iter().flatten() {
            *self.density.entry(cell).or_insert(0) += 1;
        }

        debug!(
            members = self.inner.len(),
            occupied_cells = self.density.len(),
            "adapted grid bounds"
        );
    }

    /// Returns the maximum density over the cells occupied by members.
    fn max_density(&self) -> usize {
        self.inner
            .iter()
            .map(|s| self.find_index(s).map_or(0, |cell| self.density(cell)))
            .max()
            .unwrap_or(0)
    }

    /// Returns the index of the first member residing in the densest cell.
    fn densest_member(&self) -> usize {
        let mut best = 0;
        let mut best_density = 0;

        for (i, solution) in self.inner.iter().enumerate() {
            let density = self.find_index(solution).map_or(0, |cell| self.density(cell));

            if density > best_density {
                best_density = density;
                best = i;
            }
        }

        best
    }
}

impl<'a> IntoIterator for &'a AdaptiveGridArchive {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn of(objectives: &[f64]) -> Solution {
        Solution::with_objectives(objectives)
    }

    #[test]
    fn test_construction_validation() {
        assert_eq!(
            AdaptiveGridArchive::new(0, 2, 2).err(),
            Some(Error::ZeroCapacity)
        );
        assert_eq!(
            AdaptiveGridArchive::new(10, 2, 0).err(),
            Some(Error::InvalidDivisions)
        );
        assert!(AdaptiveGridArchive::new(10, 0, 2).is_err());
    }

    #[test]
    fn test_division_overflow_fails_fast() {
        // (2^20)^4 = 2^80 overflows the index range.
        assert_eq!(
            AdaptiveGridArchive::new(100, 4, 1 << 20).err(),
            Some(Error::GridIndexOverflow {
                divisions: 1 << 20,
                objectives: 4
            })
        );

        // 256^4 = 2^32 still fits.
        assert!(AdaptiveGridArchive::new(100, 4, 256).is_ok());
    }

    #[test]
    fn test_find_index_on_empty_grid_misses() {
        let archive = AdaptiveGridArchive::new(2, 2, 2).unwrap();

        assert_eq!(archive.find_index(&of(&[0.0, 0.0])), None);
        assert_eq!(archive.find_index(&of(&[1.0, 1.0])), None);
    }

    #[test]
    fn test_find_index_single_entry() {
        let mut archive = AdaptiveGridArchive::new(2, 2, 2).unwrap();
        archive.add(of(&[0.0, 0.0]));

        assert_eq!(archive.find_index(&of(&[0.0, 0.0])), Some(0));
        assert_eq!(archive.find_index(&of(&[1.0, 1.0])), None);
    }

    #[test]
    fn test_find_index_quadrants() {
        let mut archive = AdaptiveGridArchive::new(2, 2, 2).unwrap();
        archive.add(of(&[0.0, 1.0]));
        archive.add(of(&[1.0, 0.0]));

        assert_eq!(archive.find_index(&of(&[0.25, 0.25])), Some(0));
        assert_eq!(archive.find_index(&of(&[0.75, 0.25])), Some(1));
        assert_eq!(archive.find_index(&of(&[0.25, 0.75])), Some(2));
        assert_eq!(archive.find_index(&of(&[0.75, 0.75])), Some(3));
    }

    #[test]
    fn test_opposite_corners_occupy_distinct_cells() {
        let mut archive = AdaptiveGridArchive::new(2, 2, 2).unwrap();
        archive.add(of(&[0.0, 1.0]));
        archive.add(of(&[1.0, 0.0]));

        // (0, 1) sits at cell coordinates (0, 1) and (1, 0) at (1, 0);
        // with the composite index weighting objective i by divisions^i,
        // these are cells 2 and 1.
        assert_eq!(archive.find_index(archive.get(0)), Some(2));
        assert_eq!(archive.find_index(archive.get(1)), Some(1));
        assert_eq!(archive.density(2), 1);
        assert_eq!(archive.density(1), 1);
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_density_bookkeeping_after_adapt() {
        let mut archive = AdaptiveGridArchive::new(4, 2, 2).unwrap();
        archive.add(of(&[0.0, 1.0]));
        archive.add(of(&[0.7, 0.2]));
        archive.add(of(&[0.6, 0.3]));
        archive.add(of(&[0.8, 0.1]));

        // Bounds: [0.0, 0.8] x [0.1, 1.0]; three members share cell 1.
        assert_eq!(archive.density(0), 0);
        assert_eq!(archive.density(1), 3);
        assert_eq!(archive.density(2), 1);
        assert_eq!(archive.density(3), 0);
    }

    #[test]
    fn test_dominating_candidate_collapses_archive() {
        let mut archive = AdaptiveGridArchive::new(4, 2, 2).unwrap();
        archive.add(of(&[0.0, 1.0]));
        archive.add(of(&[1.0, 0.0]));
        archive.add(of(&[0.0, 0.0]));

        assert_eq!(archive.len(), 1);

        let index = archive.find_index(archive.get(0)).unwrap();
        for cell in 0..4 {
            assert_eq!(archive.density(cell), usize::from(cell == index));
        }
    }

    #[test]
    fn test_capacity_is_never_exceeded() {
        let mut archive = AdaptiveGridArchive::new(3, 2, 2).unwrap();

        for k in 0..10 {
            let x = k as f64 / 9.0;
            archive.add(of(&[x, 1.0 - x]));
            assert!(archive.len() <= 3);
        }
    }

    #[test]
    fn test_candidate_in_densest_cell_is_rejected() {
        let mut archive = AdaptiveGridArchive::new(3, 2, 2).unwrap();
        archive.add(of(&[0.0, 1.0]));
        archive.add(of(&[1.0, 0.0]));
        archive.add(of(&[0.7, 0.2]));

        // Cell of (0.7, 0.2) and (1.0, 0.0) already holds two members;
        // a third incomparable point in that cell ties the maximum
        // density and is rejected.
        assert!(!archive.add(of(&[0.9, 0.1])));
        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_eviction_from_densest_cell_keeps_candidate() {
        let mut archive = AdaptiveGridArchive::new(3, 2, 2).unwrap();
        archive.add(of(&[0.0, 1.0]));
        archive.add(of(&[1.0, 0.0]));
        archive.add(of(&[0.7, 0.2]));

        // (0.25, 0.25) lands in the empty lower-left cell; the first
        // member of the crowded cell holding (1, 0) and (0.7, 0.2) is
        // evicted instead.
        assert!(archive.add(of(&[0.25, 0.25])));
        assert_eq!(archive.len(), 3);
        assert!(archive
            .iter()
            .all(|s| s.objective_values() != vec![1.0, 0.0]));
    }

    #[test]
    fn test_remove_updates_density() {
        let mut archive = AdaptiveGridArchive::new(4, 2, 2).unwrap();
        archive.add(of(&[0.0, 1.0]));
        archive.add(of(&[1.0, 0.0]));

        archive.remove(1);

        assert_eq!(archive.len(), 1);

        // Removal emptied a cell, forcing a readapt around the survivor.
        let index = archive.find_index(archive.get(0)).unwrap();
        for cell in 0..4 {
            assert_eq!(archive.density(cell), usize::from(cell == index));
        }
    }

    #[test]
    fn test_clear_resets_the_grid() {
        let mut archive = AdaptiveGridArchive::new(4, 2, 2).unwrap();
        archive.add(of(&[0.0, 1.0]));
        archive.add(of(&[1.0, 0.0]));

        archive.clear();

        assert!(archive.is_empty());
        assert_eq!(archive.find_index(&of(&[0.5, 0.5])), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The capacity bound and non-domination invariant hold after
            /// every single insertion.
            #[test]
            fn prop_capacity_and_nondomination_hold(
                points in proptest::collection::vec(
                    proptest::collection::vec(0.0..1.0f64, 2),
                    1..60,
                )
            ) {
                let mut archive = AdaptiveGridArchive::new(5, 2, 4).unwrap();
                let comparator = ParetoDominance::new();

                for point in points {
                    archive.add(of(&point));

                    prop_assert!(archive.len() <= archive.capacity());

                    for i in 0..archive.len() {
                        for j in 0..archive.len() {
                            if i != j {
                                prop_assert_eq!(
                                    comparator.compare(archive.get(i), archive.get(j)),
                                    Dominance::Neither
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}
