//! The non-dominated population, base of every archive.

use crate::comparator::{Dominance, DominanceComparator, ParetoDominance};
use crate::population::Population;
use crate::solution::{Solution, EPS};

/// How duplicate solutions are handled on insertion.
///
/// Two solutions are duplicates when their Euclidean distance — in
/// objective or decision space, depending on the mode — is below `EPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateMode {
    /// Reject candidates whose objective vector duplicates a member's.
    #[default]
    NoDuplicates,

    /// Allow duplicate objective vectors as long as the decision variables
    /// differ; reject candidates with a duplicate encoding.
    AllowDuplicateObjectives,

    /// Allow all duplicates. Used for working sets such as the fronts
    /// peeled off during non-dominated sorting.
    AllowDuplicates,
}

/// A population maintaining pairwise non-dominance between all members.
///
/// When [`add`](Self::add) is invoked, every member dominated by the
/// candidate is removed; if any member dominates the candidate, the
/// candidate is rejected and the population is unchanged. Existing members
/// are authoritative: a candidate dominated by anyone is rejected outright.
///
/// # Examples
///
/// ```
/// use pareto_archive::population::NondominatedPopulation;
/// use pareto_archive::solution::Solution;
///
/// let mut archive = NondominatedPopulation::new();
///
/// assert!(archive.add(Solution::with_objectives([0.0, 0.0])));
/// assert!(!archive.add(Solution::with_objectives([1.0, 1.0])));
/// assert!(!archive.add(Solution::with_objectives([1.0, 0.0])));
/// assert_eq!(archive.len(), 1);
/// ```
pub struct NondominatedPopulation {
    inner: Population,
    comparator: Box<dyn DominanceComparator>,
    duplicate_mode: DuplicateMode,
}

impl Default for NondominatedPopulation {
    fn default() -> Self {
        Self::new()
    }
}

impl NondominatedPopulation {
    /// Creates an empty population under the standard Pareto relation,
    /// rejecting duplicates by objective vector.
    pub fn new() -> Self {
        Self::with_comparator(Box::new(ParetoDominance::new()))
    }

    /// Creates an empty population under the given relation.
    pub fn with_comparator(comparator: Box<dyn DominanceComparator>) -> Self {
        Self {
            inner: Population::new(),
            comparator,
            duplicate_mode: DuplicateMode::default(),
        }
    }

    /// Sets the duplicate policy.
    pub fn with_duplicate_mode(mut self, mode: DuplicateMode) -> Self {
        self.duplicate_mode = mode;
        self
    }

    /// Attempts to insert a candidate, returning whether it was accepted.
    ///
    /// Members dominated by the candidate are removed even when the
    /// candidate itself ends up accepted alongside incomparable members.
    pub fn add(&mut self, candidate: Solution) -> bool {
        let mut i = 0;

        while i < self.inner.len() {
            match self.comparator.compare(&candidate, &self.inner[i]) {
                Dominance::Left => {
                    self.inner.remove(i);
                }
                Dominance::Right => return false,
                Dominance::Neither => {
                    if self.is_duplicate(&candidate, &self.inner[i]) {
                        return false;
                    }

                    i += 1;
                }
            }
        }

        self.inner.add(candidate);
        true
    }

    /// Attempts to insert every solution, returning how many were accepted.
    pub fn add_all(&mut self, solutions: impl IntoIterator<Item = Solution>) -> usize {
        let mut accepted = 0;

        for solution in solutions {
            if self.add(solution) {
                accepted += 1;
            }
        }

        accepted
    }

    fn is_duplicate(&self, a: &Solution, b: &Solution) -> bool {
        match self.duplicate_mode {
            DuplicateMode::NoDuplicates => a.euclidean_distance(b) < EPS,
            DuplicateMode::AllowDuplicateObjectives => a.variable_distance(b) < EPS,
            DuplicateMode::AllowDuplicates => false,
        }
    }

    /// Removes and returns the solution at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Solution {
        self.inner.remove(index)
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

    /// Iterates over the solutions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.inner.iter()
    }

    /// Returns the dominance relation enforced by this population.
    pub fn comparator(&self) -> &dyn DominanceComparator {
        self.comparator.as_ref()
    }

    /// Returns a read-only view of the underlying container.
    pub fn as_population(&self) -> &Population {
        &self.inner
    }
}

impl<'a> IntoIterator for &'a NondominatedPopulation {
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
    fn test_first_dominates_all_later_points() {
        let mut archive = NondominatedPopulation::new();

        assert!(archive.add(of(&[0.0, 0.0])));
        assert!(!archive.add(of(&[1.0, 1.0])));
        assert!(!archive.add(of(&[1.0, 0.0])));

        assert_eq!(archive.len(), 1);
        assert_eq!(archive.get(0).objective_values(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_candidate_evicts_dominated_members() {
        let mut archive = NondominatedPopulation::new();

        assert!(archive.add(of(&[1.0, 1.0])));
        assert!(archive.add(of(&[2.0, 0.5])));
        assert!(archive.add(of(&[0.0, 0.0])));

        // (0, 0) dominates both prior members.
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.get(0).objective_values(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_incomparable_members_coexist() {
        let mut archive = NondominatedPopulation::new();

        assert!(archive.add(of(&[0.0, 1.0])));
        assert!(archive.add(of(&[1.0, 0.0])));
        assert!(archive.add(of(&[0.5, 0.5])));

        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_rejection_leaves_membership_unchanged() {
        let mut archive = NondominatedPopulation::new();
        archive.add(of(&[0.0, 1.0]));
        archive.add(of(&[1.0, 0.0]));

        let before = archive.as_population().modifications();
        assert!(!archive.add(of(&[0.5, 1.5])));

        assert_eq!(archive.len(), 2);
        assert_eq!(archive.as_population().modifications(), before);
    }

    #[test]
    fn test_duplicate_objectives_rejected_by_default() {
        let mut archive = NondominatedPopulation::new();

        assert!(archive.add(of(&[0.5, 0.5])));
        assert!(!archive.add(of(&[0.5, 0.5])));
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_duplicate_encoding_policy() {
        let mut archive = NondominatedPopulation::new()
            .with_duplicate_mode(DuplicateMode::AllowDuplicateObjectives);

        assert!(archive.add(of(&[0.5, 0.5]).with_variables([1.0])));
        // Same objectives, different encoding: allowed.
        assert!(archive.add(of(&[0.5, 0.5]).with_variables([2.0])));
        // Same encoding: rejected.
        assert!(!archive.add(of(&[0.5, 0.5]).with_variables([1.0])));

        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_allow_duplicates_mode() {
        let mut archive =
            NondominatedPopulation::new().with_duplicate_mode(DuplicateMode::AllowDuplicates);

        assert!(archive.add(of(&[0.5, 0.5])));
        assert!(archive.add(of(&[0.5, 0.5])));
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_infeasible_never_displaces_feasible() {
        let mut archive = NondominatedPopulation::new();

        assert!(archive.add(of(&[5.0, 5.0]).with_constraints([0.0])));
        assert!(!archive.add(of(&[0.0, 0.0]).with_constraints([1.0])));

        assert_eq!(archive.len(), 1);
        assert!(archive.get(0).is_feasible());
    }

    mod properties {
        use super::*;
        use crate::comparator::{DominanceComparator, ParetoDominance};
        use proptest::prelude::*;

        fn objective_vectors() -> impl Strategy<Value = Vec<Vec<f64>>> {
            proptest::collection::vec(
                proptest::collection::vec(0.0..10.0f64, 3),
                1..40,
            )
        }

        proptest! {
            /// After any insertion sequence, all member pairs are
            /// mutually incomparable.
            #[test]
            fn prop_members_are_pairwise_nondominated(points in objective_vectors()) {
                let mut archive = NondominatedPopulation::new();

                for point in points {
                    archive.add(Solution::with_objectives(point));
                }

                let comparator = ParetoDominance::new();

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

            /// Re-inserting a dominated point never changes membership.
            #[test]
            fn prop_dominated_insertion_is_idempotent(points in objective_vectors()) {
                let mut archive = NondominatedPopulation::new();

                for point in &points {
                    archive.add(Solution::with_objectives(point.clone()));
                }

                let size = archive.len();

                // Strictly worse than the first member in every objective.
                let dominated: Vec<f64> = archive
                    .get(0)
                    .objective_values()
                    .iter()
                    .map(|v| v + 1.0)
                    .collect();

                prop_assert!(!archive.add(Solution::with_objectives(dominated)));
                prop_assert_eq!(archive.len(), size);
            }
        }
    }
}
