//! The epsilon-box dominance archive.

use crate::comparator::{Dominance, EpsilonBoxComparator, Epsilons};
use crate::error::Error;
use crate::population::Population;
use crate::solution::Solution;

/// A non-dominated archive under epsilon-box dominance.
///
/// Epsilon-dominance bounds the number of retained solutions per region of
/// objective space, giving convergence and diversity guarantees when the
/// usual conditions hold. The archive also tracks epsilon-progress by
/// counting improvements: every accepted insertion that is not merely a
/// same-box replacement counts as an improvement, and an insertion that
/// evicted a member from a different box additionally counts as a
/// dominating improvement.
///
/// References:
///
/// - Laumanns et al. (2002), "Combining Convergence and Diversity in
///   Evolutionary Multi-Objective Optimization", Evolutionary Computation
///   10(3)
/// - Hadka & Reed (2013), "Borg: An Auto-Adaptive Many-Objective
///   Evolutionary Computing Framework", Evolutionary Computation 21(2)
///
/// # Examples
///
/// ```
/// use pareto_archive::population::EpsilonBoxDominanceArchive;
/// use pareto_archive::solution::Solution;
///
/// let mut archive = EpsilonBoxDominanceArchive::uniform(0.1).unwrap();
/// archive.add(Solution::with_objectives([0.25, 0.25]));
/// archive.add(Solution::with_objectives([0.10, 0.10]));
///
/// assert_eq!(archive.len(), 1);
/// assert_eq!(archive.number_of_improvements(), 2);
/// assert_eq!(archive.number_of_dominating_improvements(), 1);
/// ```
pub struct EpsilonBoxDominanceArchive {
    inner: Population,
    comparator: EpsilonBoxComparator,
    improvements: usize,
    dominating_improvements: usize,
}

impl EpsilonBoxDominanceArchive {
    /// Creates an empty archive using the given epsilon-box relation.
    pub fn new(comparator: EpsilonBoxComparator) -> Self {
        Self {
            inner: Population::new(),
            comparator,
            improvements: 0,
            dominating_improvements: 0,
        }
    }

    /// Creates an empty archive with a single epsilon for every objective.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEpsilon`] if `epsilon` is not positive and
    /// finite.
    pub fn uniform(epsilon: f64) -> Result<Self, Error> {
        Ok(Self::new(EpsilonBoxComparator::uniform(epsilon)?))
    }

    /// Creates an empty archive with per-objective epsilons.
    pub fn with_epsilons(epsilons: Epsilons) -> Self {
        Self::new(EpsilonBoxComparator::new(epsilons))
    }

    /// Attempts to insert a candidate, returning whether it was accepted.
    ///
    /// A candidate epsilon-box-dominated by a member is rejected with no
    /// counter change. An accepted candidate that displaced the incumbent
    /// of its own box counts as neither kind of improvement.
    pub fn add(&mut self, candidate: Solution) -> bool {
        let mut same_box_replacement = false;
        let mut dominated_existing = false;
        let mut i = 0;

        while i < self.inner.len() {
            let outcome = self.comparator.compare_boxed(&candidate, &self.inner[i]);

            match outcome.dominance {
                Dominance::Left => {
                    if outcome.same_box {
                        same_box_replacement = true;
                    } else {
                        dominated_existing = true;
                    }

                    self.inner.remove(i);
                }
                Dominance::Right => return false,
                Dominance::Neither => i += 1,
            }
        }

        if !same_box_replacement {
            self.improvements += 1;

            if dominated_existing {
                self.dominating_improvements += 1;
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

    /// Returns the number of epsilon-box improvements so far.
    pub fn number_of_improvements(&self) -> usize {
        self.improvements
    }

    /// Returns the number of improvements that evicted a member from a
    /// different box.
    pub fn number_of_dominating_improvements(&self) -> usize {
        self.dominating_improvements
    }

    /// Returns the epsilon-box relation used by this archive.
    pub fn comparator(&self) -> &EpsilonBoxComparator {
        &self.comparator
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
}

impl<'a> IntoIterator for &'a EpsilonBoxDominanceArchive {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
