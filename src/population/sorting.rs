//! Non-dominated sorting with crowding-distance diversity estimation.

use crate::comparator::{Dominance, DominanceComparator, ParetoDominance};
use crate::population::Population;
use crate::solution::EPS;

/// Dominance-depth ranking. Assigns a `rank` (0 = Pareto front) and a
/// `crowding_distance` attribute to every solution in a population.
///
/// Rather than the bookkeeping-heavy "fast non-dominated sort", each front
/// is peeled off by inserting the remaining members one at a time into a
/// fresh non-dominated accumulator that allows duplicates. For typical
/// front-size distributions this performs fewer comparisons, since
/// solutions already assigned to a front drop out of later passes.
///
/// References:
///
/// - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic
///   Algorithm: NSGA-II", IEEE Transactions on Evolutionary Computation
///   6(2)
///
/// # Examples
///
/// ```
/// use pareto_archive::population::{NondominatedSorting, Population};
/// use pareto_archive::solution::Solution;
///
/// let mut population: Population = [
///     Solution::with_objectives([1.0, 5.0]),
///     Solution::with_objectives([5.0, 1.0]),
///     Solution::with_objectives([6.0, 6.0]),
/// ]
/// .into_iter()
/// .collect();
///
/// NondominatedSorting::new().evaluate(&mut population);
///
/// assert_eq!(population[0].rank(), Some(0));
/// assert_eq!(population[1].rank(), Some(0));
/// assert_eq!(population[2].rank(), Some(1));
/// ```
pub struct NondominatedSorting {
    comparator: Box<dyn DominanceComparator>,
}

impl Default for NondominatedSorting {
    fn default() -> Self {
        Self::new()
    }
}

impl NondominatedSorting {
    /// Creates a sorter using the standard Pareto relation.
    pub fn new() -> Self {
        Self::with_comparator(Box::new(ParetoDominance::new()))
    }

    /// Creates a sorter using the given relation.
    pub fn with_comparator(comparator: Box<dyn DominanceComparator>) -> Self {
        Self { comparator }
    }

    /// Returns the relation used for ranking.
    pub fn comparator(&self) -> &dyn DominanceComparator {
        self.comparator.as_ref()
    }

    /// Ranks every solution and computes its crowding distance.
    pub fn evaluate(&self, population: &mut Population) {
        let mut remaining: Vec<usize> = (0..population.len()).collect();
        let mut rank = 0;

        while !remaining.is_empty() {
            let front = self.peel_front(population, &remaining);

            for &i in &front {
                population[i].set_rank(rank);
            }

            remaining.retain(|i| !front.contains(i));
            self.crowding_of_front(population, &front);
            rank += 1;
        }
    }

    /// Extracts the non-dominated subset of `candidates` by inserting each
    /// one into a duplicate-allowing non-dominated accumulator.
    fn peel_front(&self, population: &Population, candidates: &[usize]) -> Vec<usize> {
        let mut front: Vec<usize> = Vec::new();

        'next: for &i in candidates {
            let mut k = 0;

            while k < front.len() {
                match self.comparator.compare(&population[i], &population[front[k]]) {
                    Dominance::Left => {
                        front.remove(k);
                    }
                    Dominance::Right => continue 'next,
                    Dominance::Neither => k += 1,
                }
            }

            front.push(i);
        }

        front
    }

    /// Computes crowding distances for a population forming a single front.
    ///
    /// Near-identical solutions are collapsed first and keep a distance of
    /// 0. A front with fewer than 3 unique solutions is assigned infinite
    /// distance throughout; otherwise boundary solutions on each objective
    /// get infinity and interior solutions accumulate the normalized gap
    /// between their neighbors. An objective whose range is degenerate
    /// contributes nothing.
    pub fn update_crowding_distance(&self, front: &mut Population) {
        let indices: Vec<usize> = (0..front.len()).collect();
        self.crowding_of_front(front, &indices);
    }

    fn crowding_of_front(&self, population: &mut Population, front: &[usize]) {
        for &i in front {
            population[i].set_crowding_distance(0.0);
        }

        // Collapse near-identical solutions; duplicates keep distance 0.
        let mut unique: Vec<usize> = Vec::new();

        for &i in front {
            let is_duplicate = unique
                .iter()
                .any(|&j| population[i].euclidean_distance(&population[j]) < EPS);

            if !is_duplicate {
                unique.push(i);
            }
        }

        let n = unique.len();

        if n < 3 {
            for &i in &unique {
                population[i].set_crowding_distance(f64::INFINITY);
            }

            return;
        }

        let number_of_objectives = population[unique[0]].number_of_objectives();

        for objective in 0..number_of_objectives {
            unique.sort_by(|&a, &b| {
                population[a]
                    .objective_value(objective)
                    .total_cmp(&population[b].objective_value(objective))
            });

            let min = population[unique[0]].objective_value(objective);
            let max = population[unique[n - 1]].objective_value(objective);

            // A degenerate axis would divide by ~0; skip it entirely.
            if max - min < EPS {
                continue;
            }

            population[unique[0]].set_crowding_distance(f64::INFINITY);
            population[unique[n - 1]].set_crowding_distance(f64::INFINITY);

            for j in 1..n - 1 {
                let gap = population[unique[j + 1]].objective_value(objective)
                    - population[unique[j - 1]].objective_value(objective);
                let distance = population[unique[j]].crowding_distance().unwrap_or(0.0);
                population[unique[j]].set_crowding_distance(distance + gap / (max - min));
            }
        }
    }
}
