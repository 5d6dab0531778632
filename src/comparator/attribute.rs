//! Comparators over the attributes assigned by non-dominated sorting.

use super::{Dominance, DominanceComparator};
use crate::solution::Solution;

fn rank_of(solution: &Solution) -> usize {
    solution
        .rank()
        .expect("solution has no rank; run non-dominated sorting first")
}

fn crowding_of(solution: &Solution) -> f64 {
    solution
        .crowding_distance()
        .expect("solution has no crowding distance; run non-dominated sorting first")
}

/// Prefers the solution with the smaller dominance-depth rank.
///
/// # Panics
///
/// Comparing a solution that has not been ranked is a usage error and
/// panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankComparator;

impl DominanceComparator for RankComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        let ra = rank_of(a);
        let rb = rank_of(b);

        if ra < rb {
            Dominance::Left
        } else if rb < ra {
            Dominance::Right
        } else {
            Dominance::Neither
        }
    }
}

/// Prefers the solution with the larger crowding distance.
///
/// # Panics
///
/// Comparing a solution without a crowding distance is a usage error and
/// panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrowdingComparator;

impl DominanceComparator for CrowdingComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        let ca = crowding_of(a);
        let cb = crowding_of(b);

        if ca > cb {
            Dominance::Left
        } else if cb > ca {
            Dominance::Right
        } else {
            Dominance::Neither
        }
    }
}

/// Rank first, crowding distance as the tie-breaker — the NSGA-style
/// survival order used to truncate a sorted population.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankAndCrowding {
    rank: RankComparator,
    crowding: CrowdingComparator,
}

impl RankAndCrowding {
    /// Creates the rank-then-crowding order.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DominanceComparator for RankAndCrowding {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        match self.rank.compare(a, b) {
            Dominance::Neither => self.crowding.compare(a, b),
            decided => decided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(rank: usize, crowding: f64) -> Solution {
        let mut s = Solution::with_objectives([0.0]);
        s.set_rank(rank);
        s.set_crowding_distance(crowding);
        s
    }

    #[test]
    fn test_rank_ascending() {
        let c = RankComparator;

        assert_eq!(c.compare(&ranked(0, 0.0), &ranked(1, 0.0)), Dominance::Left);
        assert_eq!(c.compare(&ranked(2, 0.0), &ranked(1, 0.0)), Dominance::Right);
        assert_eq!(c.compare(&ranked(1, 0.0), &ranked(1, 0.0)), Dominance::Neither);
    }

    #[test]
    fn test_crowding_descending() {
        let c = CrowdingComparator;

        assert_eq!(c.compare(&ranked(0, 2.0), &ranked(0, 1.0)), Dominance::Left);
        assert_eq!(
            c.compare(&ranked(0, f64::INFINITY), &ranked(0, 1.0)),
            Dominance::Left
        );
        assert_eq!(c.compare(&ranked(0, 1.0), &ranked(0, 1.0)), Dominance::Neither);
    }

    #[test]
    fn test_rank_then_crowding() {
        let c = RankAndCrowding::new();

        // Rank decides first.
        assert_eq!(c.compare(&ranked(0, 0.1), &ranked(1, 9.0)), Dominance::Left);
        // Crowding breaks rank ties.
        assert_eq!(c.compare(&ranked(1, 0.1), &ranked(1, 9.0)), Dominance::Right);
    }

    #[test]
    #[should_panic(expected = "no rank")]
    fn test_unranked_solution_panics() {
        let _ = RankComparator.compare(
            &Solution::with_objectives([0.0]),
            &Solution::with_objectives([1.0]),
        );
    }
}
