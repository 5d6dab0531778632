//! Pareto dominance relations.

use super::{AggregateConstraintComparator, Dominance, DominanceComparator};
use crate::solution::Solution;

/// Weak Pareto dominance on objectives only.
///
/// A solution dominates another if it is no worse in every objective and
/// strictly better in at least one. Constraints are ignored; use
/// [`ParetoDominance`] for the standard constraints-first relation.
///
/// The scan early-exits as soon as both solutions have been seen to be
/// better somewhere, which already proves incomparability.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParetoObjectiveComparator;

impl DominanceComparator for ParetoObjectiveComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        debug_assert_eq!(
            a.number_of_objectives(),
            b.number_of_objectives(),
            "solutions must have the same number of objectives"
        );

        let mut left = false;
        let mut right = false;

        for i in 0..a.number_of_objectives() {
            let va = a.objective_value(i);
            let vb = b.objective_value(i);

            if va < vb {
                left = true;

                if right {
                    return Dominance::Neither;
                }
            } else if vb < va {
                right = true;

                if left {
                    return Dominance::Neither;
                }
            }
        }

        match (left, right) {
            (true, false) => Dominance::Left,
            (false, true) => Dominance::Right,
            _ => Dominance::Neither,
        }
    }
}

/// The standard dominance relation: aggregate constraint violation first,
/// then weak Pareto dominance on objectives.
///
/// An infeasible solution is never preferred over a feasible one, no matter
/// how good its objectives are.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParetoDominance {
    constraints: AggregateConstraintComparator,
    objectives: ParetoObjectiveComparator,
}

impl ParetoDominance {
    /// Creates the standard constraints-then-objectives relation.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DominanceComparator for ParetoDominance {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        match self.constraints.compare(a, b) {
            Dominance::Neither => self.objectives.compare(a, b),
            decided => decided,
        }
    }
}
