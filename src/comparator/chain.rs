//! Priority-ordered composition of dominance relations.

use super::{Dominance, DominanceComparator};
use crate::solution::Solution;

/// Applies a list of relations in order, returning the first decisive
/// result. `Neither` is returned only when every stage is undecided.
///
/// # Examples
///
/// ```
/// use pareto_archive::comparator::{
///     AggregateConstraintComparator, ChainedComparator, ParetoObjectiveComparator,
/// };
///
/// // Feasibility first, then objective preference.
/// let relation = ChainedComparator::new()
///     .then(AggregateConstraintComparator)
///     .then(ParetoObjectiveComparator);
/// # let _ = relation;
/// ```
#[derive(Default)]
pub struct ChainedComparator {
    stages: Vec<Box<dyn DominanceComparator>>,
}

impl ChainedComparator {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a relation to the end of the chain.
    pub fn then(mut self, comparator: impl DominanceComparator + 'static) -> Self {
        self.stages.push(Box::new(comparator));
        self
    }

    /// Returns the number of stages in the chain.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl DominanceComparator for ChainedComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        for stage in &self.stages {
            match stage.compare(a, b) {
                Dominance::Neither => continue,
                decided => return decided,
            }
        }

        Dominance::Neither
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{AggregateConstraintComparator, ParetoObjectiveComparator};

    #[test]
    fn test_first_decisive_stage_wins() {
        let chain = ChainedComparator::new()
            .then(AggregateConstraintComparator)
            .then(ParetoObjectiveComparator);

        let infeasible = Solution::with_objectives([0.0, 0.0]).with_constraints([1.0]);
        let feasible = Solution::with_objectives([1.0, 1.0]).with_constraints([0.0]);

        assert_eq!(chain.compare(&infeasible, &feasible), Dominance::Right);
    }

    #[test]
    fn test_falls_through_undecided_stages() {
        let chain = ChainedComparator::new()
            .then(AggregateConstraintComparator)
            .then(ParetoObjectiveComparator);

        let a = Solution::with_objectives([0.0, 0.0]);
        let b = Solution::with_objectives([1.0, 1.0]);

        assert_eq!(chain.compare(&a, &b), Dominance::Left);
    }

    #[test]
    fn test_empty_chain_is_undecided() {
        let chain = ChainedComparator::new();

        let a = Solution::with_objectives([0.0]);
        let b = Solution::with_objectives([1.0]);

        assert_eq!(chain.compare(&a, &b), Dominance::Neither);
    }
}
