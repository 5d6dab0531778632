//! Dominance relations between candidate solutions.
//!
//! Every relation implements the single [`DominanceComparator`] contract:
//! given two solutions, report which one is preferred or that neither is.
//! The implementations are leaves over that one trait — there is no deeper
//! hierarchy:
//!
//! - [`ParetoObjectiveComparator`]: weak Pareto dominance on objectives only
//! - [`AggregateConstraintComparator`]: smaller summed constraint violation
//! - [`ParetoDominance`]: constraints first, then Pareto on objectives — the
//!   standard relation used by default throughout this crate
//! - [`EpsilonBoxComparator`]: coarsened Pareto over epsilon-sized boxes
//! - [`LinearComparator`], [`MinMaxComparator`], [`TchebychevComparator`],
//!   [`VectorAngleDistanceScalingComparator`]: scalarizing relations that
//!   reduce the objective vector to a single fitness value (total order)
//! - [`RankComparator`], [`CrowdingComparator`], [`RankAndCrowding`]: read
//!   the attributes assigned by non-dominated sorting (total order)
//! - [`ChainedComparator`]: applies relations in priority order
//!
//! Pareto-style relations are partial: [`Dominance::Neither`] means the two
//! solutions are incomparable. The scalarizing and rank/crowding relations
//! produce a total order, where `Neither` means tied.

mod aggregate;
mod attribute;
mod chain;
mod constraint;
mod epsilon_box;
mod pareto;

pub use aggregate::{
    AggregateComparator, LinearComparator, MinMaxComparator, ScalarizingMethod,
    TchebychevComparator, VectorAngleDistanceScalingComparator,
};
pub use attribute::{CrowdingComparator, RankAndCrowding, RankComparator};
pub use chain::ChainedComparator;
pub use constraint::AggregateConstraintComparator;
pub use epsilon_box::{EpsilonBoxComparator, EpsilonBoxOutcome, Epsilons};
pub use pareto::{ParetoDominance, ParetoObjectiveComparator};

use crate::solution::Solution;
use std::cmp::Ordering;

/// Outcome of a pairwise dominance comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// The first solution is preferred.
    Left,

    /// The second solution is preferred.
    Right,

    /// Neither dominates the other (or the two are tied under a
    /// total-order relation).
    Neither,
}

/// A pairwise dominance relation between solutions.
pub trait DominanceComparator {
    /// Compares two solutions, reporting which is preferred.
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance;

    /// Adapts the relation to a [`Ordering`] for use with sorting and
    /// truncation, mapping `Left` to `Less` (preferred solutions sort
    /// first) and `Neither` to `Equal`.
    fn total_cmp(&self, a: &Solution, b: &Solution) -> Ordering {
        match self.compare(a, b) {
            Dominance::Left => Ordering::Less,
            Dominance::Right => Ordering::Greater,
            Dominance::Neither => Ordering::Equal,
        }
    }
}

impl<T: DominanceComparator + ?Sized> DominanceComparator for Box<T> {
    fn compare(&self, a: &Solution, b: &Solution) -> Dominance {
        (**self).compare(a, b)
    }
}
