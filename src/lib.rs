//! Dominance relations, non-dominated sorting, and bounded Pareto archives
//! for multi-objective optimization.
//!
//! This crate is the selection-and-survival core of a multi-objective
//! evolutionary toolkit. It decides, for any two candidate solutions, which
//! is preferred; ranks whole populations by Pareto dominance and diversity;
//! and maintains bounded archives approximating the optimal trade-off
//! frontier across generations of search. It operates purely on
//! already-evaluated solutions: variation operators, algorithm loops, and
//! objective functions live in the consuming layers.
//!
//! # Components
//!
//! - [`solution`]: the evaluated-solution record (objectives, constraints,
//!   decision variables, sorting attributes)
//! - [`comparator`]: pairwise dominance relations — Pareto,
//!   constraint-aggregate, epsilon-box, scalarizing, rank/crowding, and
//!   chains thereof
//! - [`population`]: the population container, non-dominated populations,
//!   non-dominated sorting, and the epsilon-box / adaptive-grid /
//!   reference-vector archives
//! - [`weights`]: reference-direction generation on the unit simplex
//!
//! # Example
//!
//! ```
//! use pareto_archive::population::EpsilonBoxDominanceArchive;
//! use pareto_archive::solution::Solution;
//!
//! let mut archive = EpsilonBoxDominanceArchive::uniform(0.1).unwrap();
//!
//! for point in [[0.25, 0.25], [0.10, 0.10], [0.24, 0.24]] {
//!     archive.add(Solution::with_objectives(point));
//! }
//!
//! assert_eq!(archive.len(), 1);
//! assert_eq!(archive.number_of_improvements(), 2);
//! ```
//!
//! # Concurrency
//!
//! The engine is single-threaded by design: comparisons and sorts are pure
//! CPU-bound computation over in-memory data, and all mutation happens
//! synchronously. Callers evaluating solutions in parallel must synchronize
//! before handing results to this crate.

pub mod comparator;
pub mod error;
pub mod population;
pub mod solution;
pub mod weights;

mod vector;

pub use error::Error;
pub use solution::{Sense, Solution};
