//! Population containers and bounded archives.
//!
//! [`Population`] is the ordered, indexable container every other component
//! builds on. [`NondominatedPopulation`] layers the pairwise non-dominance
//! invariant on top of it, and the archive types bound its size in
//! different ways:
//!
//! - [`EpsilonBoxDominanceArchive`] bounds solutions per epsilon-box region
//!   and tracks epsilon-progress
//! - [`AdaptiveGridArchive`] enforces a hard capacity by evicting from the
//!   most crowded grid cell
//! - [`ReferenceVectorGuidedPopulation`] keeps one survivor per reference
//!   direction
//!
//! [`NondominatedSorting`] ranks a working population by dominance depth
//! and crowding distance for NSGA-style survival selection.

mod base;
mod epsilon_archive;
mod grid_archive;
mod nondominated;
mod reference_vector;
mod sorting;

pub use base::Population;
pub use epsilon_archive::EpsilonBoxDominanceArchive;
pub use grid_archive::AdaptiveGridArchive;
pub use nondominated::{DuplicateMode, NondominatedPopulation};
pub use reference_vector::ReferenceVectorGuidedPopulation;
pub use sorting::NondominatedSorting;
