//! Strategy selection — choosing a (stake, skim) pair from sweep output.

pub mod grid;
pub mod recommend;

pub use grid::PercentRange;
pub use recommend::{recommend, Recommendation, DEFAULT_RUIN_CAP};
