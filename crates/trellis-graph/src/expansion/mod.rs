//! Per-fragment graph expansion.

mod expander;
mod fragment;

pub use expander::GraphExpander;
pub use fragment::ExpansionBounds;
