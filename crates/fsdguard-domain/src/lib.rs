//! Pure Feature-Sliced Design layer evaluation (no IO).
//!
//! Input: a source model (files and their import edges) constructed elsewhere.
//! Output: per-edge verdicts, or findings + verdict + summary data for a whole model.

#![forbid(unsafe_code)]

pub mod graph;
pub mod layer;
pub mod model;
pub mod policy;
pub mod report;
pub mod resolve;
pub mod validate;

mod checks;
mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::evaluate;
pub use graph::{GraphError, LayerGraph, LayerSet};
pub use layer::Layer;
pub use resolve::{ResolverConfig, SkipReason, is_under_source_root};
pub use validate::{EdgeVerdict, Violation, validate, validate_import};
