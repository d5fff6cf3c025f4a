//! # trellis-retrieval
//!
//! The retrieval pipeline. [`RetrievalOrchestrator`] sequences the three
//! ports and translates their failures; [`aggregate`] turns ranked hits and
//! expansion contexts into the final result.

pub mod aggregator;
pub mod orchestrator;

pub use aggregator::aggregate;
pub use orchestrator::RetrievalOrchestrator;
