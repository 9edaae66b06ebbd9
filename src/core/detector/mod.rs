//! Deadlock detection over a model snapshot
//!
//! A detection pass derives the wait-for graph from the snapshot and searches
//! it for a cycle. A cycle means deadlock and suppresses sequence
//! computation; an acyclic graph gets a safe-sequence pass instead. The whole
//! pass is synchronous and pure: the same unmodified snapshot always yields
//! the same result.

use crate::core::graph::WaitForGraph;
use crate::core::logger;
use crate::core::model::GraphModel;
use crate::core::safety;
use crate::core::types::{AnalysisEvent, DetectionResult};

/// Run one detection pass over the given snapshot
///
/// # Returns
/// A [`DetectionResult`]: `deadlock` with the first cycle found under
/// deterministic traversal, or the safe completion order (possibly empty
/// when no order is computable).
pub fn detect(model: &GraphModel) -> DetectionResult {
    let graph = WaitForGraph::build(model);

    match graph.find_cycle() {
        Some(cycle) => {
            logger::log_event(AnalysisEvent::DeadlockDetected, &cycle.join(" -> "));
            DetectionResult {
                deadlock: true,
                cycle,
                safe_sequence: Vec::new(),
            }
        }
        None => {
            let safe_sequence = safety::safe_sequence(model);
            logger::log_event(AnalysisEvent::SequenceComputed, &safe_sequence.join(" -> "));
            DetectionResult {
                deadlock: false,
                cycle: Vec::new(),
                safe_sequence,
            }
        }
    }
}
