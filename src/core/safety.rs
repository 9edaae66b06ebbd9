//! Safe-sequence computation
//!
//! Runs only over acyclic snapshots (or after a prevention action cleared a
//! cycle). The pass is a fixed-point iteration in the style of the banker's
//! algorithm, with one deliberate simplification inherited from the model: a
//! process is considered runnable when every resource type it is blocked on
//! has at least one unit of working availability. The model does not track
//! how many units of a type a process needs simultaneously, only whether it
//! is blocked on that type at all, so this is a presence check rather than a
//! quantity check.

use crate::core::model::GraphModel;
use crate::core::types::ProcessId;
use fxhash::{FxHashMap, FxHashSet};

/// Compute an order in which every process can complete
///
/// Initializes working availability from each resource's `available` count
/// and repeats passes over unfinished processes in insertion order: a process
/// finishes when every resource in its `requesting` set has working
/// availability, releasing one unit per entry in its `allocated` set. Passes
/// repeat until all processes finished or a full pass makes no progress.
///
/// # Returns
/// The full completion order, or an empty sequence when no safe order is
/// computable. O(V^2) passes worst case.
pub fn safe_sequence(model: &GraphModel) -> Vec<ProcessId> {
    let mut work: FxHashMap<&str, u32> = model
        .resources
        .iter()
        .map(|r| (r.id.as_str(), r.available))
        .collect();
    let mut finished: FxHashSet<&str> = FxHashSet::default();
    let mut sequence = Vec::with_capacity(model.processes.len());

    loop {
        let mut progressed = false;

        for process in &model.processes {
            if finished.contains(process.id.as_str()) {
                continue;
            }

            // Blocked on an unknown resource id means blocked forever
            let can_finish = process
                .requesting
                .iter()
                .all(|r| work.get(r.as_str()).is_some_and(|&units| units > 0));
            if !can_finish {
                continue;
            }

            for resource in &process.allocated {
                if let Some(units) = work.get_mut(resource.as_str()) {
                    *units += 1;
                }
            }
            finished.insert(process.id.as_str());
            sequence.push(process.id.clone());
            progressed = true;
        }

        if finished.len() == model.processes.len() {
            return sequence;
        }
        if !progressed {
            return Vec::new();
        }
    }
}
