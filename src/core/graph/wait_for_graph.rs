//! Wait-For Graph derived from a model snapshot
//!
//! This module implements the directed wait-for graph (WFG) over processes:
//! an edge `P -> Q` means P is blocked on some resource currently held by Q.
//! The graph is rebuilt from scratch for every detection pass; it never
//! outlives the snapshot it was derived from.
//!
//! # Determinism
//!
//! Both construction and traversal follow model insertion order: for each
//! process in order, its requested resources in order, and for each request
//! every other holder in process order. Parallel edges between the same pair
//! of processes are kept when several requested resources are held by the
//! same process; deduplicating them would change which cycle the search
//! reports first.

use crate::core::model::GraphModel;
use crate::core::types::ProcessId;
use fxhash::{FxHashMap, FxHashSet};

/// Represents a directed graph of process wait relationships
pub struct WaitForGraph {
    /// Process ids in model insertion order; drives root traversal order.
    order: Vec<ProcessId>,
    /// Maps a process to all the processes it is blocked on (outgoing edges),
    /// in derivation order.
    edges: FxHashMap<ProcessId, Vec<ProcessId>>,
}

impl WaitForGraph {
    /// Derive the wait-for graph from the given snapshot
    ///
    /// For each process P, for each resource R in `P.requesting`, every other
    /// process holding R contributes one edge `P -> holder`.
    pub fn build(model: &GraphModel) -> Self {
        let mut order = Vec::with_capacity(model.processes.len());
        let mut edges: FxHashMap<ProcessId, Vec<ProcessId>> = FxHashMap::default();

        for process in &model.processes {
            order.push(process.id.clone());
            let mut blocked_on = Vec::new();
            for resource in &process.requesting {
                for holder in &model.processes {
                    if holder.id != process.id && holder.allocated.contains(resource) {
                        blocked_on.push(holder.id.clone());
                    }
                }
            }
            edges.insert(process.id.clone(), blocked_on);
        }

        WaitForGraph { order, edges }
    }

    /// Outgoing blocking edges of a process, in derivation order
    pub fn neighbors(&self, id: &str) -> &[ProcessId] {
        self.edges.get(id).map_or(&[], Vec::as_slice)
    }

    /// Find the first directed cycle under deterministic traversal
    ///
    /// Depth-first search with three per-node states (unvisited, on the
    /// active path, done), using an explicit stack so the search depth is
    /// independent of the call stack. Roots are visited in model insertion
    /// order.
    ///
    /// # Returns
    /// * `Some(Vec<ProcessId>)` - The suffix of the active path from the
    ///   revisited node onward, in path order; the cycle wraps back to its
    ///   first element
    /// * `None` - The graph is acyclic
    pub fn find_cycle(&self) -> Option<Vec<ProcessId>> {
        let mut done: FxHashSet<&str> = FxHashSet::default();
        let mut on_path: FxHashSet<&str> = FxHashSet::default();
        let mut path: Vec<&str> = Vec::new();
        // (node, index of the next neighbor to try)
        let mut stack: Vec<(&str, usize)> = Vec::new();

        for root in &self.order {
            if done.contains(root.as_str()) {
                continue;
            }

            stack.push((root.as_str(), 0));
            on_path.insert(root.as_str());
            path.push(root.as_str());

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                let neighbors = self.neighbors(node);

                if frame.1 < neighbors.len() {
                    let next = neighbors[frame.1].as_str();
                    frame.1 += 1;

                    if on_path.contains(next) {
                        // Back-edge: the cycle is the path suffix from `next`
                        if let Some(start) = path.iter().position(|&p| p == next) {
                            return Some(path[start..].iter().map(|&p| p.to_string()).collect());
                        }
                    } else if !done.contains(next) {
                        on_path.insert(next);
                        path.push(next);
                        stack.push((next, 0));
                    }
                } else {
                    stack.pop();
                    on_path.remove(node);
                    path.pop();
                    done.insert(node);
                }
            }
        }

        None
    }
}
