//! Graph module for deadlock analysis
//!
//! Contains the wait-for graph: the process-to-process blocking graph derived
//! from a model snapshot, together with its deterministic first-cycle search.

pub(crate) mod wait_for_graph;

pub(crate) use wait_for_graph::WaitForGraph;
