//! # Resolock
//!
//! A resource-allocation-graph deadlock analyzer.
//!
//! Resolock models the allocation state of a set of processes and resources
//! as a bipartite graph and analyzes snapshots of that graph: it derives the
//! process-to-process wait-for graph, searches it for cycles (deadlocks),
//! computes a safe completion order when no cycle exists, and proposes
//! prevention strategies (preemption, termination, augmentation) when one
//! does.
//!
//! ## Features
//!
//! - Deterministic wait-for graph construction and first-cycle detection
//! - Safe-sequence computation over current resource availability
//! - Prevention strategies proposed as pure snapshot-in/snapshot-out mutations
//! - JSON persistence of the graph model, tolerant of partial documents
//! - Analysis event logging
//!
//! ## Example
//!
//! ```
//! use resolock::{GraphModel, NodeRef, detect};
//!
//! let mut model = GraphModel::new();
//! model.add_resource("R1", 1);
//! model.add_process("P1");
//! let _ = model.connect(
//!     NodeRef::Resource("R1".into()),
//!     NodeRef::Process("P1".into()),
//! );
//!
//! let result = detect(&model);
//! assert!(!result.deadlock);
//! assert_eq!(result.safe_sequence, vec!["P1".to_string()]);
//! ```

mod core;
pub use core::{
    Resolock,
    detector::detect,
    logger,
    model::{Edge, GraphModel, Process, Resource},
    prevention::{self, Strategy, StrategyKind},
    safety,
    types::{
        AnalysisEvent, DetectionResult, EdgeId, EdgeKind, NodeKind, NodeRef, ProcessId, ResourceId,
    },
};
