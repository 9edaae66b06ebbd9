use serde::{Deserialize, Serialize};

/// Process identifier type
///
/// Opaque string, unique within the process namespace.
pub type ProcessId = String;

/// Resource identifier type
///
/// Opaque string, unique within the resource namespace. Process and resource
/// ids live in disjoint namespaces.
pub type ResourceId = String;

/// Edge identifier type
pub type EdgeId = String;

/// Endpoint kind tag carried on persisted edges
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Process,
    Resource,
}

/// Tagged reference to one endpoint of a connection
///
/// Connections are only valid between one process endpoint and one resource
/// endpoint; the tag lets [`GraphModel::connect`](crate::GraphModel::connect)
/// reject same-kind pairs before touching the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    Process(ProcessId),
    Resource(ResourceId),
}

impl NodeRef {
    /// The referenced node id
    pub fn id(&self) -> &str {
        match self {
            NodeRef::Process(id) | NodeRef::Resource(id) => id,
        }
    }

    /// The endpoint kind of this reference
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Process(_) => NodeKind::Process,
            NodeRef::Resource(_) => NodeKind::Resource,
        }
    }
}

/// The two edge types of the allocation graph
///
/// A `Request` edge runs process -> resource and mirrors an entry in
/// `Process::requesting`; an `Allocation` edge runs resource -> process and
/// mirrors an entry in `Process::allocated`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Request,
    Allocation,
}

/// Represents the type of model/analysis event that occurred
///
/// These events are recorded by the analysis logger to reconstruct how a
/// model evolved and what each detection pass concluded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnalysisEvent {
    /// A process or resource node was added to the model
    NodeAdded,
    /// A process or resource node was removed from the model
    NodeRemoved,
    /// A request or allocation edge was created
    EdgeAdded,
    /// A request or allocation edge was removed
    EdgeRemoved,
    /// A detection pass found a wait-for cycle
    DeadlockDetected,
    /// A detection pass completed without finding a cycle
    SequenceComputed,
    /// A prevention strategy was applied to a snapshot
    StrategyApplied,
}

/// Represents the result of a detection pass
///
/// At most one of `cycle` and `safe_sequence` is non-empty: a detected
/// cycle suppresses sequence computation, and an acyclic graph has no cycle
/// to report. An acyclic graph may still yield an empty `safe_sequence` when
/// no completion order is computable under current availability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Whether the wait-for graph contains a directed cycle
    pub deadlock: bool,

    /// The first cycle found under deterministic traversal
    ///
    /// Ordered process ids, understood to wrap back to the first element.
    /// For example, if P1 waits on P2 and P2 waits on P1, the cycle is
    /// `[P1, P2]`. Empty when `deadlock` is false.
    pub cycle: Vec<ProcessId>,

    /// An order in which every process can complete
    ///
    /// Empty when a deadlock was detected, or when the fixed-point pass could
    /// not finish every process.
    pub safe_sequence: Vec<ProcessId>,
}
