//! Graph model for resource-allocation analysis
//!
//! The model is a bipartite graph of processes and resources. Edges are a
//! derived, mirrored view of `Process::allocated` / `Process::requesting`:
//! an edge must never exist without the corresponding set membership and vice
//! versa, or cycle/safety queries read inconsistent state. Every mutating
//! operation on [`GraphModel`] updates the edge collection and the set
//! mirrors as a single step.
//!
//! Collections preserve insertion order; traversal order in the analysis
//! passes is derived from it, which keeps detection output deterministic.

use crate::core::logger;
use crate::core::types::{AnalysisEvent, EdgeId, EdgeKind, NodeKind, NodeRef, ProcessId, ResourceId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// An entity that can hold and request resource units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Process {
    pub id: ProcessId,
    /// Presentation coordinate, carried for external collaborators and never
    /// read by the analysis core.
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Resource ids currently held, in acquisition order
    #[serde(default)]
    pub allocated: Vec<ResourceId>,
    /// Resource ids currently blocked on, in request order
    #[serde(default)]
    pub requesting: Vec<ResourceId>,
}

/// An entity with a finite instance count that can be allocated to processes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub id: ResourceId,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Total instance count
    pub total: u32,
    /// Unallocated instance count, `0 <= available <= total`
    pub available: u32,
}

/// A request or allocation edge between a process and a resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub from: String,
    pub to: String,
    pub from_kind: NodeKind,
    pub to_kind: NodeKind,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// The complete allocation state of the modeled system
///
/// This is the snapshot the analysis passes operate on. All three collections
/// default to empty on deserialization so partial persisted documents load
/// without error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphModel {
    #[serde(default)]
    pub processes: Vec<Process>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Sequence for generating fresh edge ids; not persisted, so freshness is
    /// re-checked against the loaded edge collection.
    #[serde(skip)]
    edge_seq: u64,
}

impl GraphModel {
    /// Create an empty model
    pub fn new() -> Self {
        GraphModel::default()
    }

    /// Look up a process by id
    pub fn process(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    fn process_mut(&mut self, id: &str) -> Option<&mut Process> {
        self.processes.iter_mut().find(|p| p.id == id)
    }

    /// Look up a resource by id
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub(crate) fn resource_mut(&mut self, id: &str) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|r| r.id == id)
    }

    /// Add a process node
    ///
    /// Adding an id that already names a process is a no-op.
    pub fn add_process(&mut self, id: impl Into<ProcessId>) {
        let id = id.into();
        if self.process(&id).is_some() {
            return;
        }
        logger::log_event(AnalysisEvent::NodeAdded, &id);
        self.processes.push(Process {
            id,
            x: 0.0,
            y: 0.0,
            allocated: Vec::new(),
            requesting: Vec::new(),
        });
    }

    /// Add a resource node with `total` instances, all initially available
    ///
    /// Adding an id that already names a resource is a no-op.
    pub fn add_resource(&mut self, id: impl Into<ResourceId>, total: u32) {
        let id = id.into();
        if self.resource(&id).is_some() {
            return;
        }
        logger::log_event(AnalysisEvent::NodeAdded, &id);
        self.resources.push(Resource {
            id,
            x: 0.0,
            y: 0.0,
            total,
            available: total,
        });
    }

    /// Connect two nodes with a request or allocation edge
    ///
    /// A process -> resource connection creates a request edge; a resource ->
    /// process connection creates an allocation edge and takes one unit from
    /// the resource's availability (clamped at zero). The edge and the
    /// corresponding `requesting`/`allocated` entry are created together.
    ///
    /// # Returns
    /// * `Some(EdgeId)` - The id of the created edge
    /// * `None` - Same-kind endpoints, an unknown endpoint id, or an already
    ///   existing relationship; the model is left untouched
    pub fn connect(&mut self, from: NodeRef, to: NodeRef) -> Option<EdgeId> {
        match (from, to) {
            (NodeRef::Process(pid), NodeRef::Resource(rid)) => {
                self.resource(&rid)?;
                let process = self.process_mut(&pid)?;
                if process.requesting.contains(&rid) {
                    return None;
                }
                process.requesting.push(rid.clone());
                Some(self.push_edge(pid, rid, NodeKind::Process, NodeKind::Resource, EdgeKind::Request))
            }
            (NodeRef::Resource(rid), NodeRef::Process(pid)) => {
                if self.process(&pid)?.allocated.contains(&rid) {
                    return None;
                }
                let resource = self.resource_mut(&rid)?;
                resource.available = resource.available.saturating_sub(1);
                if let Some(process) = self.process_mut(&pid) {
                    process.allocated.push(rid.clone());
                }
                Some(self.push_edge(rid, pid, NodeKind::Resource, NodeKind::Process, EdgeKind::Allocation))
            }
            // Same-kind connections are invalid input, not a fault
            _ => None,
        }
    }

    /// Remove an edge, undoing its effect on the mirrored sets
    ///
    /// Removing an allocation edge returns one unit to the resource's
    /// availability (capped at `total`). An unknown id is a no-op.
    pub fn remove_edge(&mut self, id: &str) {
        let Some(index) = self.edges.iter().position(|e| e.id == id) else {
            return;
        };
        let edge = self.edges.remove(index);
        logger::log_event(AnalysisEvent::EdgeRemoved, &edge.id);
        match edge.kind {
            EdgeKind::Request => {
                if let Some(process) = self.process_mut(&edge.from) {
                    process.requesting.retain(|r| *r != edge.to);
                }
            }
            EdgeKind::Allocation => {
                if let Some(process) = self.process_mut(&edge.to) {
                    process.allocated.retain(|r| *r != edge.from);
                }
                if let Some(resource) = self.resource_mut(&edge.from) {
                    resource.available = (resource.available + 1).min(resource.total);
                }
            }
        }
    }

    /// Remove a process, releasing its allocations
    ///
    /// Every resource the process held gets one unit back per held entry, and
    /// every edge with the process as either endpoint is dropped. An unknown
    /// id is a no-op.
    pub fn remove_process(&mut self, id: &str) {
        let Some(index) = self.processes.iter().position(|p| p.id == id) else {
            return;
        };
        let process = self.processes.remove(index);
        logger::log_event(AnalysisEvent::NodeRemoved, &process.id);
        for rid in &process.allocated {
            if let Some(resource) = self.resource_mut(rid) {
                resource.available = (resource.available + 1).min(resource.total);
            }
        }
        self.edges.retain(|e| e.from != id && e.to != id);
    }

    /// Remove a resource, clearing it from every process's sets
    ///
    /// Every edge with the resource as either endpoint is dropped, and the
    /// resource id is removed from every `allocated`/`requesting` mirror. An
    /// unknown id is a no-op.
    pub fn remove_resource(&mut self, id: &str) {
        let Some(index) = self.resources.iter().position(|r| r.id == id) else {
            return;
        };
        let resource = self.resources.remove(index);
        logger::log_event(AnalysisEvent::NodeRemoved, &resource.id);
        for process in &mut self.processes {
            process.allocated.retain(|r| r != id);
            process.requesting.retain(|r| r != id);
        }
        self.edges.retain(|e| e.from != id && e.to != id);
    }

    /// Load a model from a persisted JSON document
    ///
    /// Missing collections default to empty; only an unparseable document is
    /// an error.
    pub fn from_json(text: &str) -> Result<GraphModel> {
        serde_json::from_str(text).context("Failed to parse graph model")
    }

    /// Serialize the model for persistence
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize graph model")
    }

    fn push_edge(
        &mut self,
        from: String,
        to: String,
        from_kind: NodeKind,
        to_kind: NodeKind,
        kind: EdgeKind,
    ) -> EdgeId {
        let id = self.fresh_edge_id();
        logger::log_event(AnalysisEvent::EdgeAdded, &id);
        self.edges.push(Edge {
            id: id.clone(),
            from,
            to,
            from_kind,
            to_kind,
            kind,
        });
        id
    }

    /// Generate an edge id unused in this model
    ///
    /// The sequence is not persisted, so after a load it restarts and skips
    /// past any ids the document already uses.
    fn fresh_edge_id(&mut self) -> EdgeId {
        loop {
            self.edge_seq += 1;
            let id = format!("e{}", self.edge_seq);
            if !self.edges.iter().any(|e| e.id == id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_model() -> GraphModel {
        let mut model = GraphModel::new();
        model.add_process("P1");
        model.add_resource("R1", 1);
        model
    }

    /// Edges and the allocated/requesting mirrors must agree entry for entry.
    fn assert_mirrors_consistent(model: &GraphModel) {
        let request_edges = model
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Request)
            .count();
        let allocation_edges = model
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Allocation)
            .count();
        let requesting: usize = model.processes.iter().map(|p| p.requesting.len()).sum();
        let allocated: usize = model.processes.iter().map(|p| p.allocated.len()).sum();

        assert_eq!(request_edges, requesting);
        assert_eq!(allocation_edges, allocated);

        for edge in &model.edges {
            match edge.kind {
                EdgeKind::Request => {
                    let p = model.process(&edge.from).expect("request edge from process");
                    assert!(p.requesting.contains(&edge.to));
                }
                EdgeKind::Allocation => {
                    let p = model.process(&edge.to).expect("allocation edge to process");
                    assert!(p.allocated.contains(&edge.from));
                }
            }
        }
    }

    #[test]
    fn test_request_edge_mirrors_requesting() {
        let mut model = two_node_model();
        let edge = model.connect(NodeRef::Process("P1".into()), NodeRef::Resource("R1".into()));

        assert!(edge.is_some());
        assert_eq!(model.process("P1").unwrap().requesting, vec!["R1"]);
        assert_eq!(model.resource("R1").unwrap().available, 1);
        assert_mirrors_consistent(&model);
    }

    #[test]
    fn test_allocation_edge_takes_a_unit() {
        let mut model = two_node_model();
        let edge = model.connect(NodeRef::Resource("R1".into()), NodeRef::Process("P1".into()));

        assert!(edge.is_some());
        assert_eq!(model.process("P1").unwrap().allocated, vec!["R1"]);
        assert_eq!(model.resource("R1").unwrap().available, 0);
        assert_mirrors_consistent(&model);
    }

    #[test]
    fn test_same_kind_connection_rejected_without_mutation() {
        let mut model = two_node_model();
        model.add_process("P2");
        model.add_resource("R2", 1);
        let before = model.clone();

        assert!(
            model
                .connect(NodeRef::Process("P1".into()), NodeRef::Process("P2".into()))
                .is_none()
        );
        assert!(
            model
                .connect(NodeRef::Resource("R1".into()), NodeRef::Resource("R2".into()))
                .is_none()
        );
        assert_eq!(model, before);
    }

    #[test]
    fn test_unknown_endpoint_rejected_without_mutation() {
        let mut model = two_node_model();
        let before = model.clone();

        assert!(
            model
                .connect(NodeRef::Process("P9".into()), NodeRef::Resource("R1".into()))
                .is_none()
        );
        assert!(
            model
                .connect(NodeRef::Resource("R9".into()), NodeRef::Process("P1".into()))
                .is_none()
        );
        assert_eq!(model, before);
    }

    #[test]
    fn test_available_clamps_at_zero() {
        let mut model = GraphModel::new();
        model.add_resource("R1", 1);
        model.add_process("P1");
        model.add_process("P2");

        model.connect(NodeRef::Resource("R1".into()), NodeRef::Process("P1".into()));
        model.connect(NodeRef::Resource("R1".into()), NodeRef::Process("P2".into()));

        assert_eq!(model.resource("R1").unwrap().available, 0);
        assert_mirrors_consistent(&model);
    }

    #[test]
    fn test_remove_allocation_edge_returns_unit() {
        let mut model = two_node_model();
        let edge = model
            .connect(NodeRef::Resource("R1".into()), NodeRef::Process("P1".into()))
            .unwrap();
        model.remove_edge(&edge);

        assert_eq!(model.resource("R1").unwrap().available, 1);
        assert!(model.process("P1").unwrap().allocated.is_empty());
        assert!(model.edges.is_empty());
    }

    #[test]
    fn test_available_capped_at_total() {
        let mut model = two_node_model();
        model.add_process("P2");
        // Two holders of a single-instance resource; both released
        let e1 = model
            .connect(NodeRef::Resource("R1".into()), NodeRef::Process("P1".into()))
            .unwrap();
        let e2 = model
            .connect(NodeRef::Resource("R1".into()), NodeRef::Process("P2".into()))
            .unwrap();
        model.remove_edge(&e1);
        model.remove_edge(&e2);

        assert_eq!(model.resource("R1").unwrap().available, 1);
    }

    #[test]
    fn test_unknown_removals_are_noops() {
        let mut model = two_node_model();
        model.connect(NodeRef::Process("P1".into()), NodeRef::Resource("R1".into()));
        let before = model.clone();

        model.remove_edge("e99");
        model.remove_process("P99");
        model.remove_resource("R99");

        assert_eq!(model, before);
    }

    #[test]
    fn test_remove_process_releases_and_drops_edges() {
        let mut model = GraphModel::new();
        model.add_resource("R1", 1);
        model.add_resource("R2", 1);
        model.add_process("P1");
        model.connect(NodeRef::Resource("R1".into()), NodeRef::Process("P1".into()));
        model.connect(NodeRef::Process("P1".into()), NodeRef::Resource("R2".into()));

        model.remove_process("P1");

        assert!(model.process("P1").is_none());
        assert_eq!(model.resource("R1").unwrap().available, 1);
        assert!(model.edges.is_empty());
    }

    #[test]
    fn test_remove_resource_clears_mirrors() {
        let mut model = GraphModel::new();
        model.add_resource("R1", 1);
        model.add_process("P1");
        model.add_process("P2");
        model.connect(NodeRef::Resource("R1".into()), NodeRef::Process("P1".into()));
        model.connect(NodeRef::Process("P2".into()), NodeRef::Resource("R1".into()));

        model.remove_resource("R1");

        assert!(model.resource("R1").is_none());
        assert!(model.process("P1").unwrap().allocated.is_empty());
        assert!(model.process("P2").unwrap().requesting.is_empty());
        assert!(model.edges.is_empty());
    }

    #[test]
    fn test_duplicate_node_ids_are_noops() {
        let mut model = two_node_model();
        model.connect(NodeRef::Resource("R1".into()), NodeRef::Process("P1".into()));
        model.add_process("P1");
        model.add_resource("R1", 5);

        assert_eq!(model.processes.len(), 1);
        assert_eq!(model.resources.len(), 1);
        assert_eq!(model.resource("R1").unwrap().total, 1);
        assert_eq!(model.process("P1").unwrap().allocated, vec!["R1"]);
    }

    #[test]
    fn test_fresh_edge_ids_skip_loaded_ones() {
        let mut model = GraphModel::from_json(
            r#"{
                "processes": [{"id": "P1"}],
                "resources": [{"id": "R1", "total": 1, "available": 1}],
                "edges": [{"id": "e1", "from": "X", "to": "Y",
                           "fromKind": "process", "toKind": "resource",
                           "type": "request"}]
            }"#,
        )
        .unwrap();

        let id = model
            .connect(NodeRef::Process("P1".into()), NodeRef::Resource("R1".into()))
            .unwrap();
        assert_ne!(id, "e1");
    }
}
