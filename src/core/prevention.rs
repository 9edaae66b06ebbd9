//! Deadlock prevention strategies
//!
//! Given a detected wait-for cycle, proposes up to three ways to break it:
//! preempting the first cycle member's resources, terminating the last cycle
//! member, or adding an instance of every resource the cycle is contending
//! for. Proposing never mutates anything; [`apply`] is a pure function from
//! one snapshot to the next, and the caller re-runs detection afterwards.

use crate::core::logger;
use crate::core::model::GraphModel;
use crate::core::types::{AnalysisEvent, EdgeKind, ProcessId, ResourceId};
use serde::{Deserialize, Serialize};

/// The action a strategy performs when applied
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    /// Revoke every resource currently held by the victim
    Preemption { victim: ProcessId },
    /// Remove the victim entirely, releasing its allocations
    Termination { victim: ProcessId },
    /// Add one instance to each contended resource
    Augmentation { resources: Vec<ResourceId> },
    /// Informational entry: the graph has no deadlock cycle
    None,
}

/// A proposed way to resolve a detected deadlock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Strategy {
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub kind: StrategyKind,
}

/// Propose resolution strategies for a detected cycle
///
/// With an empty cycle, returns a single informational "system is safe"
/// entry whose kind is [`StrategyKind::None`]. Otherwise proposes:
///
/// 1. Preemption of the cycle's first process, only when it actually holds
///    allocations.
/// 2. Termination of the cycle's last process.
/// 3. Augmentation of every resource requested by any cycle member (first
///    occurrence order, deduplicated), when any exist.
///
/// The model is only read; nothing is applied until the caller picks exactly
/// one strategy and passes it to [`apply`].
pub fn propose(model: &GraphModel, cycle: &[ProcessId]) -> Vec<Strategy> {
    let Some(first) = cycle.first() else {
        return vec![Strategy {
            title: "System is safe".to_string(),
            description: "No deadlock cycle detected; no action required.".to_string(),
            kind: StrategyKind::None,
        }];
    };
    let last = cycle.last().unwrap_or(first);
    let mut strategies = Vec::new();

    if model.process(first).is_some_and(|p| !p.allocated.is_empty()) {
        strategies.push(Strategy {
            title: format!("Preempt resources from {first}"),
            description: format!(
                "Revoke every resource currently held by {first} and return the freed units to the pool."
            ),
            kind: StrategyKind::Preemption {
                victim: first.clone(),
            },
        });
    }

    strategies.push(Strategy {
        title: format!("Terminate {last}"),
        description: format!("Remove {last} from the system, releasing all of its allocations."),
        kind: StrategyKind::Termination {
            victim: last.clone(),
        },
    });

    let mut contended: Vec<ResourceId> = Vec::new();
    for member in cycle {
        if let Some(process) = model.process(member) {
            for resource in &process.requesting {
                if !contended.contains(resource) {
                    contended.push(resource.clone());
                }
            }
        }
    }
    if !contended.is_empty() {
        strategies.push(Strategy {
            title: "Add resource instances".to_string(),
            description: format!(
                "Increase the instance count of {} by one unit each.",
                contended.join(", ")
            ),
            kind: StrategyKind::Augmentation {
                resources: contended,
            },
        });
    }

    strategies
}

/// Apply one chosen strategy to a snapshot
///
/// Pure: the input model is untouched and the mutated successor is returned.
/// The caller is expected to re-run detection on the result.
pub fn apply(model: &GraphModel, strategy: &Strategy) -> GraphModel {
    let mut next = model.clone();

    match &strategy.kind {
        StrategyKind::Preemption { victim } => {
            // Removing each allocation edge into the victim also clears the
            // mirrored `allocated` entry and returns the freed unit.
            let revoked: Vec<_> = next
                .edges
                .iter()
                .filter(|e| e.kind == EdgeKind::Allocation && e.to == *victim)
                .map(|e| e.id.clone())
                .collect();
            for edge in revoked {
                next.remove_edge(&edge);
            }
            logger::log_event(AnalysisEvent::StrategyApplied, victim);
        }
        StrategyKind::Termination { victim } => {
            next.remove_process(victim);
            logger::log_event(AnalysisEvent::StrategyApplied, victim);
        }
        StrategyKind::Augmentation { resources } => {
            for rid in resources {
                if let Some(resource) = next.resource_mut(rid) {
                    resource.total += 1;
                    resource.available += 1;
                }
            }
            logger::log_event(AnalysisEvent::StrategyApplied, &resources.join(", "));
        }
        StrategyKind::None => {}
    }

    next
}
