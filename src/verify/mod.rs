// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: structural checks and runtime contracts.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **Full checks** (`check_invariants`) that walk a whole tree and report
//!    the first edge that breaks the BK-tree rules. They recompute every edge
//!    distance, so they cost as much as rebuilding; run them on trees that
//!    came from somewhere else, not on every insert.
//!
//! 2. **Runtime contracts** that panic in debug builds when a result breaks
//!    its promise. Zero-cost in release, but catch bugs during development.

pub mod contracts;

use std::fmt;

use crate::fuzzy::distance;
use crate::tree::BkTree;
use crate::types::{Distance, NodeId};

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// An edge weight disagrees with the metric.
    WrongEdgeWeight {
        parent: NodeId,
        child: NodeId,
        recorded: Distance,
        actual: Distance,
    },
    /// An edge of weight 0: a duplicate term stored as its own node.
    ZeroWeightEdge { parent: NodeId, child: NodeId },
    /// Two children of one node share a weight.
    DuplicateEdgeWeight { parent: NodeId, weight: Distance },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::WrongEdgeWeight {
                parent,
                child,
                recorded,
                actual,
            } => {
                write!(
                    f,
                    "edge {} -> {} recorded as {} but the terms are {} apart",
                    parent, child, recorded, actual
                )
            }
            InvariantError::ZeroWeightEdge { parent, child } => {
                write!(f, "edge {} -> {} has weight 0", parent, child)
            }
            InvariantError::DuplicateEdgeWeight { parent, weight } => {
                write!(f, "node {} has two children at distance {}", parent, weight)
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// Check every edge of `tree` against the metric and the one-child-per-weight rule.
///
/// Search pruning is only sound when these hold, so a tree rebuilt from
/// foreign data is worth checking once before it serves queries.
pub fn check_invariants(tree: &BkTree) -> Result<(), InvariantError> {
    let Some(root) = tree.root() else {
        return Ok(());
    };

    let mut stack = vec![root];
    let mut weights: Vec<Distance> = Vec::new();
    while let Some(parent) = stack.pop() {
        let node = tree.node(parent);

        weights.clear();
        for edge in &node.children {
            if edge.distance == 0 {
                return Err(InvariantError::ZeroWeightEdge {
                    parent,
                    child: edge.child,
                });
            }
            if weights.contains(&edge.distance) {
                return Err(InvariantError::DuplicateEdgeWeight {
                    parent,
                    weight: edge.distance,
                });
            }
            weights.push(edge.distance);

            let actual = distance(&node.term, &tree.node(edge.child).term);
            if actual != edge.distance {
                return Err(InvariantError::WrongEdgeWeight {
                    parent,
                    child: edge.child,
                    recorded: edge.distance,
                    actual,
                });
            }
            stack.push(edge.child);
        }
    }
    Ok(())
}
