// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Flattening the tree into position-addressed records, and back.
//!
//! # Traversal order
//!
//! Records are laid out breadth-first from the root, visiting each node's
//! children in the order they were attached. The root is record 0, its
//! children follow in edge order, then their children, and so on. This order
//! is part of the binary format: the same tree always produces the same
//! records, in this process and in any other.
//!
//! # Reconstruction
//!
//! One node is allocated per record before any edge is resolved, so forward
//! and backward references both work. Then every child index is checked and
//! wired up. Beyond the bounds check, the records must form a tree: no node
//! with two parents, nothing pointing back at the root, nothing unreachable.
//! A graph that breaks those rules would send search around in circles.

use std::collections::VecDeque;

use super::{BkTree, Edge, Node};
use crate::error::{BkError, Result};
use crate::types::{Distance, IndexForm, NodeId, SerializedNode};

/// Breadth-first placement of arena nodes.
pub(crate) struct Layout {
    /// Arena ids in record order.
    pub(crate) order: Vec<NodeId>,
    /// Record position of each arena id.
    pub(crate) position: Vec<u32>,
}

impl BkTree {
    /// Compute the record order shared by the index form and the binary file.
    pub(crate) fn layout(&self) -> Layout {
        let mut order = Vec::with_capacity(self.len());
        let mut position = vec![0u32; self.len()];
        if self.is_empty() {
            return Layout { order, position };
        }

        let mut queue = VecDeque::from([NodeId::ROOT]);
        while let Some(id) = queue.pop_front() {
            position[id.as_usize()] = order.len() as u32;
            order.push(id);
            queue.extend(self.node(id).children.iter().map(|edge| edge.child));
        }
        Layout { order, position }
    }

    /// Flatten into records, root first, children referenced by position.
    pub fn to_serializable(&self) -> IndexForm {
        let Layout { order, position } = self.layout();
        order
            .iter()
            .map(|&id| {
                let node = self.node(id);
                SerializedNode {
                    term: node.term.to_vec(),
                    children: node
                        .children
                        .iter()
                        .map(|edge| (edge.distance, position[edge.child.as_usize()]))
                        .collect(),
                }
            })
            .collect()
    }

    /// Rebuild a tree from records produced by [`to_serializable`](Self::to_serializable).
    ///
    /// An empty sequence gives an empty tree. A child index past the end is
    /// [`BkError::IndexOutOfRange`]; records that do not form a single tree
    /// rooted at index 0 are [`BkError::Format`].
    ///
    /// Edge weights are taken as given. Use
    /// [`check_invariants`](crate::verify::check_invariants) to confirm they
    /// match the metric.
    pub fn from_serializable(data: IndexForm) -> Result<Self> {
        let records: Vec<(Box<[u8]>, Vec<(Distance, u32)>)> = data
            .into_iter()
            .map(|record| (record.term.into_boxed_slice(), record.children))
            .collect();
        assemble(records)
    }
}

/// Allocate every node, then resolve and validate every edge.
pub(crate) fn assemble(records: Vec<(Box<[u8]>, Vec<(Distance, u32)>)>) -> Result<BkTree> {
    let len = records.len();
    if len == 0 {
        return Ok(BkTree::new());
    }
    if u32::try_from(len).map_or(true, |n| n == u32::MAX) {
        return Err(BkError::format(format!("{len} records exceed the node id range")));
    }

    let mut nodes: Vec<Node> = Vec::with_capacity(len);
    let mut edge_lists = Vec::with_capacity(len);
    for (term, children) in records {
        nodes.push(Node {
            term,
            children: Vec::with_capacity(children.len()),
        });
        edge_lists.push(children);
    }

    let mut has_parent = vec![false; len];
    for (parent, children) in edge_lists.into_iter().enumerate() {
        for (distance, index) in children {
            let slot = index as usize;
            if slot >= len {
                return Err(BkError::IndexOutOfRange {
                    index: u64::from(index),
                    len,
                });
            }
            if slot == 0 {
                return Err(BkError::format(format!(
                    "record {parent} lists the root as a child"
                )));
            }
            if has_parent[slot] {
                return Err(BkError::format(format!(
                    "record {slot} has more than one parent"
                )));
            }
            has_parent[slot] = true;
            nodes[parent].children.push(Edge {
                distance,
                child: NodeId(index),
            });
        }
    }

    // One parent each plus full reachability from the root means no cycles
    let reachable = count_reachable(&nodes);
    if reachable != len {
        return Err(BkError::format(format!(
            "{} of {len} records are unreachable from the root",
            len - reachable
        )));
    }

    Ok(BkTree::from_arena(nodes))
}

fn count_reachable(nodes: &[Node]) -> usize {
    let mut seen = vec![false; nodes.len()];
    let mut stack = vec![NodeId::ROOT];
    let mut count = 0;
    while let Some(id) = stack.pop() {
        if std::mem::replace(&mut seen[id.as_usize()], true) {
            continue;
        }
        count += 1;
        stack.extend(nodes[id.as_usize()].children.iter().map(|edge| edge.child));
    }
    count
}
