// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The BK-tree: terms arranged by their mutual edit distance.
//!
//! Every node keeps its children keyed by exact distance, at most one child
//! per distance. That is all the triangle inequality needs: if a query is `d`
//! away from a node, anything within `k` of the query hangs off an edge
//! weighted somewhere in `[d - k, d + k]`. Everything else can be skipped.
//!
//! # Storage
//!
//! Nodes live in a flat arena (`Vec<Node>`) and refer to their children by
//! [`NodeId`]. Each node has exactly one parent, the root sits at index 0,
//! and there are no cycles. The same index scheme doubles as the
//! serialization form, so there is no pointer-to-position side table.
//!
//! Insertion order decides the shape. Nothing rebalances: feeding sorted
//! input can produce a tall, narrow tree. Queries stay correct, they just
//! visit more nodes. Both insert and search walk iteratively, so a
//! degenerate tree costs time, never stack.

mod index_form;
mod search;

pub(crate) use index_form::{assemble, Layout};

use crate::fuzzy::distance;
use crate::types::{Distance, NodeId};

/// A weighted edge to a child node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub(crate) distance: Distance,
    pub(crate) child: NodeId,
}

/// One stored term and its outgoing edges, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) term: Box<[u8]>,
    pub(crate) children: Vec<Edge>,
}

impl Node {
    fn leaf(term: &[u8]) -> Self {
        Self {
            term: term.into(),
            children: Vec::new(),
        }
    }

    /// The child hanging off the edge weighted exactly `d`, if any.
    fn child_at(&self, d: Distance) -> Option<NodeId> {
        self.children
            .iter()
            .find(|edge| edge.distance == d)
            .map(|edge| edge.child)
    }
}

/// Shape summary, as reported by `bkmatch inspect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Stored terms.
    pub nodes: usize,
    /// Parent-child links (`nodes - 1` for a non-empty tree).
    pub edges: usize,
    /// Longest root-to-leaf path, counted in nodes. 0 for an empty tree.
    pub depth: usize,
    /// Largest number of children under a single node.
    pub max_children: usize,
}

/// A Burkhard-Keller tree over byte-sequence terms, using Levenshtein distance.
///
/// ```
/// use bkmatch::BkTree;
///
/// let mut tree = BkTree::new();
/// for word in ["book", "books", "cake", "boo", "cape", "cart"] {
///     tree.insert(word);
/// }
///
/// let found: Vec<_> = tree.search("book", 1).iter().map(|m| m.to_owned_pair()).collect();
/// assert_eq!(found, vec![
///     ("book".to_string(), 0),
///     ("boo".to_string(), 1),
///     ("books".to_string(), 1),
/// ]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BkTree {
    nodes: Vec<Node>,
}

impl BkTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Build a tree directly from an arena. Callers guarantee the arena is a
    /// tree rooted at index 0.
    pub(crate) fn from_arena(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Add `term` to the tree.
    ///
    /// Returns `true` if a node was created. A term already present is
    /// absorbed silently (distance 0 to an existing node) and returns `false`.
    ///
    /// # Panics
    ///
    /// If the tree already holds `u32::MAX` nodes, the most a [`NodeId`]
    /// (and the file format) can address.
    pub fn insert<T: AsRef<[u8]>>(&mut self, term: T) -> bool {
        let term = term.as_ref();
        if self.nodes.is_empty() {
            self.nodes.push(Node::leaf(term));
            return true;
        }

        let mut current = NodeId::ROOT;
        loop {
            let node = &self.nodes[current.as_usize()];
            let d = distance(&node.term, term);
            if d == 0 {
                return false;
            }

            match node.child_at(d) {
                Some(child) => current = child,
                None => {
                    let id = self.next_id();
                    self.nodes.push(Node::leaf(term));
                    self.nodes[current.as_usize()]
                        .children
                        .push(Edge { distance: d, child: id });
                    return true;
                }
            }
        }
    }

    /// Is `term` stored in the tree? Follows a single path, no range search.
    pub fn contains<T: AsRef<[u8]>>(&self, term: T) -> bool {
        let term = term.as_ref();
        if self.nodes.is_empty() {
            return false;
        }

        let mut current = NodeId::ROOT;
        loop {
            let node = self.node(current);
            let d = distance(&node.term, term);
            if d == 0 {
                return true;
            }
            match node.child_at(d) {
                Some(child) => current = child,
                None => return false,
            }
        }
    }

    /// Number of stored terms.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root's id, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId::ROOT)
    }

    /// Stored terms in arena order: insertion order for built trees, record
    /// order for loaded ones.
    pub fn terms(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.nodes.iter().map(|node| &*node.term)
    }

    /// The term stored at `id`, if the id is in range.
    pub fn term(&self, id: NodeId) -> Option<&[u8]> {
        self.nodes.get(id.as_usize()).map(|node| &*node.term)
    }

    /// `(distance, child)` edges of `id`, in insertion order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (Distance, NodeId)> + '_ {
        self.nodes
            .get(id.as_usize())
            .into_iter()
            .flat_map(|node| node.children.iter().map(|edge| (edge.distance, edge.child)))
    }

    /// Count nodes, edges, depth and widest fan-out in one pass.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            nodes: self.nodes.len(),
            ..TreeStats::default()
        };
        if self.nodes.is_empty() {
            return stats;
        }

        let mut stack = vec![(NodeId::ROOT, 1usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            stats.depth = stats.depth.max(depth);
            stats.edges += node.children.len();
            stats.max_children = stats.max_children.max(node.children.len());
            stack.extend(node.children.iter().map(|edge| (edge.child, depth + 1)));
        }
        stats
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.as_usize()]
    }

    fn next_id(&self) -> NodeId {
        match u32::try_from(self.nodes.len()) {
            Ok(id) if id < u32::MAX => NodeId(id),
            _ => panic!("BkTree is full: node ids are limited to u32"),
        }
    }
}

impl<T: AsRef<[u8]>> Extend<T> for BkTree {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for term in iter {
            self.insert(term);
        }
    }
}

impl<T: AsRef<[u8]>> FromIterator<T> for BkTree {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = BkTree::new();
        tree.extend(iter);
        tree
    }
}
