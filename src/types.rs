// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a BK-tree and its flattened index form.
//!
//! Terms are plain byte sequences. Nothing here normalizes case or
//! whitespace, and nothing decodes UTF-8: `"Book"` and `"book"` are
//! different terms one substitution apart. Byte-lexicographic order is
//! also code point order for valid UTF-8, so results sort the way a reader
//! expects for text.
//!
//! # Invariants
//!
//! - **Edge**: for every node `n` with an edge `(d, c)`,
//!   `distance(n.term, c.term) == d` and `d >= 1`.
//! - **Node**: at most one child per distinct distance.
//! - **Index form**: the root is record 0, every child index refers to a
//!   record of the same sequence.
//!
//! `verify::check_invariants` checks the first two on a live tree.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Edit distance between two terms. Also the weight of a tree edge.
pub type Distance = u32;

// =============================================================================
// NODE IDENTITY
// =============================================================================

/// Position of a node in the tree's arena.
///
/// Ids follow arena order: insertion order for built trees, record order for
/// loaded ones. Records from
/// [`BkTree::to_serializable`](crate::BkTree::to_serializable) are laid out
/// breadth-first, so a tree built and then reloaded may renumber its nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root always lives at index 0.
    pub const ROOT: NodeId = NodeId(0);

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for arena indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// A stored term within range of a query, borrowed from the tree.
///
/// Field order matters: the derived `Ord` compares `distance` first and the
/// term bytes second, which is exactly the order search results are returned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match<'a> {
    pub distance: Distance,
    pub term: &'a [u8],
}

impl<'a> Match<'a> {
    /// The term as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.term)
    }

    /// Detach the match from the tree it borrows from.
    pub fn to_owned_pair(&self) -> (String, Distance) {
        (self.text().into_owned(), self.distance)
    }
}

/// Put matches in result order: ascending distance, then ascending term.
pub(crate) fn sort_matches(matches: &mut [Match<'_>]) {
    matches.sort_unstable();
}

// =============================================================================
// INDEX FORM
// =============================================================================

/// One node of the flattened tree.
///
/// `children` holds `(distance, child_index)` pairs, where `child_index` is a
/// position in the same [`IndexForm`] sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedNode {
    pub term: Vec<u8>,
    pub children: Vec<(Distance, u32)>,
}

impl SerializedNode {
    pub fn new(term: impl Into<Vec<u8>>, children: Vec<(Distance, u32)>) -> Self {
        Self {
            term: term.into(),
            children,
        }
    }
}

/// The flattened tree: records in breadth-first order, root at index 0.
pub type IndexForm = Vec<SerializedNode>;
