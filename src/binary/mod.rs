// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary persistence for BK-trees.
//!
//! The file is the index form written out byte for byte: same records, same
//! breadth-first order, root first. Every integer is a little-endian `u32`
//! and every size is explicit, so a reader never scans for terminators.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (12 bytes)                                          │
//! │   magic: [u8; 8] = "BKTREE1\0"                             │
//! │   node_count: u32                                          │
//! ├────────────────────────────────────────────────────────────┤
//! │ RECORD × node_count (breadth-first, root at index 0)       │
//! │   term_len: u32                                            │
//! │   term: [u8; term_len]                                     │
//! │   child_count: u32                                         │
//! │   (distance: u32, child_index: u32) × child_count          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Safety on untrusted input
//!
//! - The magic is checked before anything else is read
//! - Counts and lengths never drive up-front allocation past a fixed cap
//! - A short read anywhere is a `Format` error, never a partial tree
//! - Any child index `>= node_count` is a `Format` error
//! - Records must form a single tree, or the load fails
//!
//! Loading builds a fresh tree and hands it back only once the whole stream
//! has parsed. An existing tree is never touched.
//!
//! Saving writes in place. If the write fails midway the file on disk is
//! truncated garbage; write to a temporary path and rename when that matters.

mod encoding;
mod header;

pub use header::{TreeHeader, MAGIC};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use self::encoding::{read_bytes, read_u32, write_bytes, write_u32};
use self::header::RESERVE_CAP;
use crate::error::{BkError, Result};
use crate::tree::{assemble, BkTree, Layout};
use crate::types::Distance;

impl BkTree {
    /// Write the tree in the binary layout to any writer.
    ///
    /// A term longer than `u32::MAX` bytes fails with an I/O error of kind
    /// `InvalidInput`; every other failure comes from the writer.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let Layout { order, position } = self.layout();
        TreeHeader {
            node_count: order.len() as u32,
        }
        .write(w)?;

        for id in order {
            let node = self.node(id);
            write_bytes(w, &node.term)?;
            write_u32(w, node.children.len() as u32)?;
            for edge in &node.children {
                write_u32(w, edge.distance)?;
                write_u32(w, position[edge.child.as_usize()])?;
            }
        }
        Ok(())
    }

    /// Read one tree from `r`, leaving the reader just past the last record.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let TreeHeader { node_count } = TreeHeader::read(r)?;
        let count = node_count as usize;

        let mut records: Vec<(Box<[u8]>, Vec<(Distance, u32)>)> =
            Vec::with_capacity(count.min(RESERVE_CAP));
        for i in 0..count {
            let term = read_bytes(r, "term")?;
            let child_count = read_u32(r, "child count")? as usize;

            let mut children = Vec::with_capacity(child_count.min(RESERVE_CAP));
            for _ in 0..child_count {
                let distance = read_u32(r, "child distance")?;
                let index = read_u32(r, "child index")?;
                if index >= node_count {
                    return Err(BkError::format(format!(
                        "record {i} references child {index}, but the file holds {node_count} nodes"
                    )));
                }
                children.push((distance, index));
            }
            records.push((term.into_boxed_slice(), children));
        }

        assemble(records)
    }

    /// The binary layout as an in-memory buffer.
    ///
    /// Only fails on a term too long for its `u32` length prefix, reported
    /// as an I/O error of kind `InvalidInput`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Parse a complete buffer. Trailing bytes after the last record are an error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = bytes;
        let tree = Self::read_from(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(BkError::format(format!(
                "{} trailing bytes after the last record",
                cursor.len()
            )));
        }
        Ok(tree)
    }

    /// Write the tree to `path`, creating or truncating the file.
    ///
    /// All failures are [`BkError::Io`], including an over-long term
    /// (kind `InvalidInput`).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);
        self.write_to(&mut w)?;
        // BufWriter swallows errors on drop; flush explicitly to surface them
        w.flush()?;
        debug!("saved {} nodes to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a tree from `path`.
    ///
    /// Failing to open or read the file is [`BkError::Io`]. Bad magic,
    /// truncation, bad child indices and trailing bytes are [`BkError::Format`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut r = BufReader::new(file);
        let tree = Self::read_from(&mut r)?;

        let mut probe = [0u8; 1];
        if r.read(&mut probe)? != 0 {
            return Err(BkError::format(format!(
                "trailing bytes after the last record in {}",
                path.display()
            )));
        }

        debug!("loaded {} nodes from {}", tree.len(), path.display());
        Ok(tree)
    }
}
