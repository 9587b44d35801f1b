// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! File header: magic tag plus node count.
//!
//! The header is 12 bytes of fixed-size fields, read in one go before any
//! record. The magic doubles as the format version: a future layout gets a
//! new tag, and this reader rejects it instead of guessing.

use std::io::{Read, Write};

use crate::error::{BkError, Result};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "BKTREE1" followed by a NUL.
pub const MAGIC: [u8; 8] = *b"BKTREE1\0";

/// Cap on capacity reserved up front from counts read off the stream.
///
/// Counts are not trusted for allocation: a 12-byte file claiming four
/// billion nodes should fail on the missing bytes, not on the allocator.
pub(crate) const RESERVE_CAP: usize = 1 << 16;

// ============================================================================
// HEADER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeHeader {
    pub node_count: u32,
}

impl TreeHeader {
    // 8 (magic) + 4 (node count)
    pub const SIZE: usize = 12;

    pub fn write<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&self.node_count.to_le_bytes())?;
        Ok(())
    }

    /// Read and validate the header. Nothing past the magic is trusted
    /// until the magic checks out.
    pub fn read<R: Read>(r: &mut R) -> Result<Self> {
        let mut magic = [0u8; 8];
        r.read_exact(&mut magic)
            .map_err(|e| BkError::from_read(e, "magic tag"))?;
        if magic != MAGIC {
            return Err(BkError::format(format!(
                "invalid magic: expected {:?}, got {:?}",
                MAGIC, magic
            )));
        }

        let mut count = [0u8; 4];
        r.read_exact(&mut count)
            .map_err(|e| BkError::from_read(e, "node count"))?;

        Ok(Self {
            node_count: u32::from_le_bytes(count),
        })
    }
}
