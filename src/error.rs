// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors surfaced by reconstruction and persistence.
//!
//! Three kinds, and the caller always gets to tell them apart:
//!
//! - `Io`: the file could not be opened, read or written.
//! - `Format`: the bytes are not a tree (bad magic, truncated stream,
//!   malformed record, a child index past the node count).
//! - `IndexOutOfRange`: an index-form record references a node that does
//!   not exist.
//!
//! Nothing here is retried or logged away. Inserting a duplicate term and
//! searching with a negative distance are not errors at all.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BkError {
    /// Opening, reading or writing the underlying file failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The byte stream or record sequence is not a valid tree.
    #[error("malformed tree data: {0}")]
    Format(String),

    /// A serialized child index points past the end of the record sequence.
    #[error("node index {index} out of range for {len} records")]
    IndexOutOfRange { index: u64, len: usize },
}

impl BkError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        BkError::Format(msg.into())
    }

    /// Map a read failure: running out of bytes means the stream is
    /// truncated (a format problem), anything else is a real I/O error.
    pub(crate) fn from_read(err: io::Error, what: &str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            BkError::Format(format!("truncated stream while reading {what}"))
        } else {
            BkError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, BkError>;
