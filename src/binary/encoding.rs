// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: little-endian u32 and length-prefixed bytes.
//!
//! Nothing fancy here. Every integer in the file is a fixed 4-byte
//! little-endian `u32`, and every term is a `u32` length followed by that
//! many raw bytes. No terminators, no varints.

use std::io::{self, Read, Write};

use super::header::RESERVE_CAP;
use crate::error::{BkError, Result};

pub(crate) fn write_u32<W: Write>(w: &mut W, value: u32) -> Result<()> {
    w.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Write a `u32` length prefix followed by the bytes themselves.
///
/// A slice longer than `u32::MAX` is rejected as an I/O `InvalidInput` error
/// before anything is written. `Format` is reserved for malformed input.
pub(crate) fn write_bytes<W: Write>(w: &mut W, bytes: &[u8]) -> Result<()> {
    let len = u32::try_from(bytes.len()).map_err(|_| oversized(bytes.len()))?;
    write_u32(w, len)?;
    w.write_all(bytes)?;
    Ok(())
}

fn oversized(len: usize) -> BkError {
    BkError::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("term of {len} bytes exceeds the u32 length prefix"),
    ))
}

/// Read a `u32`. Running out of input is a truncation error naming `what`.
pub(crate) fn read_u32<R: Read>(r: &mut R, what: &str) -> Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)
        .map_err(|e| BkError::from_read(e, what))?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a length-prefixed byte string.
///
/// The length is not trusted for allocation: bytes are pulled through
/// `Read::take`, so a prefix that lies about the remaining input shows up as
/// a short read instead of a giant buffer.
pub(crate) fn read_bytes<R: Read>(r: &mut R, what: &str) -> Result<Vec<u8>> {
    let len = read_u32(r, what)?;
    let mut buf = Vec::with_capacity((len as usize).min(RESERVE_CAP));
    (&mut *r).take(u64::from(len)).read_to_end(&mut buf)?;
    if buf.len() != len as usize {
        return Err(BkError::format(format!(
            "truncated stream while reading {what}: expected {len} bytes, got {}",
            buf.len()
        )));
    }
    Ok(buf)
}
