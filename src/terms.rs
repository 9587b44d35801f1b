// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading vocabularies from text files.
//!
//! Two layouts are understood. `Lines` is one term per line. `Mrconso` is the
//! UMLS concept-names table: pipe-delimited rows where the term string is
//! field 14 (0-based). Rows too short to have that field are counted and
//! skipped rather than failing the whole load, since real dumps contain a
//! few.
//!
//! Terms are trimmed; blank ones are dropped. No other normalization happens
//! here, matching the tree, which treats every byte as significant.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{BkError, Result};

/// Field holding the term string in an MRCONSO row.
const MRCONSO_STR_FIELD: usize = 14;

/// Log a progress line every this many input lines.
const PROGRESS_EVERY: usize = 500_000;

/// Layout of a vocabulary file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermFormat {
    /// One term per line.
    #[default]
    Lines,
    /// Pipe-delimited MRCONSO rows, term in field 14.
    Mrconso,
}

impl FromStr for TermFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lines" | "txt" => Ok(TermFormat::Lines),
            "mrconso" | "rrf" => Ok(TermFormat::Mrconso),
            other => Err(format!("unknown term format '{other}' (expected lines or mrconso)")),
        }
    }
}

impl fmt::Display for TermFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermFormat::Lines => f.write_str("lines"),
            TermFormat::Mrconso => f.write_str("mrconso"),
        }
    }
}

/// Terms pulled from one input, plus what was passed over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermBatch {
    pub terms: Vec<String>,
    /// Input lines consumed.
    pub lines: usize,
    /// Malformed rows skipped (MRCONSO rows without a term field).
    pub skipped: usize,
}

/// Pull the term out of one input line, if it has one.
fn extract(line: &str, format: TermFormat) -> std::result::Result<Option<&str>, ()> {
    let term = match format {
        TermFormat::Lines => line,
        TermFormat::Mrconso => line.split('|').nth(MRCONSO_STR_FIELD).ok_or(())?,
    };
    let term = term.trim();
    Ok((!term.is_empty()).then_some(term))
}

/// Read terms from `reader` until it ends or `limit` terms have been kept.
///
/// Invalid UTF-8 is replaced rather than rejected. Only a failing reader is
/// an error.
pub fn read_terms<R: BufRead>(
    mut reader: R,
    format: TermFormat,
    limit: Option<usize>,
) -> Result<TermBatch> {
    let mut batch = TermBatch::default();
    let mut raw = Vec::new();

    while limit.map_or(true, |max| batch.terms.len() < max) {
        raw.clear();
        if reader.read_until(b'\n', &mut raw).map_err(BkError::Io)? == 0 {
            break;
        }
        batch.lines += 1;

        let line = String::from_utf8_lossy(&raw);
        match extract(&line, format) {
            Ok(Some(term)) => batch.terms.push(term.to_string()),
            Ok(None) => {}
            Err(()) => batch.skipped += 1,
        }

        if batch.lines % PROGRESS_EVERY == 0 {
            info!("processed {} lines ({} terms)", batch.lines, batch.terms.len());
        }
    }

    if batch.skipped > 0 {
        info!("skipped {} malformed {} rows", batch.skipped, format);
    }
    Ok(batch)
}
