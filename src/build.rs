// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Vocabulary file in, tree file out.
//!
//! This is the offline job behind `bkmatch build`: read terms, insert them in
//! file order, save the binary, then drop a JSON metadata sidecar next to it.
//! Insertion is inherently sequential (each insert walks the tree the
//! previous ones built), so the progress bar is the only concession to large
//! inputs.
//!
//! ```text
//! vocab.txt ──▶ read_terms ──▶ BkTree::insert ──▶ vocab.bkt
//!                                              └─▶ vocab.bkt.json  (BuildMetadata)
//! ```

use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::Serialize;

use crate::error::Result;
use crate::terms::{read_terms, TermFormat};
use crate::tree::BkTree;

/// Version of the sidecar layout written by [`write_metadata`].
pub const METADATA_SCHEMA_VERSION: u32 = 1;

/// Name of the binary encoding recorded in the sidecar.
pub const TREE_ENCODING: &str = "BKTREE1";

/// What a build consumed and produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Where the vocabulary came from. Empty when built from a bare reader.
    pub source: String,
    /// Layout the vocabulary was read in.
    pub source_format: TermFormat,
    /// Term cap the build ran with, if any.
    pub max_terms: Option<usize>,
    /// Input lines read.
    pub lines: usize,
    /// Terms extracted from those lines.
    #[serde(rename = "term_count")]
    pub terms: usize,
    /// Malformed rows skipped.
    pub skipped: usize,
    /// Distinct terms stored (terms minus duplicates).
    pub nodes: usize,
}

/// The JSON sidecar describing a tree file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildMetadata {
    pub schema_version: u32,
    /// RFC 3339 UTC timestamp of the build.
    pub created_at: String,
    pub tree_encoding: &'static str,
    pub tree_file: String,
    #[serde(flatten)]
    pub report: BuildReport,
}

impl BuildMetadata {
    /// Stamp `report` with the current time.
    pub fn new(report: BuildReport, tree_file: &Path) -> Self {
        Self {
            schema_version: METADATA_SCHEMA_VERSION,
            created_at: chrono::Utc::now().to_rfc3339(),
            tree_encoding: TREE_ENCODING,
            tree_file: tree_file.display().to_string(),
            report,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Success,
    Error,
}

/// One-object outcome of a build job, success or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildSummary {
    pub job: &'static str,
    pub status: JobStatus,
    pub error: Option<String>,
    /// Wall time, rounded to milliseconds.
    pub elapsed_seconds: f64,
    #[serde(flatten)]
    pub report: Option<BuildReport>,
}

impl BuildSummary {
    pub fn success(report: BuildReport, elapsed: Duration) -> Self {
        Self {
            job: "build",
            status: JobStatus::Success,
            error: None,
            elapsed_seconds: round_millis(elapsed),
            report: Some(report),
        }
    }

    pub fn failure(error: &dyn fmt::Display, elapsed: Duration) -> Self {
        Self {
            job: "build",
            status: JobStatus::Error,
            error: Some(error.to_string()),
            elapsed_seconds: round_millis(elapsed),
            report: None,
        }
    }
}

fn round_millis(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0).round() / 1000.0
}

/// Default sidecar location: the tree path with `.json` appended.
pub fn sidecar_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".json");
    PathBuf::from(name)
}

/// Write `metadata` to `path` as pretty JSON with sorted keys.
pub fn write_metadata(path: &Path, metadata: &BuildMetadata) -> Result<()> {
    // Round-tripping through Value sorts the keys
    let value = serde_json::to_value(metadata).map_err(io::Error::from)?;
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &value).map_err(io::Error::from)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Create a progress style for the insert bar
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .map(|style| style.progress_chars("━━╸"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Read a vocabulary and build its tree in memory.
pub fn build_from_reader<R: BufRead>(
    reader: R,
    format: TermFormat,
    limit: Option<usize>,
) -> Result<(BkTree, BuildReport)> {
    let batch = read_terms(reader, format, limit)?;

    #[cfg(feature = "parallel")]
    let insert_pb = {
        let pb = ProgressBar::new(batch.terms.len() as u64);
        pb.set_style(create_progress_style());
        pb.set_prefix("Inserting");
        pb.set_message("terms...");
        pb
    };

    let mut tree = BkTree::new();
    for term in &batch.terms {
        tree.insert(term);
        #[cfg(feature = "parallel")]
        insert_pb.inc(1);
    }

    #[cfg(feature = "parallel")]
    insert_pb.finish_with_message(format!("{} distinct terms", tree.len()));

    let report = BuildReport {
        source: String::new(),
        source_format: format,
        max_terms: limit,
        lines: batch.lines,
        terms: batch.terms.len(),
        skipped: batch.skipped,
        nodes: tree.len(),
    };
    Ok((tree, report))
}

/// Build a tree from the vocabulary at `input` and save it to `output`.
///
/// The metadata sidecar goes to `metadata`, or [`sidecar_path`] of `output`
/// when that is `None`. It is written only after the tree file.
pub fn run_build(
    input: &Path,
    output: &Path,
    format: TermFormat,
    limit: Option<usize>,
    metadata: Option<&Path>,
) -> Result<BuildReport> {
    info!("reading {} terms from {}", format, input.display());
    let reader = BufReader::new(File::open(input)?);
    let (tree, mut report) = build_from_reader(reader, format, limit)?;
    report.source = input.display().to_string();

    tree.save(output)?;
    info!(
        "stored {} of {} terms in {}",
        report.nodes,
        report.terms,
        output.display()
    );

    let metadata_path = metadata.map_or_else(|| sidecar_path(output), Path::to_path_buf);
    write_metadata(&metadata_path, &BuildMetadata::new(report.clone(), output))?;
    info!("wrote metadata to {}", metadata_path.display());
    Ok(report)
}
