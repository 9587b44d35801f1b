// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the bkmatch command-line interface.
//!
//! `build` turns a vocabulary file into a `.bkt` tree file, `search` and
//! `inspect` read one back, `export`/`import` convert between the binary file
//! and its JSON index form, and `bench` measures tree search against a plain
//! linear scan over the same terms.

pub mod display;

use std::path::PathBuf;

use bkmatch::TermFormat;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bkmatch",
    about = "BK-tree builder and fuzzy term lookup",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a tree file from a vocabulary
    Build {
        /// Vocabulary file to read
        #[arg(short, long)]
        input: PathBuf,

        /// Tree file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Input layout: `lines` (one term per line) or `mrconso` (UMLS RRF)
        #[arg(short, long, default_value_t = TermFormat::Lines)]
        format: TermFormat,

        /// Stop after this many terms
        #[arg(long)]
        max_terms: Option<usize>,

        /// Metadata sidecar to write (default: the tree path plus `.json`)
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Print the job summary as JSON instead of the report box
        #[arg(long)]
        json: bool,
    },

    /// Find stored terms within an edit distance of a query
    Search {
        /// Tree file
        file: PathBuf,

        /// Query term
        query: String,

        /// Maximum edit distance (negative finds nothing)
        #[arg(short = 'd', long, default_value = "1", allow_negative_numbers = true)]
        max_dist: i64,

        /// Maximum number of results to print
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Print the shape of a tree file
    Inspect {
        /// Tree file
        file: PathBuf,

        /// Also recompute every edge weight and check the tree invariants
        #[arg(long)]
        verify: bool,
    },

    /// Write a tree file's index form as JSON
    Export {
        /// Tree file
        file: PathBuf,

        /// JSON file to write (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a tree file from a JSON index form
    Import {
        /// JSON index form, as written by `export`
        json: PathBuf,

        /// Tree file to write
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Compare tree search with a linear scan on the same terms
    Bench {
        /// Tree file
        file: PathBuf,

        /// Number of queries to run
        #[arg(short, long, default_value = "1000")]
        queries: usize,

        /// Maximum edit distance (negative finds nothing)
        #[arg(short = 'd', long, default_value = "1", allow_negative_numbers = true)]
        max_dist: i64,

        /// Also write the summary as JSON to this file
        #[arg(long)]
        out_json: Option<PathBuf>,
    },
}
