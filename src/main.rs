// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::debug;
use serde::Serialize;

use bkmatch::bench::MethodTiming;
use bkmatch::{
    check_invariants, run_bench, run_build, sidecar_path, BenchSummary, BkTree, BuildSummary,
    IndexForm, TermFormat,
};

mod cli;
use cli::display::{
    distance_badge, field, format_size, highlight, pad_right, row, section_bot, section_mid,
    section_top, status, timing_us,
};
use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Build {
            input,
            output,
            format,
            max_terms,
            metadata,
            json,
        } => {
            let metadata = metadata.unwrap_or_else(|| sidecar_path(&output));
            build(&input, &output, format, max_terms, &metadata, json)
        }
        Commands::Search {
            file,
            query,
            max_dist,
            limit,
        } => search(&file, &query, max_dist, limit),
        Commands::Inspect { file, verify } => inspect(&file, verify),
        Commands::Export { file, output } => export(&file, output.as_deref()),
        Commands::Import { json, output } => import(&json, &output),
        Commands::Bench {
            file,
            queries,
            max_dist,
            out_json,
        } => bench(&file, queries, max_dist, out_json.as_deref()),
    }
}

fn load_tree(path: &Path) -> Result<BkTree> {
    BkTree::load(path).with_context(|| format!("failed to load tree from {}", path.display()))
}

fn build(
    input: &Path,
    output: &Path,
    format: TermFormat,
    max_terms: Option<usize>,
    metadata: &Path,
    json: bool,
) -> Result<()> {
    let start = Instant::now();
    let outcome = run_build(input, output, format, max_terms, Some(metadata))
        .with_context(|| format!("failed to build {}", output.display()));

    if json {
        let summary = match &outcome {
            Ok(report) => BuildSummary::success(report.clone(), start.elapsed()),
            Err(e) => BuildSummary::failure(&format!("{e:#}"), start.elapsed()),
        };
        print_json(&summary)?;
        return outcome.map(drop);
    }

    let report = outcome?;
    section_top("BUILD");
    field("source", &report.source);
    field("format", &report.source_format.to_string());
    field("lines read", &report.lines.to_string());
    field("terms", &report.terms.to_string());
    field("skipped rows", &report.skipped.to_string());
    field("stored", &highlight(&report.nodes.to_string()));
    field("metadata", &metadata.display().to_string());
    field("elapsed", &format!("{:.2?}", start.elapsed()));
    section_bot();
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let out = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut out = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut out, value).context("failed to write JSON")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn search(file: &Path, query: &str, max_dist: i64, limit: usize) -> Result<()> {
    let tree = load_tree(file)?;

    let start = Instant::now();
    let matches = tree.search(query, max_dist);
    let elapsed = start.elapsed();
    debug!("{} matches for {:?} in {:?}", matches.len(), query, elapsed);

    section_top(&format!("\"{query}\" within {max_dist}"));
    if matches.is_empty() {
        row("  no matches");
    }
    for m in matches.iter().take(limit) {
        row(&format!("  {} {}", pad_right(&distance_badge(m.distance), 5), m.text()));
    }
    if matches.len() > limit {
        row(&format!("  … {} more", matches.len() - limit));
    }
    section_mid("TIMING");
    field("search", &timing_us(elapsed.as_secs_f64() * 1e6));
    section_bot();
    Ok(())
}

fn inspect(file: &Path, verify: bool) -> Result<()> {
    let size = fs::metadata(file)
        .with_context(|| format!("cannot stat {}", file.display()))?
        .len();
    let tree = load_tree(file)?;
    let stats = tree.stats();

    section_top("TREE");
    field("file", &file.display().to_string());
    field("size", &format_size(size));
    field("nodes", &highlight(&stats.nodes.to_string()));
    field("edges", &stats.edges.to_string());
    field("depth", &stats.depth.to_string());
    field("max fan-out", &stats.max_children.to_string());
    if let Some(root) = tree.root().and_then(|id| tree.term(id)) {
        field("root", &String::from_utf8_lossy(root));
    }

    let mut failure = None;
    if verify {
        section_mid("INVARIANTS");
        match check_invariants(&tree) {
            Ok(()) => field("edge weights", &status(true)),
            Err(e) => {
                field("edge weights", &status(false));
                row(&format!("  {e}"));
                failure = Some(e);
            }
        }
    }
    section_bot();

    if let Some(e) = failure {
        bail!("{} fails verification: {}", file.display(), e);
    }
    Ok(())
}

fn export(file: &Path, output: Option<&Path>) -> Result<()> {
    let tree = load_tree(file)?;
    let form = tree.to_serializable();

    match output {
        Some(path) => {
            write_json(path, &form)?;
            debug!("exported {} records to {}", form.len(), path.display());
        }
        None => print_json(&form)?,
    }
    Ok(())
}

fn import(json: &Path, output: &Path) -> Result<()> {
    let input = File::open(json).with_context(|| format!("cannot open {}", json.display()))?;
    let form: IndexForm = serde_json::from_reader(BufReader::new(input))
        .with_context(|| format!("{} is not an index form", json.display()))?;
    let records = form.len();

    let tree = BkTree::from_serializable(form)
        .with_context(|| format!("{} does not describe a tree", json.display()))?;
    tree.save(output)
        .with_context(|| format!("failed to save {}", output.display()))?;

    section_top("IMPORT");
    field("records", &records.to_string());
    field("written", &output.display().to_string());
    section_bot();
    Ok(())
}

fn bench(file: &Path, queries: usize, max_dist: i64, out_json: Option<&Path>) -> Result<()> {
    let tree = load_tree(file)?;
    if tree.is_empty() {
        bail!("{} holds no terms to query", file.display());
    }
    if queries == 0 {
        bail!("need at least one query");
    }

    let summary = run_bench(&tree, queries, max_dist);
    print_bench(&summary);

    if let Some(path) = out_json {
        write_json(path, &summary)?;
        debug!("wrote bench summary to {}", path.display());
    }
    if summary.mismatches > 0 {
        bail!(
            "tree search disagreed with linear scan on {} queries",
            summary.mismatches
        );
    }
    Ok(())
}

fn print_bench(summary: &BenchSummary) {
    section_top("BENCH");
    field("terms", &summary.terms.to_string());
    field("queries", &summary.queries.to_string());
    field("max distance", &summary.max_dist.to_string());
    field("matches", &summary.matches.to_string());
    field("build", &timing_us(summary.build_seconds * 1e6));

    print_method("TREE", &summary.tree);
    print_method("LINEAR SCAN", &summary.scan);
    print_method("BATCHED TREE", &summary.batch);
    if let Some(speedup) = summary.speedup_scan_over_tree {
        section_mid("SPEEDUP");
        field("scan / tree", &highlight(&format!("{speedup:.1}x")));
    }

    section_mid("AGREEMENT");
    field("tree vs scan", &status(summary.mismatches == 0));
    field("batch vs tree", &status(summary.batch_agrees));
    section_bot();
}

fn print_method(label: &str, timing: &MethodTiming) {
    section_mid(label);
    field("qps", &format!("{:.0}", timing.qps));
    field("total", &timing_us(timing.total_seconds * 1e6));
    if let Some(l) = &timing.latency_ms {
        let ms = |v: f64| timing_us(v * 1e3);
        field("min / avg / max", &format!("{} / {} / {}", ms(l.min), ms(l.avg), ms(l.max)));
        field("p50 / p90", &format!("{} / {}", ms(l.p50), ms(l.p90)));
        field("p95 / p99", &format!("{} / {}", ms(l.p95), ms(l.p99)));
    }
}
