//! Apply the mapping table to files or stdin
//!
//! Dry-run by default: prints the execution plan and per-file match counts
//! without writing anything. `--apply` performs the rewrite, atomically per
//! file. Multiple files are processed in parallel; every file gets its own
//! plan build and therefore its own placeholder tokens.

use crate::core::apply::{apply, apply_detailed, StepOutcome};
use crate::core::config::RemapConfig;
use crate::core::error::{RemapResult, ResultExt};
use crate::core::plan::ExecutionPlan;
use crate::core::table::MappingTable;
use crate::ui::progress::MultiProgress;
use crate::utils;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Report for one apply run (dry or real)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyReport {
  /// Deterministic plan ID of the mapping table
  pub plan_id: String,

  /// False for dry-run
  pub applied: bool,

  /// When the run started (UTC)
  pub started_at: DateTime<Utc>,

  /// Per-file outcomes
  pub files: Vec<FileReport>,
}

/// Outcome for a single payload file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
  pub path: String,

  /// Whether any pattern matched
  pub changed: bool,

  /// Total occurrences consumed across all steps
  pub occurrences: usize,

  /// Per-step counts in application order
  pub steps: Vec<StepOutcome>,
}

/// Run the apply command
pub fn run_apply(files: Vec<PathBuf>, mappings: Option<PathBuf>, apply: bool, json: bool) -> RemapResult<()> {
  let config = match mappings {
    Some(ref path) => RemapConfig::load_file(path)?,
    None => RemapConfig::load(&env::current_dir()?)?,
  };

  // Hard gate: an invalid table aborts before any payload is read
  let table = config.to_table()?;

  if files.is_empty() {
    return run_on_stdin(&table, apply, json);
  }

  run_on_files(&table, &files, apply, json)
}

/// stdin → stdout filter mode
fn run_on_stdin(table: &MappingTable, write: bool, json: bool) -> RemapResult<()> {
  let payload = utils::read_payload(None)?;

  if write {
    print!("{}", apply(table, &payload));
    return Ok(());
  }

  let outcome = apply_detailed(table, &payload);

  let report = ApplyReport {
    plan_id: outcome.plan_id.short().to_string(),
    applied: false,
    started_at: Utc::now(),
    files: vec![FileReport {
      path: "<stdin>".to_string(),
      changed: outcome.changed(),
      occurrences: outcome.total_occurrences(),
      steps: outcome.steps,
    }],
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_dry_run(table, &report);
  }

  Ok(())
}

/// In-place file mode, parallel across independent payloads
fn run_on_files(table: &MappingTable, files: &[PathBuf], apply: bool, json: bool) -> RemapResult<()> {
  let started_at = Utc::now();

  let progress = if apply && !json && files.len() > 1 {
    let multi = MultiProgress::new();
    let bar = multi.add_bar(files.len(), format!("Transforming {} files", files.len()));
    Some((multi, bar))
  } else {
    None
  };

  let results: Vec<(PathBuf, RemapResult<FileReport>)> = files
    .par_iter()
    .map(|path| {
      let result = transform_file(table, path, apply);
      if let Some((ref multi, ref bar)) = progress {
        multi.inc(bar);
      }
      (path.clone(), result)
    })
    .collect();

  let mut reports = Vec::with_capacity(results.len());
  let mut first_error = None;

  for (path, result) in results {
    match result {
      Ok(report) => reports.push(report),
      Err(err) => {
        eprintln!("❌ {}: {}", path.display(), err);
        if first_error.is_none() {
          first_error = Some(err);
        }
      }
    }
  }

  if let Some(err) = first_error {
    return Err(err);
  }

  let report = ApplyReport {
    plan_id: ExecutionPlan::build(table).id.short().to_string(),
    applied: apply,
    started_at,
    files: reports,
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else if apply {
    print_apply_summary(&report);
  } else {
    print_dry_run(table, &report);
  }

  Ok(())
}

/// Transform one payload file with its own plan and token namespace
fn transform_file(table: &MappingTable, path: &Path, write: bool) -> RemapResult<FileReport> {
  let payload = utils::read_payload(Some(path)).with_context(|| format!("Failed to load {}", path.display()))?;
  let outcome = apply_detailed(table, &payload);

  if write && outcome.changed() {
    utils::write_atomic(path, &outcome.text)?;
  }

  Ok(FileReport {
    path: path.display().to_string(),
    changed: outcome.changed(),
    occurrences: outcome.total_occurrences(),
    steps: outcome.steps,
  })
}

fn print_dry_run(table: &MappingTable, report: &ApplyReport) {
  let plan = ExecutionPlan::build(table);
  print!("{}", plan.to_human_readable());

  println!("\n   Matches:");
  for file in &report.files {
    if file.changed {
      println!("   {}: {} occurrence(s)", file.path, file.occurrences);
    } else {
      println!("   {}: no matches", file.path);
    }
  }

  println!("\n🔍 Dry-run mode (no changes applied)");
  println!("   Run again with --apply to write changes");
}

fn print_apply_summary(report: &ApplyReport) {
  let changed = report.files.iter().filter(|f| f.changed).count();
  let total_occurrences: usize = report.files.iter().map(|f| f.occurrences).sum();

  println!(
    "✅ Transformed {} of {} file(s), {} occurrence(s) (plan {})",
    changed,
    report.files.len(),
    total_occurrences,
    report.plan_id
  );

  for file in &report.files {
    if file.changed {
      println!("   {}: {} occurrence(s)", file.path, file.occurrences);
    }
  }
}
