//! Validate the mapping table without touching any payload

use crate::core::config::RemapConfig;
use crate::core::error::{ExitCode, RemapResult, ValidationError};
use crate::core::plan::ExecutionPlan;
use crate::core::table::{scan_violations, MappingTable};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Result of a mapping-table check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
  /// Number of mapping entries inspected
  pub entries: usize,

  /// Whether the reversibility pass ran
  pub reverse_checked: bool,

  /// Whether the table passed every check
  pub valid: bool,

  /// Deterministic plan ID (present only for valid tables)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub plan_id: Option<String>,

  /// Violations found, each with its complete offender set
  pub violations: Vec<ReportedViolation>,
}

/// One violation with machine-readable rule name and offenders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportedViolation {
  pub rule: String,
  pub message: String,
  pub offenders: Vec<String>,
}

impl From<&ValidationError> for ReportedViolation {
  fn from(err: &ValidationError) -> Self {
    let (rule, offenders) = match err {
      ValidationError::EmptySearchKey { indexes } => (
        "empty-search-key",
        indexes.iter().map(|i| format!("entry #{}", i + 1)).collect(),
      ),
      ValidationError::DuplicateSearchKey { keys } => ("duplicate-search-key", keys.clone()),
      ValidationError::DuplicateReplaceValue { values } => ("duplicate-replace-value", values.clone()),
    };

    Self {
      rule: rule.to_string(),
      message: err.to_string(),
      offenders,
    }
  }
}

/// Run the check command
pub fn run_check(mappings: Option<PathBuf>, reverse: bool, json: bool) -> RemapResult<()> {
  let config = match mappings {
    Some(ref path) => RemapConfig::load_file(path)?,
    None => RemapConfig::load(&env::current_dir()?)?,
  };

  let entries = config.entries();
  let reverse_checked = reverse || config.policy.require_reversible;
  let violations = scan_violations(&entries, reverse_checked);
  let valid = violations.is_empty();

  let plan_id = if valid {
    let table = MappingTable::validate(entries.clone())?;
    Some(ExecutionPlan::build(&table).id.short().to_string())
  } else {
    None
  };

  let report = CheckReport {
    entries: entries.len(),
    reverse_checked,
    valid,
    plan_id,
    violations: violations.iter().map(ReportedViolation::from).collect(),
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_check_report(&report);
  }

  if !valid {
    std::process::exit(ExitCode::Validation.as_i32());
  }

  Ok(())
}

fn print_check_report(report: &CheckReport) {
  if report.valid {
    let plan = report.plan_id.as_deref().unwrap_or("-");
    println!("✅ Mapping table OK ({} entries, plan {})", report.entries, plan);
    if report.reverse_checked {
      println!("   Reversibility check passed (all replacement values distinct)");
    }
    return;
  }

  println!("❌ Mapping table has {} issue(s)\n", report.violations.len());

  for violation in &report.violations {
    println!("   [{}] {}", violation.rule, violation.message);
  }

  println!("\n💡 Fix every key listed above, then re-run `remap check`.");
  println!("   No text is transformed while the table is invalid.");
}
