//! Show the blast radius of a search fragment

use crate::core::contexts::find_contexts;
use crate::core::error::{RemapError, RemapResult};
use crate::utils;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Report of one context scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextReport {
  pub fragment: String,

  /// Scanned source (file path or "<stdin>")
  pub source: String,

  /// Distinct tokens, in order of first appearance
  pub contexts: Vec<String>,
}

/// Run the contexts command
pub fn run_contexts(fragment: String, file: Option<PathBuf>, json: bool) -> RemapResult<()> {
  if fragment.is_empty() {
    return Err(RemapError::with_help(
      "Fragment must not be empty",
      "Pass the literal text you plan to use as a search key.",
    ));
  }

  let payload = utils::read_payload(file.as_deref())?;

  let contexts: Vec<String> = find_contexts(&fragment, &payload).map(String::from).collect();

  let report = ContextReport {
    fragment,
    source: file
      .as_ref()
      .map(|p| p.display().to_string())
      .unwrap_or_else(|| "<stdin>".to_string()),
    contexts,
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_context_report(&report);
  }

  Ok(())
}

fn print_context_report(report: &ContextReport) {
  if report.contexts.is_empty() {
    println!("No tokens in {} contain '{}'", report.source, report.fragment);
    return;
  }

  println!(
    "🔍 {} token(s) in {} contain '{}':",
    report.contexts.len(),
    report.source,
    report.fragment
  );

  for context in &report.contexts {
    println!("   {}", context);
  }
}
