#![allow(dead_code)]

//! Execution planning for substitution runs
//!
//! Every apply run derives an `ExecutionPlan` from the validated table before
//! any text changes, enabling:
//!
//! - **Dry-run mode**: Show the exact step order without touching files
//! - **Idempotency**: Same table → same plan ID → same result
//! - **Auditability**: Plans are JSON-serializable for logging/review
//!
//! The plan fixes two things the engine's correctness depends on:
//!
//! 1. Step order: stable sort by descending search length, so a pattern that
//!    contains another pattern as a substring is consumed first. Equal-length
//!    patterns keep their original table order.
//! 2. Placeholder tokens: one fresh token per step per run, bracketed by
//!    Unicode private-use sentinels and tagged with a per-run random nonce.
//!    Tokens cannot collide with each other (distinct step indexes) nor with
//!    any plausible payload or replacement text.

use crate::core::table::MappingTable;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Sentinels from the Unicode private use area. Payload text drawn from
/// configuration files, source code, or prose never contains these.
const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';

/// Length of the per-run random nonce embedded in every token
const NONCE_LEN: usize = 16;

/// Plan identifier (SHA256 hash of the ordered search/replace pairs)
///
/// Deterministic for a given table: tokens are per-run and excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanId(String);

impl PlanId {
  /// Create a plan ID from plan contents
  pub fn from_contents(contents: &[u8]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let result = hasher.finalize();
    Self(format!("{:x}", result))
  }

  /// Get the short ID (first 12 characters)
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

impl fmt::Display for PlanId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.short())
  }
}

/// One ordered substitution step with its per-run placeholder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedStep {
  /// Literal substring to consume in phase 1
  pub search: String,

  /// Literal replacement written in phase 2
  pub replace: String,

  /// Per-run placeholder token; never serialized, never reused across runs
  #[serde(skip)]
  pub token: String,
}

/// Ordered substitution plan for one apply run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPlan {
  /// Plan ID (content hash of the ordered pairs)
  pub id: PlanId,

  /// Steps in application order (longest search first)
  pub steps: Vec<PlannedStep>,
}

impl ExecutionPlan {
  /// Build a plan from a validated table.
  ///
  /// Generates fresh placeholder tokens on every call; concurrent apply
  /// calls must each build their own plan rather than share one.
  pub fn build(table: &MappingTable) -> Self {
    let nonce: String = rand::thread_rng()
      .sample_iter(&Alphanumeric)
      .take(NONCE_LEN)
      .map(char::from)
      .collect();

    let mut steps: Vec<PlannedStep> = table
      .entries()
      .iter()
      .enumerate()
      .map(|(index, entry)| PlannedStep {
        search: entry.search.clone(),
        replace: entry.replace.clone(),
        token: format!("{}{}.{}{}", TOKEN_OPEN, nonce, index, TOKEN_CLOSE),
      })
      .collect();

    // Stable: equal-length searches keep their original table order
    steps.sort_by(|a, b| b.search.len().cmp(&a.search.len()));

    let id = Self::compute_id(&steps);
    Self { id, steps }
  }

  /// Recompute the deterministic ID from the ordered pairs (tokens excluded)
  fn compute_id(steps: &[PlannedStep]) -> PlanId {
    let pairs: Vec<(&str, &str)> = steps.iter().map(|s| (s.search.as_str(), s.replace.as_str())).collect();
    let json = serde_json::to_vec(&pairs).unwrap_or_default();
    PlanId::from_contents(&json)
  }

  /// Number of steps
  pub fn len(&self) -> usize {
    self.steps.len()
  }

  /// Check if the plan is empty
  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  /// Get human-readable representation for dry-run output
  pub fn to_human_readable(&self) -> String {
    let mut output = String::new();

    output.push_str(&format!("📋 Plan: {} ({} steps)\n", self.id, self.steps.len()));

    for (i, step) in self.steps.iter().enumerate() {
      if step.replace.is_empty() {
        output.push_str(&format!("   {}. delete '{}'\n", i + 1, step.search));
      } else {
        output.push_str(&format!("   {}. '{}' → '{}'\n", i + 1, step.search, step.replace));
      }
    }

    output
  }
}
