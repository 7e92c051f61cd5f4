//! Two-phase placeholder substitution
//!
//! Phase 1 walks the execution plan in order and turns every occurrence of a
//! search pattern into that step's placeholder token. Phase 2 turns each token
//! into its replacement. No replacement text is written until every search has
//! already happened, so a replacement can never be re-matched by a later
//! search ("swap corruption") and a shorter pattern can never destroy context
//! a longer pattern still needs.
//!
//! The engine is total over any validated table and any payload: a pattern
//! with zero occurrences is a no-op, not a failure. One call owns its payload
//! state and its tokens exclusively; repeated or concurrent calls share
//! nothing.

use crate::core::plan::{ExecutionPlan, PlanId};
use crate::core::table::MappingTable;
use serde::{Deserialize, Serialize};

/// Per-step outcome of one apply run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
  /// Search pattern as applied (plan order)
  pub search: String,

  /// Replacement written in phase 2
  pub replace: String,

  /// Occurrences consumed, counted against the phase-1 state this step saw
  pub occurrences: usize,
}

/// Result of one apply run with per-step accounting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyOutcome {
  /// Plan ID of the table that produced this outcome
  pub plan_id: PlanId,

  /// Transformed payload
  pub text: String,

  /// Steps in application order with exact match counts
  pub steps: Vec<StepOutcome>,
}

impl ApplyOutcome {
  /// Total occurrences consumed across all steps
  pub fn total_occurrences(&self) -> usize {
    self.steps.iter().map(|s| s.occurrences).sum()
  }

  /// Whether the run changed anything
  pub fn changed(&self) -> bool {
    self.total_occurrences() > 0
  }
}

/// Apply a validated table to a payload, returning the transformed text
pub fn apply(table: &MappingTable, payload: &str) -> String {
  apply_detailed(table, payload).text
}

/// Apply a validated table to a payload with per-step accounting
pub fn apply_detailed(table: &MappingTable, payload: &str) -> ApplyOutcome {
  let plan = ExecutionPlan::build(table);
  apply_plan(&plan, payload)
}

/// Run one plan against one payload.
///
/// The plan's tokens must be fresh for this call; they exist in the text
/// only between the two phases and never outlive the run. Concurrent runs
/// must each build their own plan rather than share one.
pub fn apply_plan(plan: &ExecutionPlan, payload: &str) -> ApplyOutcome {
  let mut text = payload.to_string();
  let mut steps = Vec::with_capacity(plan.len());

  // Phase 1: search → placeholder, sequentially, each step on the output of
  // the previous one. Counts are exact: taken on the state the step saw.
  for step in &plan.steps {
    let occurrences = text.matches(step.search.as_str()).count();
    if occurrences > 0 {
      text = text.replace(step.search.as_str(), &step.token);
    }
    steps.push(StepOutcome {
      search: step.search.clone(),
      replace: step.replace.clone(),
      occurrences,
    });
  }

  // Phase 2: placeholder → replacement. Order is immaterial here: every
  // search has been neutralized and tokens are disjoint from all table text.
  for step in &plan.steps {
    text = text.replace(&step.token, &step.replace);
  }

  ApplyOutcome {
    plan_id: plan.id.clone(),
    text,
    steps,
  }
}
