#![allow(dead_code)]

//! Mapping table validation
//!
//! A `MappingTable` is the validated, ordered set of (search, replace) pairs
//! driving one substitution run. Construction goes through `validate`, which
//! rejects empty and duplicated search keys before any payload is touched.
//! The reversibility check (distinct replacement values) is a separate,
//! explicitly invoked pass: forward-only runs do not need it.

use crate::core::error::{RemapResult, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One intended substitution. Immutable after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
  /// Literal substring to search for (non-empty)
  pub search: String,

  /// Literal replacement (may be empty: explicit deletion)
  pub replace: String,
}

impl MappingEntry {
  pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
    Self {
      search: search.into(),
      replace: replace.into(),
    }
  }
}

/// Validated mapping table, in the order originally supplied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingTable {
  entries: Vec<MappingEntry>,
}

impl MappingTable {
  /// Validate a sequence of entries into a table.
  ///
  /// Each violation kind carries every offender found in a single pass: all
  /// entries with an empty search key, or all search keys appearing more
  /// than once. Pure; no payload state is involved.
  pub fn validate(entries: Vec<MappingEntry>) -> RemapResult<Self> {
    if let Some(first) = scan_violations(&entries, false).into_iter().next() {
      return Err(first.into());
    }

    Ok(Self { entries })
  }

  /// Reject duplicated replacement values.
  ///
  /// Only relevant when the table is meant to be applied in reverse later
  /// (apply, then apply the field-swapped inverse). Kept out of `validate`
  /// so forward-only tables with intentionally collapsing replacements
  /// stay legal.
  pub fn check_reversible(&self) -> RemapResult<()> {
    let duplicates = duplicated_values(self.entries.iter().map(|e| e.replace.as_str()));
    if !duplicates.is_empty() {
      return Err(ValidationError::DuplicateReplaceValue { values: duplicates }.into());
    }
    Ok(())
  }

  /// Entries in original order
  pub fn entries(&self) -> &[MappingEntry] {
    &self.entries
  }

  /// Number of entries
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Check if the table is empty
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Scan entries for every validation violation without constructing a table.
///
/// Used by `remap check` to report empty keys, duplicate keys, and (when
/// requested) duplicate replacements together, so an operator fixes the
/// whole file in one sitting. `validate` surfaces only the first kind found.
pub fn scan_violations(entries: &[MappingEntry], include_reverse: bool) -> Vec<ValidationError> {
  let mut violations = Vec::new();

  let empty: Vec<usize> = entries
    .iter()
    .enumerate()
    .filter(|(_, e)| e.search.is_empty())
    .map(|(i, _)| i)
    .collect();
  if !empty.is_empty() {
    violations.push(ValidationError::EmptySearchKey { indexes: empty });
  }

  let duplicate_keys = duplicated_values(entries.iter().map(|e| e.search.as_str()));
  if !duplicate_keys.is_empty() {
    violations.push(ValidationError::DuplicateSearchKey { keys: duplicate_keys });
  }

  if include_reverse {
    let duplicate_values = duplicated_values(entries.iter().map(|e| e.replace.as_str()));
    if !duplicate_values.is_empty() {
      violations.push(ValidationError::DuplicateReplaceValue {
        values: duplicate_values,
      });
    }
  }

  violations
}

/// Values appearing more than once, in order of first appearance
fn duplicated_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
  let mut counts: HashMap<&str, usize> = HashMap::new();
  let mut order: Vec<&str> = Vec::new();

  for value in values {
    let count = counts.entry(value).or_insert(0);
    *count += 1;
    if *count == 2 {
      order.push(value);
    }
  }

  order.into_iter().map(String::from).collect()
}
