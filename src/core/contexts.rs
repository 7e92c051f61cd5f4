//! Blast-radius discovery for search fragments
//!
//! Before committing to a substitution run with a short or generic pattern,
//! an operator can ask which word-like tokens the pattern actually sits in.
//! `find_contexts` reports every maximal contiguous run of word characters
//! (letters, digits, hyphen, underscore: the alphabet of configuration
//! identifiers and hostnames) containing the fragment as a substring.
//!
//! Read-only: this module never mutates text and is independent of the
//! plan/placeholder machinery. The fragment is always treated literally;
//! regex metacharacters are escaped before the scan pattern is built.

use regex::Regex;
use std::collections::HashSet;

/// Word alphabet used for maximal-token boundaries
const WORD_CLASS: &str = "[A-Za-z0-9_-]";

/// Lazy scan over the payload, deduplicated, in order of first appearance.
///
/// Finite and restartable: call [`find_contexts`] again for a fresh walk.
pub struct ContextMatches<'a> {
  pattern: Option<Regex>,
  payload: &'a str,
  at: usize,
  seen: HashSet<&'a str>,
}

impl<'a> Iterator for ContextMatches<'a> {
  type Item = &'a str;

  fn next(&mut self) -> Option<&'a str> {
    while self.at <= self.payload.len() {
      let found = self.pattern.as_ref()?.find_at(self.payload, self.at)?;
      self.at = found.end();

      let token = found.as_str();
      if self.seen.insert(token) {
        return Some(token);
      }
    }

    None
  }
}

/// Find every maximal word-like token containing `fragment`.
///
/// An empty fragment yields nothing: it carries no blast radius worth
/// reporting, and validation rejects empty search keys anyway.
pub fn find_contexts<'a>(fragment: &str, payload: &'a str) -> ContextMatches<'a> {
  let pattern = if fragment.is_empty() {
    None
  } else {
    // The fragment is escaped, so the scan stays literal even when the
    // fragment contains regex metacharacters.
    let scan = format!("{}*{}{}*", WORD_CLASS, regex::escape(fragment), WORD_CLASS);
    Regex::new(&scan).ok()
  };

  ContextMatches {
    pattern,
    payload,
    at: 0,
    seen: HashSet::new(),
  }
}
