#![allow(dead_code)]

//! Mapping file (remap.toml) parsing and policy
//!
//! The on-disk shape is a sequence of `[[mappings]]` records naming a search
//! value and a replacement value, plus an optional `[policy]` section. The
//! core engine never sees this layer; it consumes the decoded entry sequence
//! after validation.
//!
//! Searched in order: remap.toml, .remap.toml, .config/remap.toml

use crate::core::error::{ConfigError, RemapError, RemapResult, ResultExt};
use crate::core::table::{MappingEntry, MappingTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for remap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemapConfig {
  #[serde(default)]
  pub mappings: Vec<MappingRecord>,

  #[serde(default)]
  pub policy: PolicyConfig,
}

/// One serialized mapping record
///
/// Mirrors [`MappingEntry`] but belongs to the file format; decoding keeps
/// the two shapes free to diverge (comments, per-record options) later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingRecord {
  pub search: String,

  #[serde(default)]
  pub replace: String,
}

/// Validation policy configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PolicyConfig {
  /// Also reject duplicated replacement values.
  /// Needed only when the table will later be applied in reverse.
  #[serde(default)]
  pub require_reversible: bool,
}

impl RemapConfig {
  /// Find config file in search order: remap.toml, .remap.toml, .config/remap.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("remap.toml"),
      path.join(".remap.toml"),
      path.join(".config").join("remap.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from remap.toml (searches multiple locations)
  pub fn load(path: &Path) -> RemapResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      RemapError::Config(ConfigError::NotFound {
        search_root: path.to_path_buf(),
      })
    })?;

    Self::load_file(&config_path)
  }

  /// Load config from an explicit file path (--mappings)
  pub fn load_file(config_path: &Path) -> RemapResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read mappings from {}", config_path.display()))?;
    let config: RemapConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse mappings from {}", config_path.display()))?;

    Ok(config)
  }

  /// Save config to remap.toml (default location)
  pub fn save(&self, path: &Path) -> RemapResult<()> {
    let config_path = path.join("remap.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }

  /// Create a new empty config
  pub fn new() -> Self {
    Self {
      mappings: Vec::new(),
      policy: PolicyConfig::default(),
    }
  }

  /// Decode the records into core entries, in file order
  pub fn entries(&self) -> Vec<MappingEntry> {
    self
      .mappings
      .iter()
      .map(|m| MappingEntry::new(m.search.clone(), m.replace.clone()))
      .collect()
  }

  /// Validate into a table, honoring the reversibility policy
  pub fn to_table(&self) -> RemapResult<MappingTable> {
    let table = MappingTable::validate(self.entries())?;
    if self.policy.require_reversible {
      table.check_reversible()?;
    }
    Ok(table)
  }
}

impl Default for RemapConfig {
  fn default() -> Self {
    Self::new()
  }
}
