//! Tests for the `check` command

use crate::helpers::*;
use anyhow::Result;

const VALID_TABLE: &str = r#"
[[mappings]]
search = "example.com"
replace = "example-int.com"

[[mappings]]
search = "production"
replace = "integration"
"#;

#[test]
fn test_check_accepts_valid_table() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(VALID_TABLE)?;

  let output = workspace.run(&["check"])?;
  assert!(stdout_str(&output).contains("Mapping table OK"));

  Ok(())
}

#[test]
fn test_check_rejects_duplicate_keys_with_exit_code_3() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(
    r#"
[[mappings]]
search = "host"
replace = "a"

[[mappings]]
search = "port"
replace = "b"

[[mappings]]
search = "host"
replace = "c"

[[mappings]]
search = "port"
replace = "d"
"#,
  )?;

  let output = workspace.run_raw(&["check"])?;
  assert_eq!(output.status.code(), Some(3));

  // Both offending keys reported in one pass
  let stdout = stdout_str(&output);
  assert!(stdout.contains("'host'"));
  assert!(stdout.contains("'port'"));

  Ok(())
}

#[test]
fn test_check_rejects_empty_search_key() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(
    r#"
[[mappings]]
search = ""
replace = "x"
"#,
  )?;

  let output = workspace.run_raw(&["check"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stdout_str(&output).contains("empty-search-key"));

  Ok(())
}

#[test]
fn test_check_reverse_flag_rejects_duplicate_replacements() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(
    r#"
[[mappings]]
search = "a"
replace = "same"

[[mappings]]
search = "b"
replace = "same"
"#,
  )?;

  // Forward-only use is fine
  workspace.run(&["check"])?;

  // Round-trip use is not
  let output = workspace.run_raw(&["check", "--reverse"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stdout_str(&output).contains("duplicate-replace-value"));

  Ok(())
}

#[test]
fn test_check_policy_forces_reverse_pass() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(
    r#"
[policy]
require_reversible = true

[[mappings]]
search = "a"
replace = "same"

[[mappings]]
search = "b"
replace = "same"
"#,
  )?;

  let output = workspace.run_raw(&["check"])?;
  assert_eq!(output.status.code(), Some(3));

  Ok(())
}

#[test]
fn test_check_json_report() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(VALID_TABLE)?;

  let output = workspace.run(&["check", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;

  assert_eq!(report["valid"], true);
  assert_eq!(report["entries"], 2);
  assert_eq!(report["plan_id"].as_str().unwrap().len(), 12);
  assert!(report["violations"].as_array().unwrap().is_empty());

  Ok(())
}

#[test]
fn test_check_json_reports_all_violations() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(
    r#"
[[mappings]]
search = ""
replace = "x"

[[mappings]]
search = "dup"
replace = "1"

[[mappings]]
search = "dup"
replace = "2"
"#,
  )?;

  let output = workspace.run_raw(&["check", "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let report: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;
  assert_eq!(report["valid"], false);

  let rules: Vec<&str> = report["violations"]
    .as_array()
    .unwrap()
    .iter()
    .map(|v| v["rule"].as_str().unwrap())
    .collect();
  assert_eq!(rules, vec!["empty-search-key", "duplicate-search-key"]);

  Ok(())
}

#[test]
fn test_check_without_config_fails_with_help() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = workspace.run_raw(&["check"])?;
  assert_eq!(output.status.code(), Some(1));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("No remap configuration found"));

  Ok(())
}

#[test]
fn test_check_explicit_mappings_path() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("custom.toml", VALID_TABLE)?;

  let output = workspace.run(&["check", "--mappings", "custom.toml"])?;
  assert!(stdout_str(&output).contains("Mapping table OK"));

  Ok(())
}
