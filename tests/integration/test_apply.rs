//! Tests for the `apply` command

use crate::helpers::*;
use anyhow::Result;

const HOSTNAME_TABLE: &str = r#"
[[mappings]]
search = "example.com"
replace = "example-int.com"

[[mappings]]
search = "api.example.com"
replace = "next-api.example-int.com"

[[mappings]]
search = "production"
replace = "integration"
"#;

#[test]
fn test_dry_run_is_the_default() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(HOSTNAME_TABLE)?;
  workspace.write_file("site.conf", "api.example.com serves the production site")?;

  let output = workspace.run(&["apply", "site.conf"])?;

  let stdout = stdout_str(&output);
  assert!(stdout.contains("Dry-run mode"));
  assert!(stdout.contains("--apply"));

  // Nothing written
  assert_eq!(workspace.read_file("site.conf")?, "api.example.com serves the production site");

  Ok(())
}

#[test]
fn test_dry_run_plan_orders_longest_search_first() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(HOSTNAME_TABLE)?;
  workspace.write_file("site.conf", "api.example.com")?;

  let output = workspace.run(&["apply", "site.conf"])?;
  let stdout = stdout_str(&output);

  let api = stdout.find("'api.example.com'").unwrap();
  let bare = stdout.find("'example.com'").unwrap();
  assert!(api < bare, "longer pattern must be planned first:\n{}", stdout);

  Ok(())
}

#[test]
fn test_apply_transforms_file_end_to_end() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(HOSTNAME_TABLE)?;
  workspace.write_file("site.conf", "api.example.com serves the production site")?;

  workspace.run(&["apply", "site.conf", "--apply"])?;

  assert_eq!(
    workspace.read_file("site.conf")?,
    "next-api.example-int.com serves the integration site"
  );

  Ok(())
}

#[test]
fn test_apply_swaps_values_without_corruption() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(
    r#"
[[mappings]]
search = "primary"
replace = "replica"

[[mappings]]
search = "replica"
replace = "primary"
"#,
  )?;
  workspace.write_file("db.conf", "primary replica primary")?;

  workspace.run(&["apply", "db.conf", "--apply"])?;

  assert_eq!(workspace.read_file("db.conf")?, "replica primary replica");

  Ok(())
}

#[test]
fn test_apply_multiple_files() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(HOSTNAME_TABLE)?;
  workspace.write_file("a.conf", "example.com")?;
  workspace.write_file("b.conf", "production")?;
  workspace.write_file("c.conf", "untouched")?;

  workspace.run(&["apply", "a.conf", "b.conf", "c.conf", "--apply"])?;

  assert_eq!(workspace.read_file("a.conf")?, "example-int.com");
  assert_eq!(workspace.read_file("b.conf")?, "integration");
  assert_eq!(workspace.read_file("c.conf")?, "untouched");

  Ok(())
}

#[test]
fn test_invalid_table_prevents_any_mutation() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(
    r#"
[[mappings]]
search = "host"
replace = "a"

[[mappings]]
search = "host"
replace = "b"
"#,
  )?;
  workspace.write_file("site.conf", "host")?;

  let output = workspace.run_raw(&["apply", "site.conf", "--apply"])?;
  assert_eq!(output.status.code(), Some(3));

  // The payload was never touched
  assert_eq!(workspace.read_file("site.conf")?, "host");

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("'host'"));

  Ok(())
}

#[test]
fn test_stdin_filter_mode() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(HOSTNAME_TABLE)?;

  let output = workspace.run_with_stdin(
    &["apply", "--apply"],
    "api.example.com serves the production site",
  )?;

  assert_eq!(stdout_str(&output), "next-api.example-int.com serves the integration site");

  Ok(())
}

#[test]
fn test_stdin_dry_run_reports_counts() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(HOSTNAME_TABLE)?;

  let output = workspace.run_with_stdin(&["apply"], "example.com example.com")?;
  let stdout = stdout_str(&output);

  assert!(stdout.contains("<stdin>"));
  assert!(stdout.contains("2 occurrence(s)"));

  Ok(())
}

#[test]
fn test_json_report_shape() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(HOSTNAME_TABLE)?;
  workspace.write_file("site.conf", "api.example.com and example.com")?;

  let output = workspace.run(&["apply", "site.conf", "--json"])?;
  let report: serde_json::Value = serde_json::from_str(&stdout_str(&output))?;

  assert_eq!(report["applied"], false);
  assert_eq!(report["plan_id"].as_str().unwrap().len(), 12);

  let file = &report["files"][0];
  assert_eq!(file["changed"], true);
  assert_eq!(file["occurrences"], 2);

  // Steps come back in application order with exact counts
  let steps = file["steps"].as_array().unwrap();
  assert_eq!(steps[0]["search"], "api.example.com");
  assert_eq!(steps[0]["occurrences"], 1);
  assert_eq!(steps[1]["search"], "example.com");
  assert_eq!(steps[1]["occurrences"], 1);

  Ok(())
}

#[test]
fn test_apply_is_idempotent_for_disjoint_domains() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(
    r#"
[[mappings]]
search = "staging"
replace = "qa"
"#,
  )?;
  workspace.write_file("env.conf", "staging cluster")?;

  workspace.run(&["apply", "env.conf", "--apply"])?;
  let once = workspace.read_file("env.conf")?;

  workspace.run(&["apply", "env.conf", "--apply"])?;
  let twice = workspace.read_file("env.conf")?;

  assert_eq!(once, twice);
  assert_eq!(once, "qa cluster");

  Ok(())
}

#[test]
fn test_missing_payload_file_fails() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_mappings(HOSTNAME_TABLE)?;

  let output = workspace.run_raw(&["apply", "missing.conf", "--apply"])?;
  assert!(!output.status.success());

  Ok(())
}
