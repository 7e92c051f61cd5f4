mod commands;
mod core;
mod ui;
mod utils;

use clap::{Parser, Subcommand};
use crate::core::error::{print_error, RemapError};
use std::path::PathBuf;

/// Collision-safe bulk search/replace driven by declarative mapping tables
#[derive(Parser)]
#[command(name = "remap")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct RemapCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Validate the mapping table without touching any text
  Check {
    /// Path to the mapping file (default: search for remap.toml)
    #[arg(long)]
    mappings: Option<PathBuf>,

    /// Also reject duplicate replacement values (needed for round-trip use)
    #[arg(long)]
    reverse: bool,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Apply the mapping table to files in place, or filter stdin to stdout
  Apply {
    /// Files to transform; reads stdin and writes stdout when omitted
    files: Vec<PathBuf>,

    /// Path to the mapping file (default: search for remap.toml)
    #[arg(long)]
    mappings: Option<PathBuf>,

    /// Actually write changes (default: dry-run mode showing plan)
    #[arg(long)]
    apply: bool,

    /// Output report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Show which word-like tokens contain a fragment (blast radius)
  Contexts {
    /// Literal fragment to look for (regex metacharacters are escaped)
    fragment: String,

    /// File to scan; reads stdin when omitted
    file: Option<PathBuf>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = RemapCli::parse();

  let result = match cli.command {
    Commands::Check { mappings, reverse, json } => commands::run_check(mappings, reverse, json),
    Commands::Apply {
      files,
      mappings,
      apply,
      json,
    } => commands::run_apply(files, mappings, apply, json),
    Commands::Contexts { fragment, file, json } => commands::run_contexts(fragment, file, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: RemapError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
