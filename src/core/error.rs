//! Error types for remap with contextual messages and exit codes
//!
//! This module provides a unified error type that categorizes errors and provides
//! contextual help messages to users. Validation failures carry the complete set
//! of offending keys so operators can fix a mapping file in one sitting.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for remap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (mapping table rejected)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for remap
#[derive(Debug)]
pub enum RemapError {
  /// Configuration errors
  Config(ConfigError),

  /// Mapping table validation errors
  Validation(ValidationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RemapError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RemapError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    RemapError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RemapError::Message { message, context, help } => RemapError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RemapError::Config(_) => ExitCode::User,
      RemapError::Validation(_) => ExitCode::Validation,
      RemapError::Io(_) => ExitCode::System,
      RemapError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RemapError::Config(e) => e.help_message(),
      RemapError::Validation(e) => e.help_message(),
      RemapError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for RemapError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RemapError::Config(e) => write!(f, "{}", e),
      RemapError::Validation(e) => write!(f, "{}", e),
      RemapError::Io(e) => write!(f, "I/O error: {}", e),
      RemapError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RemapError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RemapError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for RemapError {
  fn from(err: io::Error) -> Self {
    RemapError::Io(err)
  }
}

impl From<String> for RemapError {
  fn from(msg: String) -> Self {
    RemapError::message(msg)
  }
}

impl From<&str> for RemapError {
  fn from(msg: &str) -> Self {
    RemapError::message(msg)
  }
}

impl From<toml_edit::TomlError> for RemapError {
  fn from(err: toml_edit::TomlError) -> Self {
    RemapError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for RemapError {
  fn from(err: toml_edit::de::Error) -> Self {
    RemapError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for RemapError {
  fn from(err: toml_edit::ser::Error) -> Self {
    RemapError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for RemapError {
  fn from(err: serde_json::Error) -> Self {
    RemapError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for RemapError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    RemapError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<ValidationError> for RemapError {
  fn from(err: ValidationError) -> Self {
    RemapError::Validation(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// remap.toml not found
  NotFound { search_root: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Create a remap.toml with [[mappings]] entries, or pass --mappings <path>.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No remap configuration found.\nSearched from: {}",
          search_root.display()
        )
      }
    }
  }
}

/// Mapping table validation errors
///
/// Every variant carries the complete offender set found in a single pass,
/// never just the first hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
  /// One or more entries have an empty search key
  EmptySearchKey { indexes: Vec<usize> },

  /// Two or more entries share the same search key
  DuplicateSearchKey { keys: Vec<String> },

  /// Two or more entries share the same replacement value (reversibility check)
  DuplicateReplaceValue { values: Vec<String> },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::EmptySearchKey { .. } => {
        Some("An empty search key would match everywhere. Remove the entry or fill in its search value.".to_string())
      }
      ValidationError::DuplicateSearchKey { .. } => {
        Some("Each search key may appear only once; merge or remove the duplicates listed above.".to_string())
      }
      ValidationError::DuplicateReplaceValue { .. } => {
        Some("Round-trip use needs distinct replacement values. Disambiguate them or drop --reverse.".to_string())
      }
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::EmptySearchKey { indexes } => {
        let positions: Vec<String> = indexes.iter().map(|i| format!("#{}", i + 1)).collect();
        write!(f, "Empty search key in mapping entry {}", positions.join(", "))
      }
      ValidationError::DuplicateSearchKey { keys } => {
        write!(f, "Duplicate search keys in mapping table: {}", quoted(keys))
      }
      ValidationError::DuplicateReplaceValue { values } => {
        write!(f, "Duplicate replacement values in mapping table: {}", quoted(values))
      }
    }
  }
}

fn quoted(values: &[String]) -> String {
  values
    .iter()
    .map(|v| format!("'{}'", v))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Result type alias for remap
pub type RemapResult<T> = Result<T, RemapError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> RemapResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RemapResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RemapError>,
{
  fn context(self, ctx: impl Into<String>) -> RemapResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> RemapResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RemapError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

/// Convert anyhow::Error to RemapError (for CLI edges)
impl From<anyhow::Error> for RemapError {
  fn from(err: anyhow::Error) -> Self {
    RemapError::message(err.to_string())
  }
}
