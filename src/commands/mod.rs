//! CLI commands for remap
//!
//! This module contains all user-facing command implementations:
//!
//! - **check**: Validate the mapping table (duplicates, empty keys, reversibility)
//! - **apply**: Apply the table to files or stdin (dry-run by default)
//! - **contexts**: Show which word-like tokens contain a fragment

pub mod apply;
pub mod check;
pub mod contexts;

pub use apply::run_apply;
pub use check::run_check;
pub use contexts::run_contexts;
