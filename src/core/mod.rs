//! Core engine for remap operations
//!
//! This module contains the fundamental building blocks for all remap functionality:
//!
//! - **config**: Mapping file (remap.toml) parsing and validation policy
//! - **error**: Comprehensive error types with contextual help messages
//! - **table**: Mapping table validation (duplicate and empty-key rejection)
//! - **plan**: Execution-plan ordering, plan IDs, placeholder tokens
//! - **apply**: Two-phase placeholder substitution engine
//! - **contexts**: Blast-radius discovery for search fragments

pub mod apply;
pub mod config;
pub mod contexts;
pub mod error;
pub mod plan;
pub mod table;
