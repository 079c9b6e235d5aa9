//! # zodgen-cli
//!
//! CLI library for generating TypeScript Zod schemas from a datamodel schema.
//!
//! This crate is the I/O shell around the pure `zodgen` core: it loads
//! configuration, reads the schema file, runs generation, and writes the
//! resulting files.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`generator`] - The generation pipeline over the `zodgen` core
//! - [`writer`] - File output and dry-run support
//! - [`watcher`] - Schema file watching for development mode
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod generator;
pub mod watcher;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::{GeneratedOutput, SchemaGenerator};
pub use watcher::SchemaWatcher;
pub use writer::{FileWriter, WriteResult};
