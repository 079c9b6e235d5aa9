//! # zodgen
//!
//! Core code generation for turning a datamodel schema into TypeScript Zod
//! schema files: one file per declared enum, composite type, or model, each
//! exporting a runtime validator and its inferred static type.
//!
//! This crate is pure: it goes from schema text to rendered file contents
//! and never touches the filesystem. The `zodgen-cli` crate is the I/O shell
//! around it.
//!
//! ## Architecture
//!
//! - [`parser`] - schema text to loosely-shaped declaration nodes
//! - [`model`] - normalization into enum/type/model definition lists
//! - [`resolver`] - field-type tokens to Zod expressions and import needs
//! - [`emitter`] - definitions to per-declaration TypeScript files
//! - [`error`] - parse error types

pub mod emitter;
pub mod error;
pub mod model;
pub mod parser;
pub mod resolver;

// Re-export main types for convenience
pub use emitter::{EmitOptions, GeneratedFile, SchemaEmitter};
pub use error::{ParseError, ParseResult};
pub use model::{EnumDefinition, FieldDefinition, ModelDefinition, SchemaModel};
pub use parser::{parse_schema, SchemaAst};
pub use resolver::{ResolvedType, TypeResolver};
