//! Error types for schema parsing.

use thiserror::Error;

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error raised while parsing a datamodel schema.
///
/// Line numbers are 1-indexed and refer to the schema source text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line that fits no production of the grammar.
    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A block declaration without a name, e.g. `model {`.
    #[error("Declaration '{keyword}' at line {line} is missing a name")]
    MissingName { line: usize, keyword: String },

    /// A field line with a name but no type token.
    #[error("Field '{field}' at line {line} is missing a type")]
    MissingFieldType { line: usize, field: String },

    /// A block that is still open at end of input.
    #[error("Block '{name}' opened at line {line} is never closed")]
    UnterminatedBlock { line: usize, name: String },
}

impl ParseError {
    /// Create a syntax error with location information.
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Create a missing-name error.
    pub fn missing_name(line: usize, keyword: impl Into<String>) -> Self {
        Self::MissingName {
            line,
            keyword: keyword.into(),
        }
    }

    /// Create a missing-field-type error.
    pub fn missing_field_type(line: usize, field: impl Into<String>) -> Self {
        Self::MissingFieldType {
            line,
            field: field.into(),
        }
    }
}
