//! Normalized schema definitions.
//!
//! [`SchemaModel::from_ast`] is the single pass that maps parser node shapes
//! into the closed record types below. Everything downstream (resolver,
//! emitter) works on these definitions and never on parser nodes.

use crate::parser::{DeclKind, Declaration, Node, SchemaAst};

/// A declared enum: name plus values in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDefinition {
    pub name: String,
    pub values: Vec<String>,
    /// Declaration-level doc-comment lines, verbatim.
    pub comments: Vec<String>,
}

/// One field of a model or composite type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    /// Raw type token as written in the schema.
    pub field_type: String,
    pub is_array: bool,
    pub is_optional: bool,
    /// Attribute names attached to the field, e.g. `unique`, `nullable`.
    pub attributes: Vec<String>,
    /// Doc-comment line directly above the field, verbatim.
    pub comment: Option<String>,
}

impl FieldDefinition {
    /// Whether the field carries the named attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr == name)
    }
}

/// A declared model or composite type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDefinition {
    pub name: String,
    /// Fields in declaration order; order is significant for output.
    pub fields: Vec<FieldDefinition>,
    /// Composite types are not relation targets and are emitted before models.
    pub is_type: bool,
    /// Declaration-level doc-comment lines, verbatim.
    pub comments: Vec<String>,
}

/// The three definition lists built once per generation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaModel {
    pub enums: Vec<EnumDefinition>,
    pub types: Vec<ModelDefinition>,
    pub models: Vec<ModelDefinition>,
}

impl SchemaModel {
    /// Normalize parsed declarations into definition lists, first-seen
    /// declaration order. Declarations of unmodeled kinds are dropped.
    pub fn from_ast(ast: &SchemaAst) -> Self {
        let mut schema = SchemaModel::default();

        for decl in &ast.declarations {
            match &decl.kind {
                DeclKind::Enum => schema.enums.push(build_enum(decl)),
                DeclKind::Model => schema.models.push(build_model(decl, false)),
                DeclKind::Type => schema.types.push(build_model(decl, true)),
                DeclKind::Other(_) => {}
            }
        }

        schema
    }

    /// Total number of declarations that will produce an output file.
    pub fn declaration_count(&self) -> usize {
        self.enums.len() + self.types.len() + self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declaration_count() == 0
    }
}

/// Build an enum definition, taking only enumerator children as values.
fn build_enum(decl: &Declaration) -> EnumDefinition {
    let values = decl
        .children
        .iter()
        .filter_map(|child| match child {
            Node::Enumerator { name } => Some(name.clone()),
            _ => None,
        })
        .collect();

    EnumDefinition {
        name: decl.name.clone(),
        values,
        comments: decl.comments.clone(),
    }
}

/// Build a model/type definition, taking only field children. Block
/// attributes (compound ids, indexes) are silently dropped; a doc comment
/// attaches to the field directly following it.
fn build_model(decl: &Declaration, is_type: bool) -> ModelDefinition {
    let mut fields = Vec::new();
    let mut pending_comment: Option<String> = None;

    for child in &decl.children {
        match child {
            Node::Comment { text } => pending_comment = Some(text.clone()),
            Node::Field(field) => fields.push(FieldDefinition {
                name: field.name.clone(),
                // Both parser shapes flatten to the same string here.
                field_type: field.field_type.name().to_string(),
                is_array: field.is_array,
                is_optional: field.is_optional,
                attributes: field.attributes.clone(),
                comment: pending_comment.take(),
            }),
            Node::BlockAttribute { .. } | Node::Enumerator { .. } => pending_comment = None,
        }
    }

    ModelDefinition {
        name: decl.name.clone(),
        fields,
        is_type,
        comments: decl.comments.clone(),
    }
}
