//! Field-type resolution.
//!
//! Maps a raw field-type token to the Zod expression for it and reports
//! whether a cross-file import is needed. Resolution is a total function:
//! every token resolves to some expression, unrecognized ones degrade to a
//! plain string validator.

use crate::model::{EnumDefinition, FieldDefinition, ModelDefinition, SchemaModel};

/// Outcome of resolving one field's type.
///
/// `expression` already carries the `nullable`/`unique` attribute modifiers;
/// the caller wraps array and optional around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub expression: String,
    /// Name of a sibling declaration whose file must be imported, if any.
    pub import: Option<String>,
}

/// Resolves field types against the full set of known declarations.
pub struct TypeResolver<'a> {
    enums: &'a [EnumDefinition],
    types: &'a [ModelDefinition],
    models: &'a [ModelDefinition],
    schema_suffix: &'a str,
}

impl<'a> TypeResolver<'a> {
    pub fn new(schema: &'a SchemaModel, schema_suffix: &'a str) -> Self {
        Self {
            enums: &schema.enums,
            types: &schema.types,
            models: &schema.models,
            schema_suffix,
        }
    }

    /// Resolve one field's type within the declaration named `current`.
    ///
    /// Self-references still resolve to a deferred `z.lazy` expression but
    /// record no import, since the definition is already in scope.
    pub fn resolve(&self, field: &FieldDefinition, current: &str) -> ResolvedType {
        let clean = field
            .field_type
            .strip_suffix("[]")
            .unwrap_or(&field.field_type);

        let (mut expression, import) = if let Some(scalar) = scalar_expression(clean) {
            (scalar.to_string(), None)
        } else if self.is_enum(clean) {
            (format!("{clean}{}", self.schema_suffix), None)
        } else if self.is_model(clean) || self.is_composite_type(clean) {
            // Deferred so that mutually-referencing definitions work
            // regardless of emission order.
            let expression = format!("z.lazy(() => {clean}{})", self.schema_suffix);
            let import = if clean == current {
                None
            } else {
                Some(clean.to_string())
            };
            (expression, import)
        } else {
            // Unsupported scalars degrade to an unchecked string.
            ("z.string()".to_string(), None)
        };

        if field.has_attribute("nullable") {
            expression.push_str(".nullable()");
        }
        if field.has_attribute("unique") {
            // Documentary only; no uniqueness check is performed.
            expression.push_str(".describe('unique')");
        }

        ResolvedType { expression, import }
    }

    fn is_enum(&self, name: &str) -> bool {
        self.enums.iter().any(|def| def.name == name)
    }

    fn is_model(&self, name: &str) -> bool {
        self.models.iter().any(|def| def.name == name)
    }

    fn is_composite_type(&self, name: &str) -> bool {
        self.types.iter().any(|def| def.name == name)
    }
}

/// The fixed scalar table. Case-sensitive exact match.
fn scalar_expression(clean: &str) -> Option<&'static str> {
    let expression = match clean {
        "String" => "z.string()",
        "Int" => "z.number()",
        "Float" => "z.number()",
        "Boolean" => "z.boolean()",
        "DateTime" => "z.date()",
        "Json" => "z.any()",
        "Bytes" => "z.instanceof(Buffer)",
        // Decimals are represented as strings, not floats.
        "Decimal" => "z.string()",
        "BigInt" => "z.bigint()",
        _ => return None,
    };
    Some(expression)
}
