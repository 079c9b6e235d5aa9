//! Property-based tests for the zodgen core.
//!
//! Properties tested:
//! - Resolution totality: every type token resolves to some expression
//! - Unknown types degrade to the string primitive with no import
//! - Enum value order is preserved in emitted output
//! - Cross-file imports are de-duplicated per file
//! - Every field produces exactly one line in the object body

use proptest::prelude::*;

use zodgen::emitter::SchemaEmitter;
use zodgen::model::{EnumDefinition, FieldDefinition, ModelDefinition, SchemaModel};
use zodgen::resolver::TypeResolver;

const SCALARS: [&str; 9] = [
    "String", "Int", "Float", "Boolean", "DateTime", "Json", "Bytes", "Decimal", "BigInt",
];

// =============================================================================
// Generators
// =============================================================================

fn arb_type_token() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{0,12}".prop_map(|s| s)
}

fn arb_enum_values() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[A-Z][A-Z0-9_]{0,8}", 1..10).prop_map(|raw| {
        let mut values = Vec::new();
        for value in raw {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        values
    })
}

fn arb_field_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z][a-zA-Z0-9]{0,8}", 1..10).prop_map(|raw| {
        let mut names = Vec::new();
        for name in raw {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    })
}

fn string_field(name: &str) -> FieldDefinition {
    FieldDefinition {
        name: name.to_string(),
        field_type: "String".to_string(),
        is_array: false,
        is_optional: false,
        attributes: Vec::new(),
        comment: None,
    }
}

fn model(name: &str, fields: Vec<FieldDefinition>) -> ModelDefinition {
    ModelDefinition {
        name: name.to_string(),
        fields,
        is_type: false,
        comments: Vec::new(),
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Resolution never fails: any token yields a non-empty expression.
    #[test]
    fn prop_resolution_is_total(token in arb_type_token()) {
        let schema = SchemaModel::default();
        let resolver = TypeResolver::new(&schema, "Schema");
        let field = FieldDefinition {
            field_type: token,
            ..string_field("f")
        };
        let resolved = resolver.resolve(&field, "Current");
        prop_assert!(!resolved.expression.is_empty());
    }

    /// Tokens naming no scalar and no declaration degrade to z.string().
    #[test]
    fn prop_unknown_types_degrade_to_string(token in arb_type_token()) {
        prop_assume!(!SCALARS.contains(&token.as_str()));
        let schema = SchemaModel::default();
        let resolver = TypeResolver::new(&schema, "Schema");
        let field = FieldDefinition {
            field_type: token,
            ..string_field("f")
        };
        let resolved = resolver.resolve(&field, "Current");
        prop_assert_eq!(resolved.expression, "z.string()");
        prop_assert_eq!(resolved.import, None);
    }

    /// Emitted enum values appear in declaration order.
    #[test]
    fn prop_enum_order_preserved(values in arb_enum_values()) {
        let def = EnumDefinition {
            name: "E".to_string(),
            values: values.clone(),
            comments: Vec::new(),
        };
        let file = SchemaEmitter::default().emit_enum(&def);

        let mut from = 0;
        for value in &values {
            let needle = format!("'{value}',");
            match file.content[from..].find(&needle) {
                Some(pos) => from = from + pos + needle.len(),
                None => prop_assert!(false, "value {} missing or out of order", value),
            }
        }
    }

    /// A type referenced by many fields is imported exactly once.
    #[test]
    fn prop_imports_deduplicated(field_count in 2usize..10) {
        let fields = (0..field_count)
            .map(|i| FieldDefinition {
                field_type: "Other".to_string(),
                is_optional: i % 2 == 0,
                ..string_field(&format!("field{i}"))
            })
            .collect();
        let schema = SchemaModel {
            models: vec![model("M", fields), model("Other", vec![string_field("id")])],
            ..SchemaModel::default()
        };
        let files = SchemaEmitter::default().emit_schema(&schema);
        let content = &files.iter().find(|f| f.name == "M").unwrap().content;
        prop_assert_eq!(content.matches("import { OtherSchema } from './Other';").count(), 1);
    }

    /// Each field renders exactly one line of the object body.
    #[test]
    fn prop_one_line_per_field(names in arb_field_names()) {
        let fields = names.iter().map(|name| string_field(name)).collect();
        let schema = SchemaModel {
            models: vec![model("M", fields)],
            ..SchemaModel::default()
        };
        let files = SchemaEmitter::default().emit_schema(&schema);
        let content = &files[0].content;
        for name in &names {
            let line = format!("  {name}: z.string(),\n");
            prop_assert_eq!(content.matches(&line).count(), 1, "field {}", name);
        }
    }
}
