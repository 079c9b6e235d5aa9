//! Renders definitions into TypeScript source files.
//!
//! One file per declaration, each exporting a Zod validator constant and an
//! inferred static type. Cross-file imports are collected per file while its
//! fields resolve, de-duplicated in first-encounter order, and hoisted above
//! the export statements.

use convert_case::{Case, Casing};

use crate::model::{EnumDefinition, ModelDefinition, SchemaModel};
use crate::resolver::TypeResolver;

const ZOD_IMPORT: &str = "import { z } from 'zod';\n";
const FILE_EXTENSION: &str = "ts";

/// Options controlling rendered names and type exports.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Suffix appended to declaration names to form validator names.
    pub schema_suffix: String,
    /// Whether to emit the `z.infer` type export alongside each validator.
    pub generate_types: bool,
    /// Case convention applied to emitted field names; `None` emits them
    /// as written in the schema.
    pub rename_all: Option<Case<'static>>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            schema_suffix: "Schema".to_string(),
            generate_types: true,
            rename_all: None,
        }
    }
}

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Declaration name the file was generated from.
    pub name: String,
    /// File name including extension, e.g. `User.ts`.
    pub file_name: String,
    pub content: String,
}

/// Renders a [`SchemaModel`] into output files.
pub struct SchemaEmitter {
    options: EmitOptions,
}

impl Default for SchemaEmitter {
    fn default() -> Self {
        Self::new(EmitOptions::default())
    }
}

impl SchemaEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// Render every declaration: enums first, then composite types, then
    /// models, declaration order within each group. Content never depends on
    /// emission order; references are deferred via `z.lazy`.
    pub fn emit_schema(&self, schema: &SchemaModel) -> Vec<GeneratedFile> {
        let resolver = TypeResolver::new(schema, &self.options.schema_suffix);
        let mut files = Vec::with_capacity(schema.declaration_count());

        for def in &schema.enums {
            files.push(self.emit_enum(def));
        }
        for def in &schema.types {
            files.push(self.emit_model(def, &resolver));
        }
        for def in &schema.models {
            files.push(self.emit_model(def, &resolver));
        }

        files
    }

    /// Render one enum file. Value order is preserved byte-for-byte.
    pub fn emit_enum(&self, def: &EnumDefinition) -> GeneratedFile {
        let schema_name = format!("{}{}", def.name, self.options.schema_suffix);
        let mut out = String::new();

        out.push_str(ZOD_IMPORT);
        out.push('\n');
        for comment in &def.comments {
            out.push_str(comment);
            out.push('\n');
        }

        if def.values.is_empty() {
            out.push_str(&format!("export const {schema_name} = z.enum([]);\n"));
        } else {
            out.push_str(&format!("export const {schema_name} = z.enum([\n"));
            for value in &def.values {
                out.push_str(&format!("  '{value}',\n"));
            }
            out.push_str("]);\n");
        }

        if self.options.generate_types {
            out.push('\n');
            out.push_str(&format!(
                "export type {} = z.infer<typeof {schema_name}>;\n",
                def.name
            ));
        }

        self.file(def.name.clone(), out)
    }

    /// Render one model or composite-type file.
    pub fn emit_model(&self, def: &ModelDefinition, resolver: &TypeResolver) -> GeneratedFile {
        let schema_name = format!("{}{}", def.name, self.options.schema_suffix);

        // Import names in first-encounter order across this file's fields.
        let mut imports: Vec<String> = Vec::new();
        let body = if def.fields.is_empty() {
            // Zero fields render the literal empty-object form.
            "z.object({})".to_string()
        } else {
            let mut body = String::from("z.object({\n");
            for field in &def.fields {
                let resolved = resolver.resolve(field, &def.name);
                if let Some(import) = resolved.import {
                    if !imports.contains(&import) {
                        imports.push(import);
                    }
                }

                // Innermost to outermost: base -> nullable -> array -> optional.
                let mut expression = resolved.expression;
                if field.is_array {
                    expression = format!("z.array({expression})");
                }
                if field.is_optional {
                    expression.push_str(".nullish()");
                }

                if let Some(comment) = &field.comment {
                    body.push_str("  ");
                    body.push_str(comment);
                    body.push('\n');
                }
                body.push_str(&format!(
                    "  {}: {expression},\n",
                    self.field_name(&field.name)
                ));
            }
            body.push_str("})");
            body
        };

        let mut out = String::new();
        out.push_str(ZOD_IMPORT);
        for import in &imports {
            out.push_str(&format!(
                "import {{ {import}{} }} from './{import}';\n",
                self.options.schema_suffix
            ));
        }
        out.push('\n');
        for comment in &def.comments {
            out.push_str(comment);
            out.push('\n');
        }
        out.push_str(&format!("export const {schema_name} = {body};\n"));

        if self.options.generate_types {
            out.push('\n');
            out.push_str(&format!(
                "export type {} = z.infer<typeof {schema_name}>;\n",
                def.name
            ));
        }

        self.file(def.name.clone(), out)
    }

    fn field_name(&self, name: &str) -> String {
        match self.options.rename_all {
            Some(case) => name.to_case(case),
            None => name.to_string(),
        }
    }

    fn file(&self, name: String, content: String) -> GeneratedFile {
        let file_name = format!("{name}.{FILE_EXTENSION}");
        GeneratedFile {
            name,
            file_name,
            content,
        }
    }
}
