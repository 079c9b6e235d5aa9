//! Generation pipeline: read the schema, parse, normalize, emit.

use crate::config::Config;
use crate::error::{CliError, CliResult};
use std::path::Path;
use zodgen::{parse_schema, GeneratedFile, SchemaEmitter, SchemaModel};

/// Everything one generation run produced, in emission order
/// (enums, then composite types, then models).
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    pub files: Vec<GeneratedFile>,
}

impl GeneratedOutput {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Schema generator: the single entry point of a generation run.
pub struct SchemaGenerator {
    config: Config,
}

impl SchemaGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read the schema at `schema_path` and generate every output file.
    pub fn generate(&self, schema_path: &Path) -> CliResult<GeneratedOutput> {
        let source =
            std::fs::read_to_string(schema_path).map_err(|source| CliError::SchemaRead {
                path: schema_path.to_path_buf(),
                source,
            })?;
        self.generate_source(&source)
    }

    /// Generate from schema text already in memory.
    pub fn generate_source(&self, source: &str) -> CliResult<GeneratedOutput> {
        let ast = parse_schema(source)?;
        let schema = SchemaModel::from_ast(&ast);
        let emitter = SchemaEmitter::new(self.config.emit_options()?);

        Ok(GeneratedOutput {
            files: emitter.emit_schema(&schema),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SCHEMA: &str = r#"
enum Role {
  USER
  ADMIN
}

model User {
  id Int @id
  role Role
}
"#;

    #[test]
    fn test_generate_source() {
        let generator = SchemaGenerator::new(Config::default());
        let output = generator.generate_source(SCHEMA).unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(output.files[0].file_name, "Role.ts");
        assert_eq!(output.files[1].file_name, "User.ts");
        assert!(output.files[1].content.contains("role: RoleSchema,"));
    }

    #[test]
    fn test_generate_missing_schema_fails() {
        let generator = SchemaGenerator::new(Config::default());
        let err = generator
            .generate(&PathBuf::from("/definitely/not/here.prisma"))
            .unwrap_err();
        assert!(matches!(err, CliError::SchemaRead { .. }));
    }

    #[test]
    fn test_generate_source_parse_error() {
        let generator = SchemaGenerator::new(Config::default());
        let err = generator.generate_source("model {\n}\n").unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }

    #[test]
    fn test_empty_schema_yields_no_files() {
        let generator = SchemaGenerator::new(Config::default());
        let output = generator.generate_source("").unwrap();
        assert!(output.is_empty());
    }
}
