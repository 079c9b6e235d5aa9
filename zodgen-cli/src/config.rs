//! Configuration management for the CLI.
//!
//! Configuration is loaded from a `zodgen.toml` file and merged with
//! command-line arguments; CLI values take precedence.

use crate::error::{CliResult, ConfigError};
use convert_case::Case;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use zodgen::EmitOptions;

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "zodgen.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Naming conventions.
    pub naming: NamingConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Whether to generate type inference exports.
    pub generate_types: bool,
}

/// Naming convention configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Suffix for validator names (e.g. `UserSchema`).
    pub schema_suffix: String,

    /// Field rename convention (camelCase, PascalCase, snake_case,
    /// kebab-case). Unset emits names as written in the schema.
    pub rename_all: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            generate_types: true,
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            schema_suffix: "Schema".to_string(),
            rename_all: None,
        }
    }
}

impl Config {
    /// Map this configuration into the emitter's options.
    pub fn emit_options(&self) -> CliResult<EmitOptions> {
        let rename_all = match self.naming.rename_all.as_deref() {
            None => None,
            Some("camelCase") => Some(Case::Camel),
            Some("PascalCase") => Some(Case::Pascal),
            Some("snake_case") => Some(Case::Snake),
            Some("kebab-case") => Some(Case::Kebab),
            Some(other) => {
                return Err(ConfigError::invalid_value(
                    "naming.rename_all",
                    format!("unknown case convention '{other}'"),
                )
                .into())
            }
        };

        Ok(EmitOptions {
            schema_suffix: self.naming.schema_suffix.clone(),
            generate_types: self.output.generate_types,
            rename_all,
        })
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// With an explicit path, the file must exist. With `None`, the default
    /// location is tried and a missing file falls back to defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::not_found(path.to_path_buf()).into());
                }
                path.to_path_buf()
            }
            None => {
                let default = PathBuf::from(CONFIG_FILENAME);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path, e.to_string()))?;

        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(generate_types) = args.generate_types {
            config.output.generate_types = generate_types;
        }

        if let Some(ref schema_suffix) = args.schema_suffix {
            config.naming.schema_suffix = schema_suffix.clone();
        }

        if let Some(ref rename_all) = args.rename_all {
            config.naming.rename_all = Some(rename_all.clone());
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# zodgen configuration file

[output]
# Output directory for generated TypeScript files
dir = "./generated"

# Whether to generate type inference exports (export type X = z.infer<typeof XSchema>)
generate_types = true

[naming]
# Validator name suffix (e.g. UserSchema)
schema_suffix = "Schema"

# Rename convention for emitted field names
# (camelCase, PascalCase, snake_case, kebab-case); omit to emit as written
# rename_all = "camelCase"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Generate types override.
    pub generate_types: Option<bool>,

    /// Schema suffix override.
    pub schema_suffix: Option<String>,

    /// Rename all override.
    pub rename_all: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
        assert!(config.output.generate_types);
        assert_eq!(config.naming.schema_suffix, "Schema");
        assert_eq!(config.naming.rename_all, None);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[output]
dir = "./schemas"
generate_types = false

[naming]
schema_suffix = "Validator"
rename_all = "camelCase"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("./schemas"));
        assert!(!config.output.generate_types);
        assert_eq!(config.naming.schema_suffix, "Validator");
        assert_eq!(config.naming.rename_all, Some("camelCase".to_string()));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[output]\ndir = \"./out\"\n").unwrap();
        assert_eq!(config.output.dir, PathBuf::from("./out"));
        assert!(config.output.generate_types);
        assert_eq!(config.naming.schema_suffix, "Schema");
    }

    #[test]
    fn test_merge_cli_args_output() {
        let config = Config::default();
        let args = CliArgs {
            output: Some(PathBuf::from("./custom")),
            ..Default::default()
        };

        let merged = ConfigManager::merge_cli_args(config, &args);
        assert_eq!(merged.output.dir, PathBuf::from("./custom"));
    }

    #[test]
    fn test_merge_cli_args_preserves_unset() {
        let config = Config::default();
        let args = CliArgs::default();

        let merged = ConfigManager::merge_cli_args(config.clone(), &args);
        assert_eq!(merged.output.dir, config.output.dir);
        assert_eq!(merged.naming.schema_suffix, config.naming.schema_suffix);
    }

    #[test]
    fn test_emit_options_mapping() {
        let mut config = Config::default();
        config.naming.rename_all = Some("camelCase".to_string());
        config.naming.schema_suffix = "Validator".to_string();
        config.output.generate_types = false;

        let options = config.emit_options().unwrap();
        assert_eq!(options.schema_suffix, "Validator");
        assert!(!options.generate_types);
        assert_eq!(options.rename_all, Some(Case::Camel));
    }

    #[test]
    fn test_emit_options_rejects_unknown_convention() {
        let mut config = Config::default();
        config.naming.rename_all = Some("SHOUTING".to_string());
        assert!(config.emit_options().is_err());
    }

    #[test]
    fn test_default_config_content_parses() {
        let config: Config = toml::from_str(ConfigManager::default_config_content()).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
        assert_eq!(config.naming.schema_suffix, "Schema");
    }
}
