//! # zodgen
//!
//! CLI tool for generating TypeScript Zod schemas from a datamodel schema.
//!
//! ## Usage
//!
//! ```bash
//! # Generate schemas from the default schema file
//! zodgen generate
//!
//! # Generate schemas from a specific schema into a specific directory
//! zodgen generate prisma/schema.prisma --output ./src/schemas
//!
//! # Watch mode for development
//! zodgen generate --watch
//!
//! # Dry run to preview output
//! zodgen generate --dry-run
//!
//! # Initialize configuration
//! zodgen init
//!
//! # Validate generated files are up-to-date
//! zodgen validate
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use zodgen_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::{CliError, CliResult},
    generator::SchemaGenerator,
    watcher::SchemaWatcher,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "zodgen")]
#[command(version, about = "Generate TypeScript Zod schemas from a datamodel schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript Zod schema files from a schema
    Generate {
        /// Path to the schema file
        #[arg(default_value = "schema.prisma")]
        schema: PathBuf,

        /// Output directory for generated TypeScript files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Watch the schema for changes and regenerate
        #[arg(short, long)]
        watch: bool,

        /// Preview generated files without writing them
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new zodgen configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "zodgen.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Validate that generated schema files are up-to-date
    Validate {
        /// Path to the schema file
        #[arg(default_value = "schema.prisma")]
        schema: PathBuf,

        /// Directory containing the generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Generate {
            schema,
            output,
            watch,
            dry_run,
            config,
        } => cmd_generate(schema, output, watch, dry_run, config),

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Validate {
            schema,
            output,
            config,
        } => cmd_validate(schema, output, config),
    }
}

/// Generate command implementation.
fn cmd_generate(
    schema: PathBuf,
    output: Option<PathBuf>,
    watch: bool,
    dry_run: bool,
    config_path: Option<PathBuf>,
) -> CliResult<()> {
    let config = load_config(config_path.as_deref(), output)?;

    if watch {
        run_watch_mode(&schema, &config, dry_run)
    } else {
        run_generate(&schema, &config, dry_run)
    }
}

/// Run schema generation once.
fn run_generate(schema_path: &Path, config: &Config, dry_run: bool) -> CliResult<()> {
    println!("{} {}", "Reading schema".cyan(), schema_path.display());

    let generator = SchemaGenerator::new(config.clone());
    let output = generator.generate(schema_path)?;

    if output.is_empty() {
        println!("{}", "No declarations found in schema.".yellow());
        return Ok(());
    }

    println!(
        "  Generated {} file(s)",
        output.len().to_string().green()
    );

    let writer = FileWriter::new(dry_run);
    for result in writer.write_all(&config.output.dir, &output.files)? {
        match result {
            WriteResult::Written { path, bytes } => {
                println!("{} {} ({} bytes)", "✓".green(), path.display(), bytes);
            }
            WriteResult::DryRun { path, content } => {
                println!("{} Would write {}:", "[dry-run]".yellow(), path.display());
                println!("{}", "─".repeat(60).dimmed());
                print!("{content}");
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    Ok(())
}

/// Run in watch mode.
fn run_watch_mode(schema_path: &Path, config: &Config, dry_run: bool) -> CliResult<()> {
    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", schema_path.display());
    println!("  Press Ctrl+C to stop\n");

    // Initial generation
    run_generate(schema_path, config, dry_run)?;

    let watcher = SchemaWatcher::new(schema_path);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if event.is_error() {
            println!(
                "{} {}",
                "Watch error:".red(),
                event.error_message().unwrap_or("Unknown error")
            );
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "Schema changed:".cyan(), path.display());
        }

        if let Err(e) = run_generate(schema_path, config, dry_run) {
            println!("{} {}", "Generation error:".red(), e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> CliResult<()> {
    if output.exists() && !force {
        println!(
            "{} Configuration file already exists: {}",
            "Error:".red(),
            output.display()
        );
        println!("  Use --force to overwrite");
        return Err(CliError::Validation(
            "Configuration file already exists".to_string(),
        ));
    }

    let content = ConfigManager::default_config_content();
    std::fs::write(&output, content)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Validate command implementation.
fn cmd_validate(
    schema: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> CliResult<()> {
    println!("{}", "Validating generated files...".cyan());

    let config = load_config(config_path.as_deref(), output)?;

    let generator = SchemaGenerator::new(config.clone());
    let generated = generator.generate(&schema)?;

    let mut stale = Vec::new();
    for file in &generated.files {
        let path = config.output.dir.join(&file.file_name);
        match std::fs::read_to_string(&path) {
            Ok(existing) if existing == file.content => {}
            _ => stale.push(file.file_name.clone()),
        }
    }

    if stale.is_empty() {
        println!("{} Generated files are up-to-date", "✓".green());
        Ok(())
    } else {
        println!("{} {} file(s) out of date:", "✗".red(), stale.len());
        for name in &stale {
            println!("  {name}");
        }
        println!("  Run 'zodgen generate' to update");
        Err(CliError::Validation(format!(
            "{} generated file(s) are out of date",
            stale.len()
        )))
    }
}

/// Load configuration and apply CLI overrides.
fn load_config(config_path: Option<&Path>, output: Option<PathBuf>) -> CliResult<Config> {
    let config = ConfigManager::load(config_path)?;
    Ok(ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            output,
            ..Default::default()
        },
    ))
}
