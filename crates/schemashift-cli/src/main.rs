use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use schemashift_core::{Config, DatabaseSchema, Dialect, Report, Severity};
use schemashift_engine::{ComparisonWriter, SchemaComparer};
use schemashift_sqlgen::DialectProfile;

const DEFAULT_CONFIG: &str = "schemashift.toml";

/// SchemaShift - Schema comparison and migration scripts
#[derive(Parser)]
#[command(name = "schemashift")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: schemashift.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the migration script turning BASE into TARGET
    Compare {
        /// Snapshot of the current database (JSON)
        base: PathBuf,

        /// Snapshot of the desired database (JSON)
        target: PathBuf,

        /// Target dialect (overrides the config file)
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Write the script to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write report.json
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Generate the script creating SCHEMA from scratch
    Create {
        /// Snapshot to create (JSON)
        schema: PathBuf,

        /// Target dialect (overrides the config file)
        #[arg(short, long)]
        dialect: Option<Dialect>,

        /// Write the script to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported dialects and what they can alter
    Dialects,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.verbose)?;

    if cli.verbose {
        eprintln!("{} dialect: {}", "Using".cyan(), config.dialect);
    }

    let has_errors = match cli.command {
        Commands::Compare { base, target, dialect, output, report } => {
            compare_command(&config, &base, &target, dialect, output.as_deref(), report.as_deref(), cli.verbose)?
        }
        Commands::Create { schema, dialect, output } => {
            create_command(&config, &schema, dialect, output.as_deref(), cli.verbose)?
        }
        Commands::Dialects => {
            dialects_command();
            false
        }
    };

    // Exit with error code if there are errors
    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr; stdout carries the script
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Explicit config, else `schemashift.toml` in the working directory, else defaults
fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG);
    if default_path.exists() {
        return Config::from_file(default_path)
            .with_context(|| format!("Failed to load config from {}", default_path.display()));
    }

    if verbose {
        eprintln!("{}", "No config file found, using defaults".yellow());
    }
    Ok(Config::default())
}

fn load_snapshot(path: &Path, verbose: bool) -> Result<DatabaseSchema> {
    if verbose {
        eprintln!("{} {}", "Loading snapshot from:".cyan(), path.display());
    }

    DatabaseSchema::from_file(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))
}

/// Comparer for the config, with the command line dialect taking precedence
fn build_comparer(config: &Config, dialect: Option<Dialect>) -> SchemaComparer {
    match dialect {
        Some(dialect) => SchemaComparer::from_config(&Config { dialect, ..config.clone() }),
        None => SchemaComparer::from_config(config),
    }
}

/// Compare command - migration script between two snapshots
fn compare_command(
    config: &Config,
    base_path: &Path,
    target_path: &Path,
    dialect: Option<Dialect>,
    output: Option<&Path>,
    report_path: Option<&Path>,
    verbose: bool,
) -> Result<bool> {
    let base = load_snapshot(base_path, verbose)?;
    let target = load_snapshot(target_path, verbose)?;
    let comparer = build_comparer(config, dialect);

    if verbose {
        eprintln!("{} {}", "Comparing for".cyan(), comparer.dialect());
    }

    let results = comparer
        .compare(&base, &target)
        .context("Schema model is invalid; no script was generated")?;
    let script = ComparisonWriter::from_config(&config.output).write(&results);

    emit_script(&script, output, verbose)?;

    let report = Report::new(comparer.dialect(), results, &script);
    if let Some(path) = report_path {
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        if verbose {
            eprintln!("{} {}", "Report saved to:".green(), path.display());
        }
    }

    print_report_summary(&report);
    Ok(report.has_errors())
}

/// Create command - full creation script for one snapshot
fn create_command(
    config: &Config,
    schema_path: &Path,
    dialect: Option<Dialect>,
    output: Option<&Path>,
    verbose: bool,
) -> Result<bool> {
    let schema = load_snapshot(schema_path, verbose)?;
    let comparer = build_comparer(config, dialect);

    let results = comparer
        .create(&schema)
        .context("Schema model is invalid; no script was generated")?;
    let script = ComparisonWriter::from_config(&config.output).write(&results);

    emit_script(&script, output, verbose)?;

    let report = Report::new(comparer.dialect(), results, &script);
    print_report_summary(&report);
    Ok(report.has_errors())
}

/// Dialects command - capability table
fn dialects_command() {
    let yes_no = |supported: bool| if supported { "yes".green() } else { "no".red() };

    println!("{}", "Supported dialects:".bold());
    println!();

    for dialect in Dialect::ALL {
        let profile = DialectProfile::for_dialect(dialect);

        println!("  {} ({})", dialect.as_str().bold(), dialect);
        println!("    Sequences:           {}", yes_no(profile.supports_sequences));
        println!("    Routines:            {}", yes_no(profile.supports_routines));
        println!("    ALTER constraints:   {}", yes_no(profile.supports_alter_constraints));
        println!("    Named defaults:      {}", yes_no(profile.named_default_constraints));
        println!();
    }
}

fn emit_script(script: &str, output: Option<&Path>, verbose: bool) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, script)
                .with_context(|| format!("Failed to write script to {}", path.display()))?;
            if verbose {
                eprintln!("{} {}", "Script written to:".green(), path.display());
            }
        }
        None => print!("{}", script),
    }
    Ok(())
}

/// Summary on stderr so a piped script stays clean
fn print_report_summary(report: &Report) {
    eprintln!("\n{}", "=".repeat(60).bright_blue());
    eprintln!("{}", "Schema Comparison Report".bold().bright_blue());
    eprintln!("{}", "=".repeat(60).bright_blue());
    eprintln!();

    eprintln!("Dialect:  {}", report.dialect);
    eprintln!("Checksum: {}", report.checksum);
    eprintln!();

    eprintln!("{}", "Summary:".bold());
    eprintln!("  Added:    {}", report.summary.added);
    eprintln!("  Dropped:  {}", report.summary.deleted);
    eprintln!("  Changed:  {}", report.summary.changed);

    if report.summary.errors > 0 {
        eprintln!("  Errors:   {}", format!("{}", report.summary.errors).red().bold());
    } else {
        eprintln!("  Errors:   {}", format!("{}", report.summary.errors).green());
    }

    if report.summary.warnings > 0 {
        eprintln!("  Warnings: {}", format!("{}", report.summary.warnings).yellow());
    } else {
        eprintln!("  Warnings: {}", format!("{}", report.summary.warnings).green());
    }
    eprintln!();

    if !report.has_changes() {
        eprintln!("{}", "✓ Schemas are identical".green().bold());
        return;
    }

    let diagnostics: Vec<_> = report.results.iter().flat_map(|r| &r.diagnostics).collect();
    if diagnostics.is_empty() {
        return;
    }

    eprintln!("{}", "Diagnostics:".bold());
    for diag in diagnostics {
        let severity_str = match diag.severity {
            Severity::Error => "ERROR".red().bold(),
            Severity::Warn => "WARN".yellow().bold(),
            Severity::Info => "INFO".cyan(),
        };

        eprintln!("  [{}] {}: {}", severity_str, diag.code, diag.message);
        if let Some(object) = &diag.object {
            eprintln!("    at {}", object);
        }
    }
}
