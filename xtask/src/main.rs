// SPDX-License-Identifier: MIT OR Apache-2.0
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use errman_config::{RegistryConfig, load_config, validate_config};
use errman_core::{ErrorDescriptor, ErrorObject};
use errman_registry::GlobalRegistry;
use schemars::schema_for;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "xtask", version, about = "Repo maintenance tasks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate JSON Schemas for the serialisable error types.
    Schema {
        /// Output directory.
        #[arg(long, default_value = "contracts/schemas")]
        out_dir: PathBuf,
    },
    /// Print every code known to the global registry.
    ///
    /// Without `--errors` only the built-in codes are listed.
    Catalog {
        /// Registry config applied before registration.
        #[arg(long)]
        config: Option<PathBuf>,
        /// JSON file mapping member names to descriptors; repeatable.
        #[arg(long = "errors", value_name = "FILE")]
        errors: Vec<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Load a registry config file and report advisory warnings.
    CheckConfig {
        /// Path to the TOML file.
        path: PathBuf,
        /// Exit with an error if any warning is reported.
        #[arg(long)]
        deny_warnings: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Schema { out_dir } => schema(out_dir),
        Command::Catalog {
            config,
            errors,
            format,
        } => catalog(config.as_deref(), &errors, format),
        Command::CheckConfig {
            path,
            deny_warnings,
        } => check_config(&path, deny_warnings),
    }
}

fn schema(out_dir: PathBuf) -> Result<()> {
    std::fs::create_dir_all(&out_dir).context("create schema output dir")?;

    let descriptor = schema_for!(ErrorDescriptor);
    let object = schema_for!(ErrorObject);
    let config = schema_for!(RegistryConfig);

    write_schema(&out_dir.join("error_descriptor.schema.json"), &descriptor)?;
    write_schema(&out_dir.join("error_object.schema.json"), &object)?;
    write_schema(&out_dir.join("registry_config.schema.json"), &config)?;

    eprintln!("wrote schemas to {}", out_dir.display());
    Ok(())
}

fn write_schema(path: &Path, schema: &schemars::Schema) -> Result<()> {
    let s = serde_json::to_string_pretty(schema)?;
    std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn catalog(config: Option<&Path>, error_files: &[PathBuf], format: Format) -> Result<()> {
    let registry = GlobalRegistry::global();
    registry.configure(load_config(config).context("load registry config")?);
    for path in error_files {
        register_file(registry, path)?;
    }

    let entries = registry.catalog();
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        Format::Table => {
            let width = entries.iter().map(|e| e.error.len()).max().unwrap_or(0);
            for entry in &entries {
                println!("{:<width$}  {}", entry.error, entry.description);
            }
        }
    }
    Ok(())
}

/// Register every `name -> descriptor` entry of a JSON file, in name order.
fn register_file(registry: &GlobalRegistry, path: &Path) -> Result<()> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let entries: BTreeMap<String, ErrorDescriptor> =
        serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    for (key, error) in &entries {
        registry
            .register_error(key, error)
            .with_context(|| format!("register `{key}` from {}", path.display()))?;
    }
    Ok(())
}

fn check_config(path: &Path, deny_warnings: bool) -> Result<()> {
    let config = load_config(Some(path)).with_context(|| format!("load {}", path.display()))?;
    let warnings = validate_config(&config);
    println!(
        "duplicate_policy = {}, trace_lookups = {}",
        config.duplicate_policy, config.trace_lookups
    );
    for warning in &warnings {
        println!("warning: {warning}");
    }
    if deny_warnings && !warnings.is_empty() {
        bail!("{} warning(s) reported", warnings.len());
    }
    Ok(())
}
