//! CLI entry point for dbstruct

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dbstruct::codegen::TypeMapper;
use dbstruct::config::{DbStructConfig, Tag};
use dbstruct::schema::{fetch_schema, MySqlSchemaSource};
use dbstruct::CasingMode;

#[derive(Parser)]
#[command(name = "dbstruct")]
#[command(about = "Generate Go structs from a live MySQL schema")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MySQL connection URL (overrides config)
    #[arg(short, long)]
    dsn: Option<String>,

    /// Table to generate, repeatable (default: all tables)
    #[arg(short, long = "table")]
    tables: Vec<String>,

    /// Output file (with --single-file) or directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Go package name
    #[arg(short, long)]
    package: Option<String>,

    /// Merge all structs into one file
    #[arg(long)]
    single_file: bool,

    /// Add a `json` tag with the raw column name
    #[arg(long)]
    json_tag: bool,

    /// Add an `orm` tag with the raw column name
    #[arg(long)]
    orm_tag: bool,

    /// Custom tag as `name` or `name:casing`, repeatable
    #[arg(long = "tag")]
    tags: Vec<Tag>,

    /// Casing for field names
    #[arg(long)]
    field_case: Option<CasingMode>,

    /// Casing for struct names
    #[arg(long)]
    struct_case: Option<CasingMode>,

    /// Casing for file names
    #[arg(long)]
    file_case: Option<CasingMode>,

    /// Generate a method with this name returning the table name
    #[arg(long)]
    table_name_method: Option<String>,

    /// Generate the table-name method
    #[arg(long)]
    table_name_func: bool,

    /// Suffix for struct names
    #[arg(long)]
    struct_suffix: Option<String>,

    /// Suffix for file names
    #[arg(long)]
    file_suffix: Option<String>,

    /// Do not emit column comments
    #[arg(long)]
    no_comments: bool,

    /// Formatter run as `<cmd> -w <file>` ("" disables)
    #[arg(long)]
    formatter: Option<String>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go structs (default)
    Generate,
    /// Inspect schema (show fetched tables and mapped types)
    Inspect {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = match &cli.config {
        Some(path) => DbStructConfig::from_file(path)?,
        None => DbStructConfig::load(None)?,
    };

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let command = cli.command.take().unwrap_or(Commands::Generate);
    apply_overrides(&mut config, cli);

    config.validate()?;

    match command {
        Commands::Inspect { json } => inspect_schema(&config, json).await,
        Commands::Generate => {
            let report = dbstruct::generate(&config).await?;
            if config.dry_run {
                println!("Dry run mode - would generate:");
                for path in &report.files {
                    println!("  {}", path.display());
                }
            }
            info!("Code generation completed successfully");
            Ok(())
        }
    }
}

/// Apply CLI flags on top of the loaded configuration
fn apply_overrides(config: &mut DbStructConfig, cli: Cli) {
    if let Some(dsn) = cli.dsn {
        config.dsn = dsn;
    }
    if !cli.tables.is_empty() {
        config.tables = cli.tables;
    }
    if let Some(output) = cli.output {
        config.output_path = Some(output);
    }
    if let Some(package) = cli.package {
        config.package_name = package;
    }
    if cli.single_file {
        config.single_file = true;
    }
    if cli.json_tag {
        config.tag_json = true;
    }
    if cli.orm_tag {
        config.tag_orm = true;
    }
    config.tags.extend(cli.tags);
    if let Some(mode) = cli.field_case {
        config.field_name_case = mode;
    }
    if let Some(mode) = cli.struct_case {
        config.struct_name_case = mode;
    }
    if let Some(mode) = cli.file_case {
        config.file_name_case = mode;
    }
    if let Some(method) = cli.table_name_method {
        config.table_name_method = method;
        config.table_name_func = true;
    }
    if cli.table_name_func {
        config.table_name_func = true;
    }
    if let Some(suffix) = cli.struct_suffix {
        config.struct_name_suffix = suffix;
    }
    if let Some(suffix) = cli.file_suffix {
        config.file_name_suffix = suffix;
    }
    if cli.no_comments {
        config.skip_comments = true;
    }
    if let Some(formatter) = cli.formatter {
        config.formatter = formatter;
    }
    if cli.dry_run {
        config.dry_run = true;
    }
}

#[derive(Serialize)]
struct InspectedColumn<'a> {
    name: &'a str,
    data_type: &'a str,
    go_type: &'static str,
    nullable: bool,
    comment: &'a str,
}

async fn inspect_schema(config: &DbStructConfig, json: bool) -> Result<()> {
    let source = MySqlSchemaSource::new(config.dsn.clone());
    let schema = fetch_schema(&source, &config.tables).await?;
    source.disconnect().await?;

    if json {
        let view: std::collections::BTreeMap<&str, Vec<InspectedColumn>> = schema
            .iter()
            .map(|(table, columns)| {
                let cols = columns
                    .iter()
                    .map(|c| InspectedColumn {
                        name: &c.name,
                        data_type: &c.data_type,
                        go_type: TypeMapper::map(&c.data_type).as_str(),
                        nullable: c.nullable,
                        comment: &c.comment,
                    })
                    .collect();
                (table.as_str(), cols)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Fetched {} tables:\n", schema.len());
    for (table, columns) in &schema {
        println!("Table: {}", table);
        println!("  Columns:");
        for col in columns {
            let nullable = if col.nullable { "NULL" } else { "NOT NULL" };
            println!(
                "    - {} {} {} -> {}",
                col.name,
                col.data_type,
                nullable,
                TypeMapper::map(&col.data_type).as_str()
            );
            if col.has_comment() {
                println!("      // {}", col.comment);
            }
        }
        println!();
    }

    Ok(())
}
