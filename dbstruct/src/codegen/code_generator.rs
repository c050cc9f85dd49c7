//! Main code generator orchestrator

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::DbStructConfig;
use crate::error::{DbStructError, Result};
use crate::schema::{fetch_schema, SchemaSource, TableSchema};

use super::output::{CommandFormatter, Formatter, FsSink, NoopFormatter, OutputFile, OutputSink};
use super::struct_generator::{file_header, render_struct, RenderContext, RenderedStruct};

/// Summary of a finished generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Number of tables rendered
    pub tables: usize,
    /// Files written (or planned, in dry-run mode), in output order
    pub files: Vec<PathBuf>,
    /// Wall time of the whole run
    pub elapsed: Duration,
}

/// Main code generator that drives schema reading, rendering and writing
pub struct CodeGenerator<'a> {
    config: &'a DbStructConfig,
    sink: Arc<dyn OutputSink>,
    formatter: Arc<dyn Formatter>,
}

impl<'a> CodeGenerator<'a> {
    /// Create a generator writing to the filesystem and formatting with
    /// the configured formatter command
    pub fn new(config: &'a DbStructConfig) -> Self {
        let formatter: Arc<dyn Formatter> = if config.formatter.trim().is_empty() {
            Arc::new(NoopFormatter)
        } else {
            Arc::new(CommandFormatter::new(config.formatter.trim()))
        };
        Self {
            config,
            sink: Arc::new(FsSink),
            formatter,
        }
    }

    /// Replace the output sink
    pub fn with_sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the formatter
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Run the whole pipeline against `source`
    pub async fn generate<S: SchemaSource + ?Sized>(&self, source: &S) -> Result<GenerationReport> {
        let started = Instant::now();
        self.config.validate()?;

        let ctx = Arc::new(RenderContext::from_config(self.config));
        debug!(
            "Tags: {:?}",
            ctx.tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>()
        );

        let schema = fetch_schema(source, &self.config.tables).await?;
        info!("Found {} tables", schema.len());
        if schema.is_empty() {
            warn!("No tables matched, nothing to generate");
        }
        let tables = schema.len();

        let rendered = render_all(schema, ctx).await?;
        check_collisions(&rendered, self.config.single_file)?;

        let files = assemble(&rendered, self.config);
        let paths: Vec<PathBuf> = files.iter().map(|f| f.path.clone()).collect();

        if self.config.dry_run {
            for path in &paths {
                info!("Dry run, would write {}", path.display());
            }
        } else {
            self.write_all(files).await?;
        }

        let elapsed = started.elapsed();
        info!(
            "Generated {} structs into {} files in {} ms",
            tables,
            paths.len(),
            elapsed.as_millis()
        );

        Ok(GenerationReport {
            tables,
            files: paths,
            elapsed,
        })
    }

    /// Write every file on its own blocking task, then format it.
    ///
    /// The first failed write fails the whole run.
    async fn write_all(&self, files: Vec<OutputFile>) -> Result<()> {
        let dirs: BTreeSet<PathBuf> = files
            .iter()
            .filter_map(|f| f.path.parent().map(|p| p.to_path_buf()))
            .collect();
        for dir in &dirs {
            self.sink.create_dir_all(dir)?;
        }

        let mut set = JoinSet::new();
        for file in files {
            let sink = Arc::clone(&self.sink);
            let formatter = Arc::clone(&self.formatter);
            set.spawn_blocking(move || -> Result<()> {
                sink.write_file(&file.path, &file.contents)?;
                debug!("Wrote {}", file.path.display());
                if let Err(e) = formatter.format(&file.path) {
                    debug!("Formatting {} skipped: {}", file.path.display(), e);
                }
                Ok(())
            });
        }

        while let Some(joined) = set.join_next().await {
            joined??;
        }
        Ok(())
    }
}

/// Render every table concurrently, one task per table.
///
/// Results are returned sorted by table name regardless of completion order.
pub async fn render_all(
    schema: TableSchema,
    ctx: Arc<RenderContext>,
) -> Result<Vec<RenderedStruct>> {
    let mut set = JoinSet::new();
    for (table, columns) in schema {
        let ctx = Arc::clone(&ctx);
        set.spawn(async move { render_struct(&table, &columns, &ctx) });
    }

    let mut rendered = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        rendered.push(joined??);
    }

    rendered.sort_by(|a, b| a.table_name.cmp(&b.table_name));
    Ok(rendered)
}

/// Fail when two tables map to the same struct name, or to the same file
/// name in multi-file mode
pub fn check_collisions(rendered: &[RenderedStruct], single_file: bool) -> Result<()> {
    let mut type_names: HashMap<&str, &str> = HashMap::new();
    let mut file_names: HashMap<&str, &str> = HashMap::new();

    for item in rendered {
        if let Some(first) = type_names.insert(&item.type_name, &item.table_name) {
            return Err(DbStructError::NameCollision {
                name: item.type_name.clone(),
                first: first.to_string(),
                second: item.table_name.clone(),
            });
        }
        if !single_file {
            if let Some(first) = file_names.insert(&item.file_name, &item.table_name) {
                return Err(DbStructError::NameCollision {
                    name: item.file_name.clone(),
                    first: first.to_string(),
                    second: item.table_name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Lay rendered structs out into output files
pub fn assemble(rendered: &[RenderedStruct], config: &DbStructConfig) -> Vec<OutputFile> {
    let output_path = config.resolved_output_path();

    if config.single_file {
        let needs_time_import = rendered.iter().any(|r| r.needs_time_import);
        let mut contents = file_header(&config.package_name, needs_time_import);
        let bodies: Vec<&str> = rendered.iter().map(|r| r.body.as_str()).collect();
        contents.push_str(&bodies.join("\n\n"));

        vec![OutputFile {
            path: output_path,
            contents,
        }]
    } else {
        rendered
            .iter()
            .map(|r| OutputFile {
                path: output_path.join(&r.file_name),
                contents: r.to_file_contents(&config.package_name),
            })
            .collect()
    }
}
