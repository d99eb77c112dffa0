//! CLI runner - executes commands

use crate::analyze::{analyze_structure, render_summary};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::AppConfig;
use crate::error::{Error, Result, ResultExt};
use crate::ingest::{parse_json, Ingestor, Upload};
use crate::merge::{merge, MergeStrategy};
use crate::outline::outline;
use crate::select::{
    file_extension, format_file_size, select_store, select_store_for_batch, FileCategory,
    FileDescriptor,
};
use crate::store::StoreRegistry;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Write as _;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its output
    pub async fn run(&self) -> Result<()> {
        let output = self.execute().await?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }

    /// Run the CLI command and return what it would print
    pub async fn execute(&self) -> Result<String> {
        let config = AppConfig::load(self.cli.config.as_deref())?;

        match &self.cli.command {
            Commands::Analyze { file } => self.analyze(file).await,
            Commands::Select { file, mime } => self.select(&config, file, mime.as_deref()).await,
            Commands::Batch { files } => self.batch(&config, files).await,
            Commands::Outline { file } => self.outline(file).await,
            Commands::Merge {
                first,
                second,
                strategy,
                output,
            } => {
                self.merge(first, second, strategy, output.as_deref())
                    .await
            }
            Commands::Ingest {
                files,
                tags,
                batch,
            } => self.ingest(&config, files, tags.as_deref(), *batch).await,
        }
    }

    async fn analyze(&self, file: &Path) -> Result<String> {
        let value = read_json(file).await?;
        let analysis = analyze_structure(&value);

        match self.cli.format {
            OutputFormat::Json => to_json(&analysis),
            OutputFormat::Pretty => Ok(render_summary(&analysis)),
        }
    }

    async fn select(&self, config: &AppConfig, file: &Path, mime: Option<&str>) -> Result<String> {
        let descriptor = describe(file, mime, config).await?;
        let target = select_store(&descriptor, config.select_options());

        match self.cli.format {
            OutputFormat::Json => to_json(&json!({
                "file": descriptor.filename,
                "category": descriptor.category(),
                "size": descriptor.size_bytes,
                "storage": target,
            })),
            OutputFormat::Pretty => Ok(format!(
                "{} ({}, {}) -> {target}",
                descriptor.filename,
                descriptor.category(),
                format_file_size(descriptor.size_bytes)
            )),
        }
    }

    async fn batch(&self, config: &AppConfig, files: &[std::path::PathBuf]) -> Result<String> {
        let mut descriptors = Vec::with_capacity(files.len());
        for file in files {
            let mut descriptor = describe(file, None, config).await?;
            descriptor.content = None;
            descriptors.push(descriptor);
        }
        let target = select_store_for_batch(&descriptors);

        match self.cli.format {
            OutputFormat::Json => to_json(&json!({
                "files": descriptors.len(),
                "storage": target,
            })),
            OutputFormat::Pretty => Ok(format!("{} file(s) -> {target}", descriptors.len())),
        }
    }

    async fn outline(&self, file: &Path) -> Result<String> {
        let value = read_json(file).await?;
        let fields = outline(&value);

        match self.cli.format {
            OutputFormat::Json => to_json(&fields),
            OutputFormat::Pretty => {
                let mut out = String::new();
                for field in &fields {
                    let _ = writeln!(out, "{:<40} {}", field.path, field.type_label);
                }
                Ok(out.trim_end().to_string())
            }
        }
    }

    async fn merge(
        &self,
        first: &Path,
        second: &Path,
        strategy: &str,
        output: Option<&Path>,
    ) -> Result<String> {
        let strategy: MergeStrategy = strategy.parse()?;
        let merged = merge(&read_json(first).await?, &read_json(second).await?, strategy);
        let text = serde_json::to_string_pretty(&merged)?;

        match output {
            Some(path) => {
                tokio::fs::write(path, &text)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::info!("Merged ({strategy}) into {}", path.display());
                Ok(String::new())
            }
            None => Ok(text),
        }
    }

    async fn ingest(
        &self,
        config: &AppConfig,
        files: &[std::path::PathBuf],
        tags: Option<&str>,
        batch: bool,
    ) -> Result<String> {
        let mut tag_list = config.default_tags.clone();
        if let Some(tags) = tags {
            tag_list.extend(
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from),
            );
        }

        let mut uploads = Vec::with_capacity(files.len());
        for file in files {
            let bytes = read_bytes(file).await?;
            let name = file_name(file);
            let mime = guess_mime(&file_extension(&name), config);
            uploads.push(Upload::new(name, mime, bytes).with_tags(tag_list.clone()));
        }

        let ingestor = Ingestor::new(StoreRegistry::in_memory(), config.select_options());
        let records = if batch {
            ingestor.ingest_batch(uploads).await?
        } else {
            let mut records = Vec::with_capacity(uploads.len());
            for upload in uploads {
                records.push(ingestor.ingest(upload).await?);
            }
            records
        };
        let stats = ingestor.registry().stats().await?;

        match self.cli.format {
            OutputFormat::Json => to_json(&json!({ "files": records, "stats": stats })),
            OutputFormat::Pretty => {
                let mut out = String::new();
                for record in &records {
                    let _ = writeln!(
                        out,
                        "{:<8} {:<10} {} ({})",
                        record.id,
                        record.storage.as_str(),
                        record.original_name,
                        format_file_size(record.size_bytes)
                    );
                }
                let _ = write!(
                    out,
                    "relational: {}, document: {}",
                    stats.relational.total, stats.document.total
                );
                Ok(out)
            }
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

async fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::FileNotFound {
            path: path.display().to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

async fn read_json(path: &Path) -> Result<Value> {
    let bytes = read_bytes(path).await?;
    parse_json(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Build a selector descriptor for a file on disk
async fn describe(path: &Path, mime: Option<&str>, config: &AppConfig) -> Result<FileDescriptor> {
    let bytes = read_bytes(path).await?;
    let name = file_name(path);
    let extension = file_extension(&name);
    let mime = mime.map_or_else(|| guess_mime(&extension, config), String::from);

    let mut descriptor = FileDescriptor::new(name, bytes.len() as u64, mime);
    if extension == "json" {
        match parse_json(&bytes) {
            Ok(content) => descriptor.content = Some(content),
            Err(e) => tracing::warn!("Ignoring unparseable JSON in {}: {e}", path.display()),
        }
    }
    Ok(descriptor)
}

/// MIME type for common extensions
fn guess_mime(extension: &str, config: &AppConfig) -> String {
    let mime = match extension {
        "json" => "application/json",
        "xml" => "application/xml",
        "yaml" | "yml" => "application/yaml",
        "sql" => "application/sql",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "mp3" => "audio/mpeg",
        ext => match FileCategory::from_extension(ext) {
            FileCategory::Images => return format!("image/{ext}"),
            FileCategory::Videos => return format!("video/{ext}"),
            FileCategory::Audio => return format!("audio/{ext}"),
            _ => return config.default_mime_type.clone(),
        },
    };
    mime.to_string()
}
