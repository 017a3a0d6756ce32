//! Report output: format selection, extraction dispatch, and file writing.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use crate::config::default_output_path;
use crate::error::{ExtractorError, Result};
use crate::extract::{
    extract_file, ActivityExtractor, DiagramKind, Extractor, RequirementExtractor,
    UseCaseExtractor,
};
use crate::report::{Render, ReportOptions};

/// Output format of a generated report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable Markdown report.
    #[default]
    Markdown,
    /// Pretty-printed JSON of the extracted model.
    Json,
}

impl OutputFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

/// Render an extracted model in the requested format.
///
/// # Errors
/// [`ExtractorError::Json`] if JSON serialization fails.
pub fn render_model<M>(model: &M, format: OutputFormat, options: &ReportOptions) -> Result<String>
where
    M: Render + Serialize,
{
    match format {
        OutputFormat::Markdown => Ok(model.render(options)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(model)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn extract_and_render<E>(
    extractor: &E,
    input: &Path,
    format: OutputFormat,
    options: &ReportOptions,
) -> Result<String>
where
    E: Extractor,
    E::Model: Render,
{
    let model = extract_file(extractor, input)?;
    render_model(&model, format, options)
}

/// Run the extractor for `kind` over `input` and render the result.
///
/// # Arguments
/// * `kind` - Which diagram extractor to run
/// * `input` - Path to the legacy-encoded XMI export
/// * `format` - Output format
/// * `options` - Report overrides such as the title
///
/// # Returns
/// The rendered report. Nothing is written to disk.
///
/// # Errors
/// Any fatal extraction error, with the input path attached.
pub fn generate(
    kind: DiagramKind,
    input: &Path,
    format: OutputFormat,
    options: &ReportOptions,
) -> Result<String> {
    match kind {
        DiagramKind::UseCase => extract_and_render(&UseCaseExtractor, input, format, options),
        DiagramKind::Activity => extract_and_render(&ActivityExtractor, input, format, options),
        DiagramKind::Requirement => {
            extract_and_render(&RequirementExtractor, input, format, options)
        }
    }
}

/// Default report path for `input`: `<stem>_<suffix>.<ext>` beside the input.
#[must_use]
pub fn report_path(kind: DiagramKind, input: &Path, format: OutputFormat) -> PathBuf {
    default_output_path(input, kind.output_suffix(), format.extension())
}

/// Write a rendered report as UTF-8.
///
/// Writes to a temporary sibling file, syncs, then renames over the target so
/// a failed run never leaves a truncated report behind.
///
/// # Errors
/// [`ExtractorError::Io`] if the file cannot be written.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    let io_err = |source: std::io::Error| ExtractorError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    if let Err(source) = replace_with_temp(path, &temp_file, content) {
        // Best-effort cleanup
        let _ = fs::remove_file(&temp_file);
        return Err(io_err(source));
    }
    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote report");
    Ok(())
}

fn replace_with_temp(path: &Path, temp_file: &Path, content: &str) -> std::io::Result<()> {
    {
        let mut file = File::create(temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(temp_file, path)
}
