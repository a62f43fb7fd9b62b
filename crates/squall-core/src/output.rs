//! Persisting run reports as JSON or JSON Lines.
//!
//! JSON writes one pretty-printed report per file and replaces what was there.
//! JSON Lines appends one compact report per run, so a single file can keep
//! the history of repeated augmentation runs.

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::types::RunReport;

/// Report file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Pretty-printed JSON object, file overwritten
    #[default]
    Json,
    /// One compact JSON object per line, file appended
    JsonLines,
}

/// Serializes records to any writer in the chosen format.
pub struct ReportWriter<W: Write> {
    writer: W,
    format: ReportFormat,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W, format: ReportFormat) -> Self {
        Self { writer, format }
    }

    /// Write a single record followed by a newline.
    pub fn write<T: Serialize>(&mut self, item: &T) -> Result<()> {
        match self.format {
            ReportFormat::Json => serde_json::to_writer_pretty(&mut self.writer, item)?,
            ReportFormat::JsonLines => serde_json::to_writer(&mut self.writer, item)?,
        }
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the writer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Write a report to `path`, replacing (JSON) or appending to (JSONL) the file.
pub fn save_report(path: &Path, report: &RunReport, format: ReportFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = match format {
        ReportFormat::Json => std::fs::File::create(path)?,
        ReportFormat::JsonLines => OpenOptions::new().create(true).append(true).open(path)?,
    };
    let mut writer = ReportWriter::new(BufWriter::new(file), format);
    writer.write(report)?;
    writer.flush()
}
