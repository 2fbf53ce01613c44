//! Report output as JSON or JSON Lines.
//!
//! JSON Lines entries are written as they arrive. JSON entries are held
//! until [`ReportWriter::finish`] so a batch comes out as one array, while a
//! single entry comes out as a bare object.

use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::PixmetaError;
use crate::types::ImageReport;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single JSON object or array
    Json,
    /// One JSON object per line
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// One line of output: a report, or the reason a file couldn't be read.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReportEntry {
    Report(Box<ImageReport>),
    Failed { file_path: PathBuf, error: String },
}

impl ReportEntry {
    pub fn failed(file_path: impl Into<PathBuf>, error: &PixmetaError) -> Self {
        Self::Failed {
            file_path: file_path.into(),
            error: error.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<ImageReport> for ReportEntry {
    fn from(report: ImageReport) -> Self {
        Self::Report(Box::new(report))
    }
}

/// Serializes [`ReportEntry`] values to a writer.
pub struct ReportWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    pending: Vec<ReportEntry>,
    written: usize,
    failures: usize,
}

impl<W: Write> ReportWriter<W> {
    /// `pretty` only affects JSON; JSON Lines is always one object per line.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            pending: Vec::new(),
            written: 0,
            failures: 0,
        }
    }

    pub fn write(&mut self, entry: ReportEntry) -> io::Result<()> {
        if entry.is_failure() {
            self.failures += 1;
        }
        match self.format {
            OutputFormat::Json => self.pending.push(entry),
            OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, &entry).map_err(io::Error::other)?;
                writeln!(self.writer)?;
                self.written += 1;
            }
        }
        Ok(())
    }

    /// Emit anything held back and flush. Returns the number of entries written.
    pub fn finish(mut self) -> io::Result<usize> {
        if self.format == OutputFormat::Json && !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            if pending.len() == 1 {
                self.write_json(&pending[0])?;
            } else {
                self.write_json(&pending)?;
            }
            self.written += pending.len();
        }
        self.writer.flush()?;
        Ok(self.written)
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, value).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, value).map_err(io::Error::other)?;
        }
        writeln!(self.writer)
    }
}
