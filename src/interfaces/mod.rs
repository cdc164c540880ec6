//! Adapters between the outside world and the application layer.

pub mod csv;
pub mod json;

use crate::application::request::RequestSummary;
use crate::error::{CieloError, Result};
use std::io::Write;
use std::str::FromStr;

/// Destination for validated request summaries.
pub trait SummarySink {
    fn write(&mut self, summary: &RequestSummary) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

pub type SummarySinkBox<'a> = Box<dyn SummarySink + 'a>;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn sink<'a, W: Write + 'a>(self, writer: W) -> SummarySinkBox<'a> {
        match self {
            OutputFormat::Csv => Box::new(csv::summary_writer::CsvSummaryWriter::new(writer)),
            OutputFormat::Json => Box::new(json::summary_writer::JsonSummaryWriter::new(writer)),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CieloError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(CieloError::invalid(format!("Unknown output format '{value}'"))),
        }
    }
}
