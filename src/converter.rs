//! Worksheet → record list conversion pipeline

use crate::error::{ConvertError, ConvertResult};
use crate::excel::{cell_value, header_text, SpreadsheetReader, Worksheet};
use crate::types::{Dataset, HeaderRow, OutputFormat};
use crate::writer;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default indentation width for JSON output
pub const DEFAULT_INDENT: usize = 4;

/// Default 1-based header row
pub const DEFAULT_HEADER_ROW: u32 = 1;

/// Settings for one conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    /// Destination; derived from `input` when `None`
    pub output: Option<PathBuf>,
    /// Exact sheet name; first sheet when `None`
    pub sheet: Option<String>,
    /// Spaces per level; `None` for compact output
    pub indent: Option<usize>,
    /// 1-based row holding the column names
    pub header_row: u32,
    pub format: OutputFormat,
}

impl ConvertOptions {
    pub fn new<P: AsRef<Path>>(input: P) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: None,
            sheet: None,
            indent: Some(DEFAULT_INDENT),
            header_row: DEFAULT_HEADER_ROW,
            format: OutputFormat::Json,
        }
    }

    pub fn output<P: AsRef<Path>>(mut self, output: P) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    pub fn indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    pub fn header_row(mut self, header_row: u32) -> Self {
        self.header_row = header_row;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Final output path (explicit, or input with the format's extension)
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| writer::default_output_path(&self.input, self.format))
    }
}

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sheet: String,
    pub header_row: u32,
    pub headers: HeaderRow,
    pub records: usize,
}

/// Worksheet contents split into header and records
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub headers: HeaderRow,
    pub dataset: Dataset,
}

/// Read one worksheet and write its rows as records.
///
/// Nothing is written unless every earlier step succeeded.
pub fn convert(options: &ConvertOptions) -> ConvertResult<ConvertReport> {
    info!(input = %options.input.display(), "converting");

    let worksheet = SpreadsheetReader::new(&options.input).read_sheet(options.sheet.as_deref())?;
    let Extracted { headers, dataset } = extract(&worksheet, options.header_row)?;

    let output = options.output_path();
    let contents = writer::render(&dataset, options.format, options.indent)?;
    writer::write_output(&output, &contents)?;

    info!(
        output = %output.display(),
        records = dataset.len(),
        "conversion complete"
    );

    Ok(ConvertReport {
        input: options.input.clone(),
        output,
        sheet: worksheet.name().to_string(),
        header_row: options.header_row,
        headers,
        records: dataset.len(),
    })
}

/// Build the header row and the records below it
pub fn extract(worksheet: &Worksheet, header_row: u32) -> ConvertResult<Extracted> {
    if worksheet.is_empty() {
        return Err(ConvertError::EmptyWorksheet {
            sheet: worksheet.name().to_string(),
        });
    }

    let last_row = worksheet.last_row();
    if header_row == 0 || header_row > last_row {
        return Err(ConvertError::HeaderRowOutOfRange {
            row: header_row,
            last_row,
        });
    }

    let headers = HeaderRow::from_cells(worksheet.row(header_row).map(header_text));
    debug!(row = header_row, headers = ?headers.names(), "read header row");

    let dataset: Dataset = (header_row + 1..=last_row)
        .map(|row| headers.zip_row(worksheet.row(row).map(cell_value)))
        .collect();
    debug!(records = dataset.len(), "collected records");

    Ok(Extracted { headers, dataset })
}
