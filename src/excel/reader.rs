//! Spreadsheet reader - workbook (.xlsx/.xls/.ods) → worksheet grid

use crate::error::{ConvertError, ConvertResult};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader};
use chrono::NaiveTime;
use serde_json::{Number, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest float that still maps onto an exact integer
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// One worksheet read fully into memory, addressed by absolute 1-based rows
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    range: Range<Data>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, range: Range<Data>) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the sheet has no used cells at all
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// 1-based index of the last used row (0 for an empty sheet)
    pub fn last_row(&self) -> u32 {
        self.range.end().map(|(row, _)| row + 1).unwrap_or(0)
    }

    /// Number of columns from A up to the last used column
    pub fn width(&self) -> u32 {
        self.range.end().map(|(_, col)| col + 1).unwrap_or(0)
    }

    /// Cells of 1-based `row`, from column A through `width()`.
    ///
    /// Cells outside the used range (leading blank columns/rows) come back as `None`.
    pub fn row(&self, row: u32) -> impl Iterator<Item = Option<&Data>> + '_ {
        let abs_row = row.saturating_sub(1);
        (0..self.width()).map(move |col| self.range.get_value((abs_row, col)))
    }
}

/// Spreadsheet reader bound to one input path
pub struct SpreadsheetReader {
    path: PathBuf,
}

impl SpreadsheetReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open the workbook and load one worksheet.
    ///
    /// `sheet` must match a sheet name exactly; `None` picks the first sheet.
    /// The workbook handle is dropped before this returns.
    pub fn read_sheet(&self, sheet: Option<&str>) -> ConvertResult<Worksheet> {
        let mut workbook =
            open_workbook_auto(&self.path).map_err(|e| ConvertError::DocumentOpen {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        let sheet_names = workbook.sheet_names();
        debug!(path = %self.path.display(), sheets = ?sheet_names, "opened workbook");

        let name = resolve_sheet_name(&sheet_names, sheet)?;

        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ConvertError::DocumentOpen {
                path: self.path.clone(),
                message: format!("cannot read sheet '{}': {}", name, e),
            })?;

        debug!(sheet = %name, size = ?range.get_size(), "loaded worksheet");
        Ok(Worksheet::new(name, range))
    }
}

/// Pick the sheet to convert from the workbook's sheet list
pub fn resolve_sheet_name(available: &[String], requested: Option<&str>) -> ConvertResult<String> {
    match requested {
        Some(name) => available
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| ConvertError::UnknownSheet {
                name: name.to_string(),
                available: available.to_vec(),
            }),
        None => available
            .first()
            .cloned()
            .ok_or_else(|| ConvertError::UnknownSheet {
                name: String::new(),
                available: Vec::new(),
            }),
    }
}

/// Convert a data cell to its output value (blank → `""`)
pub fn cell_value(cell: Option<&Data>) -> Value {
    match cell {
        None | Some(Data::Empty) => Value::String(String::new()),
        Some(Data::String(s)) => Value::String(s.clone()),
        Some(Data::Int(i)) => Value::Number((*i).into()),
        Some(Data::Float(f)) => float_value(*f),
        Some(Data::Bool(b)) => Value::Bool(*b),
        Some(Data::DateTime(dt)) => Value::String(render_datetime(dt)),
        Some(Data::DateTimeIso(s)) => Value::String(s.clone()),
        Some(Data::DurationIso(s)) => Value::String(s.clone()),
        Some(Data::Error(e)) => Value::String(e.to_string()),
    }
}

/// Header text for a cell, `None` when the cell is blank
pub fn header_text(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_float(*f)),
        Data::Bool(true) => Some("TRUE".to_string()),
        Data::Bool(false) => Some("FALSE".to_string()),
        Data::DateTime(dt) => Some(render_datetime(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(e.to_string()),
    }
}

fn float_value(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT {
        Value::Number((f as i64).into())
    } else {
        // NaN/inf have no JSON form
        Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string()))
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

fn render_datetime(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return format_elapsed(dt.as_f64());
    }
    match dt.as_datetime() {
        Some(datetime) if datetime.time() == NaiveTime::MIN => datetime.date().to_string(),
        Some(datetime) => datetime.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => format_float(dt.as_f64()),
    }
}

/// Elapsed time in days → `[-]HH:MM:SS`, hours not wrapped at 24
fn format_elapsed(days: f64) -> String {
    let total = (days * 86_400.0).round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let secs = total.abs();
    format!(
        "{sign}{:02}:{:02}:{:02}",
        secs / 3_600,
        secs % 3_600 / 60,
        secs % 60
    )
}
