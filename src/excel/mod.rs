//! Spreadsheet input module
//!
//! Opens a workbook with calamine (format auto-detected from the file),
//! picks one worksheet and maps its cells to JSON values.

mod reader;

pub use reader::{cell_value, header_text, resolve_sheet_name, SpreadsheetReader, Worksheet};
