//! Sheet2JSON - spreadsheet worksheet to JSON records
//!
//! Reads one worksheet from an .xlsx/.xls/.ods file, takes a configurable
//! row as column headers and writes every following row as one record.
//!
//! # Example
//!
//! ```no_run
//! use sheet2json::converter::{convert, ConvertOptions};
//!
//! let options = ConvertOptions::new("people.xlsx").sheet("Staff").indent(Some(2));
//! let report = convert(&options)?;
//!
//! println!("Headers: {:?}", report.headers.names());
//! println!("Records: {}", report.records);
//! # Ok::<(), sheet2json::error::ConvertError>(())
//! ```

pub mod cli;
pub mod converter;
pub mod error;
pub mod excel;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use converter::{convert, ConvertOptions, ConvertReport};
pub use error::{ConvertError, ConvertResult};
pub use types::{Dataset, HeaderRow, OutputFormat, Record};
