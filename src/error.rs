use std::path::PathBuf;
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to open spreadsheet '{}': {message}", .path.display())]
    DocumentOpen { path: PathBuf, message: String },

    #[error("Sheet '{name}' not found. Available sheets: {}", .available.join(", "))]
    UnknownSheet {
        name: String,
        available: Vec<String>,
    },

    #[error("The worksheet '{sheet}' is empty")]
    EmptyWorksheet { sheet: String },

    #[error("Header row {row} is outside the worksheet (last used row is {last_row})")]
    HeaderRowOutOfRange { row: u32, last_row: u32 },

    #[error("Failed to write '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        ConvertError::Serialize(e.to_string())
    }
}

impl From<serde_yaml::Error> for ConvertError {
    fn from(e: serde_yaml::Error) -> Self {
        ConvertError::Serialize(e.to_string())
    }
}
