use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

//==============================================================================
// Output Format
//==============================================================================

/// Text format the dataset is written in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of objects (honours the indent setting)
    #[default]
    Json,
    /// YAML sequence of mappings (fixed two-space layout)
    Yaml,
}

impl OutputFormat {
    /// File extension used when the output path is derived from the input
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

//==============================================================================
// Header Row
//==============================================================================

/// Field names taken from one worksheet row, one per column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderRow {
    names: Vec<String>,
}

impl HeaderRow {
    /// Build a header row from raw cell texts.
    ///
    /// `None` (or an empty string) at 0-based position `i` becomes
    /// `column{i + 1}`. Repeated names get a `_2`, `_3`, ... suffix so that
    /// every record keeps one key per column.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let raw: Vec<String> = cells
            .into_iter()
            .enumerate()
            .map(|(idx, cell)| match cell {
                Some(text) if !text.is_empty() => text,
                _ => placeholder(idx),
            })
            .collect();

        let mut taken: HashSet<String> = HashSet::with_capacity(raw.len());
        let mut names = Vec::with_capacity(raw.len());
        for name in raw {
            if taken.insert(name.clone()) {
                names.push(name);
                continue;
            }
            let mut n = 2;
            let unique = loop {
                let candidate = format!("{}_{}", name, n);
                if !taken.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            };
            taken.insert(unique.clone());
            names.push(unique);
        }

        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Pair this header with one data row.
    ///
    /// Cells past the header width are dropped; missing cells become `""`.
    pub fn zip_row<I>(&self, cells: I) -> Record
    where
        I: IntoIterator<Item = Value>,
    {
        let mut cells = cells.into_iter();
        let mut fields = Map::with_capacity(self.names.len());
        for name in &self.names {
            let value = cells.next().unwrap_or_else(|| Value::String(String::new()));
            fields.insert(name.clone(), value);
        }
        Record(fields)
    }
}

/// Placeholder name for a blank header cell at 0-based column `idx`
pub fn placeholder(idx: usize) -> String {
    format!("column{}", idx + 1)
}

//==============================================================================
// Record / Dataset
//==============================================================================

/// One data row keyed by header name, in header order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// All records of one worksheet, in row order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
