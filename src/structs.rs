use log::{Log, Metadata, Record as LogRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple logger implementation
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) {
        println!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// One normalized application inventory entry.
///
/// `app_name` and `package` are never empty for a record produced by
/// [`crate::transform::transform_rows`]; `publisher` may be. Missing keys
/// read back as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub app_name: String,
    pub package: String,
    pub publisher: String,
}

/// Logical output fields a column can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AppName,
    Package,
    Publisher,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::AppName, Field::Package, Field::Publisher];

    /// Output key of the field.
    pub fn key(self) -> &'static str {
        match self {
            Field::AppName => "app_name",
            Field::Package => "package",
            Field::Publisher => "publisher",
        }
    }

    /// Column used when no header names the field.
    pub fn fallback_index(self) -> usize {
        match self {
            Field::AppName => 0,
            Field::Package => 1,
            Field::Publisher => 2,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A source row. `None` marks a cell that could not be read as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Option<String>>,
}

impl Row {
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// Builds a row where every cell is readable.
    pub fn from_text<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(|c| Some(c.into())).collect(),
        }
    }

    /// Bounds-checked cell access. Out of range and unreadable cells both give `None`.
    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Header row plus data rows, as produced by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// True when there are no data rows, whatever the header holds.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Counts gathered while turning rows into records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub rows_read: usize,
    pub records: usize,
    pub skipped_unreadable: usize,
    pub skipped_incomplete: usize,
}
