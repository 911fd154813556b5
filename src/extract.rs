use crate::error::{ConvertError, Result};
use crate::structs::{Row, Table};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::Timelike;
use log::debug;
use std::io::Read;
use std::path::Path;

/// How an input file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Tsv,
    /// Any workbook calamine can open (xlsx, xlsm, xlsb, xls, ods).
    Workbook,
}

impl InputFormat {
    /// Picks a format from the file extension. Unknown extensions are handed to the workbook reader.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => InputFormat::Csv,
            Some("tsv") => InputFormat::Tsv,
            _ => InputFormat::Workbook,
        }
    }
}

/// Reads the input file into a text [`Table`], choosing the reader from its extension.
///
/// # Arguments
///
/// * `path` - Path to a workbook, `.csv` or `.tsv` file
///
/// # Returns
///
/// Returns the header row and data rows of the file (first sheet only for workbooks).
///
/// # Errors
///
/// Returns `ConvertError::InputNotFound` if the path does not exist, and the
/// underlying reader error if the file cannot be parsed.
pub fn read_table(path: &Path) -> Result<Table> {
    read_table_as(path, InputFormat::from_path(path))
}

/// Reads the input file into a text [`Table`] with an explicit format.
///
/// # Errors
///
/// Same as [`read_table`].
pub fn read_table_as(path: &Path, format: InputFormat) -> Result<Table> {
    if !path.exists() {
        return Err(ConvertError::InputNotFound(path.to_path_buf()));
    }
    debug!("Reading {} as {:?}", path.display(), format);

    match format {
        InputFormat::Csv => {
            let reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(path)?;
            read_delimited(reader)
        }
        InputFormat::Tsv => {
            let reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .delimiter(b'\t')
                .from_path(path)?;
            read_delimited(reader)
        }
        InputFormat::Workbook => read_workbook(path),
    }
}

/// Reads delimited text. The first record is the header; later records keep their own length.
///
/// # Arguments
///
/// * `reader` - CSV reader configured without headers and with flexible row lengths
///
/// # Returns
///
/// Returns a `Table` whose cells are `None` where the bytes are not valid UTF-8.
///
/// # Errors
///
/// Returns `ConvertError::Csv` if a record cannot be read.
pub fn read_delimited<R: Read>(mut reader: csv::Reader<R>) -> Result<Table> {
    let mut records = reader.byte_records();

    let headers = match records.next() {
        Some(header) => header?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect(),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let cells = record
            .iter()
            .map(|cell| std::str::from_utf8(cell).ok().map(str::to_owned))
            .collect();
        rows.push(Row::new(cells));
    }

    Ok(Table { headers, rows })
}

fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        debug!("Workbook {} has no sheets", path.display());
        return Ok(Table::default());
    };
    debug!("Reading first sheet '{}'", sheet);

    let range = workbook.worksheet_range(&sheet)?;
    let mut sheet_rows = range.rows();

    let headers = match sheet_rows.next() {
        Some(header) => header
            .iter()
            .map(|c| cell_to_text(c).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };
    let rows = sheet_rows
        .map(|row| Row::new(row.iter().map(cell_to_text).collect()))
        .collect();

    Ok(Table { headers, rows })
}

/// Coerces a workbook cell to text. Error cells cannot be read and give `None`.
///
/// # Returns
///
/// - Whole-number floats as integers (`42`, not `42.0`)
/// - Whole-day dates as `YYYY-MM-DD`, other date-times as `YYYY-MM-DDTHH:MM:SS`
/// - Durations as their numeric day count
pub fn cell_to_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => float_to_text(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                float_to_text(dt.as_f64())
            } else {
                match dt.as_datetime() {
                    Some(ts) if ts.num_seconds_from_midnight() == 0 => {
                        ts.format("%Y-%m-%d").to_string()
                    }
                    Some(ts) => ts.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    None => float_to_text(dt.as_f64()),
                }
            }
        }
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => {
            debug!("Unreadable cell: {:?}", e);
            return None;
        }
    };
    Some(text)
}

fn float_to_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}
