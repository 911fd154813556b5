use crate::error::{ConvertError, Result};
use crate::extract::read_table;
use crate::resolve::{ColumnMap, ColumnResolver};
use crate::structs::{ConversionSummary, Field, Record, Row};
use log::debug;
use std::path::Path;

/// Reads an inventory spreadsheet and turns it into normalized records.
///
/// The header row is resolved with `resolver`, then every data row goes
/// through [`transform_rows`].
///
/// # Arguments
///
/// * `file_path` - Path to the input spreadsheet (workbook, CSV or TSV)
/// * `resolver` - Column resolver holding the header synonym table
///
/// # Returns
///
/// Returns the surviving records in source order, with the counts gathered
/// while converting them.
///
/// # Errors
///
/// Returns `ConvertError::InputNotFound` if `file_path` does not exist,
/// `ConvertError::EmptyTable` if it holds no data rows, and any reader error
/// raised while loading it.
pub fn process_file(
    file_path: &Path,
    resolver: &ColumnResolver,
) -> Result<(Vec<Record>, ConversionSummary)> {
    let table = read_table(file_path)?;
    if table.is_empty() {
        return Err(ConvertError::EmptyTable(file_path.to_path_buf()));
    }
    debug!("Headers: {:?}", table.headers);

    let columns = resolver.resolve(table.headers.as_slice());
    debug!(
        "Columns: app_name={:?} package={:?} publisher={:?}",
        columns.app_name, columns.package, columns.publisher
    );

    let (records, summary) = transform_rows(&columns, &table.rows);
    debug!(
        "Read {} rows | kept {} | skipped {} unreadable, {} incomplete",
        summary.rows_read, summary.records, summary.skipped_unreadable, summary.skipped_incomplete
    );
    Ok((records, summary))
}

/// Turns data rows into records, preserving their order.
///
/// A row is skipped when one of its mapped cells cannot be read, or when the
/// trimmed app name or package is empty. Unmapped fields read as empty.
///
/// # Arguments
///
/// * `columns` - Column index resolved for each field
/// * `rows` - Data rows, header excluded
///
/// # Returns
///
/// Returns a `(Vec<Record>, ConversionSummary)` pair. Every record has a
/// non-empty `app_name` and `package`.
pub fn transform_rows(columns: &ColumnMap, rows: &[Row]) -> (Vec<Record>, ConversionSummary) {
    let mut records = Vec::with_capacity(rows.len());
    let mut summary = ConversionSummary {
        rows_read: rows.len(),
        ..ConversionSummary::default()
    };

    for (i, row) in rows.iter().enumerate() {
        // header is row 1
        let source_row = i + 2;

        let Some(record) = extract_record(columns, row) else {
            debug!("Skipping row {}: unreadable cell", source_row);
            summary.skipped_unreadable += 1;
            continue;
        };
        if record.app_name.is_empty() || record.package.is_empty() {
            debug!("Skipping row {}: missing app name or package", source_row);
            summary.skipped_incomplete += 1;
            continue;
        }
        records.push(record);
    }

    summary.records = records.len();
    (records, summary)
}

fn extract_record(columns: &ColumnMap, row: &Row) -> Option<Record> {
    Some(Record {
        app_name: read_field(columns, row, Field::AppName)?,
        package: read_field(columns, row, Field::Package)?,
        publisher: read_field(columns, row, Field::Publisher)?,
    })
}

fn read_field(columns: &ColumnMap, row: &Row, field: Field) -> Option<String> {
    match columns.get(field) {
        Some(index) => row.cell(index).map(|c| c.trim().to_string()),
        None => Some(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> ColumnMap {
        ColumnMap {
            app_name: Some(0),
            package: Some(1),
            publisher: Some(2),
        }
    }

    #[test]
    fn trims_and_keeps_order() {
        let rows = vec![
            Row::from_text(["  Chrome ", "com.google.chrome", " Google"]),
            Row::from_text(["Maps", "com.google.maps", ""]),
        ];
        let (records, summary) = transform_rows(&full_map(), &rows);
        assert_eq!(
            records,
            vec![
                Record {
                    app_name: "Chrome".into(),
                    package: "com.google.chrome".into(),
                    publisher: "Google".into(),
                },
                Record {
                    app_name: "Maps".into(),
                    package: "com.google.maps".into(),
                    publisher: "".into(),
                },
            ]
        );
        assert_eq!(summary.records, 2);
    }

    #[test]
    fn drops_rows_missing_name_or_package() {
        let rows = vec![
            Row::from_text(["A", "   ", "P"]),
            Row::from_text(["", "a.b", "P"]),
            Row::from_text(["B", "b.c", "P"]),
        ];
        let (records, summary) = transform_rows(&full_map(), &rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].app_name, "B");
        assert_eq!(summary.skipped_incomplete, 2);
        assert_eq!(summary.skipped_unreadable, 0);
    }

    #[test]
    fn short_row_is_skipped_whole() {
        let rows = vec![
            Row::from_text(["A", "a.b"]),
            Row::from_text(["B", "b.c", "Vendor"]),
        ];
        let (records, summary) = transform_rows(&full_map(), &rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].publisher, "Vendor");
        assert_eq!(summary.skipped_unreadable, 1);
    }

    #[test]
    fn unreadable_cell_skips_row() {
        let rows = vec![Row::new(vec![
            Some("A".into()),
            Some("a.b".into()),
            None,
        ])];
        let (records, summary) = transform_rows(&full_map(), &rows);
        assert!(records.is_empty());
        assert_eq!(summary.skipped_unreadable, 1);
    }

    #[test]
    fn unmapped_publisher_reads_empty() {
        let columns = ColumnMap {
            app_name: Some(0),
            package: Some(1),
            publisher: None,
        };
        let rows = vec![Row::from_text(["A", "a.b"])];
        let (records, _) = transform_rows(&columns, &rows);
        assert_eq!(records[0].publisher, "");
    }

    #[test]
    fn unmapped_package_drops_everything() {
        let columns = ColumnMap {
            app_name: Some(0),
            ..ColumnMap::default()
        };
        let rows = vec![Row::from_text(["A"]), Row::from_text(["B"])];
        let (records, summary) = transform_rows(&columns, &rows);
        assert!(records.is_empty());
        assert_eq!(summary.skipped_incomplete, 2);
    }
}
