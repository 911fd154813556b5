pub mod error;
pub mod extract;
pub mod load;
pub mod resolve;
pub mod scan;
pub mod structs;
pub mod transform;

// Re-export public API
pub use error::{ConvertError, Result};
pub use extract::{InputFormat, read_table, read_table_as};
pub use load::write_json;
pub use resolve::{ColumnMap, ColumnResolver, DEFAULT_SYNONYMS, SynonymSet};
pub use scan::{
    RiskLevel, ScanReport, ScoredRecord, load_records, scan, score_records, similarity,
};
pub use structs::{ConversionSummary, Field, Record, Row, SimpleLogger, Table};
pub use transform::{process_file, transform_rows};
