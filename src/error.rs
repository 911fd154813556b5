use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("No rows found in {}", .0.display())]
    EmptyTable(PathBuf),
    #[error("brand is required")]
    MissingBrand,
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Spreadsheet Error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Process exit status reported by the `convert` binary for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::InputNotFound(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
