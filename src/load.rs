use crate::error::Result;
use crate::structs::Record;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

/// Writes records to a pretty-formatted JSON file.
///
/// Missing parent directories are created and an existing file is replaced.
/// The output is a 2-space indented array with no trailing newline.
///
/// # Arguments
/// * `records` - Slice of Record structs to serialize
/// * `output_path` - Path where the JSON file will be created
///
/// # Returns
/// Returns `Ok(())` on success.
///
/// # Errors
/// Returns error if the directory or file cannot be created or serialization fails.
pub fn write_json(records: &[Record], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_parent_dirs_and_indents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/apps.json");
        let records = vec![Record {
            app_name: "Chrome".into(),
            package: "com.google.chrome".into(),
            publisher: "Google".into(),
        }];

        write_json(&records, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "[\n  {\n    \"app_name\": \"Chrome\",\n    \"package\": \"com.google.chrome\",\n    \"publisher\": \"Google\"\n  }\n]"
        );
    }

    #[test]
    fn empty_list_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apps.json");
        fs::write(&path, "stale content that is longer").unwrap();

        write_json(&[], &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }
}
