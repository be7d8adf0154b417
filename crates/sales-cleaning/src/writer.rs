//! CSV output.

use crate::error::{Result, ResultExt};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

/// Write a table to `path` as CSV, creating or truncating the file.
///
/// The output has one header row and one line per record, with no index
/// column. A table without columns produces an empty file. When
/// `create_parent_dirs` is false a missing destination directory is an error.
pub fn write_data(df: &mut DataFrame, path: &Path, create_parent_dirs: bool) -> Result<()> {
    if create_parent_dirs
        && let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory {}", parent.display()))?;
        debug!("Ensured output directory {}", parent.display());
    }

    let mut file =
        File::create(path).context(format!("Failed to create {}", path.display()))?;

    if df.width() == 0 {
        debug!("Table has no columns; leaving {} empty", path.display());
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)
            .context(format!("Failed to write CSV {}", path.display()))?;
    }

    info!("Cleaned data written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_write_header_and_rows_without_index() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clean.csv");
        let mut df = df![
            "product" => ["Widget", "Gadget"],
            "price" => [9.5, 0.0],
            "quantity" => [5i64, 3],
        ]
        .unwrap();

        write_data(&mut df, &path, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "product,price,quantity");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Widget,9.5,5"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clean.csv");
        fs::write(&path, "stale,content\n1,2\n3,4\n5,6\n").unwrap();

        let mut df = df!["price" => [1i64]].unwrap();
        write_data(&mut df, &path, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["price", "1"]);
    }

    #[test]
    fn test_write_quotes_fields_with_commas() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clean.csv");
        let mut df = df!["product" => ["Nuts, mixed"]].unwrap();

        write_data(&mut df, &path, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Nuts, mixed\""));
    }

    #[test]
    fn test_write_empty_table_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clean.csv");

        write_data(&mut DataFrame::empty(), &path, false).unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_write_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("clean.csv");
        let mut df = df!["price" => [1i64]].unwrap();

        let err = write_data(&mut df, &path, false).unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
        assert!(!path.exists());
    }

    #[test]
    fn test_write_creates_parent_dirs_when_asked() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("processed").join("clean.csv");
        let mut df = df!["price" => [1i64]].unwrap();

        write_data(&mut df, &path, true).unwrap();
        assert!(path.exists());
    }
}
