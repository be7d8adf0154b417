//! CSV loading.
//!
//! Reads the raw export into a [`DataFrame`] with every column as text, so
//! that the cleaner decides how cells are coerced and untouched columns are
//! written back exactly as they were read.

use crate::error::{CleaningError, Result, ResultExt};
use crate::normalizer::check_label_collisions;
use crate::types::{LoadStatus, LoadedTable};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load a CSV file, standing in an empty table when the file does not exist.
///
/// Any failure other than "not found" (permissions, a directory, an empty
/// or malformed file) is returned as an error.
pub fn load_data(path: &Path) -> Result<LoadedTable> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Error: {} not found.", path.display());
            return Ok(LoadedTable {
                data: DataFrame::empty(),
                status: LoadStatus::Missing,
            });
        }
        Err(e) => {
            return Err(e).context(format!("Failed to open {}", path.display()));
        }
    };

    if file.metadata().context(format!("Failed to stat {}", path.display()))?.is_dir() {
        return Err(CleaningError::Io(std::io::Error::new(
            ErrorKind::InvalidInput,
            "is a directory",
        ))
        .with_context(format!("Failed to read {}", path.display())));
    }

    debug!("Parsing CSV from {}", path.display());
    // The header is read as a data row so that repeated labels reach the
    // collision check instead of being renamed by the reader
    let raw = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(file)
        .finish()
        .context(format!("Failed to parse CSV {}", path.display()))?;
    let data = promote_header_row(raw)
        .context(format!("Failed to read header of {}", path.display()))?;

    info!("Loaded data from {}, shape: {:?}", path.display(), data.shape());

    Ok(LoadedTable {
        data,
        status: LoadStatus::Loaded,
    })
}

/// Use the first row of a headerless read as the column labels.
fn promote_header_row(raw: DataFrame) -> Result<DataFrame> {
    if raw.height() == 0 {
        return Err(PolarsError::NoData("empty CSV".into()).into());
    }

    let labels = raw
        .get_columns()
        .iter()
        .map(|col| -> Result<String> {
            let label = col.as_materialized_series().str()?.get(0);
            Ok(label.unwrap_or_default().to_string())
        })
        .collect::<Result<Vec<String>>>()?;
    check_label_collisions(&labels)?;

    let mut data = raw.slice(1, raw.height() - 1);
    data.set_column_names(labels.iter().map(String::as_str))?;
    Ok(data)
}

/// Load a CSV file, failing when it does not exist.
pub fn load_data_strict(path: &Path) -> Result<LoadedTable> {
    let loaded = load_data(path)?;
    if loaded.status == LoadStatus::Missing {
        return Err(CleaningError::InputNotFound(path.to_path_buf()));
    }
    Ok(loaded)
}
