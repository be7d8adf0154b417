//! Column label normalization.

use crate::error::{CleaningError, Result};
use crate::utils::{column_names, normalize_column_name};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

/// Rewrite every column label to canonical form, preserving column order.
///
/// Labels are trimmed, lowercased, and have spaces replaced by underscores.
/// Normalizing an already normalized table leaves it unchanged.
///
/// # Errors
///
/// Returns [`CleaningError::DuplicateColumn`] when two source labels map to
/// the same normalized name.
pub fn normalize_columns(mut df: DataFrame) -> Result<DataFrame> {
    let original = column_names(&df);
    let normalized = check_label_collisions(&original)?;

    for (before, after) in original.iter().zip(&normalized) {
        if before != after {
            debug!("Renamed column {:?} -> {:?}", before, after);
        }
    }

    df.set_column_names(normalized.iter().map(|s| s.as_str()))?;
    info!("Column names standardized.");
    Ok(df)
}

/// Normalize raw labels, failing if any two map to the same name.
///
/// Identical raw labels count as a collision too. Returns the normalized
/// labels in input order.
pub(crate) fn check_label_collisions(labels: &[String]) -> Result<Vec<String>> {
    let normalized: Vec<String> = labels.iter().map(|s| normalize_column_name(s)).collect();

    let mut sources: HashMap<&str, Vec<String>> = HashMap::new();
    for (before, after) in labels.iter().zip(&normalized) {
        sources.entry(after.as_str()).or_default().push(before.clone());
    }

    // Report the first collision in column order
    for name in &normalized {
        if let Some(labels) = sources.get(name.as_str())
            && labels.len() > 1
        {
            return Err(CleaningError::DuplicateColumn {
                name: name.clone(),
                sources: labels.clone(),
            });
        }
    }

    Ok(normalized)
}
