//! Field cleaning module.
//!
//! This module provides the two per-column cleaning operations:
//! - Trimming whitespace in text columns (`product`, `category`)
//! - Coercing numeric columns (`price`, `quantity`), with unparsable cells
//!   replaced by zero
//!
//! Both are no-ops for columns the table does not have.

mod converters;
mod sanitizers;

pub use converters::COERCION_FALLBACK;

use crate::config::{DEFAULT_NUMERIC_COLUMNS, DEFAULT_TEXT_COLUMNS, PipelineConfig};
use crate::error::{CleaningError, Result};
use crate::types::FieldCleaningStats;
use crate::utils::has_column;
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Cleans the text and numeric fields of a normalized table.
#[derive(Debug, Clone)]
pub struct FieldCleaner {
    text_columns: Vec<String>,
    numeric_columns: Vec<String>,
}

impl Default for FieldCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_COLUMNS, DEFAULT_NUMERIC_COLUMNS)
    }
}

impl FieldCleaner {
    pub fn new<T, N, S>(text_columns: T, numeric_columns: N) -> Self
    where
        T: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text_columns: text_columns.into_iter().map(Into::into).collect(),
            numeric_columns: numeric_columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            text_columns: config.text_columns.clone(),
            numeric_columns: config.numeric_columns.clone(),
        }
    }

    /// Run both cleaning operations: trim text fields, then coerce numeric fields.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, FieldCleaningStats)> {
        let (df, trimmed_cells) = self.trim_text_fields(df)?;
        let (df, coerced_cells) = self.coerce_numeric_fields(df)?;

        Ok((
            df,
            FieldCleaningStats {
                trimmed_cells,
                coerced_cells,
            },
        ))
    }

    /// Trim surrounding whitespace in each configured text column present in `df`.
    ///
    /// Returns the number of changed cells per column.
    pub fn trim_text_fields(
        &self,
        mut df: DataFrame,
    ) -> Result<(DataFrame, BTreeMap<String, usize>)> {
        let mut counts = BTreeMap::new();

        for col_name in &self.text_columns {
            if !has_column(&df, col_name) {
                continue;
            }

            let series = df.column(col_name)?.as_materialized_series().clone();
            let (trimmed, changed) = sanitizers::trim_whitespace(&series)
                .map_err(|e| CleaningError::CleaningFailed(format!("'{}': {}", col_name, e)))?;
            df.replace(col_name, trimmed)?;

            debug!("Trimmed {} cells in '{}'", changed, col_name);
            counts.insert(col_name.clone(), changed);
        }

        info!("Text fields trimmed.");
        Ok((df, counts))
    }

    /// Coerce each configured numeric column present in `df` to numbers.
    ///
    /// Null and unparsable cells become [`COERCION_FALLBACK`]. Negative values
    /// are kept. Returns the number of coerced cells per column.
    pub fn coerce_numeric_fields(
        &self,
        mut df: DataFrame,
    ) -> Result<(DataFrame, BTreeMap<String, usize>)> {
        let mut counts = BTreeMap::new();

        for col_name in &self.numeric_columns {
            if !has_column(&df, col_name) {
                continue;
            }

            let series = df.column(col_name)?.as_materialized_series().clone();
            let (numeric, coerced) = converters::coerce_to_numeric(&series)
                .map_err(|e| CleaningError::CleaningFailed(format!("'{}': {}", col_name, e)))?;
            df.replace(col_name, numeric)?;

            if coerced > 0 {
                debug!("Coerced {} cells in '{}' to {}", coerced, col_name, COERCION_FALLBACK);
            }
            counts.insert(col_name.clone(), coerced);
        }

        info!("Missing values handled.");
        Ok((df, counts))
    }
}
