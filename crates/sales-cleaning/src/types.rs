//! Data types shared across the cleaning stages.
//!
//! Loaded tables, per-field cleaning counts and the run summary returned by
//! the pipeline.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Outcome of reading the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// The file was read and parsed.
    Loaded,
    /// The file does not exist; an empty table stands in for it.
    Missing,
}

/// A table produced by the loader, with how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub data: DataFrame,
    pub status: LoadStatus,
}

/// Counts produced by the field cleaner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCleaningStats {
    /// Cells whose value changed after trimming, per text column.
    pub trimmed_cells: BTreeMap<String, usize>,
    /// Cells replaced by zero because they were null or not a number, per numeric column.
    pub coerced_cells: BTreeMap<String, usize>,
}

impl FieldCleaningStats {
    /// Total number of cells replaced by zero across all numeric columns.
    pub fn total_coerced(&self) -> usize {
        self.coerced_cells.values().sum()
    }

    /// Total number of cells changed by trimming across all text columns.
    pub fn total_trimmed(&self) -> usize {
        self.trimmed_cells.values().sum()
    }
}

/// Summary of one pipeline run.
///
/// Serialized as the JSON report written by `--emit-report` and printed by
/// `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub load_status: LoadStatus,

    pub rows_loaded: usize,
    pub columns_loaded: usize,
    /// Column labels after normalization, in table order.
    pub columns: Vec<String>,

    pub field_stats: FieldCleaningStats,

    /// Rows dropped by the non-negative filter.
    pub rows_removed: usize,
    pub rows_written: usize,

    /// Total execution time in milliseconds.
    pub duration_ms: u64,
}

impl CleaningSummary {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            load_status: LoadStatus::Loaded,
            rows_loaded: 0,
            columns_loaded: 0,
            columns: Vec::new(),
            field_stats: FieldCleaningStats::default(),
            rows_removed: 0,
            rows_written: 0,
            duration_ms: 0,
        }
    }

    /// Whether the run stood in an empty table for a missing input file.
    pub fn input_missing(&self) -> bool {
        self.load_status == LoadStatus::Missing
    }
}

/// The cleaned table and its run summary.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub data: DataFrame,
    pub summary: CleaningSummary,
}
