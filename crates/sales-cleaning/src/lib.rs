//! Sales Data Cleaning Library
//!
//! Cleans raw sales CSV exports with Polars.
//!
//! # Overview
//!
//! The pipeline runs five stages in order:
//!
//! - **Loading**: Read the CSV with every column as text. A missing file
//!   yields an empty table (or an error in strict mode)
//! - **Column Normalization**: Trim, lowercase and underscore column labels
//! - **Field Cleaning**: Trim `product`/`category`, coerce `price`/`quantity`
//!   to numbers with unparsable cells replaced by zero
//! - **Row Filtering**: Drop rows where `price` or `quantity` is negative
//! - **Writing**: Serialize the cleaned table to CSV without an index column
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sales_cleaning::run_pipeline;
//!
//! let result = run_pipeline("data/raw/sales_data_raw.csv", "data/processed/sales_data_clean.csv")?;
//! println!("{} rows written", result.summary.rows_written);
//! ```
//!
//! # Configuration
//!
//! Use [`PipelineConfig`] to customize paths, column sets and strictness:
//!
//! ```rust,ignore
//! use sales_cleaning::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::builder()
//!     .input_path("exports/march.csv")
//!     .output_path("clean/march.csv")
//!     .fail_on_missing_input(true)
//!     .create_output_dir(true)
//!     .build()?;
//!
//! let result = Pipeline::builder()
//!     .config(config)
//!     .on_progress(|update| println!("[{:.0}%] {}", update.progress * 100.0, update.message))
//!     .build()?
//!     .run()?;
//! ```
//!
//! The stages are also exported individually ([`load_data`],
//! [`normalize_columns`], [`FieldCleaner`], [`remove_invalid_rows`],
//! [`write_data`]) for use on in-memory tables.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod normalizer;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;
pub mod writer;

// Re-exports for convenient access
pub use cleaner::{COERCION_FALLBACK, FieldCleaner};
pub use config::{ConfigValidationError, PipelineConfig, PipelineConfigBuilder};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use filter::remove_invalid_rows;
pub use loader::{load_data, load_data_strict};
pub use normalizer::normalize_columns;
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, Pipeline, PipelineBuilder, ProgressReporter,
    ProgressUpdate, run_pipeline,
};
pub use reporting::CleaningReport;
pub use types::{CleaningSummary, FieldCleaningStats, LoadStatus, LoadedTable, PipelineResult};
pub use utils::normalize_column_name;
pub use writer::write_data;
