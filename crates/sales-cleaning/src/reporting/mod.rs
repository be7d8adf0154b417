//! Run report generation.
//!
//! Wraps a [`CleaningSummary`](crate::types::CleaningSummary) with a
//! timestamp so it can be printed to stdout (`--json`) or written to a file
//! (`--emit-report`).
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_cleaning::reporting::CleaningReport;
//!
//! let report = CleaningReport::from_summary(&result.summary);
//! report.write_to_file("reports/sales_clean_report.json")?;
//! ```

mod generator;

pub use generator::CleaningReport;
