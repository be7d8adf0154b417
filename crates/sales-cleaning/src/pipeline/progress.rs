//! Progress reporting for the cleaning pipeline.
//!
//! Every stage emits one [`ProgressUpdate`] once it finishes, carrying the
//! table shape at that point. The CLI turns these into log lines; library
//! callers can plug in their own [`ProgressReporter`].
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_cleaning::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {} ({} rows)", update.stage, update.message, update.rows);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the cleaning pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Reading the input CSV
    Loading,
    /// Canonicalizing column labels
    NormalizingColumns,
    /// Trimming text fields and coercing numeric fields
    CleaningFields,
    /// Dropping rows with negative numeric values
    FilteringRows,
    /// Writing the output CSV
    Writing,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl CleaningStage {
    /// The stages that do work, in order.
    pub const SEQUENCE: [CleaningStage; 5] = [
        Self::Loading,
        Self::NormalizingColumns,
        Self::CleaningFields,
        Self::FilteringRows,
        Self::Writing,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::NormalizingColumns => "Normalizing Columns",
            Self::CleaningFields => "Cleaning Fields",
            Self::FilteringRows => "Filtering Rows",
            Self::Writing => "Writing Output",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Fraction of the pipeline done once this stage has finished.
    pub fn progress(&self) -> f32 {
        match self {
            Self::Loading => 0.2,
            Self::NormalizingColumns => 0.4,
            Self::CleaningFields => 0.6,
            Self::FilteringRows => 0.8,
            Self::Writing | Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// Progress update emitted after a stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Stage that just finished
    pub stage: CleaningStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Row count of the table after the stage
    pub rows: usize,

    /// Column count of the table after the stage
    pub columns: usize,

    /// Human-readable message describing what happened
    pub message: String,
}

impl ProgressUpdate {
    /// Creates an update for a finished stage with the resulting table shape.
    pub fn new(stage: CleaningStage, shape: (usize, usize), message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: stage.progress(),
            rows: shape.0,
            columns: shape.1,
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(shape: (usize, usize), message: impl Into<String>) -> Self {
        Self::new(CleaningStage::Complete, shape, message)
    }

    /// Creates a failed progress update.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(CleaningStage::Failed, (0, 0), message)
    }
}

/// Trait for receiving progress updates from the pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use sales_cleaning::{ProgressReporter, ProgressUpdate};
///
/// struct StageCounter(std::sync::atomic::AtomicUsize);
///
/// impl ProgressReporter for StageCounter {
///     fn report(&self, _update: ProgressUpdate) {
///         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///     }
/// }
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Called once per finished stage, then once with `Complete` or `Failed`.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);
