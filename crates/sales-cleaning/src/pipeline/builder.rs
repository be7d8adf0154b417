//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating load, normalize, clean, filter and write.

use crate::cleaner::FieldCleaner;
use crate::config::PipelineConfig;
use crate::error::{Result, ResultExt};
use crate::filter::remove_invalid_rows;
use crate::loader::{load_data, load_data_strict};
use crate::normalizer::normalize_columns;
use crate::pipeline::progress::{
    ClosureProgressReporter, CleaningStage, ProgressReporter, ProgressUpdate,
};
use crate::types::{CleaningSummary, FieldCleaningStats, LoadStatus, PipelineResult};
use crate::utils::column_names;
use crate::writer::write_data;
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// The sales data cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use sales_cleaning::{Pipeline, PipelineConfig};
///
/// let result = Pipeline::builder()
///     .config(
///         PipelineConfig::builder()
///             .input_path("exports/march.csv")
///             .output_path("clean/march.csv")
///             .build()?,
///     )
///     .on_progress(|update| println!("{}", update.message))
///     .build()?
///     .run()?;
///
/// println!("{} rows written", result.summary.rows_written);
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: FieldCleaner,
}

static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage: load, normalize, clean, filter, write.
    ///
    /// A missing input file yields an empty output file unless
    /// `fail_on_missing_input` is set.
    pub fn run(&self) -> Result<PipelineResult> {
        match self.run_internal() {
            Ok(result) => {
                self.report_progress(ProgressUpdate::complete(
                    result.data.shape(),
                    "Cleaning complete",
                ));
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Apply the in-memory stages (normalize, clean, filter) to a table.
    ///
    /// Returns the cleaned table, the field cleaning counts and the number of
    /// rows removed by the filter.
    pub fn transform(&self, df: DataFrame) -> Result<(DataFrame, FieldCleaningStats, usize)> {
        let df = normalize_columns(df)?;
        self.report_progress(ProgressUpdate::new(
            CleaningStage::NormalizingColumns,
            df.shape(),
            format!("Columns: {:?}", column_names(&df)),
        ));

        let (df, stats) = self.cleaner.clean(df)?;
        self.report_progress(ProgressUpdate::new(
            CleaningStage::CleaningFields,
            df.shape(),
            format!(
                "Trimmed {} text cells, coerced {} numeric cells to zero",
                stats.total_trimmed(),
                stats.total_coerced()
            ),
        ));

        let (df, removed) = remove_invalid_rows(df, &self.config.numeric_columns)?;
        self.report_progress(ProgressUpdate::new(
            CleaningStage::FilteringRows,
            df.shape(),
            format!("Removed {} rows with negative values", removed),
        ));

        Ok((df, stats, removed))
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self) -> Result<PipelineResult> {
        let start_time = Instant::now();
        let input = &self.config.input_path;
        let output = &self.config.output_path;

        info!("Starting cleaning pipeline: {} -> {}", input.display(), output.display());
        let mut summary = CleaningSummary::new(input, output);

        // Step 1: Load
        let loaded = if self.config.fail_on_missing_input {
            load_data_strict(input)
        } else {
            load_data(input)
        }
        .context("Loading input")?;

        summary.load_status = loaded.status;
        summary.rows_loaded = loaded.data.height();
        summary.columns_loaded = loaded.data.width();
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Loading,
            loaded.data.shape(),
            match loaded.status {
                LoadStatus::Loaded => format!("Loaded {}", input.display()),
                LoadStatus::Missing => format!("{} not found; continuing with an empty table", input.display()),
            },
        ));

        // Steps 2-4: Normalize, clean, filter
        let (mut df, stats, removed) = self.transform(loaded.data)?;
        summary.columns = column_names(&df);
        summary.field_stats = stats;
        summary.rows_removed = removed;

        // Step 5: Write
        write_data(&mut df, output, self.config.create_output_dir).context("Writing output")?;
        summary.rows_written = df.height();
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Writing,
            df.shape(),
            format!("Wrote {}", output.display()),
        ));

        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Cleaning finished in {}ms: {} rows loaded, {} removed, {} written",
            summary.duration_ms, summary.rows_loaded, summary.rows_removed, summary.rows_written
        );

        Ok(PipelineResult { data: df, summary })
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving updates during processing.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// This is a convenience method for simple progress handling.
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// Validates the configuration (or uses the default one).
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            cleaner: FieldCleaner::from_config(&config),
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}
