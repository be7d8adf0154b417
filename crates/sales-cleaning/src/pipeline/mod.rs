//! Pipeline module.
//!
//! This module provides the cleaning pipeline and its progress reporting.

mod builder;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder};
pub use progress::{CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::types::PipelineResult;
use std::path::Path;

/// Run the full pipeline from `input_path` to `output_path` with default settings.
pub fn run_pipeline(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<PipelineResult> {
    let config = PipelineConfig::builder()
        .input_path(input_path.as_ref())
        .output_path(output_path.as_ref())
        .build()?;

    Pipeline::builder().config(config).build()?.run()
}
