use crate::error::{Result, ResultExt};
use crate::types::CleaningSummary;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Timestamped report of one cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Whether the input was found, and what every stage did
    pub summary: CleaningSummary,
}

impl CleaningReport {
    pub fn from_summary(summary: &CleaningSummary) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            summary: summary.clone(),
        }
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as JSON, creating parent directories as needed.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory {}", parent.display()))?;
        }

        let mut file =
            File::create(path).context(format!("Failed to create {}", path.display()))?;
        file.write_all(self.to_json()?.as_bytes())
            .context(format!("Failed to write {}", path.display()))?;

        info!("Report saved: {}", path.display());
        Ok(path.to_path_buf())
    }
}
