//! Configuration types for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use crate::utils::{is_normalized_name, normalize_column_name};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the raw sales export.
pub const DEFAULT_INPUT_PATH: &str = "data/raw/sales_data_raw.csv";

/// Default location of the cleaned output.
pub const DEFAULT_OUTPUT_PATH: &str = "data/processed/sales_data_clean.csv";

/// Text columns whose cells are whitespace-trimmed.
pub const DEFAULT_TEXT_COLUMNS: [&str; 2] = ["product", "category"];

/// Numeric columns that are coerced and range-filtered.
pub const DEFAULT_NUMERIC_COLUMNS: [&str; 2] = ["price", "quantity"];

/// Configuration for the cleaning pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use sales_cleaning::config::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .input_path("exports/march.csv")
///     .output_path("clean/march.csv")
///     .create_output_dir(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// CSV file to read.
    /// Default: "data/raw/sales_data_raw.csv"
    pub input_path: PathBuf,

    /// CSV file to create or overwrite.
    /// Default: "data/processed/sales_data_clean.csv"
    pub output_path: PathBuf,

    /// Columns (by normalized name) whose cells are whitespace-trimmed.
    /// Default: ["product", "category"]
    pub text_columns: Vec<String>,

    /// Columns (by normalized name) coerced to numbers and required to be >= 0.
    /// Default: ["price", "quantity"]
    pub numeric_columns: Vec<String>,

    /// Fail with an error when the input file does not exist.
    /// When false, a missing input yields an empty table and an empty output file.
    /// Default: false
    pub fail_on_missing_input: bool,

    /// Create missing parent directories of the output path before writing.
    /// Default: false
    pub create_output_dir: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            text_columns: DEFAULT_TEXT_COLUMNS.iter().map(|s| s.to_string()).collect(),
            numeric_columns: DEFAULT_NUMERIC_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fail_on_missing_input: false,
            create_output_dir: false,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path".to_string()));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_path".to_string()));
        }

        for name in self.text_columns.iter().chain(&self.numeric_columns) {
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyColumnName);
            }
            // Columns are matched after normalization, so other spellings never match
            if !is_normalized_name(name) {
                return Err(ConfigValidationError::UnnormalizedColumnName(name.clone()));
            }
        }

        if let Some(name) = self
            .text_columns
            .iter()
            .find(|name| self.numeric_columns.contains(name))
        {
            return Err(ConfigValidationError::ConflictingColumn(name.clone()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Path for '{0}' must not be empty")]
    EmptyPath(String),

    #[error("Column names must not be empty")]
    EmptyColumnName,

    #[error("Column name '{0}' is not normalized (expected '{expected}')", expected = normalize_column_name(.0))]
    UnnormalizedColumnName(String),

    #[error("Column '{0}' cannot be both a text column and a numeric column")]
    ConflictingColumn(String),
}

impl From<ConfigValidationError> for crate::error::CleaningError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::CleaningError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    text_columns: Option<Vec<String>>,
    numeric_columns: Option<Vec<String>>,
    fail_on_missing_input: Option<bool>,
    create_output_dir: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Set the CSV file to read.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the CSV file to write.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Replace the set of text columns to trim.
    ///
    /// Names are matched after column normalization, so pass them in
    /// normalized form (e.g. `"product_name"`).
    pub fn text_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the set of numeric columns to coerce and filter.
    pub fn numeric_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Treat a missing input file as a fatal error.
    pub fn fail_on_missing_input(mut self, strict: bool) -> Self {
        self.fail_on_missing_input = Some(strict);
        self
    }

    /// Create missing parent directories of the output file.
    pub fn create_output_dir(mut self, create: bool) -> Self {
        self.create_output_dir = Some(create);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::default();
        let config = PipelineConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_path: self.output_path.unwrap_or(defaults.output_path),
            text_columns: self.text_columns.unwrap_or(defaults.text_columns),
            numeric_columns: self.numeric_columns.unwrap_or(defaults.numeric_columns),
            fail_on_missing_input: self
                .fail_on_missing_input
                .unwrap_or(defaults.fail_on_missing_input),
            create_output_dir: self.create_output_dir.unwrap_or(defaults.create_output_dir),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_path, PathBuf::from("data/raw/sales_data_raw.csv"));
        assert_eq!(
            config.output_path,
            PathBuf::from("data/processed/sales_data_clean.csv")
        );
        assert_eq!(config.text_columns, vec!["product", "category"]);
        assert_eq!(config.numeric_columns, vec!["price", "quantity"]);
        assert!(!config.fail_on_missing_input);
        assert!(!config.create_output_dir);
    }

    #[test]
    fn test_builder_defaults() {
        let config = PipelineConfig::builder().build().unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PipelineConfig::builder()
            .input_path("in.csv")
            .output_path("out/clean.csv")
            .numeric_columns(["price", "quantity", "discount"])
            .fail_on_missing_input(true)
            .create_output_dir(true)
            .build()
            .unwrap();

        assert_eq!(config.input_path, PathBuf::from("in.csv"));
        assert_eq!(config.output_path, PathBuf::from("out/clean.csv"));
        assert_eq!(config.numeric_columns.len(), 3);
        assert!(config.fail_on_missing_input);
        assert!(config.create_output_dir);
    }

    #[test]
    fn test_validation_empty_path() {
        let result = PipelineConfig::builder().output_path("").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyPath(field) if field == "output_path"
        ));
    }

    #[test]
    fn test_validation_conflicting_column() {
        let result = PipelineConfig::builder()
            .text_columns(["product", "price"])
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ConflictingColumn(name) if name == "price"
        ));
    }

    #[test]
    fn test_validation_blank_column_name() {
        let result = PipelineConfig::builder().numeric_columns(["  "]).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyColumnName
        ));
    }

    #[test]
    fn test_validation_rejects_unnormalized_column_name() {
        let result = PipelineConfig::builder()
            .numeric_columns(["Price", "quantity"])
            .build();
        let err = result.unwrap_err();
        assert!(matches!(
            &err,
            ConfigValidationError::UnnormalizedColumnName(name) if name == "Price"
        ));
        assert!(err.to_string().contains("'price'"));
    }

    #[test]
    fn test_config_serialization() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
