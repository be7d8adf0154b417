//! Text sanitization for string columns.

use anyhow::Result;
use polars::prelude::*;

/// Trim surrounding whitespace from every cell of a column.
///
/// Non-string columns are converted to their string form first. Nulls stay
/// null. Returns the trimmed series and the number of cells that changed.
pub(crate) fn trim_whitespace(series: &Series) -> Result<(Series, usize)> {
    let as_text = if series.dtype() == &DataType::String {
        series.clone()
    } else {
        series.cast(&DataType::String)?
    };

    let str_series = as_text.str()?;
    let mut trimmed_values = Vec::with_capacity(str_series.len());
    let mut changed = 0;

    for opt_val in str_series.into_iter() {
        match opt_val {
            Some(val) => {
                let trimmed = val.trim();
                if trimmed.len() != val.len() {
                    changed += 1;
                }
                trimmed_values.push(Some(trimmed.to_string()));
            }
            None => trimmed_values.push(None),
        }
    }

    Ok((Series::new(series.name().clone(), trimmed_values), changed))
}
