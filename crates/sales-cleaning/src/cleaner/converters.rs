//! Numeric coercion for price-like columns.

use crate::utils::{is_integral, is_numeric_dtype, parse_integer_cell, parse_numeric_cell};
use anyhow::Result;
use polars::prelude::*;

/// Value substituted for cells that are null or do not parse as a number.
pub const COERCION_FALLBACK: f64 = 0.0;

/// Convert a column to numbers, replacing anything unparsable with zero.
///
/// The result is `Int64` when every value is integral, otherwise `Float64`.
/// It never contains nulls. Returns the series and the number of cells that
/// fell back to zero.
pub(crate) fn coerce_to_numeric(series: &Series) -> Result<(Series, usize)> {
    let len = series.len();
    let mut values: Vec<f64> = Vec::with_capacity(len);
    // Exact value for cells that were already integers, so large ones keep full precision
    let mut exact: Vec<Option<i64>> = Vec::with_capacity(len);
    let mut coerced = 0;

    if series.dtype().is_integer() {
        let ints = series.cast(&DataType::Int64)?;
        for opt_val in ints.i64()?.into_iter() {
            let val = opt_val.unwrap_or_else(|| {
                coerced += 1;
                COERCION_FALLBACK as i64
            });
            values.push(val as f64);
            exact.push(Some(val));
        }
    } else if is_numeric_dtype(series.dtype()) {
        let floats = series.cast(&DataType::Float64)?;
        for opt_val in floats.f64()?.into_iter() {
            match opt_val {
                Some(val) if !val.is_nan() => values.push(val),
                _ => {
                    values.push(COERCION_FALLBACK);
                    coerced += 1;
                }
            }
            exact.push(None);
        }
    } else {
        let as_text = series.cast(&DataType::String)?;
        for opt_val in as_text.str()?.into_iter() {
            if let Some(val) = opt_val.and_then(parse_integer_cell) {
                values.push(val as f64);
                exact.push(Some(val));
                continue;
            }
            match opt_val.and_then(parse_numeric_cell) {
                Some(val) => values.push(val),
                None => {
                    values.push(COERCION_FALLBACK);
                    coerced += 1;
                }
            }
            exact.push(None);
        }
    }

    let name = series.name().clone();
    let all_integral = values
        .iter()
        .zip(&exact)
        .all(|(v, e)| e.is_some() || is_integral(*v));

    let result = if all_integral {
        let ints: Vec<i64> = values
            .iter()
            .zip(&exact)
            .map(|(v, e)| e.unwrap_or(*v as i64))
            .collect();
        Series::new(name, ints)
    } else {
        Series::new(name, values)
    };

    Ok((result, coerced))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_at(series: &Series, idx: usize) -> f64 {
        series.get(idx).unwrap().try_extract::<f64>().unwrap()
    }

    #[test]
    fn test_coerce_integral_strings_to_int64() {
        let series = Series::new("quantity".into(), &["5", " 3 ", "10"]);
        let (result, coerced) = coerce_to_numeric(&series).unwrap();

        assert_eq!(result.dtype(), &DataType::Int64);
        assert_eq!(f64_at(&result, 1), 3.0);
        assert_eq!(coerced, 0);
    }

    #[test]
    fn test_coerce_decimal_strings_to_float64() {
        let series = Series::new("price".into(), &["9.99", "10", "-2.5"]);
        let (result, coerced) = coerce_to_numeric(&series).unwrap();

        assert_eq!(result.dtype(), &DataType::Float64);
        assert_eq!(f64_at(&result, 0), 9.99);
        assert_eq!(f64_at(&result, 2), -2.5);
        assert_eq!(coerced, 0);
    }

    #[test]
    fn test_coerce_unparsable_becomes_zero() {
        let series = Series::new("price".into(), &[Some("abc"), None, Some(""), Some("12.5")]);
        let (result, coerced) = coerce_to_numeric(&series).unwrap();

        assert_eq!(f64_at(&result, 0), 0.0);
        assert_eq!(f64_at(&result, 1), 0.0);
        assert_eq!(f64_at(&result, 2), 0.0);
        assert_eq!(f64_at(&result, 3), 12.5);
        assert_eq!(result.null_count(), 0);
        assert_eq!(coerced, 3);
    }

    #[test]
    fn test_coerce_keeps_negative_values() {
        let series = Series::new("price".into(), &["-10"]);
        let (result, _) = coerce_to_numeric(&series).unwrap();
        assert_eq!(f64_at(&result, 0), -10.0);
    }

    #[test]
    fn test_coerce_numeric_column_fills_nulls_and_nan() {
        let series = Series::new("price".into(), &[Some(1.5), None, Some(f64::NAN)]);
        let (result, coerced) = coerce_to_numeric(&series).unwrap();

        assert_eq!(f64_at(&result, 0), 1.5);
        assert_eq!(f64_at(&result, 1), 0.0);
        assert_eq!(f64_at(&result, 2), 0.0);
        assert_eq!(coerced, 2);
    }

    #[test]
    fn test_coerce_large_integers_keep_precision() {
        let series = Series::new("quantity".into(), &["9007199254740993", "1"]);
        let (result, coerced) = coerce_to_numeric(&series).unwrap();

        assert_eq!(result.dtype(), &DataType::Int64);
        assert_eq!(result.i64().unwrap().get(0), Some(9_007_199_254_740_993));
        assert_eq!(coerced, 0);
    }

    #[test]
    fn test_coerce_large_integer_column_keeps_precision() {
        let series = Series::new("quantity".into(), &[Some(9_007_199_254_740_993i64), None]);
        let (result, coerced) = coerce_to_numeric(&series).unwrap();

        assert_eq!(result.i64().unwrap().get(0), Some(9_007_199_254_740_993));
        assert_eq!(result.i64().unwrap().get(1), Some(0));
        assert_eq!(coerced, 1);
    }

    #[test]
    fn test_coerce_int_column_stays_int() {
        let series = Series::new("quantity".into(), &[1i64, 2, 3]);
        let (result, coerced) = coerce_to_numeric(&series).unwrap();
        assert_eq!(result.dtype(), &DataType::Int64);
        assert_eq!(coerced, 0);
    }
}
