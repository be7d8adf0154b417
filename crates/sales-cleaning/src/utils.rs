//! Shared utilities for the cleaning pipeline.
//!
//! Small pure helpers used by more than one stage: column-name
//! canonicalization, cell parsing and dtype checks.

use polars::prelude::*;

// =============================================================================
// Column Name Utilities
// =============================================================================

/// Canonicalize a column label: trim, lowercase, then spaces to underscores.
///
/// # Example
///
/// ```rust,ignore
/// use sales_cleaning::utils::normalize_column_name;
///
/// assert_eq!(normalize_column_name(" Unit Price "), "unit_price");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Check whether a label is already in canonical form.
pub fn is_normalized_name(name: &str) -> bool {
    normalize_column_name(name) == name
}

/// Owned copy of a DataFrame's column names, in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect()
}

/// Check whether a DataFrame has a column with the given name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

// =============================================================================
// Cell Parsing Utilities
// =============================================================================

/// Parse a text cell as a number.
///
/// Surrounding whitespace is ignored. Signs, decimals, exponents and
/// `inf` are accepted; `NaN` is treated as unparsable.
pub fn parse_numeric_cell(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parse a text cell as an exact integer.
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is
/// not a plain `i64` literal, including decimals like `"3.0"`.
pub fn parse_integer_cell(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Check if a float holds an integer value representable as `i64`.
#[inline]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64
}

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Product Name"), "product_name");
        assert_eq!(normalize_column_name(" Price "), "price");
        assert_eq!(normalize_column_name("Quantity"), "quantity");
        assert_eq!(normalize_column_name("Unit  Price"), "unit__price");
        assert_eq!(normalize_column_name("already_clean"), "already_clean");
    }

    #[test]
    fn test_normalize_only_replaces_spaces() {
        // Tabs inside a label are not spaces and survive
        assert_eq!(normalize_column_name("Order\tId"), "order\tid");
        assert_eq!(normalize_column_name("\tSKU\n"), "sku");
    }

    #[test]
    fn test_is_normalized_name() {
        assert!(is_normalized_name("product_name"));
        assert!(!is_normalized_name("Product Name"));
        assert!(!is_normalized_name(" price"));
    }

    #[test]
    fn test_parse_numeric_cell() {
        assert_eq!(parse_numeric_cell("42"), Some(42.0));
        assert_eq!(parse_numeric_cell(" 19.99 "), Some(19.99));
        assert_eq!(parse_numeric_cell("-10"), Some(-10.0));
        assert_eq!(parse_numeric_cell("1e3"), Some(1000.0));
        assert_eq!(parse_numeric_cell("abc"), None);
        assert_eq!(parse_numeric_cell(""), None);
        assert_eq!(parse_numeric_cell("NaN"), None);
        assert_eq!(parse_numeric_cell("$10"), None);
        assert_eq!(parse_numeric_cell("inf"), Some(f64::INFINITY));
    }

    #[test]
    fn test_parse_integer_cell() {
        assert_eq!(parse_integer_cell(" 42 "), Some(42));
        assert_eq!(parse_integer_cell("-7"), Some(-7));
        assert_eq!(parse_integer_cell("9007199254740993"), Some(9_007_199_254_740_993));
        assert_eq!(parse_integer_cell("3.0"), None);
        assert_eq!(parse_integer_cell("abc"), None);
        assert_eq!(parse_integer_cell(""), None);
    }

    #[test]
    fn test_is_integral() {
        assert!(is_integral(5.0));
        assert!(is_integral(-3.0));
        assert!(!is_integral(2.5));
        assert!(!is_integral(f64::INFINITY));
    }

    #[test]
    fn test_has_column() {
        let df = df!["price" => [1.0, 2.0]].unwrap();
        assert!(has_column(&df, "price"));
        assert!(!has_column(&df, "quantity"));
        assert_eq!(column_names(&df), vec!["price".to_string()]);
    }
}
