//! Row filtering on non-negative numeric fields.

use crate::error::Result;
use crate::utils::has_column;
use polars::prelude::*;
use tracing::{debug, info};

/// Keep only rows whose value is `>= 0` in every listed column the table has.
///
/// Columns missing from the table impose no constraint. Null or
/// non-numeric cells fail the check. Rows are never modified, only dropped.
///
/// Returns the filtered table and the number of rows removed.
pub fn remove_invalid_rows<S: AsRef<str>>(
    df: DataFrame,
    columns: &[S],
) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let mut mask: Option<BooleanChunked> = None;

    for col_name in columns.iter().map(AsRef::as_ref) {
        if !has_column(&df, col_name) {
            continue;
        }

        // Non-strict cast turns unparsable text into null, which the mask rejects
        let values = df
            .column(col_name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let keep = values.gt_eq(0.0)?.fill_null_with_values(false)?;

        debug!(
            "'{}': {} rows fail the non-negative check",
            col_name,
            (&keep).into_iter().filter(|v| *v != Some(true)).count()
        );

        mask = Some(match mask {
            Some(current) => &current & &keep,
            None => keep,
        });
    }

    let df = match mask {
        Some(mask) => df.filter(&mask)?,
        None => df,
    };

    let removed = before - df.height();
    info!("Invalid rows removed. ({} dropped)", removed);
    Ok((df, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FIELDS: [&str; 2] = ["price", "quantity"];

    #[test]
    fn test_removes_negative_price() {
        let df = df![
            "product" => ["Widget", "Gadget"],
            "price" => [-10.0, 5.0],
            "quantity" => [3i64, 2],
        ]
        .unwrap();

        let (df, removed) = remove_invalid_rows(df, &FIELDS).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(df.height(), 1);
        let product = df.column("product").unwrap().as_materialized_series().clone();
        assert_eq!(product.str().unwrap().get(0), Some("Gadget"));
    }

    #[test]
    fn test_removes_negative_quantity() {
        let df = df![
            "price" => [1.0, 2.0, 3.0],
            "quantity" => [1i64, -1, 0],
        ]
        .unwrap();

        let (df, removed) = remove_invalid_rows(df, &FIELDS).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_zero_is_kept() {
        let df = df![
            "price" => [0.0],
            "quantity" => [5i64],
        ]
        .unwrap();

        let (df, removed) = remove_invalid_rows(df, &FIELDS).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_absent_columns_impose_no_constraint() {
        let df = df![
            "price" => [-1.0, 2.0],
            "amount" => [-5.0, -5.0],
        ]
        .unwrap();

        let (df, removed) = remove_invalid_rows(df, &FIELDS).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(df.height(), 1);

        let df = df!["product" => ["a", "b"]].unwrap();
        let (df, removed) = remove_invalid_rows(df, &FIELDS).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_null_and_text_fail_the_check() {
        let df = df![
            "price" => [Some("1.5"), Some("abc"), None],
        ]
        .unwrap();

        let (df, removed) = remove_invalid_rows(df, &FIELDS).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_empty_table() {
        let (df, removed) = remove_invalid_rows(DataFrame::empty(), &FIELDS).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(df.shape(), (0, 0));
    }

    proptest! {
        #[test]
        fn prop_filter_never_adds_rows_and_leaves_no_negatives(
            rows in prop::collection::vec((-100.0f64..100.0, -50i64..50), 0..40)
        ) {
            let prices: Vec<f64> = rows.iter().map(|(p, _)| *p).collect();
            let quantities: Vec<i64> = rows.iter().map(|(_, q)| *q).collect();
            let df = df![
                "price" => prices,
                "quantity" => quantities,
            ]
            .unwrap();

            let (filtered, removed) = remove_invalid_rows(df, &FIELDS).unwrap();
            prop_assert!(filtered.height() <= rows.len());
            prop_assert_eq!(filtered.height() + removed, rows.len());

            let price = filtered.column("price").unwrap().as_materialized_series().clone();
            let quantity = filtered.column("quantity").unwrap().as_materialized_series().clone();
            prop_assert!(price.f64().unwrap().into_iter().flatten().all(|v| v >= 0.0));
            prop_assert!(quantity.i64().unwrap().into_iter().flatten().all(|v| v >= 0));

            let expected = rows.iter().filter(|(p, q)| *p >= 0.0 && *q >= 0).count();
            prop_assert_eq!(filtered.height(), expected);
        }
    }
}
