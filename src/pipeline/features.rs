//! Calendar and lag features over the cleaned sales series.

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::PrepResult;
use crate::pipeline::schema::{
    IntegerContract, DATE, DAY_OF_WEEK, FEATURE_COLUMNS, LAGS, MONTH, QUARTER, SALES_QTY,
    WIDEST_LAG, YEAR,
};

/// Calendar fields taken from `Date`.
///
/// `Day_of_Week` counts from Monday = 0 to Sunday = 6; polars' ISO weekday
/// (Monday = 1) is shifted down by one.
pub fn calendar_exprs() -> [Expr; 4] {
    [
        col(DATE).dt().year().alias(YEAR),
        col(DATE).dt().quarter().alias(QUARTER),
        col(DATE).dt().month().alias(MONTH),
        (col(DATE).dt().weekday() - lit(1)).alias(DAY_OF_WEEK),
    ]
}

/// Positional lags of `Sales_Qty`. Offsets count rows in the current order,
/// not calendar days.
pub fn lag_exprs() -> Vec<Expr> {
    LAGS.iter()
        .map(|(name, offset)| col(SALES_QTY).shift(lit(*offset)).alias(*name))
        .collect()
}

/// Build the persisted feature table from the cleaned series.
///
/// Rows with any missing value are dropped after lagging, which removes at
/// least the first 30 rows. Every column but `Date` ends up as `Int64`.
pub fn build_features(cleaned: DataFrame) -> PrepResult<DataFrame> {
    let cleaned_rows = cleaned.height();

    let mut exprs = calendar_exprs().to_vec();
    exprs.extend(lag_exprs());

    let df = cleaned
        .lazy()
        .with_columns(exprs)
        .select(FEATURE_COLUMNS.map(col))
        .drop_nulls(None)
        .collect()?;
    debug!(
        "{} of {} rows kept ({} lack a {}-row lag window)",
        df.height(),
        cleaned_rows,
        cleaned_rows.min(WIDEST_LAG),
        WIDEST_LAG
    );

    let df = IntegerContract::default().apply(df)?;
    info!(
        "Built feature table: {} rows x {} columns",
        df.height(),
        df.width()
    );
    Ok(df)
}
