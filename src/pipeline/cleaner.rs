//! Cleaning of the raw sales table.

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{PrepError, PrepResult};
use crate::pipeline::schema::{DATE, RENAMES, SALES_QTY};
use crate::pipeline::utility::parse_dates;

/// Turn the raw table into the `[Date, Sales_Qty]` series.
///
/// Rows keep their load order; duplicate dates are neither merged nor
/// sorted. Only rows whose quantity is exactly zero are removed, so
/// negative quantities survive.
pub fn clean(raw: DataFrame) -> PrepResult<DataFrame> {
    let mut df = raw;
    rename_columns(&mut df)?;
    parse_date_column(&mut df)?;
    coerce_sales_qty(&mut df)?;

    let loaded = df.height();
    let df = df
        .lazy()
        .select([col(DATE), col(SALES_QTY)])
        .filter(col(SALES_QTY).neq_missing(lit(0)))
        .collect()?;

    info!(
        "Cleaned sales table: {} rows kept, {} zero-sales rows dropped",
        df.height(),
        loaded - df.height()
    );
    Ok(df)
}

/// Rename the raw headers to canonical names. All sources are checked
/// before anything is renamed.
pub fn rename_columns(df: &mut DataFrame) -> PrepResult<()> {
    if let Some((missing, _)) = RENAMES
        .iter()
        .find(|(source, _)| df.get_column_index(source).is_none())
    {
        return Err(PrepError::Schema {
            column: missing.to_string(),
        });
    }

    for (source, target) in RENAMES {
        df.rename(source, target.into())?;
    }
    debug!("renamed raw columns to canonical names");
    Ok(())
}

/// Replace the textual `Date` column by a parsed date column.
pub fn parse_date_column(df: &mut DataFrame) -> PrepResult<()> {
    let text = df
        .column(DATE)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let dates = parse_dates(text.str()?.into_iter())?;

    let parsed = DateChunked::from_naive_date_options(DATE.into(), dates).into_series();
    df.with_column(parsed)?;
    Ok(())
}

/// Make `Sales_Qty` numeric. A column the reader typed as text (no values
/// at all, or quoted numbers) is strictly cast to `Float64`; text that is
/// not a number fails with the column named.
pub fn coerce_sales_qty(df: &mut DataFrame) -> PrepResult<()> {
    let series = df.column(SALES_QTY)?.as_materialized_series();
    let dtype = series.dtype();
    if dtype.is_integer() || dtype.is_float() {
        return Ok(());
    }

    let numeric = series
        .strict_cast(&DataType::Float64)
        .map_err(|e| PrepError::Conversion {
            column: SALES_QTY.to_string(),
            detail: e.to_string(),
        })?;
    debug!("cast {} from {} to f64", SALES_QTY, dtype);
    df.with_column(numeric)?;
    Ok(())
}
