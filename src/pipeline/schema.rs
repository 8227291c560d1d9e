//! Column names of the raw, cleaned and feature tables.

use polars::prelude::*;

use crate::error::{PrepError, PrepResult};

pub const DATE: &str = "Date";
pub const SALES_QTY: &str = "Sales_Qty";
pub const STOCK_QTY: &str = "Stock_Qty";
pub const PRICE_PER_UNIT: &str = "Price_per_Unit";

pub const YEAR: &str = "Year";
pub const QUARTER: &str = "Quarter";
pub const MONTH: &str = "Month";
pub const DAY_OF_WEEK: &str = "Day_of_Week";

pub const LAG_1_DAY: &str = "lag_1_day";
pub const LAG_7_DAYS: &str = "lag_7_days";
pub const LAG_30_DAYS: &str = "lag_30_days";

/// Raw header name to canonical name.
pub const RENAMES: [(&str, &str); 4] = [
    ("data", DATE),
    ("venda", SALES_QTY),
    ("estoque", STOCK_QTY),
    ("preco", PRICE_PER_UNIT),
];

/// Positional lag columns and their row offsets.
pub const LAGS: [(&str, i64); 3] = [(LAG_1_DAY, 1), (LAG_7_DAYS, 7), (LAG_30_DAYS, 30)];

/// Rows without a full lag window.
pub const WIDEST_LAG: usize = 30;

/// Persisted column order.
pub const FEATURE_COLUMNS: [&str; 9] = [
    DATE,
    SALES_QTY,
    YEAR,
    QUARTER,
    MONTH,
    DAY_OF_WEEK,
    LAG_1_DAY,
    LAG_7_DAYS,
    LAG_30_DAYS,
];

/// Columns of the feature table that must hold whole numbers.
///
/// `Date` is the key and keeps its date type; every other column is checked
/// before the cast so that a fractional value is reported by column name.
#[derive(Debug, Clone)]
pub struct IntegerContract {
    columns: Vec<&'static str>,
}

impl Default for IntegerContract {
    fn default() -> Self {
        Self {
            columns: FEATURE_COLUMNS.iter().copied().filter(|c| *c != DATE).collect(),
        }
    }
}

impl IntegerContract {
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Check every contracted column is integral.
    pub fn validate(&self, df: &DataFrame) -> PrepResult<()> {
        for name in &self.columns {
            let column = df.column(name).map_err(|_| PrepError::Schema {
                column: name.to_string(),
            })?;
            check_integral(name, column.as_materialized_series())?;
        }
        Ok(())
    }

    /// Validate, then cast each contracted column to `Int64`.
    pub fn apply(&self, mut df: DataFrame) -> PrepResult<DataFrame> {
        self.validate(&df)?;
        for name in &self.columns {
            let cast = df
                .column(name)?
                .as_materialized_series()
                .strict_cast(&DataType::Int64)
                .map_err(|e| PrepError::Conversion {
                    column: name.to_string(),
                    detail: e.to_string(),
                })?;
            df.with_column(cast)?;
        }
        Ok(df)
    }
}

fn check_integral(name: &str, series: &Series) -> PrepResult<()> {
    let dtype = series.dtype();
    if dtype.is_integer() {
        return Ok(());
    }
    if !dtype.is_float() {
        return Err(PrepError::Conversion {
            column: name.to_string(),
            detail: format!("unsupported type {}", dtype),
        });
    }

    let values = series.cast(&DataType::Float64)?;
    for (row, value) in values.f64()?.into_iter().enumerate() {
        if let Some(v) = value {
            if !v.is_finite() || v.fract() != 0.0 {
                return Err(PrepError::Conversion {
                    column: name.to_string(),
                    detail: format!("non-integral value {} at row {}", v, row),
                });
            }
        }
    }
    Ok(())
}
