//! Sales Prep - feature-table preparation for daily sales forecasting
//!
//! Reads the raw `data_sales.csv` export, cleans it and writes a fully
//! integer feature table for model training:
//!
//! - Loader: Latin-1 CSV into a polars `DataFrame`
//! - Cleaner: canonical column names, parsed dates, zero-sales filter
//! - Feature builder: calendar fields and positional 1/7/30-row lags
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sales_prep::{create_features, PipelineSettings};
//!
//! let settings = PipelineSettings::with_paths("data/raw/data_sales.csv", "data/processed/out.csv");
//! let outcome = create_features(&settings).expect("pipeline failed");
//! println!("persisted: {}", outcome.is_persisted());
//! ```

pub mod error;
pub mod logger;
pub mod pipeline;
pub mod setting;

// Re-export commonly used types
pub use error::{PrepError, PrepResult};
pub use pipeline::{create_features, PipelineOutcome};
pub use setting::{PipelineSettings, SourceEncoding};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
