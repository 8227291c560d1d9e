//! The load → clean → features → persist pipeline.

pub mod cleaner;
pub mod features;
pub mod loader;
pub mod schema;
pub mod utility;
pub mod writer;

use std::path::PathBuf;
use tracing::{error, info};

pub use cleaner::clean;
pub use features::build_features;
pub use loader::load_raw;
pub use schema::IntegerContract;
pub use writer::write_features;

use crate::error::PrepResult;
use crate::setting::PipelineSettings;

/// Result of a run that got as far as the persist step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Persisted { path: PathBuf, rows: usize },
    PersistFailed { path: PathBuf, reason: String },
}

impl PipelineOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, PipelineOutcome::Persisted { .. })
    }
}

/// Run the whole preparation for one input file.
///
/// Load, clean and feature errors are returned as `Err`. A failure to write
/// the output is logged and reported as `PipelineOutcome::PersistFailed`
/// instead, leaving the decision to the caller.
pub fn create_features(settings: &PipelineSettings) -> PrepResult<PipelineOutcome> {
    let raw = load_raw(&settings.input_path, settings.encoding)?;
    let cleaned = clean(raw)?;
    let mut features = build_features(cleaned)?;

    let path = settings.output_path.clone();
    match write_features(&mut features, &path) {
        Ok(()) => {
            info!(
                "Processed version of {} successfully saved in {}",
                settings.input_path.display(),
                path.display()
            );
            Ok(PipelineOutcome::Persisted {
                path,
                rows: features.height(),
            })
        }
        Err(e) => {
            error!("Error occurred: {}", e);
            error!("Saving unsuccessful");
            Ok(PipelineOutcome::PersistFailed {
                path,
                reason: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;
    use chrono::{Duration, NaiveDate};
    use std::fmt::Write as _;
    use std::fs;
    use std::path::Path;

    const HEADER: &str = "Date,Sales_Qty,Year,Quarter,Month,Day_of_Week,lag_1_day,lag_7_days,lag_30_days";

    fn write_raw(path: &Path, rows: &[(String, i64)]) {
        let mut text = String::from("data,venda,estoque,preco\n");
        for (date, qty) in rows {
            writeln!(text, "{},{},5,19.9", date, qty).unwrap();
        }
        fs::write(path, text).unwrap();
    }

    fn daily_rows(n: usize) -> Vec<(String, i64)> {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let date = start + Duration::days(i as i64);
                (date.format("%Y-%m-%d").to_string(), i as i64 + 1)
            })
            .collect()
    }

    #[test]
    fn test_three_row_scenario_gives_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data_sales.csv");
        let output = dir.path().join("data_sales_processed.csv");
        write_raw(
            &input,
            &[
                ("2021-01-01".to_string(), 5),
                ("2021-01-02".to_string(), 0),
                ("2021-01-03".to_string(), 7),
            ],
        );

        let settings = PipelineSettings::with_paths(&input, &output);
        let outcome = create_features(&settings).unwrap();
        assert_eq!(outcome, PipelineOutcome::Persisted { path: output.clone(), rows: 0 });

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec![HEADER]);
    }

    #[test]
    fn test_header_only_input_gives_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data_sales.csv");
        let output = dir.path().join("data_sales_processed.csv");
        fs::write(&input, "data,venda,estoque,preco\n").unwrap();

        let settings = PipelineSettings::with_paths(&input, &output);
        let outcome = create_features(&settings).unwrap();
        assert_eq!(outcome, PipelineOutcome::Persisted { path: output.clone(), rows: 0 });

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec![HEADER]);
    }

    #[test]
    fn test_blank_sales_gives_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data_sales.csv");
        let output = dir.path().join("data_sales_processed.csv");
        fs::write(
            &input,
            "data,venda,estoque,preco\n2021-01-01,,5,19.9\n2021-01-02,,5,19.9\n2021-01-03,,5,19.9\n",
        )
        .unwrap();

        let settings = PipelineSettings::with_paths(&input, &output);
        let outcome = create_features(&settings).unwrap();
        assert_eq!(outcome, PipelineOutcome::Persisted { path: output.clone(), rows: 0 });

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec![HEADER]);
    }

    #[test]
    fn test_full_run_output_shape() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data_sales.csv");
        let output = dir.path().join("data_sales_processed.csv");
        let mut rows = daily_rows(45);
        rows[10].1 = 0;
        write_raw(&input, &rows);

        let settings = PipelineSettings::with_paths(&input, &output);
        let outcome = create_features(&settings).unwrap();
        // 45 rows, one zero dropped, 30 without a full window
        assert_eq!(outcome, PipelineOutcome::Persisted { path: output.clone(), rows: 14 });

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines.len(), 15);

        // cleaned row 30 is 2021-02-01 (a Monday); 2021-01-11 was dropped
        assert_eq!(lines[1], "2021-02-01,32,2021,1,2,0,31,25,1");
        for line in &lines[1..] {
            for field in line.split(',').skip(1) {
                assert!(field.parse::<i64>().is_ok(), "not an integer: {field}");
            }
        }
    }

    #[test]
    fn test_runs_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data_sales.csv");
        let output = dir.path().join("data_sales_processed.csv");
        write_raw(&input, &daily_rows(60));
        let settings = PipelineSettings::with_paths(&input, &output);

        create_features(&settings).unwrap();
        let first = fs::read(&output).unwrap();
        create_features(&settings).unwrap();
        let second = fs::read(&output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_venda_fails_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data_sales.csv");
        let output = dir.path().join("data_sales_processed.csv");
        fs::write(&input, "data,estoque,preco\n2021-01-01,5,19.9\n").unwrap();

        let settings = PipelineSettings::with_paths(&input, &output);
        let err = create_features(&settings).unwrap_err();
        assert!(matches!(err, PrepError::Schema { ref column } if column == "venda"));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PipelineSettings::with_paths(
            dir.path().join("absent.csv"),
            dir.path().join("out.csv"),
        );
        assert!(matches!(
            create_features(&settings),
            Err(PrepError::NotFound { .. })
        ));
    }

    #[test]
    fn test_persist_failure_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data_sales.csv");
        let output = dir.path().join("missing_folder").join("out.csv");
        write_raw(&input, &daily_rows(35));

        let settings = PipelineSettings::with_paths(&input, &output);
        let outcome = create_features(&settings).unwrap();
        assert!(!outcome.is_persisted());
        match outcome {
            PipelineOutcome::PersistFailed { path, reason } => {
                assert_eq!(path, output);
                assert!(!reason.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
