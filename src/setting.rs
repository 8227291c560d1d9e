//! Settings of the preparation pipeline.
//!
//! Defaults reproduce the fixed project layout. A `sales_prep_setting.json`
//! in the working directory overrides any subset of the fields.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrepError, PrepResult};

/// Setting filename
pub const SETTING_FILENAME: &str = "sales_prep_setting.json";

pub const DATA_FOLDER_RAW: &str = "./Supply_Chain_Clustering_Forecasting/data/raw";
pub const DATA_FOLDER_PROCESSED: &str = "./Supply_Chain_Clustering_Forecasting/data/processed";
pub const RAW_FILENAME: &str = "data_sales.csv";
pub const PROCESSED_FILENAME: &str = "data_sales_processed.csv";

/// Text encoding of the raw sales file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceEncoding {
    /// ISO-8859-1, every byte maps to one code point.
    #[default]
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
    /// Strict UTF-8.
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
}

impl SourceEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            SourceEncoding::Latin1 => "latin-1",
            SourceEncoding::Utf8 => "utf-8",
        }
    }
}

/// Log settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Python-style integer level (10 debug, 20 info, 30 warning, 40 error)
    pub level: i32,
    pub console: bool,
    pub file: bool,
    pub folder: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: 20,
            console: true,
            file: false,
            folder: PathBuf::from("./log"),
        }
    }
}

/// Paths and behaviour of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub encoding: SourceEncoding,
    /// Treat a failed write of the feature table as a fatal run result.
    pub strict_persist: bool,
    pub log: LogSettings,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            input_path: Path::new(DATA_FOLDER_RAW).join(RAW_FILENAME),
            output_path: Path::new(DATA_FOLDER_PROCESSED).join(PROCESSED_FILENAME),
            encoding: SourceEncoding::default(),
            strict_persist: false,
            log: LogSettings::default(),
        }
    }
}

impl PipelineSettings {
    /// Settings pointing at explicit input and output files.
    pub fn with_paths(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    /// Defaults overlaid with the working-directory setting file, if any.
    pub fn load() -> PrepResult<Self> {
        let filepath = Path::new(SETTING_FILENAME);
        if filepath.exists() {
            Self::load_from(filepath)
        } else {
            Ok(Self::default())
        }
    }

    /// Read settings from a JSON file. Missing fields keep their defaults.
    pub fn load_from(path: impl AsRef<Path>) -> PrepResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PrepError::from_io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to a JSON file
    pub fn save_to(&self, path: impl AsRef<Path>) -> PrepResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| PrepError::from_io(path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let settings = PipelineSettings::default();
        assert_eq!(
            settings.input_path,
            PathBuf::from("./Supply_Chain_Clustering_Forecasting/data/raw/data_sales.csv")
        );
        assert_eq!(
            settings.output_path,
            PathBuf::from("./Supply_Chain_Clustering_Forecasting/data/processed/data_sales_processed.csv")
        );
        assert_eq!(settings.encoding, SourceEncoding::Latin1);
        assert!(!settings.strict_persist);
        assert_eq!(settings.log.level, 20);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTING_FILENAME);
        fs::write(&path, r#"{"encoding": "utf-8", "log": {"level": 10}}"#).unwrap();

        let settings = PipelineSettings::load_from(&path).unwrap();
        assert_eq!(settings.encoding, SourceEncoding::Utf8);
        assert_eq!(settings.log.level, 10);
        assert!(settings.log.console);
        assert_eq!(settings.input_path, PipelineSettings::default().input_path);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTING_FILENAME);
        let mut settings = PipelineSettings::with_paths("in.csv", "out.csv");
        settings.strict_persist = true;

        settings.save_to(&path).unwrap();
        assert_eq!(PipelineSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_malformed_file_is_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTING_FILENAME);
        fs::write(&path, "{ not json").unwrap();

        let err = PipelineSettings::load_from(&path).unwrap_err();
        assert!(matches!(err, PrepError::Settings(_)));
    }
}
