//! Pipeline Configuration
//!
//! Parameters of the notebook run: where the exchange-rate export lives,
//! how to read it, and the embedding / filtration settings. Loaded from
//! JSON; every field has a default so a partial file is enough.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TdaError, TdaResult};

/// Canonical six-letter column labels applied after the header rows.
pub const DEFAULT_LABELS: [&str; 6] = ["PERIOD", "USDMXN", "USDBRL", "USDCLP", "USDCOP", "USDPEN"];

/// How to read the tabular export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the CSV export of the spreadsheet.
    pub path: PathBuf,
    /// Leading metadata rows (including the raw header) to skip.
    pub skip_rows: usize,
    /// Field delimiter.
    pub delimiter: char,
    /// Decimal mark of the quotes: `.` or `,` (semicolon exports).
    pub decimal_separator: char,
    /// Labels given to the columns, date column first.
    pub labels: Vec<String>,
    /// `chrono` format string of the date column.
    pub date_format: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/tipo_de_cambio.csv"),
            skip_rows: 17,
            delimiter: ',',
            decimal_separator: '.',
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source: SourceConfig,
    /// Label of the value column to analyse.
    pub series: String,
    /// Inclusive lower bound on retained dates.
    pub min_date: Option<NaiveDate>,
    /// Sliding-window length w.
    pub window_size: usize,
    /// Largest simplex dimension in the Rips complex.
    pub max_dimension: usize,
    /// Simplices entering above this scale are dropped.
    pub max_scale: Option<f64>,
    /// Also report homology in dimension `max_dimension`.
    pub include_top_dimension: bool,
    /// Where the barcode and diagram SVGs are written.
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            series: "USDMXN".to_string(),
            min_date: None,
            window_size: 10,
            max_dimension: 2,
            max_scale: None,
            include_top_dimension: false,
            output_dir: PathBuf::from("plots"),
        }
    }
}

impl PipelineConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> TdaResult<()> {
        if self.window_size == 0 {
            return Err(TdaError::Config("window_size must be >= 1, got 0".to_string()));
        }
        if self.source.labels.len() < 2 {
            return Err(TdaError::Config(format!(
                "need a date label and at least one value label, got {}",
                self.source.labels.len()
            )));
        }
        if !self.source.labels.iter().skip(1).any(|l| *l == self.series) {
            return Err(TdaError::Config(format!(
                "series '{}' is not one of the value labels {:?}",
                self.series,
                &self.source.labels[1..]
            )));
        }
        if !self.source.delimiter.is_ascii() {
            return Err(TdaError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.source.delimiter
            )));
        }
        let decimal = self.source.decimal_separator;
        if !matches!(decimal, '.' | ',') || decimal == self.source.delimiter {
            return Err(TdaError::Config(format!(
                "decimal_separator must be '.' or ',' and differ from the delimiter, got {:?}",
                decimal
            )));
        }
        if let Some(scale) = self.max_scale {
            if scale.is_nan() || scale < 0.0 {
                return Err(TdaError::Config(format!(
                    "max_scale must be a non-negative number, got {}",
                    scale
                )));
            }
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> TdaResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TdaError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> TdaResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TdaError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_dimension, 2);
        assert_eq!(config.source.labels.len(), 6);
        assert!(config.source.labels.iter().all(|l| l.len() == 6));
    }

    #[test]
    fn test_partial_json() {
        let config = PipelineConfig::from_json(
            r#"{"series": "USDBRL", "window_size": 5, "min_date": "2020-01-01"}"#,
        )
        .unwrap();
        assert_eq!(config.series, "USDBRL");
        assert_eq!(config.window_size, 5);
        assert_eq!(config.min_date, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(config.source.skip_rows, 17);
    }

    #[test]
    fn test_rejects_unknown_series() {
        let err = PipelineConfig::from_json(r#"{"series": "EURUSD"}"#).unwrap_err();
        assert!(matches!(err, TdaError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = PipelineConfig { window_size: 0, ..PipelineConfig::default() };
        assert!(config.validate().is_err());

        let config = PipelineConfig { max_scale: Some(-1.0), ..PipelineConfig::default() };
        assert!(config.validate().is_err());

        let config = PipelineConfig { max_scale: Some(f64::NAN), ..PipelineConfig::default() };
        assert!(config.validate().is_err());

        // decimal comma clashes with the default comma delimiter
        let mut config = PipelineConfig::default();
        config.source.decimal_separator = ',';
        assert!(matches!(config.validate(), Err(TdaError::Config(_))));
        config.source.delimiter = ';';
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let err = PipelineConfig::from_json("{ window_size: ").unwrap_err();
        assert!(matches!(err, TdaError::Config(_)));
    }
}
