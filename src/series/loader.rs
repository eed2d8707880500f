//! Series Loader: Exchange-Rate Export → Time Series
//!
//! Reads the CSV export of the central-bank spreadsheet. The file opens
//! with a block of metadata rows (title, series codes, units, the raw
//! header); those are skipped and the columns are addressed by canonical
//! labels instead. One data row per date.

use std::fs::File;
use std::io::Read;

use chrono::NaiveDate;
use log::{debug, info};

use crate::config::{PipelineConfig, SourceConfig};
use crate::error::{TdaError, TdaResult};

/// Cell contents meaning "no quote published for this date".
const MISSING_MARKERS: [&str; 5] = ["", "N/E", "N/D", "NA", "-"];

/// A named, ordered sequence of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub name: String,
    /// Observation dates; empty for series built from raw values.
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    /// Wrap an in-memory sequence without dates.
    pub fn from_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            dates: Vec::new(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First and last observation date, when dates are known.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }
}

/// Reads one value column of the export, filtered by date.
#[derive(Debug, Clone)]
pub struct SeriesLoader {
    source: SourceConfig,
    series: String,
    min_date: Option<NaiveDate>,
}

impl SeriesLoader {
    pub fn new(source: SourceConfig, series: impl Into<String>, min_date: Option<NaiveDate>) -> Self {
        Self {
            source,
            series: series.into(),
            min_date,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.source.clone(), config.series.clone(), config.min_date)
    }

    /// Open the configured file and load the series.
    pub fn load(&self) -> TdaResult<TimeSeries> {
        let file = File::open(&self.source.path).map_err(|e| {
            TdaError::SourceRead(format!("cannot open {}: {e}", self.source.path.display()))
        })?;
        self.load_from_reader(file)
    }

    /// Load the series from any reader holding the export's bytes.
    ///
    /// Skipped header rows are never decoded, so a title in a legacy
    /// encoding does not abort the load; data rows must be UTF-8.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> TdaResult<TimeSeries> {
        if !self.source.delimiter.is_ascii() {
            return Err(TdaError::InvalidParameter(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.source.delimiter
            )));
        }
        let decimal = self.source.decimal_separator;
        if !matches!(decimal, '.' | ',') || decimal == self.source.delimiter {
            return Err(TdaError::InvalidParameter(format!(
                "decimal separator must be '.' or ',' and differ from the delimiter, got {:?}",
                decimal
            )));
        }

        let n_columns = self.source.labels.len();
        let value_col = self
            .source
            .labels
            .iter()
            .skip(1)
            .position(|l| *l == self.series)
            .map(|p| p + 1)
            .ok_or_else(|| {
                TdaError::SourceRead(format!("no column labelled '{}'", self.series))
            })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.source.delimiter as u8)
            .from_reader(reader);

        let mut dates = Vec::new();
        let mut values = Vec::new();
        let mut data_rows = 0usize;
        let mut skipped = 0usize;

        for (row, record) in rdr.byte_records().enumerate() {
            let record = record?;
            if row < self.source.skip_rows {
                continue;
            }
            data_rows += 1;
            let line = record.position().map(|p| p.line()).unwrap_or(row as u64 + 1);
            let record = csv::StringRecord::from_byte_record(record).map_err(|e| {
                TdaError::SourceRead(format!("line {line}: not valid UTF-8: {e}"))
            })?;

            if record.len() < n_columns {
                return Err(TdaError::SourceRead(format!(
                    "line {line}: expected {n_columns} columns, found {}",
                    record.len()
                )));
            }

            let raw_date = record.get(0).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(raw_date, &self.source.date_format).map_err(|e| {
                TdaError::SourceRead(format!("line {line}: bad date '{raw_date}': {e}"))
            })?;

            if self.min_date.is_some_and(|min| date < min) {
                continue;
            }

            let raw_value = record.get(value_col).unwrap_or_default().trim();
            if MISSING_MARKERS.contains(&raw_value) {
                debug!("line {line}: no {} quote for {date}, skipping", self.series);
                skipped += 1;
                continue;
            }
            let value = parse_quote(raw_value, decimal).ok_or_else(|| {
                TdaError::SourceRead(format!("line {line}: bad value '{raw_value}'"))
            })?;
            if !value.is_finite() {
                return Err(TdaError::SourceRead(format!(
                    "line {line}: non-finite value '{raw_value}'"
                )));
            }

            dates.push(date);
            values.push(value);
        }

        if values.is_empty() {
            return Err(TdaError::EmptyInput(format!(
                "no {} observations left out of {data_rows} data rows",
                self.series
            )));
        }

        info!(
            "loaded {} observations of {} ({} rows without a quote)",
            values.len(),
            self.series,
            skipped
        );

        Ok(TimeSeries {
            name: self.series.clone(),
            dates,
            values,
        })
    }
}

/// Parse a quote written with `decimal` as decimal mark.
///
/// The other of `.`/`,` is accepted only as a thousands separator in
/// strict groups of three (`1,234.5`); anything else is rejected.
fn parse_quote(raw: &str, decimal: char) -> Option<f64> {
    let thousands = if decimal == ',' { '.' } else { ',' };
    let (int_part, frac_part) = match raw.split_once(decimal) {
        Some((i, f)) => (i, Some(f)),
        None => (raw, None),
    };
    if frac_part.is_some_and(|f| f.contains(decimal) || f.contains(thousands)) {
        return None;
    }

    let digits = int_part.trim_start_matches(['-', '+']);
    if digits.contains(thousands) {
        let mut groups = digits.split(thousands);
        let head = groups.next()?;
        if head.is_empty() || head.len() > 3 || !head.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit())) {
            return None;
        }
    }

    let mut normalised: String = int_part.chars().filter(|&c| c != thousands).collect();
    if let Some(frac) = frac_part {
        normalised.push('.');
        normalised.push_str(frac);
    }
    normalised.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Banco de Mexico
Tipos de cambio
Fecha,SF43718,SF60653,SF46410,SF46407,SF57805
31/12/2019,18.8452,4.0307,748.74,3271.55,3.3140
02/01/2020,18.8817,4.0213,751.89,3258.84,3.3150
03/01/2020,N/E,4.0497,758.05,3251.60,3.3180
06/01/2020,18.9040,4.0645,761.52,3275.23,3.3190
";

    fn source(skip_rows: usize) -> SourceConfig {
        SourceConfig {
            skip_rows,
            date_format: "%d/%m/%Y".to_string(),
            ..SourceConfig::default()
        }
    }

    #[test]
    fn test_load_skips_header_and_missing() {
        let loader = SeriesLoader::new(source(3), "USDMXN", None);
        let ts = loader.load_from_reader(EXPORT.as_bytes()).unwrap();

        assert_eq!(ts.name, "USDMXN");
        assert_eq!(ts.values, vec![18.8452, 18.8817, 18.9040]);
        assert_eq!(ts.dates.len(), 3);
        assert_eq!(ts.dates[2], NaiveDate::from_ymd_opt(2020, 1, 6).unwrap());
    }

    #[test]
    fn test_min_date_inclusive() {
        let min = NaiveDate::from_ymd_opt(2020, 1, 2);
        let loader = SeriesLoader::new(source(3), "USDBRL", min);
        let ts = loader.load_from_reader(EXPORT.as_bytes()).unwrap();

        assert_eq!(ts.values, vec![4.0213, 4.0497, 4.0645]);
        assert_eq!(ts.date_range().unwrap().0, min.unwrap());
    }

    #[test]
    fn test_everything_filtered_is_empty_input() {
        let min = NaiveDate::from_ymd_opt(2030, 1, 1);
        let loader = SeriesLoader::new(source(3), "USDMXN", min);
        let err = loader.load_from_reader(EXPORT.as_bytes()).unwrap_err();
        assert!(matches!(err, TdaError::EmptyInput(_)));
    }

    #[test]
    fn test_short_record_is_read_failure() {
        let data = "Fecha,A,B,C,D,E\n01/01/2020,1.0,2.0\n";
        let loader = SeriesLoader::new(source(1), "USDMXN", None);
        let err = loader.load_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, TdaError::SourceRead(_)));
    }

    #[test]
    fn test_bad_date_and_value() {
        let loader = SeriesLoader::new(source(0), "USDMXN", None);

        let err = loader
            .load_from_reader("2020-01-01,1,2,3,4,5\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, TdaError::SourceRead(_)));

        let err = loader
            .load_from_reader("01/01/2020,abc,2,3,4,5\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, TdaError::SourceRead(_)));
    }

    #[test]
    fn test_decimal_comma_with_semicolon_delimiter() {
        let mut src = source(0);
        src.delimiter = ';';
        src.decimal_separator = ',';
        let loader = SeriesLoader::new(src, "USDMXN", None);
        let ts = loader
            .load_from_reader("01/01/2020;18,8452;4;7;3;3\n02/01/2020;1.018,5;4;7;3;3\n".as_bytes())
            .unwrap();
        assert_eq!(ts.values, vec![18.8452, 1018.5]);
    }

    #[test]
    fn test_comma_in_quote_is_not_silently_dropped() {
        let mut src = source(0);
        src.delimiter = ';';
        let loader = SeriesLoader::new(src, "USDMXN", None);
        let err = loader
            .load_from_reader("01/01/2020;18,8452;4;7;3;3\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, TdaError::SourceRead(_)));

        // proper thousands grouping still parses
        let ts = loader
            .load_from_reader("01/01/2020;3,271.55;4;7;3;3\n".as_bytes())
            .unwrap();
        assert_eq!(ts.values, vec![3271.55]);
    }

    #[test]
    fn test_parse_quote() {
        assert_eq!(parse_quote("18.8452", '.'), Some(18.8452));
        assert_eq!(parse_quote("-1,234,567.5", '.'), Some(-1234567.5));
        assert_eq!(parse_quote("1.234,5", ','), Some(1234.5));
        assert_eq!(parse_quote("12,34.5", '.'), None);
        assert_eq!(parse_quote("1.2.3", '.'), None);
        assert_eq!(parse_quote("1,5", '.'), None);
    }

    #[test]
    fn test_non_utf8_header_row_is_skipped() {
        let mut data: Vec<u8> = b"Banco de M\xe9xico\n".to_vec();
        data.extend_from_slice(b"01/01/2020,18.8452,4,7,3,3\n");
        let loader = SeriesLoader::new(source(1), "USDMXN", None);
        let ts = loader.load_from_reader(data.as_slice()).unwrap();
        assert_eq!(ts.values, vec![18.8452]);

        // a data row in a legacy encoding is still a read failure
        let loader = SeriesLoader::new(source(0), "USDMXN", None);
        let err = loader.load_from_reader(data.as_slice()).unwrap_err();
        assert!(matches!(err, TdaError::SourceRead(_)));
    }

    #[test]
    fn test_non_ascii_delimiter() {
        let mut src = source(0);
        src.delimiter = '¦';
        let loader = SeriesLoader::new(src, "USDMXN", None);
        let err = loader.load_from_reader("01/01/2020¦1¦2¦3¦4¦5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, TdaError::InvalidParameter(_)));
    }

    #[test]
    fn test_missing_file() {
        let mut src = source(0);
        src.path = "/nonexistent/fx.csv".into();
        let err = SeriesLoader::new(src, "USDMXN", None).load().unwrap_err();
        assert!(matches!(err, TdaError::SourceRead(_)));
    }
}
