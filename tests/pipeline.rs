//! End-to-end run: CSV export → persistence pairs → SVG plots.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use fx_tda::{BettiNumbers, Pipeline, PipelineConfig, SourceConfig, TdaError};

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fx_tda_{}_{}", tag, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Export with two metadata rows, a header, and 30 daily quotes.
fn write_export(dir: &PathBuf) -> PathBuf {
    let mut text = String::from("Banco de Mexico\nTipos de cambio y resultados historicos\n");
    text.push_str("Fecha,SF43718,SF60653,SF46410,SF46407,SF57805\n");
    let start = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    for day in 0..30u32 {
        let date = start + chrono::Duration::days(day as i64);
        let mxn = if day == 12 {
            "N/E".to_string()
        } else {
            format!("{:.4}", 20.0 + (day as f64 * 0.7).sin())
        };
        text.push_str(&format!(
            "{},{},5.6,730.1,3600.0,3.7\n",
            date.format("%d/%m/%Y"),
            mxn
        ));
    }
    let path = dir.join("tipo_de_cambio.csv");
    fs::write(&path, text).unwrap();
    path
}

fn config(dir: &PathBuf, path: PathBuf) -> PipelineConfig {
    PipelineConfig {
        source: SourceConfig {
            path,
            skip_rows: 3,
            ..SourceConfig::default()
        },
        series: "USDMXN".to_string(),
        min_date: NaiveDate::from_ymd_opt(2021, 3, 5),
        window_size: 3,
        output_dir: dir.join("plots"),
        ..PipelineConfig::default()
    }
}

#[test]
fn test_csv_to_plots() {
    let dir = scratch_dir("e2e");
    let path = write_export(&dir);
    let config = config(&dir, path);

    let pipeline = Pipeline::new(config.clone()).unwrap();
    let output = pipeline.run().unwrap();

    // days 4..30 kept, day 12 has no quote
    assert_eq!(output.series.len(), 25);
    assert_eq!(output.point_cloud.nrows(), 25 - 3);
    assert_eq!(output.point_cloud.ncols(), 3);

    let n = output.point_cloud.nrows();
    assert_eq!(BettiNumbers::at_scale(&output.diagram, 0.0).beta_0, n);
    assert_eq!(output.diagram.essential(0).len(), 1);
    for p in output.diagram.pairs() {
        assert!(p.birth <= p.death);
        assert!(p.dimension <= 1);
    }

    let (barcode, diagram) = pipeline.render(&output, &config.output_dir).unwrap();
    let barcode = fs::read_to_string(barcode).unwrap();
    let diagram = fs::read_to_string(diagram).unwrap();
    assert!(barcode.contains("USDMXN persistence barcode"));
    assert_eq!(diagram.matches("<circle").count(), output.diagram.len());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_config_file_round() {
    let dir = scratch_dir("cfg");
    let path = write_export(&dir);
    let json = serde_json::to_string_pretty(&config(&dir, path)).unwrap();
    let cfg_path = dir.join("run.json");
    fs::write(&cfg_path, json).unwrap();

    let loaded = PipelineConfig::from_file(&cfg_path).unwrap();
    assert_eq!(loaded.window_size, 3);
    assert_eq!(loaded.source.skip_rows, 3);
    assert!(Pipeline::new(loaded).unwrap().run().is_ok());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_window_too_large_for_filtered_series() {
    let dir = scratch_dir("short");
    let path = write_export(&dir);
    let config = PipelineConfig {
        min_date: NaiveDate::from_ymd_opt(2021, 3, 29),
        ..config(&dir, path)
    };

    // two observations left, window three
    let err = Pipeline::new(config).unwrap().run().unwrap_err();
    assert!(matches!(err, TdaError::InvalidParameter(_)));

    fs::remove_dir_all(&dir).unwrap();
}
