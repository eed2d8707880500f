//! Pipeline: Loader → Embedder → Rips Filtration → Persistence
//!
//! Straight-line batch run over one exchange-rate series. Each stage
//! consumes the previous stage's output and nothing is revisited.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info};
use ndarray::Array2;

use crate::config::PipelineConfig;
use crate::error::TdaResult;
use crate::render::{render_barcode, render_diagram, write_svg};
use crate::series::{sliding_window, SeriesLoader, TimeSeries};
use crate::topology::{compute_persistence_with, PersistenceDiagram, PersistenceOptions, VietorisRips};

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub series: TimeSeries,
    pub point_cloud: Array2<f64>,
    /// Number of simplices in the Rips filtration
    pub filtration_size: usize,
    pub diagram: PersistenceDiagram,
}

/// Configured end-to-end run
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> TdaResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load the configured series and run every stage on it
    pub fn run(&self) -> TdaResult<PipelineOutput> {
        let start = Instant::now();
        let series = SeriesLoader::from_config(&self.config).load()?;
        debug!("load: {:?}", start.elapsed());
        if let Some((first, last)) = series.date_range() {
            info!("{}: {} observations from {} to {}", series.name, series.len(), first, last);
        }
        self.run_on_series(series)
    }

    /// Run stages 2-4 on raw values
    pub fn run_on_values(&self, values: &[f64]) -> TdaResult<PipelineOutput> {
        self.run_on_series(TimeSeries::from_values(self.config.series.clone(), values.to_vec()))
    }

    fn run_on_series(&self, series: TimeSeries) -> TdaResult<PipelineOutput> {
        let start = Instant::now();
        let point_cloud = sliding_window(&series.values, self.config.window_size)?;
        info!(
            "embedding: {} points in dimension {}",
            point_cloud.nrows(),
            point_cloud.ncols()
        );
        debug!("embed: {:?}", start.elapsed());

        let start = Instant::now();
        let rips = VietorisRips::from_points(
            &point_cloud,
            self.config.max_dimension,
            self.config.max_scale,
        )?;
        let filtration = rips.build();
        debug!("filtration: {:?}", start.elapsed());

        let start = Instant::now();
        let options = PersistenceOptions {
            include_top_dimension: self.config.include_top_dimension,
        };
        let diagram = compute_persistence_with(&filtration, options)?;
        debug!("persistence: {:?}", start.elapsed());

        Ok(PipelineOutput {
            series,
            point_cloud,
            filtration_size: filtration.len(),
            diagram,
        })
    }

    /// Write `barcode.svg` and `diagram.svg` under `dir`
    pub fn render(&self, output: &PipelineOutput, dir: impl AsRef<Path>) -> TdaResult<(PathBuf, PathBuf)> {
        let dir = dir.as_ref();
        let name = &output.series.name;
        let w = self.config.window_size;

        let barcode_path = dir.join("barcode.svg");
        let barcode = render_barcode(&output.diagram, &format!("{name} persistence barcode (w = {w})"))?;
        write_svg(&barcode_path, &barcode)?;

        let diagram_path = dir.join("diagram.svg");
        let diagram = render_diagram(&output.diagram, &format!("{name} persistence diagram (w = {w})"))?;
        write_svg(&diagram_path, &diagram)?;

        Ok((barcode_path, diagram_path))
    }
}
