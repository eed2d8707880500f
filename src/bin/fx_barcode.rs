//! FX Barcode: Persistent Homology of an Exchange-Rate Series
//!
//! Runs the full pipeline on the configured series and writes the
//! barcode and persistence diagram as SVG.
//!
//! ## Protocol
//!
//! 1. Load the series from the central-bank CSV export
//! 2. Embed it with a sliding window of length w
//! 3. Build the Vietoris-Rips filtration up to dimension 2
//! 4. Reduce the boundary matrix and summarise the pairs
//! 5. Render barcode.svg and diagram.svg
//!
//! Usage: `fx_barcode [config.json]` (defaults apply without a file;
//! `RUST_LOG=debug` shows per-stage timings).

use std::process::ExitCode;

use log::error;

use fx_tda::{
    compute_entropy,
    BettiNumbers,
    Pipeline,
    PipelineConfig,
    TdaResult,
};

fn run() -> TdaResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };

    println!("═══════════════════════════════════════════════════════════════");
    println!("  FX-TDA: Persistent Homology of {}", config.series);
    println!("═══════════════════════════════════════════════════════════════\n");

    println!("Parameters:");
    println!("  Source      = {}", config.source.path.display());
    match config.min_date {
        Some(d) => println!("  From        = {}", d),
        None => println!("  From        = (all dates)"),
    }
    println!("  Window w    = {}", config.window_size);
    println!("  Max dim d   = {}", config.max_dimension);
    match config.max_scale {
        Some(s) => println!("  Max scale   = {:.4}", s),
        None => println!("  Max scale   = (none)"),
    }
    println!();

    let pipeline = Pipeline::new(config)?;
    let output = pipeline.run()?;

    println!("Pipeline:");
    println!("  Observations  = {}", output.series.len());
    println!("  Point cloud   = {} × {}", output.point_cloud.nrows(), output.point_cloud.ncols());
    println!("  Simplices     = {}", output.filtration_size);
    println!("  Pairs         = {}", output.diagram.len());
    println!();

    println!("─────────────────────────────────────────────────────────────");
    println!("  dim   pairs   essential   total persistence   longest");
    println!("─────────────────────────────────────────────────────────────");
    for d in 0..=output.diagram.max_dimension() {
        let longest = output.diagram.finite(d)
            .iter()
            .map(|p| p.persistence())
            .fold(0.0, f64::max);
        println!(
            "  H{}   {:5}   {:9}   {:17.4}   {:7.4}",
            d,
            output.diagram.dim(d).len(),
            output.diagram.essential(d).len(),
            output.diagram.total_persistence(d),
            longest
        );
    }

    let entropy = compute_entropy(&output.diagram);
    println!("\nPersistent entropy H_P = {:.4} (normalised {:.4})",
        entropy.persistent_entropy, entropy.normalized_entropy);

    if let Some(death) = output.diagram.max_finite_death() {
        let mid = BettiNumbers::at_scale(&output.diagram, death / 2.0);
        println!("Betti numbers at ε = {:.4}: β₀ = {}, β₁ = {}, β₂ = {}",
            mid.epsilon, mid.beta_0, mid.beta_1, mid.beta_2);
    }

    let (barcode, diagram) = pipeline.render(&output, &pipeline.config().output_dir)?;
    println!("\nPlots:");
    println!("  {}", barcode.display());
    println!("  {}", diagram.display());

    println!("\n═══════════════════════════════════════════════════════════════");
    println!("  Analysis Complete");
    println!("═══════════════════════════════════════════════════════════════");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
