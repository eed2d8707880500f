//! # FX-TDA
//!
//! Topological shape of a foreign-exchange series: sliding-window
//! embedding, Vietoris-Rips filtration and persistent homology.
//!
//! ## Pipeline
//!
//! 1. **Series Loader**: one exchange-rate column (e.g. USD/MXN) out of
//!    the central bank's CSV export, filtered by a minimum date
//!
//! 2. **Window Embedder**: the series x₀…xₙ₋₁ becomes the point cloud
//!    {(xᵢ, …, xᵢ₊w₋₁)} in ℝʷ
//!
//! 3. **Filtration Builder**: Vietoris-Rips complex over the cloud up to a
//!    simplex dimension cap, ordered by edge-length scale
//!
//! 4. **Persistence Engine**: Z/2 boundary matrix reduction producing
//!    (dimension, birth, death) pairs, rendered as a barcode and a
//!    persistence diagram
//!
//! ## Reading the Output
//!
//! - Long H0 bars separate regimes the rate sat in for a while
//! - Long H1 bars are recurrent excursions: the rate leaves a level and
//!   comes back along a different path
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Takens, "Detecting strange attractors in turbulence" (1981)
//! - Gidea & Katz, "Topological data analysis of financial time series" (2018)

pub mod config;
pub mod error;
pub mod series;
pub mod topology;
pub mod information;
pub mod render;
pub mod pipeline;

pub use config::{PipelineConfig, SourceConfig};
pub use error::{TdaError, TdaResult};

// Re-exports from series
pub use series::{SeriesLoader, TimeSeries, sliding_window};

// Re-exports from topology
pub use topology::{
    // Complex construction
    VietorisRips,
    Filtration,
    FilteredSimplex,
    DEFAULT_MAX_DIMENSION,
    // Persistence
    PersistenceDiagram,
    PersistencePair,
    PersistenceOptions,
    compute_persistence,
    compute_persistence_with,
    // Summaries
    BettiNumbers,
    BettiCurve,
};

// Re-exports from information
pub use information::{TopologicalEntropy, compute_entropy};

// Re-exports from render
pub use render::{render_barcode, render_diagram, write_svg};

pub use pipeline::{Pipeline, PipelineOutput};
