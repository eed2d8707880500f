//! Series Module: Loading and Embedding
//!
//! - `loader.rs`: reads one exchange-rate column out of the CSV export,
//!   filtered by a minimum date.
//! - `embedding.rs`: sliding-window embedding of the series into a point
//!   cloud, one row per window.

mod loader;
mod embedding;

pub use loader::{SeriesLoader, TimeSeries};
pub use embedding::sliding_window;
