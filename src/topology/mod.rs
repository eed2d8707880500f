//! Topology Module: Persistent Homology and Simplicial Complexes
//!
//! Implements the mathematical structures for topological data analysis:
//! - Vietoris-Rips filtration
//! - Persistent homology via boundary matrix reduction
//! - Betti numbers extraction
//!
//! ## Mathematical Background
//!
//! For a point cloud X obtained by sliding-window embedding of an
//! exchange-rate series, we construct a filtration of simplicial
//! complexes VR_ε(X) indexed by the scale parameter ε. The persistent
//! homology tracks the birth and death of topological features
//! (connected components, loops, voids) across this filtration.

mod filtration;
mod vietoris_rips;
mod persistence;
mod betti;

pub use filtration::{FilteredSimplex, Filtration};
pub use vietoris_rips::{VietorisRips, DEFAULT_MAX_DIMENSION};
pub use persistence::{
    PersistenceDiagram,
    PersistencePair,
    PersistenceOptions,
    compute_persistence,
    compute_persistence_with,
};
pub use betti::{BettiNumbers, BettiCurve};
