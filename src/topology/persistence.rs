//! Persistent Homology via the Standard Algorithm
//!
//! Computes exact birth/death pairs of a filtration by reducing its
//! boundary matrix over Z/2.
//!
//! ## Algorithm Overview
//!
//! 1. Index simplices in filtration order (value, dimension, insertion)
//! 2. Build the boundary column of each simplex
//! 3. Reduce columns left to right by adding earlier columns with the
//!    same pivot ("low")
//! 4. A non-zero column j with low i pairs σᵢ (birth) with σⱼ (death);
//!    a zero column that is never a low creates an essential class
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.

use std::collections::{BTreeSet, HashMap};

use log::{debug, info, warn};

use super::filtration::Filtration;
use crate::error::{TdaError, TdaResult};

/// A feature born at `birth` and dying at `death` (∞ if it never dies)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistencePair {
    pub dimension: usize,
    pub birth: f64,
    pub death: f64,
}

impl PersistencePair {
    pub fn new(dimension: usize, birth: f64, death: f64) -> Self {
        Self { dimension, birth, death }
    }

    /// Lifetime of the feature
    pub fn persistence(&self) -> f64 {
        if self.death.is_infinite() {
            f64::INFINITY
        } else {
            self.death - self.birth
        }
    }

    /// Is this an essential feature (infinite persistence)?
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }

    /// Alive at `scale`: born at or before it, not yet dead
    pub fn is_alive_at(&self, scale: f64) -> bool {
        self.birth <= scale && scale < self.death
    }
}

/// Persistence diagram: all pairs, grouped by dimension
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistenceDiagram {
    pairs: Vec<PersistencePair>,
    max_dimension: usize,
}

impl PersistenceDiagram {
    /// Build a diagram from arbitrary pairs; sorts them by
    /// (dimension, birth, death).
    pub fn from_pairs(mut pairs: Vec<PersistencePair>) -> Self {
        pairs.sort_by(|a, b| {
            a.dimension
                .cmp(&b.dimension)
                .then(a.birth.total_cmp(&b.birth))
                .then(a.death.total_cmp(&b.death))
        });
        let max_dimension = pairs.iter().map(|p| p.dimension).max().unwrap_or(0);
        Self { pairs, max_dimension }
    }

    pub fn pairs(&self) -> &[PersistencePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Highest homology dimension holding a pair
    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    /// Get all pairs for dimension d
    pub fn dim(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs.iter().filter(|p| p.dimension == d).collect()
    }

    /// Get finite pairs for dimension d
    pub fn finite(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs.iter()
            .filter(|p| p.dimension == d && !p.is_essential())
            .collect()
    }

    /// Get essential pairs for dimension d
    pub fn essential(&self, d: usize) -> Vec<&PersistencePair> {
        self.pairs.iter()
            .filter(|p| p.dimension == d && p.is_essential())
            .collect()
    }

    /// Rank of the d-th homology at `scale`
    pub fn betti_at(&self, d: usize, scale: f64) -> usize {
        self.pairs.iter()
            .filter(|p| p.dimension == d && p.is_alive_at(scale))
            .count()
    }

    /// Total persistence of finite pairs in dimension d
    pub fn total_persistence(&self, d: usize) -> f64 {
        self.finite(d).iter().map(|p| p.persistence()).sum()
    }

    /// Largest finite death across all dimensions
    pub fn max_finite_death(&self) -> Option<f64> {
        self.pairs.iter()
            .filter(|p| !p.is_essential())
            .map(|p| p.death)
            .reduce(f64::max)
    }
}

/// Options controlling which dimensions are reported
#[derive(Debug, Clone, Copy, Default)]
pub struct PersistenceOptions {
    /// Report classes in the top simplex dimension too. Those can never
    /// die inside the filtration, so they are off by default.
    pub include_top_dimension: bool,
}

/// Sparse column representation for boundary matrix
#[derive(Debug, Clone, Default)]
struct SparseColumn {
    rows: BTreeSet<usize>,
}

impl SparseColumn {
    fn is_zero(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the lowest (maximum) non-zero index
    fn low(&self) -> Option<usize> {
        self.rows.iter().next_back().copied()
    }

    /// Add a face index mod 2
    fn toggle(&mut self, row: usize) {
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
    }

    /// XOR (symmetric difference) with another column - addition in Z/2Z
    fn add_assign(&mut self, other: &SparseColumn) {
        for &row in &other.rows {
            self.toggle(row);
        }
    }
}

/// Compute persistence with default options
///
/// With the default options pairs are reported for homology dimensions
/// 0 ..= d-1, where d is the filtration's simplex cap: at d = 2 that is
/// H0 and H1, and H2 is left out. A d-dimensional class can never die
/// without (d+1)-simplices; set `include_top_dimension` to report it.
pub fn compute_persistence(filtration: &Filtration) -> TdaResult<PersistenceDiagram> {
    compute_persistence_with(filtration, PersistenceOptions::default())
}

/// Compute exact persistent homology using the standard algorithm
///
/// Zero-length pairs are kept: coincident points give an H0 pair born
/// and dying at the same scale.
pub fn compute_persistence_with(
    filtration: &Filtration,
    options: PersistenceOptions,
) -> TdaResult<PersistenceDiagram> {
    if filtration.is_empty() {
        return Err(TdaError::EmptyInput("filtration has no simplices".to_string()));
    }

    let simplices = filtration.simplices();
    let top = filtration.max_dimension();
    let report_max = if options.include_top_dimension || top == 0 {
        top
    } else {
        top - 1
    };

    let simplex_index: HashMap<&[usize], usize> = simplices
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.vertices.as_slice(), idx))
        .collect();

    let m = simplices.len();
    let mut columns: Vec<SparseColumn> = Vec::with_capacity(m);
    let mut low_to_col: HashMap<usize, usize> = HashMap::new();
    let mut additions = 0usize;

    for (col_idx, simplex) in simplices.iter().enumerate() {
        let mut boundary = SparseColumn::default();
        for face in simplex.faces() {
            match simplex_index.get(face.as_slice()) {
                Some(&face_idx) => boundary.toggle(face_idx),
                None => {
                    return Err(TdaError::InvalidParameter(format!(
                        "face {:?} of {:?} is not in the filtration",
                        face, simplex.vertices
                    )))
                }
            }
        }

        while let Some(low_idx) = boundary.low() {
            match low_to_col.get(&low_idx) {
                Some(&pivot_col) => {
                    boundary.add_assign(&columns[pivot_col]);
                    additions += 1;
                }
                None => break,
            }
        }

        if let Some(low_idx) = boundary.low() {
            low_to_col.insert(low_idx, col_idx);
        }

        columns.push(boundary);
    }
    debug!("reduced {} columns with {} column additions", m, additions);

    let mut pairs = Vec::new();
    let mut paired = vec![false; m];

    for (col_idx, column) in columns.iter().enumerate() {
        if let Some(low_idx) = column.low() {
            paired[low_idx] = true;
            paired[col_idx] = true;

            let birth = &simplices[low_idx];
            let dimension = birth.dimension();
            if dimension <= report_max {
                pairs.push(PersistencePair::new(dimension, birth.value, simplices[col_idx].value));
            }
        }
    }

    for (idx, simplex) in simplices.iter().enumerate() {
        if !paired[idx] && columns[idx].is_zero() && simplex.dimension() <= report_max {
            pairs.push(PersistencePair::new(simplex.dimension(), simplex.value, f64::INFINITY));
        }
    }

    let diagram = PersistenceDiagram::from_pairs(pairs);
    if diagram.pairs().iter().all(|p| p.is_essential()) {
        warn!("every persistence pair is essential; the scale cap may be too small");
    }
    info!(
        "persistence: {} pairs ({} essential) up to dimension {}",
        diagram.len(),
        diagram.pairs().iter().filter(|p| p.is_essential()).count(),
        report_max
    );

    Ok(diagram)
}
