//! Vietoris-Rips Complex Construction
//!
//! The Vietoris-Rips complex VR_ε(X) is a simplicial complex where:
//! - 0-simplices are the points in X
//! - A k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ ε for all i,j
//!
//! Sweeping ε gives the Rips filtration: a vertex enters at 0, an edge
//! at its length, and a higher simplex at its longest edge.

use std::collections::HashSet;

use log::{debug, info, warn};
use ndarray::Array2;

use super::filtration::{FilteredSimplex, Filtration};
use crate::error::{TdaError, TdaResult};

/// Simplex dimension cap used by the pipeline unless configured otherwise
pub const DEFAULT_MAX_DIMENSION: usize = 2;

/// Vietoris-Rips filtration builder
#[derive(Debug, Clone)]
pub struct VietorisRips {
    /// Distance matrix (precomputed)
    distances: Array2<f64>,
    /// Largest simplex dimension included
    max_dimension: usize,
    /// Simplices entering above this scale are dropped
    max_scale: Option<f64>,
}

impl VietorisRips {
    /// Create from point cloud (computes Euclidean distance matrix)
    pub fn from_points(points: &Array2<f64>, max_dimension: usize, max_scale: Option<f64>) -> TdaResult<Self> {
        Self::check_points(points.nrows())?;
        let distances = Self::compute_distance_matrix(points);
        Self::new(distances, max_dimension, max_scale)
    }

    /// Create from a precomputed distance matrix
    pub fn from_distance_matrix(distances: &Array2<f64>, max_dimension: usize, max_scale: Option<f64>) -> TdaResult<Self> {
        if distances.nrows() != distances.ncols() {
            return Err(TdaError::InvalidParameter(format!(
                "distance matrix must be square, got {}x{}",
                distances.nrows(),
                distances.ncols()
            )));
        }
        Self::check_points(distances.nrows())?;
        if distances.iter().any(|d| d.is_nan() || *d < 0.0) {
            return Err(TdaError::InvalidParameter(
                "distances must be non-negative numbers".to_string(),
            ));
        }
        let n = distances.nrows();
        for i in 0..n {
            if distances[[i, i]] != 0.0 {
                return Err(TdaError::InvalidParameter(format!(
                    "distance matrix diagonal must be zero, got {} at ({i}, {i})",
                    distances[[i, i]]
                )));
            }
            for j in i+1..n {
                if distances[[i, j]] != distances[[j, i]] {
                    return Err(TdaError::InvalidParameter(format!(
                        "distance matrix is not symmetric at ({i}, {j}): {} vs {}",
                        distances[[i, j]],
                        distances[[j, i]]
                    )));
                }
            }
        }
        Self::new(distances.clone(), max_dimension, max_scale)
    }

    fn new(distances: Array2<f64>, max_dimension: usize, max_scale: Option<f64>) -> TdaResult<Self> {
        if let Some(scale) = max_scale {
            if scale.is_nan() || scale < 0.0 {
                return Err(TdaError::InvalidParameter(format!(
                    "max scale must be non-negative, got {}",
                    scale
                )));
            }
        }
        Ok(Self {
            distances,
            max_dimension,
            max_scale,
        })
    }

    fn check_points(n: usize) -> TdaResult<()> {
        if n < 2 {
            return Err(TdaError::InsufficientPoints { found: n, required: 2 });
        }
        Ok(())
    }

    /// Compute Euclidean distance matrix
    fn compute_distance_matrix(points: &Array2<f64>) -> Array2<f64> {
        let n = points.nrows();
        let mut dm = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in i+1..n {
                let dist = points
                    .row(i)
                    .iter()
                    .zip(points.row(j).iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    .sqrt();
                dm[[i, j]] = dist;
                dm[[j, i]] = dist;
            }
        }

        dm
    }

    pub fn distances(&self) -> &Array2<f64> {
        &self.distances
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.distances.nrows()
    }

    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    pub fn max_scale(&self) -> Option<f64> {
        self.max_scale
    }

    fn admits(&self, d: f64) -> bool {
        self.max_scale.map_or(true, |m| d <= m)
    }

    /// Get all edges present at scale ε
    pub fn edges_at(&self, epsilon: f64) -> Vec<(usize, usize)> {
        let n = self.n_points();
        let mut edges = Vec::new();

        for i in 0..n {
            for j in i+1..n {
                let d = self.distances[[i, j]];
                if d <= epsilon && self.admits(d) {
                    edges.push((i, j));
                }
            }
        }

        edges
    }

    /// Count connected components at scale ε using Union-Find
    pub fn count_components_at(&self, epsilon: f64) -> usize {
        let n = self.n_points();
        let mut parent: Vec<usize> = (0..n).collect();
        let mut rank = vec![0usize; n];

        fn find(parent: &mut [usize], i: usize) -> usize {
            if parent[i] != i {
                parent[i] = find(parent, parent[i]);
            }
            parent[i]
        }

        fn union(parent: &mut [usize], rank: &mut [usize], x: usize, y: usize) {
            let rx = find(parent, x);
            let ry = find(parent, y);
            if rx != ry {
                if rank[rx] < rank[ry] {
                    parent[rx] = ry;
                } else if rank[rx] > rank[ry] {
                    parent[ry] = rx;
                } else {
                    parent[ry] = rx;
                    rank[rx] += 1;
                }
            }
        }

        for (i, j) in self.edges_at(epsilon) {
            union(&mut parent, &mut rank, i, j);
        }

        let mut roots = HashSet::new();
        for i in 0..n {
            roots.insert(find(&mut parent, i));
        }
        roots.len()
    }

    /// Build the full filtration up to `max_dimension`
    ///
    /// Simplices are generated dimension by dimension in lexicographic
    /// vertex order; that generation order breaks ties between simplices
    /// with equal value and dimension.
    pub fn build(&self) -> Filtration {
        let n = self.n_points();

        // Upper neighbours of each vertex within the scale cap
        let neighbours: Vec<Vec<usize>> = (0..n)
            .map(|i| {
                (i+1..n)
                    .filter(|&j| self.admits(self.distances[[i, j]]))
                    .collect()
            })
            .collect();

        let mut simplices: Vec<FilteredSimplex> = (0..n)
            .map(|i| FilteredSimplex { vertices: vec![i], value: 0.0 })
            .collect();

        let mut level: Vec<FilteredSimplex> = simplices.clone();
        for dim in 1..=self.max_dimension {
            let mut next = Vec::new();
            for simplex in &level {
                let last = simplex.vertices[simplex.vertices.len() - 1];
                for &u in &neighbours[last] {
                    let mut value = simplex.value;
                    let mut clique = true;
                    for &v in &simplex.vertices {
                        let d = self.distances[[v, u]];
                        if !self.admits(d) {
                            clique = false;
                            break;
                        }
                        value = value.max(d);
                    }
                    if clique {
                        let mut vertices = simplex.vertices.clone();
                        vertices.push(u);
                        next.push(FilteredSimplex { vertices, value });
                    }
                }
            }
            debug!("rips: {} simplices of dimension {}", next.len(), dim);
            if next.is_empty() {
                break;
            }
            simplices.extend(next.iter().cloned());
            level = next;
        }

        if n > 1 && neighbours.iter().all(|nb| nb.is_empty()) {
            warn!("max scale {:?} admits no edges; filtration is {} isolated points", self.max_scale, n);
        }

        let filtration = Filtration::from_insertion_order(simplices, self.max_dimension);
        info!(
            "rips filtration: {} points, {} simplices (by dimension {:?})",
            n,
            filtration.len(),
            filtration.count_by_dimension()
        );
        filtration
    }
}
