//! Topological Entropy: Information Content of Persistence Diagrams
//!
//! Implements entropy measures that quantify the complexity of the
//! topological structure encoded in a persistence diagram. Essential
//! pairs have no finite lifetime and are left out throughout.

use crate::topology::PersistenceDiagram;

/// Topological entropy measures
#[derive(Debug, Clone, PartialEq)]
pub struct TopologicalEntropy {
    /// Persistent entropy (Shannon) over all finite pairs
    pub persistent_entropy: f64,
    /// Normalized entropy [0, 1]
    pub normalized_entropy: f64,
    /// Dimension-weighted entropy
    pub weighted_entropy: f64,
    /// Total lifetime (normalization constant)
    pub total_lifetime: f64,
    /// Persistent entropy of each dimension 0..=max_dimension
    pub per_dimension: Vec<f64>,
}

impl TopologicalEntropy {
    /// Compute all entropy measures from a persistence diagram
    pub fn from_diagram(pd: &PersistenceDiagram) -> Self {
        let all: Vec<f64> = pd.pairs().iter()
            .filter(|p| !p.is_essential())
            .map(|p| p.persistence())
            .collect();
        let (persistent_entropy, total_lifetime) = shannon(&all);

        let n_positive = all.iter().filter(|&&l| l > 0.0).count();
        let normalized_entropy = if n_positive > 1 {
            persistent_entropy / (n_positive as f64).ln()
        } else {
            0.0
        };

        let per_dimension: Vec<f64> = (0..=pd.max_dimension())
            .map(|d| persistence_entropy(pd, d))
            .collect();

        // Weight by dimension + 1 (so β₀ has weight 1, β₁ has weight 2, etc.)
        let weighted_entropy = per_dimension.iter()
            .enumerate()
            .map(|(d, h)| (d + 1) as f64 * h)
            .sum();

        Self {
            persistent_entropy,
            normalized_entropy,
            weighted_entropy,
            total_lifetime,
            per_dimension,
        }
    }
}

/// Shannon entropy of normalised lifetimes, and their sum
///
/// H_P = -Σᵢ pᵢ log(pᵢ),  pᵢ = lᵢ / L
fn shannon(lifetimes: &[f64]) -> (f64, f64) {
    let total: f64 = lifetimes.iter().sum();
    if total <= 0.0 {
        return (0.0, 0.0);
    }

    let mut entropy = 0.0;
    for l in lifetimes {
        let p = l / total;
        if p > 0.0 {
            entropy -= p * p.ln();
        }
    }

    (entropy, total)
}

/// Persistent entropy of dimension d
pub fn persistence_entropy(pd: &PersistenceDiagram, d: usize) -> f64 {
    let lifetimes: Vec<f64> = pd.finite(d).iter().map(|p| p.persistence()).collect();
    shannon(&lifetimes).0
}

/// Convenience function to compute entropy from diagram
pub fn compute_entropy(pd: &PersistenceDiagram) -> TopologicalEntropy {
    TopologicalEntropy::from_diagram(pd)
}
