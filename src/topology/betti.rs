//! Betti Numbers: Topological Invariants
//!
//! The k-th Betti number βₖ counts the number of k-dimensional
//! "holes" in a topological space:
//!
//! - β₀: Number of connected components
//! - β₁: Number of 1-dimensional loops/cycles
//! - β₂: Number of 2-dimensional voids/cavities
//!
//! Read off a persistence diagram: βₖ(ε) is the number of k-pairs
//! alive at ε, i.e. with birth ≤ ε < death.

use super::PersistenceDiagram;

/// Betti numbers at a specific filtration value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BettiNumbers {
    pub beta_0: usize,  // Connected components
    pub beta_1: usize,  // Loops
    pub beta_2: usize,  // Voids
    pub epsilon: f64,   // Filtration scale
}

impl BettiNumbers {
    pub fn new(beta_0: usize, beta_1: usize, beta_2: usize, epsilon: f64) -> Self {
        Self { beta_0, beta_1, beta_2, epsilon }
    }

    /// Betti numbers of the complex at scale ε
    pub fn at_scale(pd: &PersistenceDiagram, epsilon: f64) -> Self {
        Self::new(
            pd.betti_at(0, epsilon),
            pd.betti_at(1, epsilon),
            pd.betti_at(2, epsilon),
            epsilon,
        )
    }

    /// Total topological complexity
    pub fn total(&self) -> usize {
        self.beta_0 + self.beta_1 + self.beta_2
    }

    /// Euler characteristic χ = β₀ - β₁ + β₂
    pub fn euler_characteristic(&self) -> i64 {
        self.beta_0 as i64 - self.beta_1 as i64 + self.beta_2 as i64
    }
}

/// Betti curve: sequence of Betti numbers across filtration
#[derive(Debug, Clone)]
pub struct BettiCurve {
    pub values: Vec<BettiNumbers>,
}

impl BettiCurve {
    /// Sample Betti numbers at `n_steps + 1` evenly spaced scales from 0
    /// to the largest finite death in the diagram.
    pub fn compute(pd: &PersistenceDiagram, n_steps: usize) -> Self {
        let max_eps = pd.max_finite_death().unwrap_or(0.0);
        let n_steps = n_steps.max(1);

        let values = (0..=n_steps)
            .map(|step| {
                let epsilon = max_eps * step as f64 / n_steps as f64;
                BettiNumbers::at_scale(pd, epsilon)
            })
            .collect();

        Self { values }
    }

    /// Get β₀ curve
    pub fn beta_0_curve(&self) -> Vec<(f64, usize)> {
        self.values.iter().map(|b| (b.epsilon, b.beta_0)).collect()
    }

    /// Get β₁ curve
    pub fn beta_1_curve(&self) -> Vec<(f64, usize)> {
        self.values.iter().map(|b| (b.epsilon, b.beta_1)).collect()
    }

    /// Integrated β₁ (area under curve)
    pub fn integrated_beta_1(&self) -> f64 {
        if self.values.len() < 2 {
            return 0.0;
        }

        let mut integral = 0.0;
        for i in 1..self.values.len() {
            let de = self.values[i].epsilon - self.values[i-1].epsilon;
            let avg = (self.values[i].beta_1 + self.values[i-1].beta_1) as f64 / 2.0;
            integral += de * avg;
        }
        integral
    }
}
