//! Information Module: Entropy of Persistence Diagrams
//!
//! Given a persistence diagram D = {(bᵢ, dᵢ)}, the persistent entropy is
//!
//!   H_P = -Σᵢ pᵢ log(pᵢ)
//!
//! where pᵢ = lᵢ / L, lᵢ = dᵢ - bᵢ is the lifetime of generator i,
//! and L = Σⱼ lⱼ is the total lifetime.
//!
//! A series whose embedding is dominated by one long-lived loop has low
//! entropy; one whose features all live about equally long has entropy
//! close to log(n).

mod entropy;

pub use entropy::{TopologicalEntropy, compute_entropy, persistence_entropy};
