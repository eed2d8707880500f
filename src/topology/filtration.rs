//! Filtered Simplicial Complex
//!
//! A filtration is stored as a single list of simplices ordered by
//! (filtration value, dimension, insertion order). Under that order every
//! face precedes its cofaces, so the complex at any scale s is a prefix of
//! the list and K(s₁) ⊆ K(s₂) whenever s₁ ≤ s₂.

use std::collections::HashMap;

use crate::error::{TdaError, TdaResult};

/// A simplex with the scale at which it enters the filtration
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSimplex {
    /// Vertex indices, strictly increasing
    pub vertices: Vec<usize>,
    /// Filtration value (entry scale)
    pub value: f64,
}

impl FilteredSimplex {
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Codimension-one faces, in the order obtained by dropping vertex 0, 1, …
    pub fn faces(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        (0..self.vertices.len()).filter(move |_| self.vertices.len() > 1).map(move |skip| {
            self.vertices
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &v)| v)
                .collect()
        })
    }
}

/// Nested family of simplicial complexes indexed by scale
#[derive(Debug, Clone)]
pub struct Filtration {
    simplices: Vec<FilteredSimplex>,
    max_dimension: usize,
}

impl Filtration {
    /// Order simplices given in insertion order. Callers guarantee closure.
    pub(crate) fn from_insertion_order(mut simplices: Vec<FilteredSimplex>, max_dimension: usize) -> Self {
        // stable: equal (value, dimension) keep insertion order
        simplices.sort_by(|a, b| {
            a.value
                .total_cmp(&b.value)
                .then(a.dimension().cmp(&b.dimension()))
        });
        Self { simplices, max_dimension }
    }

    /// Build a filtration from explicit `(vertices, value)` pairs.
    ///
    /// Vertex lists are sorted; the family must be closed under taking
    /// faces and every face must enter no later than the simplex itself.
    pub fn from_simplices<I>(simplices: I) -> TdaResult<Self>
    where
        I: IntoIterator<Item = (Vec<usize>, f64)>,
    {
        let mut ordered = Vec::new();
        let mut values: HashMap<Vec<usize>, f64> = HashMap::new();

        for (mut vertices, value) in simplices {
            if vertices.is_empty() {
                return Err(TdaError::InvalidParameter("simplex with no vertices".to_string()));
            }
            if value.is_nan() {
                return Err(TdaError::InvalidParameter(format!(
                    "simplex {:?} has a NaN filtration value",
                    vertices
                )));
            }
            vertices.sort_unstable();
            if vertices.windows(2).any(|w| w[0] == w[1]) {
                return Err(TdaError::InvalidParameter(format!(
                    "simplex {:?} repeats a vertex",
                    vertices
                )));
            }
            if values.insert(vertices.clone(), value).is_some() {
                return Err(TdaError::InvalidParameter(format!(
                    "simplex {:?} listed twice",
                    vertices
                )));
            }
            ordered.push(FilteredSimplex { vertices, value });
        }

        for simplex in &ordered {
            for face in simplex.faces() {
                match values.get(&face) {
                    None => {
                        return Err(TdaError::InvalidParameter(format!(
                            "face {:?} of {:?} is missing",
                            face, simplex.vertices
                        )))
                    }
                    Some(&v) if v > simplex.value => {
                        return Err(TdaError::InvalidParameter(format!(
                            "face {:?} enters at {} after its coface {:?} at {}",
                            face, v, simplex.vertices, simplex.value
                        )))
                    }
                    Some(_) => {}
                }
            }
        }

        let max_dimension = ordered.iter().map(|s| s.dimension()).max().unwrap_or(0);
        Ok(Self::from_insertion_order(ordered, max_dimension))
    }

    /// All simplices in filtration order
    pub fn simplices(&self) -> &[FilteredSimplex] {
        &self.simplices
    }

    /// Simplex dimension cap this filtration was built with
    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Complex at `scale`: every simplex with value ≤ scale
    pub fn complex_at(&self, scale: f64) -> &[FilteredSimplex] {
        let end = self.simplices.partition_point(|s| s.value <= scale);
        &self.simplices[..end]
    }

    /// Largest filtration value present
    pub fn max_value(&self) -> Option<f64> {
        self.simplices.last().map(|s| s.value)
    }

    /// Number of simplices in each dimension 0..=max_dimension
    pub fn count_by_dimension(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.max_dimension + 1];
        for s in &self.simplices {
            counts[s.dimension()] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_faces_first() {
        let f = Filtration::from_simplices(vec![
            (vec![0, 1, 2], 1.0),
            (vec![0, 1], 1.0),
            (vec![1, 2], 0.5),
            (vec![0, 2], 1.0),
            (vec![2], 0.0),
            (vec![1], 0.0),
            (vec![0], 0.0),
        ])
        .unwrap();

        let dims: Vec<usize> = f.simplices().iter().map(|s| s.dimension()).collect();
        assert_eq!(dims, vec![0, 0, 0, 1, 1, 1, 2]);
        // equal value and dimension: insertion order
        assert_eq!(f.simplices()[0].vertices, vec![2]);
        assert_eq!(f.simplices()[3].vertices, vec![1, 2]);
        assert_eq!(f.simplices()[4].vertices, vec![0, 1]);
        assert_eq!(f.count_by_dimension(), vec![3, 3, 1]);
        assert_eq!(f.max_value(), Some(1.0));
    }

    #[test]
    fn test_complex_at_prefix() {
        let f = Filtration::from_simplices(vec![
            (vec![0], 0.0),
            (vec![1], 0.0),
            (vec![0, 1], 2.0),
        ])
        .unwrap();

        assert_eq!(f.complex_at(-1.0).len(), 0);
        assert_eq!(f.complex_at(0.0).len(), 2);
        assert_eq!(f.complex_at(1.9).len(), 2);
        assert_eq!(f.complex_at(2.0).len(), 3);
    }

    #[test]
    fn test_rejects_missing_face() {
        let err = Filtration::from_simplices(vec![(vec![0], 0.0), (vec![0, 1], 1.0)]).unwrap_err();
        assert!(matches!(err, TdaError::InvalidParameter(_)));
    }

    #[test]
    fn test_rejects_late_face() {
        let err = Filtration::from_simplices(vec![
            (vec![0], 0.0),
            (vec![1], 3.0),
            (vec![0, 1], 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, TdaError::InvalidParameter(_)));
    }

    #[test]
    fn test_rejects_duplicates() {
        assert!(Filtration::from_simplices(vec![(vec![0], 0.0), (vec![0], 0.0)]).is_err());
        assert!(Filtration::from_simplices(vec![(vec![0, 0], 0.0)]).is_err());
    }

    #[test]
    fn test_empty() {
        let f = Filtration::from_simplices(Vec::new()).unwrap();
        assert!(f.is_empty());
        assert_eq!(f.max_value(), None);
    }
}
