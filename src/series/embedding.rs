//! Sliding-Window (Time-Delay) Embedding
//!
//! Maps a scalar series x₀, …, xₙ₋₁ into points
//!
//!   pᵢ = (xᵢ, xᵢ₊₁, …, xᵢ₊w₋₁)   for i = 0, …, n − w − 1
//!
//! so that recurrent dynamics in the series show up as geometry
//! (clusters, loops) in ℝʷ.

use log::debug;
use ndarray::Array2;

use crate::error::{TdaError, TdaResult};

/// Embed `series` into a point cloud of `series.len() - window` rows.
///
/// Row i holds `series[i..i + window]`.
///
/// # Boundary quirk
///
/// The final complete window, starting at index `n - window`, is NOT
/// emitted. The exploratory pipeline this crate reproduces stopped one
/// window short, and its point counts are kept for parity. This looks
/// like an off-by-one in that pipeline; it is kept deliberately and
/// should not be "fixed" here without also changing every downstream
/// expectation.
///
/// # Errors
///
/// `InvalidParameter` if `window == 0` or `window >= series.len()`.
pub fn sliding_window(series: &[f64], window: usize) -> TdaResult<Array2<f64>> {
    let n = series.len();
    if window == 0 {
        return Err(TdaError::InvalidParameter("window size must be positive".to_string()));
    }
    if window >= n {
        return Err(TdaError::InvalidParameter(format!(
            "window size {window} must be smaller than the series length {n}"
        )));
    }

    let n_points = n - window;
    let mut cloud = Array2::<f64>::zeros((n_points, window));
    for i in 0..n_points {
        for k in 0..window {
            cloud[[i, k]] = series[i + k];
        }
    }

    debug!("embedded {n} samples into {n_points} points of dimension {window}");
    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_reference_example() {
        let series = [1.0, 2.0, 3.0, 10.0, 11.0, 12.0];
        let cloud = sliding_window(&series, 3).unwrap();

        // [10, 11, 12] is the skipped final window
        assert_eq!(
            cloud,
            array![[1.0, 2.0, 3.0], [2.0, 3.0, 10.0], [3.0, 10.0, 11.0]]
        );
    }

    #[test]
    fn test_window_one() {
        let cloud = sliding_window(&[5.0, 6.0, 7.0], 1).unwrap();
        assert_eq!(cloud, array![[5.0], [6.0]]);
    }

    #[test]
    fn test_invalid_window() {
        let series = [1.0, 2.0, 3.0];
        assert!(matches!(sliding_window(&series, 0), Err(TdaError::InvalidParameter(_))));
        assert!(matches!(sliding_window(&series, 3), Err(TdaError::InvalidParameter(_))));
        assert!(matches!(sliding_window(&series, 7), Err(TdaError::InvalidParameter(_))));
        assert!(matches!(sliding_window(&[], 1), Err(TdaError::InvalidParameter(_))));
    }

    proptest! {
        #[test]
        fn prop_window_count_and_content(
            series in prop::collection::vec(-100.0..100.0f64, 2..60),
            pick in 0usize..1000,
        ) {
            let w = 1 + pick % (series.len() - 1);
            let cloud = sliding_window(&series, w).unwrap();

            prop_assert_eq!(cloud.nrows(), series.len() - w);
            prop_assert_eq!(cloud.ncols(), w);
            for i in 0..cloud.nrows() {
                prop_assert_eq!(cloud.row(i).to_vec(), series[i..i + w].to_vec());
            }
        }
    }
}
