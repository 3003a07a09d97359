//! Mean squared error.
//!
//! The loss is only used for reporting. Training derives its output-layer
//! error signal analytically (see [`crate::Network::backward`]).

use crate::{Error, Result};

/// Mean squared error: `(1/n) * sum((target_i - predicted_i)^2)`.
///
/// Returns `0.0` for two empty vectors.
#[inline]
pub fn mse(target: &[f64], predicted: &[f64]) -> Result<f64> {
    if target.len() != predicted.len() {
        return Err(Error::mismatch("predicted", target.len(), predicted.len()));
    }
    if target.is_empty() {
        return Ok(0.0);
    }

    let mut sum_sq = 0.0_f64;
    for (&t, &p) in target.iter().zip(predicted) {
        let diff = t - p;
        sum_sq = diff.mul_add(diff, sum_sq);
    }
    Ok(sum_sq / target.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mse_is_zero_for_identical_vectors() {
        let t = [1.0_f64, -2.0, 0.5];
        assert_eq!(mse(&t, &t).unwrap(), 0.0);
    }

    #[test]
    fn mse_matches_hand_computed_value() {
        // mean([(2-1)^2, (1-3)^2]) = (1 + 4) / 2
        let loss = mse(&[2.0, 1.0], &[1.0, 3.0]).unwrap();
        assert!((loss - 2.5).abs() < 1e-12);
    }

    #[test]
    fn mse_is_symmetric() {
        let a = [0.1_f64, 0.9, 0.33];
        let b = [0.7_f64, 0.2, 0.5];
        assert_eq!(mse(&a, &b).unwrap(), mse(&b, &a).unwrap());
    }

    #[test]
    fn mse_rejects_length_mismatch() {
        let err = mse(&[0.0, 1.0], &[0.0]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                what: "predicted",
                expected: 2,
                got: 1
            }
        );
    }
}
