//! The sigmoid nonlinearity.
//!
//! Every layer applies `sigmoid(z) = 1 / (1 + e^-z)` element-wise to its
//! pre-activation `z = a W + b`. Backprop needs the derivative with respect to
//! `z`, which is evaluated on the cached pre-activation value.

/// Logistic sigmoid.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    // Numerically stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

/// `sigmoid'(x) = sigmoid(x) * (1 - sigmoid(x))`.
#[inline]
pub fn sigmoid_prime(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1.0 - s)
}
