use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::activation::{sigmoid, sigmoid_prime};
use crate::{Error, Matrix, Result};

/// Half-width of the uniform range used to initialize weights and biases.
pub const INIT_RANGE: f64 = 0.5;

/// One dense sigmoid layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Shape `(in_dim, out_dim)`.
    weights: Matrix,
    biases: Vec<f64>,
}

impl Layer {
    /// Every weight and bias is drawn independently from `U[-0.5, 0.5)`.
    pub fn new_with_rng<R: Rng + ?Sized>(
        in_dim: usize,
        out_dim: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let dist = Uniform::new(-INIT_RANGE, INIT_RANGE);
        let weights = Matrix::from_fn(in_dim, out_dim, |_, _| dist.sample(&mut *rng))?;
        let biases = (0..out_dim).map(|_| dist.sample(&mut *rng)).collect();
        Ok(Self { weights, biases })
    }

    pub fn from_parts(weights: Matrix, biases: Vec<f64>) -> Result<Self> {
        if biases.len() != weights.cols() {
            return Err(Error::InvalidConfiguration(format!(
                "biases len {} does not match weight cols {}",
                biases.len(),
                weights.cols()
            )));
        }
        Ok(Self { weights, biases })
    }

    #[inline]
    pub fn in_dim(&self) -> usize {
        self.weights.rows()
    }

    #[inline]
    pub fn out_dim(&self) -> usize {
        self.weights.cols()
    }

    #[inline]
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    #[inline]
    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    /// Forward pass for a single sample.
    ///
    /// Computes:
    /// - `z[j] = sum_i(inputs[i] * w[i][j]) + b[j]`
    /// - `outputs[j] = sigmoid(z[j])`
    ///
    /// Shape contract:
    /// - `inputs.len() == self.in_dim()`
    /// - `z.len() == outputs.len() == self.out_dim()`
    #[inline]
    pub fn forward_into(&self, inputs: &[f64], z: &mut [f64], outputs: &mut [f64]) {
        debug_assert_eq!(inputs.len(), self.in_dim());
        debug_assert_eq!(z.len(), self.out_dim());
        debug_assert_eq!(outputs.len(), self.out_dim());

        for j in 0..self.out_dim() {
            let mut sum = 0.0_f64;
            for (i, &x) in inputs.iter().enumerate() {
                sum = x.mul_add(self.weights[(i, j)], sum);
            }
            z[j] = sum + self.biases[j];
            outputs[j] = sigmoid(z[j]);
        }
    }

    /// Pull this layer's error signal back through its weights.
    ///
    /// `d_prev[i] = sigmoid'(z_prev[i]) * sum_j(w[i][j] * delta[j])`, where
    /// `z_prev` is the pre-activation of the layer feeding this one.
    #[inline]
    pub fn backprop_delta(&self, delta: &[f64], z_prev: &[f64], d_prev: &mut [f64]) {
        debug_assert_eq!(delta.len(), self.out_dim());
        debug_assert_eq!(z_prev.len(), self.in_dim());
        debug_assert_eq!(d_prev.len(), self.in_dim());

        for i in 0..self.in_dim() {
            let mut sum = 0.0_f64;
            for (&w, &d) in self.weights.row(i).iter().zip(delta) {
                sum = w.mul_add(d, sum);
            }
            d_prev[i] = sigmoid_prime(z_prev[i]) * sum;
        }
    }

    /// Gradient-descent step for one sample:
    /// `w[i][j] -= lr * inputs[i] * delta[j]`, `b[j] -= lr * delta[j]`.
    #[inline]
    pub fn sgd_step(&mut self, inputs: &[f64], delta: &[f64], lr: f64) {
        debug_assert_eq!(inputs.len(), self.in_dim());
        debug_assert_eq!(delta.len(), self.out_dim());

        for (i, &x) in inputs.iter().enumerate() {
            for (w, &d) in self.weights.row_mut(i).iter_mut().zip(delta) {
                *w -= lr * x * d;
            }
        }
        for (b, &d) in self.biases.iter_mut().zip(delta) {
            *b -= lr * d;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn init_is_within_half_open_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let layer = Layer::new_with_rng(16, 8, &mut rng).unwrap();
        assert_eq!(layer.weights().rows(), 16);
        assert_eq!(layer.weights().cols(), 8);
        assert_eq!(layer.biases().len(), 8);
        for &v in layer.weights().as_slice().iter().chain(layer.biases()) {
            assert!((-INIT_RANGE..INIT_RANGE).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn forward_matches_hand_computed_values() {
        // in=2, out=1: z = 1*0.5 + 2*(-0.25) + 0.1 = 0.1
        let w = Matrix::from_vec(2, 1, vec![0.5, -0.25]).unwrap();
        let layer = Layer::from_parts(w, vec![0.1]).unwrap();
        let mut z = [0.0];
        let mut a = [0.0];
        layer.forward_into(&[1.0, 2.0], &mut z, &mut a);
        assert!((z[0] - 0.1).abs() < 1e-12);
        assert!((a[0] - sigmoid(0.1)).abs() < 1e-12);
    }

    #[test]
    fn sgd_step_applies_outer_product() {
        let w = Matrix::from_vec(2, 2, vec![0.0; 4]).unwrap();
        let mut layer = Layer::from_parts(w, vec![0.0, 0.0]).unwrap();
        layer.sgd_step(&[1.0, 2.0], &[0.5, -1.0], 0.1);
        // w[i][j] = -0.1 * x[i] * d[j]
        assert_eq!(layer.weights().as_slice(), &[-0.05, 0.1, -0.1, 0.2]);
        assert_eq!(layer.biases(), &[-0.05, 0.1]);
    }

    #[test]
    fn from_parts_rejects_bias_mismatch() {
        let w = Matrix::zeros(2, 3).unwrap();
        assert!(Layer::from_parts(w, vec![0.0; 2]).is_err());
    }
}
