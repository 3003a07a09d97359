use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::activation::sigmoid_prime;
use crate::{Error, Layer, NetworkConfig, Result, loss};

/// A fully-connected feed-forward network with sigmoid units.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    config: NetworkConfig,
    layers: Vec<Layer>,
}

/// Memoized forward pass for one sample.
///
/// Holds every layer's pre-activation `z` and the activations `a[0..=L+1]`,
/// where `a[0]` is a copy of the input. Allocate once via `Network::trace()`
/// and reuse across samples.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    zs: Vec<Vec<f64>>,
    activations: Vec<Vec<f64>>,
}

/// Per-layer error signals (`dLoss/dz`) for one sample (overwrite semantics).
#[derive(Debug, Clone)]
pub struct Deltas {
    deltas: Vec<Vec<f64>>,
}

impl Network {
    /// Build a network whose parameters are drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let mut layers = Vec::with_capacity(config.num_layers());
        for idx in 0..config.num_layers() {
            let (in_dim, out_dim) = config.layer_shape(idx);
            debug!("layer {idx}: {in_dim} -> {out_dim}");
            layers.push(Layer::new_with_rng(in_dim, out_dim, rng)?);
        }

        let network = Self { config, layers };
        network.check_invariants()?;
        Ok(network)
    }

    /// Build a network using a deterministic seed.
    pub fn with_seed(config: NetworkConfig, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(config, &mut rng)
    }

    #[inline]
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.config.input_dim
    }

    #[inline]
    pub fn output_dim(&self) -> usize {
        self.config.output_dim
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn layer(&self, idx: usize) -> Option<&Layer> {
        self.layers.get(idx)
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Verify that every layer's shape agrees with the configuration and that
    /// consecutive layers chain (`rows(l) == cols(l - 1)`, `len(b) == cols(W)`).
    pub fn check_invariants(&self) -> Result<()> {
        if self.layers.len() != self.config.num_layers() {
            return Err(Error::InvalidConfiguration(format!(
                "network has {} layers, config expects {}",
                self.layers.len(),
                self.config.num_layers()
            )));
        }

        let mut prev_out = self.config.input_dim;
        for (idx, layer) in self.layers.iter().enumerate() {
            let (in_dim, out_dim) = self.config.layer_shape(idx);
            let w = layer.weights();
            if w.rows() != prev_out || w.rows() != in_dim || w.cols() != out_dim {
                return Err(Error::InvalidConfiguration(format!(
                    "layer {idx} weights are {}x{}, expected {in_dim}x{out_dim}",
                    w.rows(),
                    w.cols()
                )));
            }
            if layer.biases().len() != w.cols() {
                return Err(Error::InvalidConfiguration(format!(
                    "layer {idx} has {} biases, expected {}",
                    layer.biases().len(),
                    w.cols()
                )));
            }
            prev_out = out_dim;
        }
        Ok(())
    }

    pub fn trace(&self) -> ForwardTrace {
        ForwardTrace::new(self)
    }

    pub fn deltas(&self) -> Deltas {
        Deltas::new(self)
    }

    /// Run inference on one input vector.
    ///
    /// Returns `output_dim` values, each in `(0, 1)`.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut trace = self.trace();
        self.forward_trace(input, &mut trace)?;
        Ok(trace.output().to_vec())
    }

    /// Forward pass for a single sample, retaining every `z` and `a` in `trace`.
    ///
    /// Returns the final activation (the network output).
    pub fn forward_trace<'a>(
        &self,
        input: &[f64],
        trace: &'a mut ForwardTrace,
    ) -> Result<&'a [f64]> {
        if input.len() != self.input_dim() {
            return Err(Error::mismatch("input", self.input_dim(), input.len()));
        }
        self.assert_trace_shape(trace);

        trace.activations[0].copy_from_slice(input);
        for (idx, layer) in self.layers.iter().enumerate() {
            // a[idx] feeds layer idx and produces a[idx + 1].
            let (left, right) = trace.activations.split_at_mut(idx + 1);
            layer.forward_into(&left[idx], &mut trace.zs[idx], &mut right[0]);
        }

        Ok(trace.output())
    }

    /// Mean squared error between `target` and `predicted`, both of length
    /// `output_dim`.
    #[inline]
    pub fn loss(&self, target: &[f64], predicted: &[f64]) -> Result<f64> {
        if target.len() != self.output_dim() {
            return Err(Error::mismatch("target", self.output_dim(), target.len()));
        }
        loss::mse(target, predicted)
    }

    /// Backward pass for a single sample.
    ///
    /// `trace` must hold the forward pass of the sample whose `target` is given.
    /// Overwrites `deltas` with:
    /// - output layer: `(a[L+1] - target) * sigmoid'(z[L])`
    /// - hidden layer `l`: `sigmoid'(z[l]) * (W[l+1] delta[l+1])`
    pub fn backward(
        &self,
        trace: &ForwardTrace,
        target: &[f64],
        deltas: &mut Deltas,
    ) -> Result<()> {
        if target.len() != self.output_dim() {
            return Err(Error::mismatch("target", self.output_dim(), target.len()));
        }
        self.assert_trace_shape(trace);
        self.assert_deltas_shape(deltas);

        let last = self.layers.len() - 1;
        let z_out = &trace.zs[last];
        let a_out = trace.output();
        for (k, d) in deltas.deltas[last].iter_mut().enumerate() {
            *d = (a_out[k] - target[k]) * sigmoid_prime(z_out[k]);
        }

        for idx in (0..last).rev() {
            let (left, right) = deltas.deltas.split_at_mut(idx + 1);
            self.layers[idx + 1].backprop_delta(&right[0], &trace.zs[idx], &mut left[idx]);
        }

        Ok(())
    }

    /// Apply one stochastic-gradient-descent update from a sample's deltas.
    ///
    /// `w[l][i][j] -= lr * a[l][i] * delta[l][j]` and `b[l][j] -= lr * delta[l][j]`.
    ///
    /// Panics if `trace` or `deltas` was built for a network of another shape.
    pub fn apply_update(&mut self, trace: &ForwardTrace, deltas: &Deltas) {
        self.assert_trace_shape(trace);
        self.assert_deltas_shape(deltas);

        let lr = self.config.learning_rate;
        for (idx, layer) in self.layers.iter_mut().enumerate() {
            layer.sgd_step(&trace.activations[idx], &deltas.deltas[idx], lr);
        }
    }

    // Buffers from `trace()`/`deltas()` of another network are caller bugs.
    fn assert_trace_shape(&self, trace: &ForwardTrace) {
        assert_eq!(
            trace.zs.len(),
            self.layers.len(),
            "trace has {} layers, model has {} layers",
            trace.zs.len(),
            self.layers.len()
        );
        assert_eq!(
            trace.activations.len(),
            self.layers.len() + 1,
            "trace has {} activations, model needs {}",
            trace.activations.len(),
            self.layers.len() + 1
        );
        assert_eq!(
            trace.activations[0].len(),
            self.input_dim(),
            "trace input len {} does not match model input_dim {}",
            trace.activations[0].len(),
            self.input_dim()
        );
        for (idx, layer) in self.layers.iter().enumerate() {
            assert!(
                trace.zs[idx].len() == layer.out_dim()
                    && trace.activations[idx + 1].len() == layer.out_dim(),
                "trace layer {idx} len {} does not match layer out_dim {}",
                trace.zs[idx].len(),
                layer.out_dim()
            );
        }
    }

    fn assert_deltas_shape(&self, deltas: &Deltas) {
        assert_eq!(
            deltas.deltas.len(),
            self.layers.len(),
            "deltas has {} layers, model has {} layers",
            deltas.deltas.len(),
            self.layers.len()
        );
        for (idx, layer) in self.layers.iter().enumerate() {
            assert_eq!(
                deltas.deltas[idx].len(),
                layer.out_dim(),
                "deltas layer {idx} len {} does not match layer out_dim {}",
                deltas.deltas[idx].len(),
                layer.out_dim()
            );
        }
    }
}

impl ForwardTrace {
    pub fn new(network: &Network) -> Self {
        let mut zs = Vec::with_capacity(network.num_layers());
        let mut activations = Vec::with_capacity(network.num_layers() + 1);
        activations.push(vec![0.0; network.input_dim()]);
        for layer in network.layers() {
            zs.push(vec![0.0; layer.out_dim()]);
            activations.push(vec![0.0; layer.out_dim()]);
        }
        Self { zs, activations }
    }

    /// Pre-activation of layer `idx`.
    #[inline]
    pub fn z(&self, idx: usize) -> &[f64] {
        &self.zs[idx]
    }

    /// Activation `idx`; `activation(0)` is the input.
    #[inline]
    pub fn activation(&self, idx: usize) -> &[f64] {
        &self.activations[idx]
    }

    #[inline]
    pub fn output(&self) -> &[f64] {
        self.activations
            .last()
            .expect("trace must have at least one activation")
            .as_slice()
    }
}

impl Deltas {
    pub fn new(network: &Network) -> Self {
        let deltas = network
            .layers()
            .iter()
            .map(|layer| vec![0.0; layer.out_dim()])
            .collect();
        Self { deltas }
    }

    #[inline]
    pub fn layer(&self, idx: usize) -> &[f64] {
        &self.deltas[idx]
    }
}
