//! Network hyperparameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Shape and step size of a [`crate::Network`].
///
/// The network has `hidden_layers + 1` dense layers. Every hidden layer has
/// `units_per_layer` units; the last layer has `output_dim` units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkConfig {
    pub input_dim: usize,
    pub output_dim: usize,
    pub hidden_layers: usize,
    pub units_per_layer: usize,
    pub learning_rate: f64,
}

impl NetworkConfig {
    pub fn new(
        input_dim: usize,
        output_dim: usize,
        hidden_layers: usize,
        units_per_layer: usize,
        learning_rate: f64,
    ) -> Self {
        Self {
            input_dim,
            output_dim,
            hidden_layers,
            units_per_layer,
            learning_rate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_dim == 0 {
            return Err(Error::InvalidConfiguration(
                "input_dim must be > 0".to_owned(),
            ));
        }
        if self.output_dim == 0 {
            return Err(Error::InvalidConfiguration(
                "output_dim must be > 0".to_owned(),
            ));
        }
        if self.units_per_layer == 0 {
            return Err(Error::InvalidConfiguration(
                "units_per_layer must be > 0".to_owned(),
            ));
        }
        if self.hidden_layers.checked_add(1).is_none() {
            return Err(Error::InvalidConfiguration(format!(
                "hidden_layers too large, got {}",
                self.hidden_layers
            )));
        }
        // A zero learning rate is allowed: updates become no-ops.
        if !(self.learning_rate.is_finite() && self.learning_rate >= 0.0) {
            return Err(Error::InvalidConfiguration(format!(
                "learning_rate must be finite and >= 0, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.hidden_layers + 1
    }

    /// `(in_dim, out_dim)` of layer `idx`.
    #[inline]
    pub fn layer_shape(&self, idx: usize) -> (usize, usize) {
        let in_dim = if idx == 0 {
            self.input_dim
        } else {
            self.units_per_layer
        };
        let out_dim = if idx == self.hidden_layers {
            self.output_dim
        } else {
            self.units_per_layer
        };
        (in_dim, out_dim)
    }
}
