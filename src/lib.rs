//! A small fully-connected sigmoid network.
//!
//! `sigmoid-mlp` is a from-scratch multi-layer perceptron meant to be read
//! and audited: every layer is a dense `(in_dim, out_dim)` weight matrix plus
//! a bias vector, every unit uses the logistic sigmoid, and training is plain
//! per-sample stochastic gradient descent on mean squared error.
//!
//! # Shapes
//!
//! - Scalars are `f64`.
//! - A network built from [`NetworkConfig`] has `hidden_layers + 1` layers.
//!   Layer 0 reads `input_dim` values; every hidden layer has
//!   `units_per_layer` units; the last layer has `output_dim` units.
//! - `weights[(i, j)]` connects input unit `i` to output unit `j`.
//!
//! # Errors
//!
//! Public entry points validate vector lengths and return
//! [`Error::DimensionMismatch`] before touching any parameter. Bad
//! hyperparameters are rejected at construction with
//! [`Error::InvalidConfiguration`]. Numerical blow-ups are not detected.
//!
//! # Quick start
//!
//! ```rust
//! use sigmoid_mlp::{Network, NetworkConfig};
//!
//! # fn main() -> sigmoid_mlp::Result<()> {
//! let xs = vec![
//!     vec![0.0, 0.0],
//!     vec![1.0, 1.0],
//!     vec![0.0, 1.0],
//!     vec![1.0, 0.0],
//! ];
//! let ys = vec![vec![0.0], vec![0.0], vec![1.0], vec![1.0]];
//!
//! let mut net = Network::with_seed(NetworkConfig::new(2, 1, 1, 4, 0.5), 0)?;
//! net.train(&xs, &ys, 100)?;
//! let y = net.forward(&[0.0, 1.0])?;
//! assert_eq!(y.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Custom training loops
//!
//! `train` is built from three public steps that reuse caller-owned buffers:
//!
//! ```rust
//! use sigmoid_mlp::{Network, NetworkConfig};
//!
//! # fn main() -> sigmoid_mlp::Result<()> {
//! let mut net = Network::with_seed(NetworkConfig::new(3, 2, 2, 8, 0.1), 0)?;
//! let mut trace = net.trace();
//! let mut deltas = net.deltas();
//!
//! let x = [0.1, -0.2, 0.3];
//! let t = [0.0, 1.0];
//! net.forward_trace(&x, &mut trace)?;
//! net.backward(&trace, &t, &mut deltas)?;
//! net.apply_update(&trace, &deltas);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod config;
pub mod data;
pub mod error;
pub mod layer;
pub mod loss;
pub mod matrix;
pub mod network;
pub mod train;

pub use config::NetworkConfig;
pub use data::{CsvLayout, Dataset, load_csv, parse_csv};
pub use error::{Error, Result};
pub use layer::Layer;
pub use matrix::Matrix;
pub use network::{Deltas, ForwardTrace, Network};
pub use train::{EpochReport, LogSink, ProgressSink};
