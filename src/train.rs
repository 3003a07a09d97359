//! Per-sample training loop and progress reporting.
//!
//! `Network::train` runs plain stochastic gradient descent: for every epoch it
//! visits the samples in the given order and updates the parameters right after
//! each sample's backward pass, so later samples in the same epoch already see
//! the updated weights.

use log::info;

use crate::{Error, Network, Result};

/// Progress observation emitted once per epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    /// 1-based epoch index.
    pub epoch: usize,
    /// Mean per-sample loss over the epoch (`0.0` for an empty sample set).
    pub mean_loss: f64,
    pub samples: usize,
}

/// Receiver of per-epoch progress reports.
pub trait ProgressSink {
    fn epoch_finished(&mut self, report: &EpochReport);
}

impl<F> ProgressSink for F
where
    F: FnMut(&EpochReport),
{
    fn epoch_finished(&mut self, report: &EpochReport) {
        self(report)
    }
}

/// Logs each epoch at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn epoch_finished(&mut self, report: &EpochReport) {
        info!(
            "epoch {}, loss: {} ({} samples)",
            report.epoch, report.mean_loss, report.samples
        );
    }
}

impl Network {
    /// Train on `(inputs[i], targets[i])` pairs for `epochs` epochs, logging
    /// the mean loss of every epoch.
    pub fn train(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
        epochs: usize,
    ) -> Result<()> {
        self.train_with_sink(inputs, targets, epochs, &mut LogSink)
    }

    /// Same as [`Network::train`], reporting each epoch to `sink`.
    ///
    /// All samples are validated before the first update, so a malformed
    /// sample leaves the parameters untouched.
    pub fn train_with_sink<S>(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
        epochs: usize,
        sink: &mut S,
    ) -> Result<()>
    where
        S: ProgressSink + ?Sized,
    {
        self.check_samples(inputs, targets)?;

        let mut trace = self.trace();
        let mut deltas = self.deltas();

        for epoch in 0..epochs {
            let mut total_loss = 0.0_f64;
            for (input, target) in inputs.iter().zip(targets) {
                self.forward_trace(input, &mut trace)?;
                self.backward(&trace, target, &mut deltas)?;
                self.apply_update(&trace, &deltas);
                total_loss += self.loss(target, trace.output())?;
            }

            let mean_loss = if inputs.is_empty() {
                0.0
            } else {
                total_loss / inputs.len() as f64
            };
            sink.epoch_finished(&EpochReport {
                epoch: epoch + 1,
                mean_loss,
                samples: inputs.len(),
            });
        }

        Ok(())
    }

    /// Mean loss over a sample set, without touching the parameters.
    pub fn evaluate(&self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
        self.check_samples(inputs, targets)?;
        if inputs.is_empty() {
            return Ok(0.0);
        }

        let mut trace = self.trace();
        let mut total = 0.0_f64;
        for (input, target) in inputs.iter().zip(targets) {
            let predicted = self.forward_trace(input, &mut trace)?;
            total += self.loss(target, predicted)?;
        }
        Ok(total / inputs.len() as f64)
    }

    fn check_samples(&self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
        if inputs.len() != targets.len() {
            return Err(Error::mismatch("targets", inputs.len(), targets.len()));
        }
        for (input, target) in inputs.iter().zip(targets) {
            if input.len() != self.input_dim() {
                return Err(Error::mismatch("input", self.input_dim(), input.len()));
            }
            if target.len() != self.output_dim() {
                return Err(Error::mismatch("target", self.output_dim(), target.len()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetworkConfig;

    fn or_data() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let xs = vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ];
        let ys = vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]];
        (xs, ys)
    }

    fn collect_reports(
        net: &mut Network,
        xs: &[Vec<f64>],
        ys: &[Vec<f64>],
        epochs: usize,
    ) -> Result<Vec<EpochReport>> {
        let mut reports = Vec::new();
        net.train_with_sink(xs, ys, epochs, &mut |r: &EpochReport| reports.push(*r))?;
        Ok(reports)
    }

    #[test]
    fn zero_epochs_changes_nothing_and_reports_nothing() {
        let (xs, ys) = or_data();
        let mut net = Network::with_seed(NetworkConfig::new(2, 1, 1, 4, 0.5), 0).unwrap();
        let before = net.clone();

        let reports = collect_reports(&mut net, &xs, &ys, 0).unwrap();
        assert!(reports.is_empty());
        assert_eq!(net, before);
    }

    #[test]
    fn zero_learning_rate_leaves_parameters_unchanged() {
        let mut net = Network::with_seed(NetworkConfig::new(2, 1, 1, 4, 0.0), 4).unwrap();
        let before = net.clone();

        let reports = collect_reports(&mut net, &[vec![1.0, 0.0]], &[vec![1.0]], 1).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(net, before);
    }

    #[test]
    fn reports_one_entry_per_epoch_with_one_based_index() {
        let (xs, ys) = or_data();
        let mut net = Network::with_seed(NetworkConfig::new(2, 1, 1, 4, 0.5), 1).unwrap();

        let reports = collect_reports(&mut net, &xs, &ys, 5).unwrap();
        let epochs: Vec<usize> = reports.iter().map(|r| r.epoch).collect();
        assert_eq!(epochs, vec![1, 2, 3, 4, 5]);
        assert!(reports.iter().all(|r| r.samples == 4 && r.mean_loss.is_finite()));
    }

    #[test]
    fn loss_decreases_on_linearly_separable_data() {
        let (xs, ys) = or_data();
        let mut net = Network::with_seed(NetworkConfig::new(2, 1, 1, 4, 0.5), 2).unwrap();

        let reports = collect_reports(&mut net, &xs, &ys, 500).unwrap();
        let head: f64 = reports[..10].iter().map(|r| r.mean_loss).sum::<f64>() / 10.0;
        let tail: f64 = reports[490..].iter().map(|r| r.mean_loss).sum::<f64>() / 10.0;
        assert!(tail < head, "head={head} tail={tail}");
        assert!(reports[499].mean_loss < reports[0].mean_loss);
        assert!(reports[499].mean_loss < 0.05, "final={}", reports[499].mean_loss);
    }

    #[test]
    fn rejects_malformed_samples_without_touching_parameters() {
        let mut net = Network::with_seed(NetworkConfig::new(2, 1, 1, 4, 0.5), 3).unwrap();
        let before = net.clone();

        // The bad sample comes last, after samples that would otherwise update.
        let xs = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0]];
        let ys = vec![vec![1.0], vec![1.0], vec![0.0]];
        let err = net.train(&xs, &ys, 3).unwrap_err();
        assert_eq!(err, Error::mismatch("input", 2, 1));
        assert_eq!(net, before);

        let xs = vec![vec![0.0, 1.0]];
        let ys = vec![vec![1.0, 0.0]];
        let err = net.train(&xs, &ys, 1).unwrap_err();
        assert_eq!(err, Error::mismatch("target", 1, 2));
        assert_eq!(net, before);

        let err = net.train(&[vec![0.0, 1.0]], &[], 1).unwrap_err();
        assert_eq!(err, Error::mismatch("targets", 1, 0));
        assert_eq!(net, before);
    }

    #[test]
    fn empty_sample_set_reports_zero_loss() {
        let mut net = Network::with_seed(NetworkConfig::new(2, 1, 1, 4, 0.5), 5).unwrap();
        let before = net.clone();
        let reports = collect_reports(&mut net, &[], &[], 2).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.mean_loss == 0.0 && r.samples == 0));
        assert_eq!(net, before);
    }

    #[test]
    fn evaluate_matches_manual_mean_loss() {
        let (xs, ys) = or_data();
        let net = Network::with_seed(NetworkConfig::new(2, 1, 2, 3, 0.5), 6).unwrap();

        let mut manual = 0.0;
        for (x, y) in xs.iter().zip(&ys) {
            manual += net.loss(y, &net.forward(x).unwrap()).unwrap();
        }
        manual /= xs.len() as f64;

        let eval = net.evaluate(&xs, &ys).unwrap();
        assert!((eval - manual).abs() < 1e-15);
    }
}
