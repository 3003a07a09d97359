mod app_config;

use std::path::PathBuf;

use clap::Parser;
use log::info;
use sigmoid_mlp::{Error, Network, Result, load_csv};

use crate::app_config::RunConfig;

/// Train a sigmoid MLP on a delimited data file and print the prediction for
/// the first sample.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Data file: header lines, then feature columns followed by label columns.
    #[arg(long)]
    data: PathBuf,
    /// JSON run config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    epochs: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Number of leading lines to discard.
    #[arg(long)]
    skip_lines: Option<usize>,
    #[arg(long)]
    input_dim: Option<usize>,
    #[arg(long)]
    output_dim: Option<usize>,
    #[arg(long)]
    hidden_layers: Option<usize>,
    #[arg(long)]
    units: Option<usize>,
    #[arg(long)]
    lr: Option<f64>,
}

impl Args {
    fn run_config(&self) -> Result<RunConfig> {
        let mut cfg = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(epochs) = self.epochs {
            cfg.epochs = epochs;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(skip) = self.skip_lines {
            cfg.layout.skip_lines = skip;
        }
        if let Some(dim) = self.input_dim {
            cfg.network.input_dim = dim;
            cfg.layout.input_columns = dim;
        }
        if let Some(dim) = self.output_dim {
            cfg.network.output_dim = dim;
            cfg.layout.target_columns = dim;
        }
        if let Some(n) = self.hidden_layers {
            cfg.network.hidden_layers = n;
        }
        if let Some(units) = self.units {
            cfg.network.units_per_layer = units;
        }
        if let Some(lr) = self.lr {
            cfg.network.learning_rate = lr;
        }

        if cfg.layout.input_columns != cfg.network.input_dim
            || cfg.layout.target_columns != cfg.network.output_dim
        {
            return Err(Error::InvalidConfiguration(format!(
                "layout has {}+{} columns but network expects {}+{}",
                cfg.layout.input_columns,
                cfg.layout.target_columns,
                cfg.network.input_dim,
                cfg.network.output_dim
            )));
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = args.run_config()?;

    let data = load_csv(&args.data, &cfg.layout)?;
    info!(
        "loaded {} samples from {} ({} rows skipped)",
        data.len(),
        args.data.display(),
        data.skipped()
    );
    if data.is_empty() {
        return Err(Error::InvalidData(format!(
            "{} has no usable samples",
            args.data.display()
        )));
    }

    let seed = cfg.seed.unwrap_or_else(rand::random);
    info!("initializing network with seed {seed}: {:?}", cfg.network);
    let mut network = Network::with_seed(cfg.network, seed)?;

    network.train(data.inputs(), data.targets(), cfg.epochs)?;

    let prediction = network.forward(&data.inputs()[0])?;
    let rendered: Vec<String> = prediction.iter().map(|v| format!("{v:.6}")).collect();
    println!("prediction for first sample: {}", rendered.join(" "));

    Ok(())
}
