use std::path::Path;

use serde::{Deserialize, Serialize};
use sigmoid_mlp::{CsvLayout, Error, NetworkConfig, Result};

/// Run configuration file format.
///
/// Top-level fields may be omitted; a `network` table must be complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub network: NetworkConfig,
    pub layout: CsvLayout,
    pub epochs: usize,
    /// Fixed initialization seed; a fresh one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::new(576, 3, 2, 32, 0.1),
            layout: CsvLayout::default(),
            epochs: 50,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let s = std::fs::read_to_string(p)
            .map_err(|e| Error::Io(format!("failed to read {}: {e}", p.display())))?;
        serde_json::from_str(&s)
            .map_err(|e| Error::InvalidData(format!("failed to parse {}: {e}", p.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: RunConfig = serde_json::from_str(r#"{"epochs": 7}"#).unwrap();
        assert_eq!(cfg.epochs, 7);
        assert_eq!(cfg.network, RunConfig::default().network);
        assert_eq!(cfg.layout, CsvLayout::default());
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn parses_a_full_config() {
        let json = r#"{
            "network": {
                "input_dim": 2,
                "output_dim": 1,
                "hidden_layers": 1,
                "units_per_layer": 4,
                "learning_rate": 0.5
            },
            "layout": { "skip_lines": 1, "input_columns": 2, "target_columns": 1 },
            "epochs": 2000,
            "seed": 42
        }"#;
        let cfg: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.network, NetworkConfig::new(2, 1, 1, 4, 0.5));
        assert_eq!(cfg.layout, CsvLayout::new(1, 2, 1));
        assert_eq!(cfg.seed, Some(42));
    }
}
