//! TOML configuration file support.
//!
//! Config file is loaded from --config path (default: ./dashfeed.toml).
//! CLI flags override config file values.

use crate::snapshot::{SnapshotError, SnapshotParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Base target of the genesis block; the dashboard shows it as 100000.
pub const DEFAULT_INITIAL_BASE_TARGET: u64 = 18_325_193_796;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashfeedConfig {
    #[serde(default)]
    pub node: NodeSection,
    #[serde(default)]
    pub protocol: ProtocolSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSection {
    /// Version string reported to the dashboard.
    pub version:   String,
    pub data_dir:  String,
    pub log_level: String,
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            version:   env!("CARGO_PKG_VERSION").into(),
            data_dir:  "./data/node".into(),
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolSection {
    pub initial_base_target: u64,
}

impl Default for ProtocolSection {
    fn default() -> Self {
        Self { initial_base_target: DEFAULT_INITIAL_BASE_TARGET }
    }
}

impl DashfeedConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let s = std::fs::read_to_string(path)?;
        let cfg: DashfeedConfig = toml::from_str(&s)?;
        cfg.snapshot_params()?;
        Ok(cfg)
    }

    /// Like [`load`](Self::load), but a bad file falls back to defaults. The
    /// error is handed back so the caller can report it once logging is up.
    pub fn load_or_default(path: &str) -> (Self, Option<anyhow::Error>) {
        match Self::load(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn snapshot_params(&self) -> Result<SnapshotParams, SnapshotError> {
        SnapshotParams::new(self.node.version.clone(), self.protocol.initial_base_target)
    }

    pub fn example_toml() -> &'static str {
        r#"# dashfeed configuration
# All values shown are defaults.

[node]
version   = "0.3.0"        # reported as "version" in every snapshot
data_dir  = "./data/node"  # unconfirmed.jsonl, peers.jsonl, blocks.jsonl
log_level = "info"         # trace | debug | info | warn | error

[protocol]
initial_base_target = 18325193796  # genesis base target, must be non-zero
"#
    }

    pub fn write_example(path: &str) -> std::io::Result<()> {
        std::fs::write(path, Self::example_toml())
    }
}
