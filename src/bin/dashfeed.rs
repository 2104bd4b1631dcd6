//! dashfeed: print the dashboard initial-data snapshot for a node data directory.

use clap::Parser;
use dashfeed::config::DashfeedConfig;
use dashfeed::index::IndexRegistry;
use dashfeed::metrics::{self, Metrics};
use dashfeed::storage::NodeDump;
use dashfeed::Aggregator;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// ── CLI Args ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "dashfeed", version, about = "Node dashboard snapshot")]
struct Args {
    /// Path to TOML config file (CLI flags override file values)
    #[arg(long, default_value = "")]
    config: String,

    /// Node data directory (unconfirmed.jsonl, peers.jsonl, blocks.jsonl)
    #[arg(long)]
    data: Option<String>,

    /// Version string reported in the snapshot
    #[arg(long)]
    node_version: Option<String>,

    #[arg(long)]
    initial_base_target: Option<u64>,

    #[arg(long)]
    log_level: Option<String>,

    /// Pretty-print the JSON response
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Print Prometheus metrics to stderr after the snapshot
    #[arg(long, default_value_t = false)]
    metrics: bool,

    /// Write an example dashfeed.toml and exit
    #[arg(long, default_value_t = false)]
    write_example_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.write_example_config {
        DashfeedConfig::write_example("dashfeed.toml")?;
        println!("Wrote example dashfeed.toml");
        return Ok(());
    }

    let (mut cfg, default_cfg_err) = if args.config.is_empty() {
        DashfeedConfig::load_or_default("dashfeed.toml")
    } else {
        (DashfeedConfig::load(&args.config)?, None)
    };

    if let Some(v) = &args.data                { cfg.node.data_dir = v.clone(); }
    if let Some(v) = &args.node_version        { cfg.node.version = v.clone(); }
    if let Some(v) = args.initial_base_target  { cfg.protocol.initial_base_target = v; }
    if let Some(v) = &args.log_level           { cfg.node.log_level = v.clone(); }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.node.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(e) = default_cfg_err {
        warn!(error = %e, "ignoring dashfeed.toml, using defaults");
    }

    let params = cfg.snapshot_params()?;
    info!(version = %params.version, data_dir = %cfg.node.data_dir, "building initial data snapshot");

    let dump = NodeDump::load(&cfg.node.data_dir)?;
    let index = IndexRegistry::new();
    let m = Metrics::new()?;

    let snapshot = Aggregator::new(dump.sources(&index), &params)
        .with_metrics(&m)
        .build()?;

    let out = if args.pretty { snapshot.to_json_pretty()? } else { snapshot.to_json()? };
    println!("{out}");

    if args.metrics {
        eprint!("{}", metrics::render());
    }
    Ok(())
}
