//! Prometheus metrics for the dashboard feed.
//!
//! All metrics use the "dashfeed_" prefix.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntGaugeVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// ── Global metric registry ────────────────────────────────────────────────

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ── Metric handles ─────────────────────────────────────────────────────────

pub struct Metrics {
    pub snapshots_built:   IntCounter,
    pub snapshot_failures: IntCounter,
    pub build_time_ms:     Histogram,
    /// Items in the latest snapshot, labelled by section.
    pub section_items:     IntGaugeVec,
}

impl Metrics {
    /// Register into the process-wide registry served by [`render`].
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_registry(registry())?)
    }

    pub fn with_registry(r: &Registry) -> prometheus::Result<Self> {
        let snapshots_built = IntCounter::with_opts(Opts::new(
            "dashfeed_snapshots_total",
            "Snapshots built successfully",
        ))?;
        r.register(Box::new(snapshots_built.clone()))?;

        let snapshot_failures = IntCounter::with_opts(Opts::new(
            "dashfeed_snapshot_failures_total",
            "Snapshots aborted by a failing source",
        ))?;
        r.register(Box::new(snapshot_failures.clone()))?;

        let build_time_ms = Histogram::with_opts(
            HistogramOpts::new("dashfeed_snapshot_build_ms", "Snapshot build latency (ms)")
                .buckets(vec![0.1, 0.5, 1.0, 5.0, 10.0, 50.0, 100.0, 500.0]),
        )?;
        r.register(Box::new(build_time_ms.clone()))?;

        let section_items = IntGaugeVec::new(
            Opts::new("dashfeed_snapshot_items", "Items in the latest snapshot per section"),
            &["section"],
        )?;
        r.register(Box::new(section_items.clone()))?;

        Ok(Self { snapshots_built, snapshot_failures, build_time_ms, section_items })
    }
}

/// Render all registered metrics as Prometheus text format.
pub fn render() -> String {
    render_registry(registry())
}

pub fn render_registry(r: &Registry) -> String {
    let encoder = TextEncoder::new();
    let metric_families = r.gather();
    let mut out = Vec::new();
    encoder.encode(&metric_families, &mut out).unwrap_or_default();
    String::from_utf8(out).unwrap_or_default()
}
