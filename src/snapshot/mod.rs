//! Dashboard initial-data snapshot.
//!
//! One pass over the unconfirmed pool, the peer registry and the last
//! [`RECENT_BLOCKS_WINDOW`] blocks, reshaped into a single `processInitialData`
//! response. Nothing read here is mutated; a failing source aborts the whole
//! snapshot and every cursor opened so far is dropped before the error returns.

pub mod classify;
pub mod normalize;
pub mod response;
pub mod truncate;

pub use classify::{classify, project, PeerClass, PeerView};
pub use normalize::base_target_ratio;
pub use response::{
    ActivePeerView, InitialData, PeerSummaryView, RecentBlockView, Sections, UnconfirmedTxView,
    RESPONSE_KIND,
};
pub use truncate::{announced_address, truncate, TruncateStyle};

use crate::metrics::Metrics;
use crate::source::{BlockSource, EntityIndex, EntityKey, PeerSource, SourceError, UnconfirmedTxSource};
use crate::types::{Block, Transaction};
use std::fmt;
use std::num::NonZeroU64;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

/// Newest blocks shown on the dashboard.
pub const RECENT_BLOCKS_WINDOW: usize = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    UnconfirmedTransactions,
    Peers,
    RecentBlocks,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnconfirmedTransactions => "unconfirmed transactions",
            Self::Peers => "peers",
            Self::RecentBlocks => "recent blocks",
        })
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("{kind} source failed: {source}")]
    Source {
        kind: SourceKind,
        #[source]
        source: SourceError,
    },
    #[error("initial base target must be non-zero")]
    ZeroInitialBaseTarget,
}

impl SnapshotError {
    pub fn kind(&self) -> Option<SourceKind> {
        match self {
            Self::Source { kind, .. } => Some(*kind),
            Self::ZeroInitialBaseTarget => None,
        }
    }
}

fn from_source(kind: SourceKind) -> impl Fn(SourceError) -> SnapshotError {
    move |source| SnapshotError::Source { kind, source }
}

/// Protocol constants the snapshot needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotParams {
    pub version: String,
    pub initial_base_target: NonZeroU64,
}

impl SnapshotParams {
    pub fn new(version: impl Into<String>, initial_base_target: u64) -> Result<Self, SnapshotError> {
        let initial_base_target =
            NonZeroU64::new(initial_base_target).ok_or(SnapshotError::ZeroInitialBaseTarget)?;
        Ok(Self { version: version.into(), initial_base_target })
    }
}

/// Injected collaborators.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    pub txs: &'a dyn UnconfirmedTxSource,
    pub peers: &'a dyn PeerSource,
    pub blocks: &'a dyn BlockSource,
    pub index: &'a dyn EntityIndex,
}

pub struct Aggregator<'a> {
    sources: Sources<'a>,
    params: &'a SnapshotParams,
    metrics: Option<&'a Metrics>,
}

impl<'a> Aggregator<'a> {
    pub fn new(sources: Sources<'a>, params: &'a SnapshotParams) -> Self {
        Self { sources, params, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: &'a Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build one snapshot. Either every section is complete or the call fails.
    pub fn build(&self) -> Result<InitialData, SnapshotError> {
        let started = Instant::now();
        let sections = match self.collect() {
            Ok(s) => s,
            Err(e) => {
                warn!(source = ?e.kind(), error = %e, "initial data snapshot failed");
                if let Some(m) = self.metrics {
                    m.snapshot_failures.inc();
                }
                return Err(e);
            }
        };

        debug!(
            unconfirmed = sections.unconfirmed_transactions.len(),
            active = sections.active_peers.len(),
            known = sections.known_peers.len(),
            blacklisted = sections.blacklisted_peers.len(),
            blocks = sections.recent_blocks.len(),
            "initial data snapshot built"
        );
        if let Some(m) = self.metrics {
            m.snapshots_built.inc();
            m.build_time_ms.observe(started.elapsed().as_secs_f64() * 1000.0);
            let items = &m.section_items;
            items.with_label_values(&["unconfirmedTransactions"]).set(sections.unconfirmed_transactions.len() as i64);
            items.with_label_values(&["activePeers"]).set(sections.active_peers.len() as i64);
            items.with_label_values(&["knownPeers"]).set(sections.known_peers.len() as i64);
            items.with_label_values(&["blacklistedPeers"]).set(sections.blacklisted_peers.len() as i64);
            items.with_label_values(&["recentBlocks"]).set(sections.recent_blocks.len() as i64);
        }

        Ok(sections.assemble(self.params.version.clone()))
    }

    fn collect(&self) -> Result<Sections, SnapshotError> {
        let index = self.sources.index;
        let mut sections = Sections::default();

        let txs = self
            .sources
            .txs
            .unconfirmed_transactions()
            .map_err(from_source(SourceKind::UnconfirmedTransactions))?;
        for tx in txs {
            let tx = tx.map_err(from_source(SourceKind::UnconfirmedTransactions))?;
            sections.unconfirmed_transactions.push(tx_view(&tx, index));
        }

        let peers = self.sources.peers.peers().map_err(from_source(SourceKind::Peers))?;
        for peer in &peers {
            match project(peer, index) {
                PeerView::Blacklisted(v) => sections.blacklisted_peers.push(v),
                PeerView::Known(v) => sections.known_peers.push(v),
                PeerView::Active(v) => sections.active_peers.push(v),
            }
        }

        let blocks = self
            .sources
            .blocks
            .recent_blocks(0, RECENT_BLOCKS_WINDOW)
            .map_err(from_source(SourceKind::RecentBlocks))?;
        for block in blocks.take(RECENT_BLOCKS_WINDOW) {
            let block = block.map_err(from_source(SourceKind::RecentBlocks))?;
            sections
                .recent_blocks
                .push(block_view(&block, index, self.params.initial_base_target));
        }

        Ok(sections)
    }
}

/// Build a snapshot without metrics.
pub fn initial_data(sources: Sources<'_>, params: &SnapshotParams) -> Result<InitialData, SnapshotError> {
    Aggregator::new(sources, params).build()
}

fn tx_view(tx: &Transaction, index: &dyn EntityIndex) -> UnconfirmedTxView {
    UnconfirmedTxView {
        index: index.index_of(EntityKey::Transaction(tx.id)),
        timestamp: tx.timestamp,
        deadline: tx.deadline,
        recipient: tx.recipient,
        amount_nqt: tx.amount_nqt,
        fee_nqt: tx.fee_nqt,
        sender: tx.sender,
        id: tx.string_id(),
    }
}

fn block_view(block: &Block, index: &dyn EntityIndex, initial_base_target: NonZeroU64) -> RecentBlockView {
    RecentBlockView {
        index: index.index_of(EntityKey::Block(block.id)),
        timestamp: block.timestamp,
        number_of_transactions: block.number_of_transactions,
        total_amount_nqt: block.total_amount_nqt,
        total_fee_nqt: block.total_fee_nqt,
        payload_length: block.payload_length,
        generator: block.generator,
        height: block.height,
        version: block.version,
        block: block.string_id(),
        base_target: base_target_ratio(block.base_target, initial_base_target),
    }
}
