//! Read-only collaborator interfaces the snapshot is built from.
//!
//! Cursors are plain boxed iterators: whatever a source holds open for
//! iteration (a pool read lock, a store handle) lives inside the iterator and is
//! released when the cursor is dropped.

use crate::types::{Block, BlockId, Peer, Transaction, TxId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("cursor failed mid-iteration: {0}")]
    Cursor(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type TxCursor<'a> = Box<dyn Iterator<Item = Result<Transaction, SourceError>> + 'a>;
pub type BlockCursor<'a> = Box<dyn Iterator<Item = Result<Block, SourceError>> + 'a>;

/// Pool of transactions accepted locally but not yet in a block.
pub trait UnconfirmedTxSource: Send + Sync {
    /// All unconfirmed transactions in pool order.
    fn unconfirmed_transactions(&self) -> Result<TxCursor<'_>, SourceError>;
}

pub trait PeerSource: Send + Sync {
    /// Point-in-time copy of every known peer.
    fn peers(&self) -> Result<Vec<Peer>, SourceError>;
}

pub trait BlockSource: Send + Sync {
    /// Up to `count` blocks starting `offset` blocks below the tip, newest first.
    fn recent_blocks(&self, offset: usize, count: usize) -> Result<BlockCursor<'_>, SourceError>;
}

/// Identity of an object for UI row labelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKey<'a> {
    Transaction(TxId),
    Peer(&'a str),
    Block(BlockId),
}

/// Stable integer per entity, used only as a dashboard row key.
pub trait EntityIndex: Send + Sync {
    fn index_of(&self, key: EntityKey<'_>) -> u32;
}

impl<F> EntityIndex for F
where
    F: Fn(EntityKey<'_>) -> u32 + Send + Sync,
{
    fn index_of(&self, key: EntityKey<'_>) -> u32 {
        self(key)
    }
}
