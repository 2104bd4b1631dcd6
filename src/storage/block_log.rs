//! In-memory chain of accepted blocks, ordered by height.
//!
//! The log may start above genesis (a pruned node keeps only its recent
//! history), but every later block must extend the tip by one.

use crate::source::{BlockCursor, BlockSource, SourceError};
use crate::types::{Block, Height};
use parking_lot::{RwLock, RwLockReadGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendError {
    /// Heights must increase by exactly one.
    HeightGap { tip: Height, got: Height },
}

impl std::fmt::Display for AppendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeightGap { tip, got } => write!(f, "block height {got} does not extend tip {tip}"),
        }
    }
}

impl std::error::Error for AppendError {}

#[derive(Default)]
pub struct BlockLog {
    blocks: RwLock<Vec<Block>>,
}

impl BlockLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tip_height(&self) -> Option<Height> {
        self.blocks.read().last().map(|b| b.height)
    }

    pub fn append(&self, block: Block) -> Result<(), AppendError> {
        let mut blocks = self.blocks.write();
        if let Some(tip) = blocks.last().map(|b| b.height) {
            if tip.checked_add(1) != Some(block.height) {
                return Err(AppendError::HeightGap { tip, got: block.height });
            }
        }
        blocks.push(block);
        Ok(())
    }
}

/// Newest-first walk over the chain under the read lock.
struct TipCursor<'a> {
    guard: RwLockReadGuard<'a, Vec<Block>>,
    /// Blocks below the tip still to skip or yield, counted from the tip.
    from_tip: usize,
    remaining: usize,
}

impl Iterator for TipCursor<'_> {
    type Item = Result<Block, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.from_tip >= self.guard.len() {
            return None;
        }
        let i = self.guard.len() - 1 - self.from_tip;
        self.from_tip += 1;
        self.remaining -= 1;
        Some(Ok(self.guard[i].clone()))
    }
}

impl BlockSource for BlockLog {
    fn recent_blocks(&self, offset: usize, count: usize) -> Result<BlockCursor<'_>, SourceError> {
        Ok(Box::new(TipCursor { guard: self.blocks.read(), from_tip: offset, remaining: count }))
    }
}
