//! Dashboard row indices.
//!
//! Every distinct transaction, peer and block gets a small integer the first
//! time it is seen, and keeps it for the lifetime of the registry so that the
//! dashboard can patch rows in place across refreshes.

use crate::source::{EntityIndex, EntityKey};
use crate::types::{BlockId, TxId};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
struct Assigned {
    next: u32,
    txs: HashMap<TxId, u32>,
    peers: HashMap<String, u32>,
    blocks: HashMap<BlockId, u32>,
}

impl Assigned {
    /// Never hands out 0. Past `u32::MAX` entities every new one shares the
    /// last index.
    fn bump(&mut self) -> u32 {
        self.next = self.next.saturating_add(1);
        self.next
    }
}

/// Thread-safe first-seen index assignment. Indices start at 1 and are shared
/// across entity kinds, so no two rows on the dashboard collide.
#[derive(Default)]
pub struct IndexRegistry {
    inner: Mutex<Assigned>,
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        let a = self.inner.lock();
        a.txs.len() + a.peers.len() + a.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntityIndex for IndexRegistry {
    fn index_of(&self, key: EntityKey<'_>) -> u32 {
        let mut a = self.inner.lock();
        match key {
            EntityKey::Transaction(id) => {
                if let Some(&i) = a.txs.get(&id) {
                    return i;
                }
                let i = a.bump();
                a.txs.insert(id, i);
                i
            }
            EntityKey::Peer(addr) => {
                if let Some(&i) = a.peers.get(addr) {
                    return i;
                }
                let i = a.bump();
                a.peers.insert(addr.to_owned(), i);
                i
            }
            EntityKey::Block(id) => {
                if let Some(&i) = a.blocks.get(&id) {
                    return i;
                }
                let i = a.bump();
                a.blocks.insert(id, i);
                i
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_entity_keeps_its_index() {
        let reg = IndexRegistry::new();
        let a = reg.index_of(EntityKey::Peer("10.0.0.1"));
        let b = reg.index_of(EntityKey::Block(BlockId(7)));
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(reg.index_of(EntityKey::Peer("10.0.0.1")), a);
        assert_eq!(reg.index_of(EntityKey::Block(BlockId(7))), b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn kinds_do_not_share_keys() {
        let reg = IndexRegistry::new();
        let tx = reg.index_of(EntityKey::Transaction(TxId(5)));
        let blk = reg.index_of(EntityKey::Block(BlockId(5)));
        assert_ne!(tx, blk);
    }

    #[test]
    fn exhausted_counter_saturates_instead_of_wrapping() {
        let reg = IndexRegistry::new();
        reg.inner.lock().next = u32::MAX - 1;
        assert_eq!(reg.index_of(EntityKey::Transaction(TxId(1))), u32::MAX);
        assert_eq!(reg.index_of(EntityKey::Transaction(TxId(2))), u32::MAX);
        assert_ne!(reg.index_of(EntityKey::Peer("p")), 0);
        assert_eq!(reg.index_of(EntityKey::Transaction(TxId(1))), u32::MAX);
    }
}
