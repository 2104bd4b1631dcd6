//! Unconfirmed transaction pool.
//!
//! Insertion-ordered: the dashboard lists transactions in arrival order.
//! `push` rejects duplicate ids; `from_vec` takes a dumped pool as-is.

use crate::source::{SourceError, TxCursor, UnconfirmedTxSource};
use crate::types::{Transaction, TxId};
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    Duplicate(TxId),
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate(id) => write!(f, "transaction {id} already pending"),
        }
    }
}

impl std::error::Error for PoolError {}

#[derive(Default)]
struct Inner {
    txs: Vec<Transaction>,
    ids: HashSet<TxId>,
}

#[derive(Default)]
pub struct UnconfirmedPool {
    inner: RwLock<Inner>,
}

impl UnconfirmedPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt `txs` in the given order, with no admission checks.
    pub fn from_vec(txs: Vec<Transaction>) -> Self {
        let ids = txs.iter().map(|tx| tx.id).collect();
        Self { inner: RwLock::new(Inner { txs, ids }) }
    }

    pub fn len(&self) -> usize {
        self.inner.read().txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &TxId) -> bool {
        self.inner.read().ids.contains(id)
    }

    pub fn push(&self, tx: Transaction) -> Result<(), PoolError> {
        let mut inner = self.inner.write();
        if !inner.ids.insert(tx.id) {
            return Err(PoolError::Duplicate(tx.id));
        }
        inner.txs.push(tx);
        Ok(())
    }
}

/// Walks the pool in insertion order while holding the read lock; writers wait
/// until the cursor is dropped.
struct PoolCursor<'a> {
    guard: RwLockReadGuard<'a, Inner>,
    next: usize,
}

impl Iterator for PoolCursor<'_> {
    type Item = Result<Transaction, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let tx = self.guard.txs.get(self.next)?;
        self.next += 1;
        Some(Ok(tx.clone()))
    }
}

impl UnconfirmedTxSource for UnconfirmedPool {
    fn unconfirmed_transactions(&self) -> Result<TxCursor<'_>, SourceError> {
        Ok(Box::new(PoolCursor { guard: self.inner.read(), next: 0 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountId;

    fn tx(id: u64, fee: i64) -> Transaction {
        Transaction {
            id: TxId(id),
            timestamp: 1_000,
            deadline: 10,
            sender: AccountId(1),
            recipient: AccountId(2),
            amount_nqt: 100,
            fee_nqt: fee,
        }
    }

    fn ids(pool: &UnconfirmedPool) -> Vec<u64> {
        pool.unconfirmed_transactions().unwrap().map(|t| t.unwrap().id.0).collect()
    }

    #[test]
    fn keeps_insertion_order() {
        let pool = UnconfirmedPool::new();
        for id in [5, 1, 9] {
            pool.push(tx(id, 1)).unwrap();
        }
        assert_eq!(ids(&pool), vec![5, 1, 9]);
    }

    #[test]
    fn rejects_duplicates() {
        let pool = UnconfirmedPool::new();
        pool.push(tx(1, 1)).unwrap();
        assert_eq!(pool.push(tx(1, 5)), Err(PoolError::Duplicate(TxId(1))));
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(&TxId(1)));
    }

    #[test]
    fn from_vec_keeps_every_entry_regardless_of_fee() {
        let txs: Vec<Transaction> = (0..10_000).map(|i| tx(10_000 - i, (i % 3) as i64)).collect();
        let pool = UnconfirmedPool::from_vec(txs);
        let got = ids(&pool);
        assert_eq!(got.len(), 10_000);
        assert_eq!(got[0], 10_000);
        assert_eq!(got[9_999], 1);
    }
}
