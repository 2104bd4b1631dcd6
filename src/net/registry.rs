//! Known-peer registry.
//!
//! Peers are keyed by the address they were reached at. Iteration is in
//! address order.

use crate::source::{PeerSource, SourceError};
use crate::types::{Peer, PeerState};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Default)]
pub struct PeerRegistry {
    peers: RwLock<BTreeMap<String, Peer>>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.peers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, address: &str) -> Option<Peer> {
        self.peers.read().get(address).cloned()
    }

    /// Insert or replace a peer record wholesale.
    pub fn upsert(&self, peer: Peer) {
        self.peers.write().insert(peer.address.clone(), peer);
    }

    /// Mark a peer from configuration as trusted.
    pub fn add_well_known(&self, address: &str) {
        self.with_peer(address, |p| p.well_known = true);
    }

    pub fn connected(&self, address: &str, announced: Option<String>, software: impl Into<String>) {
        let software = software.into();
        self.with_peer(address, |p| {
            p.state = PeerState::Active;
            if announced.is_some() {
                p.announced_address = announced;
            }
            p.software = software;
        });
    }

    pub fn disconnected(&self, address: &str) {
        self.with_peer(address, |p| {
            if p.state == PeerState::Active {
                p.state = PeerState::Disconnected;
            }
        });
    }

    pub fn record_traffic(&self, address: &str, downloaded: u64, uploaded: u64) {
        self.with_peer(address, |p| {
            p.downloaded = p.downloaded.saturating_add(downloaded);
            p.uploaded = p.uploaded.saturating_add(uploaded);
        });
    }

    pub fn set_weight(&self, address: &str, weight: i32) {
        self.with_peer(address, |p| p.weight = weight);
    }

    pub fn blacklist(&self, address: &str) {
        self.with_peer(address, |p| p.blacklisted = true);
        info!(peer = address, "peer blacklisted");
    }

    pub fn unblacklist(&self, address: &str) {
        if let Some(p) = self.peers.write().get_mut(address) {
            p.blacklisted = false;
        }
    }

    fn with_peer(&self, address: &str, f: impl FnOnce(&mut Peer)) {
        let mut peers = self.peers.write();
        f(peers.entry(address.to_owned()).or_insert_with(|| Peer::new(address)));
    }
}

impl PeerSource for PeerRegistry {
    fn peers(&self) -> Result<Vec<Peer>, SourceError> {
        Ok(self.peers.read().values().cloned().collect())
    }
}
