use crate::snapshot::response::{ActivePeerView, PeerSummaryView};
use crate::snapshot::truncate::announced_address;
use crate::source::{EntityIndex, EntityKey};
use crate::types::{Peer, PeerState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeerClass {
    Blacklisted,
    Known,
    Active,
}

/// First match wins: blacklist beats connectivity state.
pub fn classify(peer: &Peer) -> PeerClass {
    if peer.blacklisted {
        PeerClass::Blacklisted
    } else if peer.state == PeerState::NonConnected {
        PeerClass::Known
    } else {
        PeerClass::Active
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeerView {
    Blacklisted(PeerSummaryView),
    Known(PeerSummaryView),
    Active(ActivePeerView),
}

/// Classify `peer` and project the fields its section shows.
pub fn project(peer: &Peer, index: &dyn EntityIndex) -> PeerView {
    let row = index.index_of(EntityKey::Peer(&peer.address));
    match classify(peer) {
        PeerClass::Blacklisted => PeerView::Blacklisted(summary(peer, row)),
        PeerClass::Known => PeerView::Known(summary(peer, row)),
        PeerClass::Active => PeerView::Active(ActivePeerView {
            index: row,
            disconnected: peer.state == PeerState::Disconnected,
            address: peer.address.clone(),
            announced_address: announced_address(peer.announced_address.as_deref()),
            weight: peer.weight,
            downloaded: peer.downloaded,
            uploaded: peer.uploaded,
            software: peer.software.clone(),
            well_known: peer.well_known,
        }),
    }
}

fn summary(peer: &Peer, row: u32) -> PeerSummaryView {
    PeerSummaryView {
        index: row,
        address: peer.address.clone(),
        announced_address: announced_address(peer.announced_address.as_deref()),
        software: peer.software.clone(),
        well_known: peer.well_known,
    }
}
