//! Wire shape of the `processInitialData` response.
//!
//! Field order in each struct is the key order on the wire. Boolean flags are
//! skipped when false, so their presence always means `true`.

use crate::types::{AccountId, Height, Timestamp};
use serde::Serialize;

pub const RESPONSE_KIND: &str = "processInitialData";

fn is_false(v: &bool) -> bool {
    !*v
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnconfirmedTxView {
    pub index: u32,
    pub timestamp: Timestamp,
    pub deadline: u16,
    pub recipient: AccountId,
    #[serde(rename = "amountNQT")]
    pub amount_nqt: i64,
    #[serde(rename = "feeNQT")]
    pub fee_nqt: i64,
    pub sender: AccountId,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePeerView {
    pub index: u32,
    #[serde(skip_serializing_if = "is_false")]
    pub disconnected: bool,
    pub address: String,
    pub announced_address: String,
    pub weight: i32,
    pub downloaded: u64,
    pub uploaded: u64,
    pub software: String,
    #[serde(skip_serializing_if = "is_false")]
    pub well_known: bool,
}

/// Reduced projection shared by known and blacklisted peers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerSummaryView {
    pub index: u32,
    pub address: String,
    pub announced_address: String,
    pub software: String,
    #[serde(skip_serializing_if = "is_false")]
    pub well_known: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBlockView {
    pub index: u32,
    pub timestamp: Timestamp,
    pub number_of_transactions: u32,
    #[serde(rename = "totalAmountNQT")]
    pub total_amount_nqt: i64,
    #[serde(rename = "totalFeeNQT")]
    pub total_fee_nqt: i64,
    pub payload_length: u32,
    pub generator: AccountId,
    pub height: Height,
    pub version: u32,
    pub block: String,
    pub base_target: u128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialData {
    pub response: &'static str,
    pub version: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unconfirmed_transactions: Vec<UnconfirmedTxView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_peers: Vec<ActivePeerView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub known_peers: Vec<PeerSummaryView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blacklisted_peers: Vec<PeerSummaryView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recent_blocks: Vec<RecentBlockView>,
}

/// Per-section accumulator filled by the aggregator.
#[derive(Default, Debug)]
pub struct Sections {
    pub unconfirmed_transactions: Vec<UnconfirmedTxView>,
    pub active_peers: Vec<ActivePeerView>,
    pub known_peers: Vec<PeerSummaryView>,
    pub blacklisted_peers: Vec<PeerSummaryView>,
    pub recent_blocks: Vec<RecentBlockView>,
}

impl Sections {
    pub fn assemble(self, version: impl Into<String>) -> InitialData {
        InitialData {
            response: RESPONSE_KIND,
            version: version.into(),
            unconfirmed_transactions: self.unconfirmed_transactions,
            active_peers: self.active_peers,
            known_peers: self.known_peers,
            blacklisted_peers: self.blacklisted_peers,
            recent_blocks: self.recent_blocks,
        }
    }
}

impl InitialData {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
