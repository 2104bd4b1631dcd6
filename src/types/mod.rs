use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub type Height = u32;
/// Seconds since the chain epoch.
pub type Timestamp = u32;

/// 64-bit identifier that is logically unsigned.
///
/// Rendered as an unsigned decimal string on the wire so that dashboard
/// clients never see a negative or precision-truncated number.
macro_rules! unsigned_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                #[derive(Deserialize)]
                #[serde(untagged)]
                enum Repr {
                    Num(u64),
                    Str(String),
                }
                match Repr::deserialize(d)? {
                    Repr::Num(n) => Ok(Self(n)),
                    Repr::Str(s) => s.parse().map(Self).map_err(serde::de::Error::custom),
                }
            }
        }
    };
}

unsigned_id!(AccountId);
unsigned_id!(TxId);
unsigned_id!(BlockId);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TxId,
    pub timestamp: Timestamp,
    /// Minutes the transaction may stay unconfirmed.
    pub deadline: u16,
    pub sender: AccountId,
    pub recipient: AccountId,
    #[serde(rename = "amountNQT")]
    pub amount_nqt: i64,
    #[serde(rename = "feeNQT")]
    pub fee_nqt: i64,
}

impl Transaction {
    pub fn string_id(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeerState {
    Active,
    Disconnected,
    #[default]
    NonConnected,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Peer {
    /// Address the connection was made to or from.
    pub address: String,
    /// Address the peer announced for itself, if any.
    #[serde(default)]
    pub announced_address: Option<String>,
    #[serde(default)]
    pub software: String,
    #[serde(default)]
    pub state: PeerState,
    #[serde(default)]
    pub blacklisted: bool,
    #[serde(default)]
    pub well_known: bool,
    #[serde(default)]
    pub weight: i32,
    #[serde(default)]
    pub downloaded: u64,
    #[serde(default)]
    pub uploaded: u64,
}

impl Peer {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            announced_address: None,
            software: String::new(),
            state: PeerState::NonConnected,
            blacklisted: false,
            well_known: false,
            weight: 0,
            downloaded: 0,
            uploaded: 0,
        }
    }
}

impl Default for Peer {
    fn default() -> Self {
        Self::new("")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    pub height: Height,
    pub timestamp: Timestamp,
    pub version: u32,
    pub generator: AccountId,
    pub number_of_transactions: u32,
    #[serde(rename = "totalAmountNQT")]
    pub total_amount_nqt: i64,
    #[serde(rename = "totalFeeNQT")]
    pub total_fee_nqt: i64,
    pub payload_length: u32,
    pub base_target: u64,
}

impl Block {
    pub fn string_id(&self) -> String {
        self.id.to_string()
    }
}
