pub mod config;
pub mod index;
pub mod mempool;
pub mod metrics;
pub mod net;
pub mod snapshot;
pub mod source;
pub mod storage;
pub mod types;

pub use snapshot::{initial_data, Aggregator, InitialData, SnapshotError, SnapshotParams, Sources};
