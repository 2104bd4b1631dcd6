pub mod block_log;

pub use block_log::{AppendError, BlockLog};

use crate::mempool::UnconfirmedPool;
use crate::net::PeerRegistry;
use crate::snapshot::Sources;
use crate::source::EntityIndex;
use crate::types::{Block, Peer, Transaction};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("io: {0}")]
    Io(#[from] io::Error),
    #[error("{file}:{line}: {source}")]
    Decode {
        file: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("block log: {0}")]
    Chain(#[from] AppendError),
}

/// File layout of a node data directory, one JSON object per line.
pub struct DumpFiles {
    pub unconfirmed: PathBuf,
    pub peers: PathBuf,
    /// Ascending height.
    pub blocks: PathBuf,
}

pub fn files(dir: impl AsRef<Path>) -> DumpFiles {
    let d = dir.as_ref();
    DumpFiles {
        unconfirmed: d.join("unconfirmed.jsonl"),
        peers: d.join("peers.jsonl"),
        blocks: d.join("blocks.jsonl"),
    }
}

pub fn append_jsonl<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    let line = serde_json::to_string(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    f.write_all(line.as_bytes())?;
    f.write_all(b"\n")?;
    Ok(())
}

/// Missing files read as empty.
pub fn load_jsonl<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, DumpError> {
    if !path.exists() {
        return Ok(vec![]);
    }
    let br = BufReader::new(fs::File::open(path)?);
    let mut out = vec![];
    for (i, line) in br.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let v: T = serde_json::from_str(&line).map_err(|source| DumpError::Decode {
            file: path.to_path_buf(),
            line: i + 1,
            source,
        })?;
        out.push(v);
    }
    Ok(out)
}

/// The three sources of a node, loaded from a data directory.
#[derive(Default)]
pub struct NodeDump {
    pub pool: UnconfirmedPool,
    pub peers: PeerRegistry,
    pub blocks: BlockLog,
}

impl NodeDump {
    /// Unconfirmed transactions are taken in file order, without pool
    /// admission rules: the dump is what the node held.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, DumpError> {
        let f = files(&dir);
        let dump = Self {
            pool: UnconfirmedPool::from_vec(load_jsonl::<Transaction>(&f.unconfirmed)?),
            ..Self::default()
        };

        for peer in load_jsonl::<Peer>(&f.peers)? {
            dump.peers.upsert(peer);
        }
        for block in load_jsonl::<Block>(&f.blocks)? {
            dump.blocks.append(block)?;
        }

        info!(
            dir = %dir.as_ref().display(),
            unconfirmed = dump.pool.len(),
            peers = dump.peers.len(),
            blocks = dump.blocks.len(),
            "node data loaded"
        );
        Ok(dump)
    }

    pub fn sources<'a>(&'a self, index: &'a dyn EntityIndex) -> Sources<'a> {
        Sources { txs: &self.pool, peers: &self.peers, blocks: &self.blocks, index }
    }
}
