pub mod registry;

pub use registry::PeerRegistry;
