//! Netweave core library
//!
//! A registry of neural-network layer kinds with machine-readable parameter
//! schemas, plus append-only network graphs built from those kinds.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod layers;
pub mod store;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use error::{NetError, Result};
pub use layers::{LayerKindRegistry, NetworkGraph};
pub use store::GraphStore;
