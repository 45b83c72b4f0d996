//! tuplegate-storage: Authorization model storage
//!
//! This crate holds authorization models for tuplegate and exposes them to
//! the validation gate:
//! - ModelStore trait for store and model operations
//! - In-memory implementation
//! - ModelStoreReader, which implements the domain's TypeDefinitionReader
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                tuplegate-storage                 │
//! ├──────────────────────────────────────────────────┤
//! │  traits.rs  - ModelStore trait definition        │
//! │  memory.rs  - In-memory implementation           │
//! │  adapter.rs - TypeDefinitionReader over storage  │
//! │  metrics.rs - Query timeouts and durations       │
//! │  config.rs  - YAML + environment configuration   │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod traits;

// Re-export commonly used types
pub use adapter::ModelStoreReader;
pub use config::{ConfigLoadError, StorageConfig, TuplegateConfig};
pub use error::{StorageError, StorageResult};
pub use memory::MemoryModelStore;
pub use metrics::register_storage_metrics;
pub use traits::{ModelStore, Store, StoredAuthorizationModel};
