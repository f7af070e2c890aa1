//! Infrastructure layer - Persistence and configuration

pub mod config;
pub mod key_value;
pub mod record_store;
pub mod repository;
pub mod session;

pub use config::Config;
pub use key_value::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use record_store::{LoadState, RecordStore, StoreDocument};
pub use repository::{FileSystemRepository, SchoolRepository};
pub use session::SessionStore;
