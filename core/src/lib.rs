//! Local-first note storage and session state for scribble.

pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod notes;
pub mod session;
pub mod storage;

pub use config::{BackendConfig, Mode};
pub use error::{Error, Result};
pub use models::{Note, Theme};
pub use notes::NoteRepository;
pub use session::Session;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageAdapter};
