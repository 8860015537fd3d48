mod adapter;
mod database;
mod kv;

pub use adapter::{StorageAdapter, NOTES_KEY, SELECTED_ID_KEY, THEME_KEY};
pub use database::{Connection, Database, SqliteStore};
pub use kv::{KeyValueStore, MemoryStore};
