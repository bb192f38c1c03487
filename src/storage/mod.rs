//! Durable key-value storage
//!
//! Each piece of state is an independent JSON blob under its own key. Backends
//! implement [`KeyValueStore`]; the [`Gateway`] sits in front of them and turns
//! every failure into a logged warning plus an in-memory fallback.

pub mod file;
pub mod gateway;
pub mod memory;

pub use file::FileStore;
pub use gateway::Gateway;
pub use memory::MemoryStore;

use thiserror::Error;

/// Key holding the chapter progress mapping
pub const PROGRESS_KEY: &str = "study-tracker.progress";

/// Key holding streak data
pub const STREAK_KEY: &str = "study-tracker.streak";

/// Key holding the sound-enabled flag
pub const SOUND_KEY: &str = "study-tracker.sound";

/// Errors surfaced by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A string-valued key-value medium
pub trait KeyValueStore {
    /// Read the blob under `key`, `None` if never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the blob under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
