//! Key-value persistence behind the library and settings.
//!
//! Two slots are used: `myLibrary` and `theme`. Services take the backend as
//! a trait object: [`MemoryStore`] in tests, [`FileStore`] in the server.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

pub trait KeyValueStore: Send + Sync {
    /// Raw bytes stored under `key`, or `None` if the slot was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the whole value under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}
