//! Snapshot store trait and implementations.
//!
//! A snapshot store is a flat key-value store of byte blobs. The sync
//! pipeline reads decoded dumps from it and writes them back after a
//! successful run, without knowing where the bytes end up.

mod local;
mod memory;

pub use self::local::LocalStore;
pub use self::memory::MemoryStore;
use crate::error::Result;
use async_trait::async_trait;

/// Unified interface for snapshot stores.
///
/// Keys must pass [`validate_key`](crate::validate_key); implementations
/// enforce this.
///
/// # Examples
///
/// ```
/// use pouet_storage::{MemoryStore, SnapshotStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::default();
/// assert_eq!(store.get("a.json").await?, None);
/// store.put("a.json", b"{}").await?;
/// assert_eq!(store.get("a.json").await?.as_deref(), Some(b"{}".as_slice()));
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Name of the store, used for logging only.
    fn name(&self) -> &str;

    /// Read a snapshot. A missing key is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a snapshot, replacing any previous value. Readers never observe
    /// a partially written value.
    async fn put(&self, key: &str, data: &[u8]) -> Result<()>;

    /// Whether a snapshot exists for the key.
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
