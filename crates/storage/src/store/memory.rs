//! In-memory snapshot store.

use crate::error::Result;
use crate::key::validate as validate_key;
use crate::SnapshotStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory snapshot store.
///
/// Snapshots are stored in a `HashMap` behind a [`RwLock`], so all trait
/// methods can operate on `&self` without external synchronisation. Used by
/// tests, and by callers that want snapshot reuse within one process only.
///
/// # Examples
///
/// ```
/// use pouet_storage::MemoryStore;
///
/// let store = MemoryStore::with_snapshots([("prods.json", b"{\"data\": []}".to_vec())]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a store pre-populated with snapshots.
    ///
    /// Panics if any key fails validation. If test setup is wrong, then test
    /// should not pass.
    pub fn with_snapshots(snapshots: impl IntoIterator<Item = (impl Into<String>, impl Into<Vec<u8>>)>) -> Self {
        let mut map = HashMap::new();
        for (key, data) in snapshots {
            let key = key.into();
            if validate_key(&key).is_err() {
                panic!("MemoryStore::with_snapshots: invalid key {key}");
            }
            map.insert(key, data.into());
        }
        Self {
            snapshots: RwLock::new(map),
        }
    }

    /// Keys currently stored, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.snapshots.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let key = validate_key(key)?;
        Ok(self.snapshots.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let key = validate_key(key)?;
        self.snapshots.write().await.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryStore::default();
        assert!(store.is_empty().await);
        store.put("a.json", b"one").await.unwrap();
        store.put("a.json", b"two").await.unwrap();
        assert_eq!(store.get("a.json").await.unwrap(), Some(b"two".to_vec()));
        assert!(store.contains("a.json").await.unwrap());
        assert!(!store.contains("b.json").await.unwrap());
        assert_eq!(store.keys().await, vec!["a.json".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let store = MemoryStore::default();
        let err = store.put("../escape", b"bad").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidKey(_)));
    }

    #[test]
    #[should_panic(expected = "invalid key")]
    fn test_with_snapshots_panics_on_bad_key() {
        MemoryStore::with_snapshots([("a/b", Vec::from(*b"bad"))]);
    }
}
