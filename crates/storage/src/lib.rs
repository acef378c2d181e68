pub mod error;
mod key;
pub mod store;

pub use crate::key::validate as validate_key;
pub use crate::store::{LocalStore, MemoryStore, SnapshotStore};
use std::sync::Arc;

pub type StoreHandle = Arc<dyn SnapshotStore>;
