//! Mirror the pouet.net data dumps into SQLite and query them.
//!
//! [`Pouet`] ties the member crates together: it fetches the manifest,
//! reuses or refreshes the decoded snapshots of the four dumps, loads them
//! into a [`Database`](pouet_database::Database) when it is stale, and runs
//! caller SQL against it.
//!
//! ```no_run
//! use pouet::{Pouet, Target};
//!
//! # async fn example() -> pouet::error::Result<()> {
//! let pouet = Pouet::builder().progress(|title: &str| eprintln!("{title}")).build()?;
//! let rows = pouet.sql_query("SELECT name FROM platform", &Target::Memory).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
mod export;
mod query;
mod sync;

pub use crate::export::export_csv;
pub use pouet_config::Config;
pub use pouet_database::{Row, Target};
pub use pouet_dump::models::DumpSet;
pub use pouet_dump::{Milestone, Progress};

use crate::error::{ErrorKind, Result};
use pouet_config::DEFAULT_MANIFEST_URL;
use pouet_dump::{ProgressHandle, Silent};
use pouet_remote::{DEFAULT_USER_AGENT, HttpTransport, TransportHandle};
use pouet_storage::{LocalStore, StoreHandle};
use std::sync::Arc;

/// Entry point of the sync and query pipeline.
///
/// Every call is an independent run; the only state shared between calls is
/// whatever the snapshot store and database targets hold.
#[derive(Clone)]
pub struct Pouet {
    transport: TransportHandle,
    snapshots: StoreHandle,
    manifest_url: String,
    cache: bool,
    progress: ProgressHandle,
}
impl Pouet {
    pub fn builder() -> PouetBuilder {
        PouetBuilder::default()
    }

    /// Build the pipeline described by a loaded configuration: HTTP
    /// transport, snapshots in `cache_dir`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let user_agent = config.http.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport = HttpTransport::new(user_agent, config.http.timeout()).map_err(ErrorKind::network)?;
        let snapshots = LocalStore::new(&config.cache_dir).map_err(ErrorKind::snapshot)?;
        Ok(Self {
            transport: Arc::new(transport),
            snapshots: Arc::new(snapshots),
            manifest_url: config.manifest_url.clone(),
            cache: config.cache,
            progress: Arc::new(Silent),
        })
    }

    /// Replace the progress sink.
    pub fn with_progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Arc::new(progress);
        self
    }
}

/// Builder for [`Pouet`]. Anything left unset gets the same default as
/// [`Config::default`].
pub struct PouetBuilder {
    transport: Option<TransportHandle>,
    snapshots: Option<StoreHandle>,
    manifest_url: String,
    cache: bool,
    progress: ProgressHandle,
}
impl Default for PouetBuilder {
    fn default() -> Self {
        Self {
            transport: None,
            snapshots: None,
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            cache: true,
            progress: Arc::new(Silent),
        }
    }
}
impl PouetBuilder {
    pub fn transport(mut self, transport: TransportHandle) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn snapshots(mut self, snapshots: StoreHandle) -> Self {
        self.snapshots = Some(snapshots);
        self
    }

    pub fn manifest_url(mut self, url: impl Into<String>) -> Self {
        self.manifest_url = url.into();
        self
    }

    /// Whether existing snapshots are read. Snapshots are written either way.
    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    pub fn progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Arc::new(progress);
        self
    }

    pub fn build(self) -> Result<Pouet> {
        let defaults = Config::default();
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(DEFAULT_USER_AGENT, defaults.http.timeout()).map_err(ErrorKind::network)?),
        };
        let snapshots = match self.snapshots {
            Some(snapshots) => snapshots,
            None => Arc::new(LocalStore::new(&defaults.cache_dir).map_err(ErrorKind::snapshot)?),
        };
        Ok(Pouet {
            transport,
            snapshots,
            manifest_url: self.manifest_url,
            cache: self.cache,
            progress: self.progress,
        })
    }
}
