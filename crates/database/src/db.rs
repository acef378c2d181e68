//! Database targets and connection pool management.

use sqlx::SqliteConnection;
use sqlx::pool::PoolConnectionMetadata;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::instrument;

use crate::error::{ErrorKind, Result, SqlResultExt};

/// Spelling of the in-memory target.
pub const MEMORY: &str = ":memory:";
const MAX_CONNECTIONS: u32 = 4;

/// Where the relational store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Ephemeral, rebuilt on every call.
    Memory,
    /// A persistent database file.
    File(PathBuf),
}
impl FromStr for Target {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            MEMORY => Ok(Target::Memory),
            "" => exn::bail!(ErrorKind::InvalidTarget(s.to_string())),
            path => Ok(Target::File(PathBuf::from(path))),
        }
    }
}
impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Memory => f.write_str(MEMORY),
            Target::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Connection pool over one [`Target`].
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    target: Target,
    created: bool,
}

impl Database {
    async fn new(options: SqliteConnectOptions, target: &Target, created: bool) -> Result<Self> {
        let mut pool = SqlitePoolOptions::new()
            // Applies the query-based PRAGMAs to every connection of the
            // pool, not only the first one.
            .after_connect(|conn, meta| Box::pin(async move { Self::apply_pragmas(conn, meta).await }));
        pool = match target {
            // A private in-memory database lives exactly as long as its one
            // connection.
            Target::Memory => pool.max_connections(1).min_connections(1).idle_timeout(None).max_lifetime(None),
            Target::File(_) => pool.max_connections(MAX_CONNECTIONS),
        };
        let pool = pool.connect_with(options).await.or_sql()?;
        Ok(Self { pool, target: target.clone(), created })
    }

    /// Open the target, creating it if needed.
    ///
    /// [`created`](Self::created) tells whether the store is brand new: always
    /// for [`Target::Memory`], and for a file target whose file did not exist.
    #[instrument(skip(target), fields(target = %target, created))]
    pub async fn connect(target: &Target) -> Result<Self> {
        let (options, created) = match target {
            Target::Memory => (Self::base_options().filename(MEMORY), true),
            Target::File(path) => {
                let exists = tokio::fs::try_exists(path).await.unwrap_or(false);
                (Self::base_options().filename(path).create_if_missing(true), !exists)
            },
        };
        tracing::Span::current().record("created", created);
        Self::new(options, target, created).await
    }

    /// Open an existing file target for probing.
    ///
    /// Returns `None` for [`Target::Memory`] and for a file that does not
    /// exist. Never creates anything.
    #[instrument(skip(target), fields(target = %target))]
    pub async fn open_existing(target: &Target) -> Result<Option<Self>> {
        let Target::File(path) = target else {
            return Ok(None);
        };
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Ok(None);
        }
        // Read-write without create: a read-only handle cannot always attach
        // to a WAL database whose `-shm` file is gone. Only SELECTs run here.
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(false)
            .busy_timeout(Duration::from_millis(1500));
        let pool = SqlitePoolOptions::new().max_connections(1).connect_with(options).await.or_sql()?;
        Ok(Some(Self {
            pool,
            target: target.clone(),
            created: false,
        }))
    }

    /// Base connection options shared between file and in-memory databases.
    fn base_options() -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            // A rebuild holds the write lock for its whole transaction.
            .busy_timeout(Duration::from_millis(1500))
    }

    /// Apply additional PRAGMA settings that aren't exposed via SqliteConnectOptions.
    async fn apply_pragmas(conn: &mut SqliteConnection, _meta: PoolConnectionMetadata) -> sqlx::Result<()> {
        sqlx::query(
            r#"
                PRAGMA cache_size = -8192;
                PRAGMA temp_store = MEMORY;
            "#,
        )
        .execute(conn)
        .await?;
        Ok(())
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Whether this connection created the store.
    pub fn created(&self) -> bool {
        self.created
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool. The in-memory store is gone after this.
    pub async fn close(&self) {
        _ = sqlx::query("PRAGMA optimize").execute(&self.pool).await;
        self.pool.close().await;
    }
}
