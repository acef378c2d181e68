//! The Query Executor and the version probe.

use crate::Pouet;
use crate::error::{ErrorKind, Result};
use pouet_database::{Database, Row, Target};
use pouet_dump::Milestone;
use tracing::instrument;

impl Pouet {
    /// Run caller SQL against `target`, rebuilding the store first when it
    /// does not hold the latest dumps.
    ///
    /// An in-memory target is always rebuilt. An up-to-date file target only
    /// costs a manifest request. At most one rebuild happens per call.
    #[instrument(skip(self, sql, target), fields(target = %target, sql_size = sql.len()))]
    pub async fn sql_query(&self, sql: &str, target: &Target) -> Result<Vec<Row>> {
        let db = Database::connect(target).await.map_err(ErrorKind::database)?;
        let name = target.to_string();
        match db.created() {
            true => self.progress.emit(Milestone::CreateDatabase(&name)),
            false => self.progress.emit(Milestone::Open(&name)),
        }
        let result = self.refresh_and_query(&db, sql).await;
        db.close().await;
        result
    }

    async fn refresh_and_query(&self, db: &Database, sql: &str) -> Result<Vec<Row>> {
        self.refresh(db).await?;
        self.progress.emit(Milestone::StartQuery);
        let rows = db.query(sql).await.map_err(ErrorKind::database)?;
        self.progress.emit(Milestone::StopQuery);
        Ok(rows)
    }

    /// The Version Gate: rebuild `db` if it is stale.
    async fn refresh(&self, db: &Database) -> Result<()> {
        let manifest = self.fetch_manifest().await?;
        if !db.is_stale(&manifest.date).await.map_err(ErrorKind::database)? {
            tracing::info!(date = %manifest.date, "store is up to date");
            return Ok(());
        }
        tracing::info!(date = %manifest.date, "store is stale, rebuilding");
        let progress = self.progress.as_ref();
        db.create_tables(progress).await.map_err(ErrorKind::database)?;
        progress.emit(Milestone::InsertTables);
        progress.emit(Milestone::GetLatest);
        let set = self.sync(&manifest).await?;
        db.insert_tables(&set, &manifest.date, progress).await.map_err(ErrorKind::database)?;
        Ok(())
    }

    /// `true` when `target` does not hold the latest dumps.
    ///
    /// An in-memory target and a missing file are always stale, and are
    /// reported without any request. Never creates or writes anything.
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn check_version(&self, target: &Target) -> Result<bool> {
        let Some(db) = Database::open_existing(target).await.map_err(ErrorKind::database)? else {
            return Ok(true);
        };
        let result = match self.fetch_manifest().await {
            Ok(manifest) => db.is_stale(&manifest.date).await.map_err(ErrorKind::database),
            Err(err) => Err(err),
        };
        db.close().await;
        result
    }
}
