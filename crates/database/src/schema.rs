use crate::Database;
use crate::error::{Result, SqlResultExt};
use pouet_dump::{Milestone, Progress};
use tracing::instrument;

/// The relational schema, applied verbatim.
pub const SCHEMA: &str = include_str!("../schema/create.sql");

impl Database {
    /// Apply [`SCHEMA`]. Every statement is `IF NOT EXISTS`, so this is safe
    /// on an already initialised store and never drops data.
    #[instrument(skip_all, fields(target = %self.target()))]
    pub async fn create_tables(&self, progress: &dyn Progress) -> Result<()> {
        progress.emit(Milestone::CreateTables);
        sqlx::raw_sql(SCHEMA).execute(self.pool()).await.or_sql()?;
        Ok(())
    }

    /// Names of the user tables currently in the store, sorted.
    pub async fn table_names(&self) -> Result<Vec<String>> {
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(self.pool())
            .await
            .or_sql()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, Target};
    use pouet_dump::Silent;

    #[tokio::test]
    async fn test_create_tables_is_idempotent() {
        let db = Database::connect(&Target::Memory).await.unwrap();
        db.create_tables(&Silent).await.unwrap();
        sqlx::query("INSERT INTO platform (id, name) VALUES (1, 'Amiga OCS/ECS')").execute(db.pool()).await.unwrap();
        db.create_tables(&Silent).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM platform").fetch_one(db.pool()).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            db.table_names().await.unwrap(),
            vec![
                "board",
                "board_platform",
                "demogroup",
                "party",
                "platform",
                "prod",
                "prod_credit",
                "prod_group",
                "prod_placing",
                "prod_platform",
                "user",
                "version",
            ]
        );
    }

    #[tokio::test]
    async fn test_version_table_holds_one_row() {
        let db = Database::connect(&Target::Memory).await.unwrap();
        db.create_tables(&Silent).await.unwrap();
        let err = sqlx::query("INSERT INTO version (id, date) VALUES (2, '20240105')").execute(db.pool()).await;
        assert!(err.is_err());
    }
}
