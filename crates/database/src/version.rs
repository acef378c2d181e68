use crate::Database;
use crate::error::{Result, SqlResultExt};
use pouet_dump::models::DumpDate;
use tracing::instrument;

impl Database {
    /// Date recorded by the last successful load, if any.
    ///
    /// A store without the `version` table (never loaded, or not ours) has no
    /// version. Read-only.
    #[instrument(skip_all, fields(target = %self.target()))]
    pub async fn stored_version(&self) -> Result<Option<DumpDate>> {
        let has_table: Option<i64> =
            sqlx::query_scalar(include_str!("../queries/version_table_exists.sql")).fetch_optional(self.pool()).await.or_sql()?;
        if has_table.is_none() {
            return Ok(None);
        }
        let stored: Option<String> =
            sqlx::query_scalar(include_str!("../queries/select_version.sql")).fetch_optional(self.pool()).await.or_sql()?;
        Ok(stored.and_then(|raw| match raw.parse() {
            Ok(date) => Some(date),
            Err(_) => {
                tracing::warn!(raw = %raw, "unreadable version date, treating store as stale");
                None
            },
        }))
    }

    /// `true` when the store does not hold the dumps of `date`.
    pub async fn is_stale(&self, date: &DumpDate) -> Result<bool> {
        let stored = self.stored_version().await?;
        let stale = stored.as_ref() != Some(date);
        tracing::debug!(stored = ?stored.map(|d| d.to_string()), latest = %date, stale, "version gate");
        Ok(stale)
    }
}
