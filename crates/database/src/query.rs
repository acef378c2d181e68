use crate::Database;
use crate::error::{Result, SqlResultExt};
use serde_json::{Map, Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};
use tracing::instrument;

/// One result row: column name to value, in column order.
pub type Row = Map<String, Value>;

impl Database {
    /// Run caller SQL verbatim and collect every returned row.
    ///
    /// The text may hold several statements; they run in order and their rows
    /// are concatenated. Driver errors (syntax errors included) come back as
    /// [`ErrorKind::Sql`](crate::error::ErrorKind::Sql) with SQLite's code.
    #[instrument(skip_all, fields(target = %self.target(), sql_size = sql.len(), rows))]
    pub async fn query(&self, sql: &str) -> Result<Vec<Row>> {
        let rows = sqlx::raw_sql(sql).fetch_all(self.pool()).await.or_sql()?;
        tracing::Span::current().record("rows", rows.len());
        rows.iter().map(to_json).collect()
    }
}

fn to_json(row: &SqliteRow) -> Result<Row> {
    let mut map = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index).or_sql()?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(index).or_sql()?),
                "REAL" => Number::from_f64(row.try_get::<f64, _>(index).or_sql()?).map_or(Value::Null, Value::Number),
                "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(index).or_sql()?),
                _ => Value::String(row.try_get::<String, _>(index).or_sql()?),
            }
        };
        map.insert(column.name().to_string(), value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{Database, Target};
    use pouet_dump::Silent;
    use serde_json::json;

    async fn database() -> Database {
        let db = Database::connect(&Target::Memory).await.unwrap();
        db.create_tables(&Silent).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_rows_keep_column_order_and_types() {
        let db = database().await;
        let rows = db.query("SELECT 1 AS b, 'two' AS a, 0.5 AS c, NULL AS d, x'0102' AS e").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["b", "a", "c", "d", "e"]);
        assert_eq!(json!(rows[0]), json!({"b": 1, "a": "two", "c": 0.5, "d": null, "e": [1, 2]}));
    }

    #[tokio::test]
    async fn test_multiple_statements_concatenate() {
        let db = database().await;
        let rows = db
            .query("INSERT INTO platform (id, name) VALUES (1, 'BeOS'); SELECT name FROM platform; SELECT 2 AS n;")
            .await
            .unwrap();
        assert_eq!(json!(rows), json!([{"name": "BeOS"}, {"n": 2}]));
    }

    #[tokio::test]
    async fn test_syntax_error_carries_sqlite_code() {
        let db = database().await;
        let err = db.query("CSELET * FORM prod").await.unwrap_err();
        let ErrorKind::Sql(failure) = &*err else {
            panic!("expected a SQL failure, got {err:?}");
        };
        assert_eq!(failure.errno, Some(1));
        assert_eq!(failure.code, Some("SQLITE_ERROR"));
        assert!(failure.message.contains("syntax error"), "{}", failure.message);
    }

    #[tokio::test]
    async fn test_constraint_violation() {
        let db = database().await;
        let err = db.query("INSERT INTO prod_group (prod_id, group_id) VALUES (1, 1)").await.unwrap_err();
        let ErrorKind::Sql(failure) = &*err else {
            panic!("expected a SQL failure, got {err:?}");
        };
        assert_eq!(failure.errno, Some(19));
        assert_eq!(failure.code, Some("SQLITE_CONSTRAINT"));
    }
}
