//! SQLite store for the pouet.net dumps.
//!
//! A [`Database`] wraps a connection pool over a [`Target`]. It knows how to
//! apply the schema, load a [`DumpSet`](pouet_dump::models::DumpSet) in one
//! transaction, report the dump date it holds, and run arbitrary SQL.

mod db;
pub mod error;
mod load;
mod query;
mod schema;
mod version;

pub use crate::db::{Database, MEMORY, Target};
pub use crate::error::SqlFailure;
pub use crate::load::LoadStats;
pub use crate::query::Row;
pub use crate::schema::SCHEMA;

#[cfg(test)]
mod tests {
    use crate::{Database, Target};
    use pouet_dump::models::{DumpDate, DumpSet};
    use std::sync::Mutex;

    fn dump_set() -> DumpSet {
        let prods = serde_json::from_value(serde_json::json!([{
            "id": "1",
            "name": "Astral Blur",
            "type": "demo",
            "platforms": {"68": {"name": "MS-Dos"}, "69": {"name": "Windows"}},
            "placings": [{"party": {"id": "3"}, "ranking": "3", "year": "1997"}],
            "groups": [{"id": "2"}, {"id": "404"}],
            "credits": [{"user": {"id": "2", "nickname": "ps"}, "role": "code"}, {"user": "77"}],
            "party": {"id": "3"},
            "invitation": {"id": "9"},
            "boardID": "4",
            "addedUser": {"id": "1", "nickname": "analogue", "glops": "850"},
        }]))
        .unwrap();
        let groups = serde_json::from_value(serde_json::json!([{"id": "2", "name": "TBL"}])).unwrap();
        let parties = serde_json::from_value(serde_json::json!([{"id": "3", "name": "The Party"}])).unwrap();
        let boards = serde_json::from_value(serde_json::json!([{
            "id": "4",
            "name": "Warp Zone",
            "platforms": {"1": {"name": "BeOS"}},
        }]))
        .unwrap();
        DumpSet::new(prods, groups, parties, boards)
    }

    #[tokio::test]
    async fn test_load_resolves_references() {
        let db = Database::connect(&Target::Memory).await.unwrap();
        let titles = Mutex::new(Vec::new());
        let progress = |title: &str| titles.lock().unwrap().push(title.to_string());
        db.create_tables(&progress).await.unwrap();
        let date: DumpDate = "20240105".parse().unwrap();
        let stats = db.insert_tables(&dump_set(), &date, &progress).await.unwrap();
        assert_eq!(*titles.lock().unwrap(), vec!["Create tables", "Start transaction", "Stop transaction"]);
        assert_eq!((stats.platforms, stats.users, stats.prods), (3, 2, 1));
        assert!(!db.is_stale(&date).await.unwrap());

        let prod = db.query("SELECT id, name, party_id, invitation, board_id, added_user FROM prod").await.unwrap();
        assert_eq!(
            serde_json::json!(prod),
            serde_json::json!([{
                "id": 1, "name": "Astral Blur", "party_id": 3, "invitation": null, "board_id": 4, "added_user": 1
            }])
        );
        let groups = db.query("SELECT group_id FROM prod_group").await.unwrap();
        assert_eq!(serde_json::json!(groups), serde_json::json!([{"group_id": 2}]));
        let credits = db.query("SELECT user_id, role FROM prod_credit").await.unwrap();
        assert_eq!(serde_json::json!(credits), serde_json::json!([{"user_id": 2, "role": "code"}]));
    }

    #[tokio::test]
    async fn test_reload_replaces_content() {
        let db = Database::connect(&Target::Memory).await.unwrap();
        db.create_tables(&pouet_dump::Silent).await.unwrap();
        let first: DumpDate = "20240105".parse().unwrap();
        let second: DumpDate = "20240112".parse().unwrap();
        db.insert_tables(&dump_set(), &first, &pouet_dump::Silent).await.unwrap();
        db.insert_tables(&dump_set(), &second, &pouet_dump::Silent).await.unwrap();
        let count = db.query("SELECT count(*) AS n FROM prod").await.unwrap();
        assert_eq!(serde_json::json!(count), serde_json::json!([{"n": 1}]));
        assert_eq!(db.stored_version().await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_failed_load_rolls_back() {
        let db = Database::connect(&Target::Memory).await.unwrap();
        db.create_tables(&pouet_dump::Silent).await.unwrap();
        let first: DumpSet = dump_set();
        let date: DumpDate = "20240105".parse().unwrap();
        db.insert_tables(&first, &date, &pouet_dump::Silent).await.unwrap();

        // Two prods with the same id violate the primary key halfway through.
        let mut broken = dump_set();
        broken.prods.push(broken.prods[0].clone());
        let newer: DumpDate = "20240112".parse().unwrap();
        let titles = Mutex::new(Vec::new());
        let progress = |title: &str| titles.lock().unwrap().push(title.to_string());
        let err = db.insert_tables(&broken, &newer, &progress).await.unwrap_err();
        assert!(matches!(&*err, crate::error::ErrorKind::Sql(failure) if failure.errno == Some(19)));
        assert_eq!(*titles.lock().unwrap(), vec!["Start transaction"]);

        assert_eq!(db.stored_version().await.unwrap(), Some(date));
        let count = db.query("SELECT count(*) AS n FROM platform").await.unwrap();
        assert_eq!(serde_json::json!(count), serde_json::json!([{"n": 3}]));
    }
}
