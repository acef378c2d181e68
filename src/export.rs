use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use pouet_database::Row;
use serde_json::Value;
use std::path::Path;
use tracing::instrument;

/// Write `rows` to a CSV file at `path`.
///
/// The header comes from the first row's columns. Nothing is written, and
/// `false` returned, when there are no rows.
#[instrument(skip(rows, path), fields(rows = rows.len(), path = %path.display()))]
pub fn export_csv(rows: &[Row], path: &Path) -> Result<bool> {
    let Some(first) = rows.first() else {
        return Ok(false);
    };
    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut writer = csv::Writer::from_path(path).or_raise(|| ErrorKind::Export)?;
    writer.write_record(&columns).or_raise(|| ErrorKind::Export)?;
    for row in rows {
        writer.write_record(columns.iter().map(|column| render(row.get(*column)))).or_raise(|| ErrorKind::Export)?;
    }
    writer.flush().or_raise(|| ErrorKind::Export)?;
    Ok(true)
}

fn render(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_empty_rows_write_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.csv");
        assert!(!export_csv(&[], &path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_rows_are_written_with_header() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.csv");
        let rows = vec![
            row(json!({"id": "id1", "title": "title1"})),
            row(json!({"id": 2, "title": null})),
            row(json!({"id": 3, "title": "with, comma"})),
        ];
        assert!(export_csv(&rows, &path).unwrap());
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "id,title\nid1,title1\n2,\n3,\"with, comma\"\n");
    }
}
