//! Key-value database operations.

use rusqlite::{params, OptionalExtension};
use serde_json::Value;

use super::{Database, DbResult};
use crate::store::{KeyValueStore, StoreResult};

impl Database {
    /// Insert or replace the raw JSON text for a key.
    pub fn set_value(&self, key: &str, json: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![key, json],
        )?;
        Ok(())
    }

    /// Get the raw JSON text for a key.
    pub fn get_value(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    /// List stored keys.
    pub fn list_keys(&self) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let raw = self.get_value(key)?;
        Ok(raw.map(|s| serde_json::from_str(&s)).transpose()?)
    }

    fn set(&self, key: &str, value: &Value) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_value(key, &json)?;
        tracing::debug!(key, bytes = json.len(), "Store value written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_get_value() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_value("drugs").unwrap().is_none());

        db.set_value("drugs", "[]").unwrap();
        assert_eq!(db.get_value("drugs").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_overwrite_replaces_whole_value() {
        let db = Database::open_in_memory().unwrap();
        KeyValueStore::set(&db, "history", &json!([{"a": 1}, {"a": 2}])).unwrap();
        KeyValueStore::set(&db, "history", &json!([{"b": 3}])).unwrap();

        assert_eq!(
            KeyValueStore::get(&db, "history").unwrap(),
            Some(json!([{"b": 3}]))
        );
    }

    #[test]
    fn test_list_keys() {
        let db = Database::open_in_memory().unwrap();
        db.set_value("species", "[]").unwrap();
        db.set_value("drugs", "[]").unwrap();

        assert_eq!(db.list_keys().unwrap(), vec!["drugs", "species"]);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        {
            let db = Database::open(&path).unwrap();
            KeyValueStore::set(&db, "cases", &json!([{"id": "c1"}])).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(
            KeyValueStore::get(&db, "cases").unwrap(),
            Some(json!([{"id": "c1"}]))
        );
    }
}
