//! SQLite schema definition.

/// Complete database schema for darting-log.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Key-Value Store (one JSON array per collection)
-- ============================================================================

CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                         -- JSON document
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
