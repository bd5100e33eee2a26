//! Database migrations

use crate::error::Result;
use libsql::Connection;

/// Current schema version
const CURRENT_VERSION: i32 = 1;

/// Run all pending migrations
pub async fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn).await?;

    if version < 1 {
        migrate_v1(conn).await?;
    }

    Ok(())
}

/// Highest applied schema version, or 0 for a fresh database
async fn get_version(conn: &Connection) -> Result<i32> {
    let mut tables = conn
        .query(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            (),
        )
        .await?;
    if tables.next().await?.is_none() {
        return Ok(0);
    }

    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM schema_version", ())
        .await?;
    Ok(match rows.next().await? {
        Some(row) => row.get(0)?,
        None => 0,
    })
}

/// Migration to version 1: preferences and local reminder tables
async fn migrate_v1(conn: &Connection) -> Result<()> {
    // libsql doesn't have execute_batch, so we run each statement separately
    conn.execute("BEGIN TRANSACTION", ()).await?;

    let statements = [
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS pending_reminders (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            body TEXT,
            sound INTEGER NOT NULL DEFAULT 1,
            trigger_hour INTEGER NOT NULL,
            trigger_minute INTEGER NOT NULL,
            repeats INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS delivered_reminders (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL,
            title TEXT NOT NULL,
            body TEXT,
            sound INTEGER NOT NULL DEFAULT 1,
            trigger_hour INTEGER NOT NULL,
            trigger_minute INTEGER NOT NULL,
            repeats INTEGER NOT NULL DEFAULT 1,
            delivered_at INTEGER NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_delivered_reminders_id ON delivered_reminders(id)",
        "INSERT INTO schema_version (version) VALUES (1)",
    ];

    for stmt in statements {
        if let Err(e) = conn.execute(stmt, ()).await {
            conn.execute("ROLLBACK", ()).await.ok();
            return Err(e.into());
        }
    }

    if let Err(e) = conn.execute("COMMIT", ()).await {
        conn.execute("ROLLBACK", ()).await.ok();
        return Err(e.into());
    }

    tracing::info!("Migrated database to version {CURRENT_VERSION}");
    Ok(())
}
