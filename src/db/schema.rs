//! Versioned schema migrations embedded in the binary.

use std::collections::HashSet;

use anyhow::{Context, Result};
use rusqlite::Connection;

struct Migration {
    version: &'static str,
    name: &'static str,
    sql: &'static str,
}

/// Applied in order; a version is never edited once released.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "001",
        name: "initial",
        sql: include_str!("migrations/001_initial.sql"),
    },
    Migration {
        version: "002",
        name: "auth_tokens",
        sql: include_str!("migrations/002_auth_tokens.sql"),
    },
];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )
    .context("Failed to create schema_migrations table")?;

    let pending = pending(conn)?;
    if pending.is_empty() {
        tracing::debug!("Schema is up to date");
    }

    for migration in pending {
        apply(conn, migration)?;
    }

    Ok(())
}

fn applied_versions(conn: &Connection) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<HashSet<String>, _>>()?;
    Ok(versions)
}

fn pending(conn: &Connection) -> Result<Vec<&'static Migration>> {
    let applied = applied_versions(conn)?;
    Ok(MIGRATIONS
        .iter()
        .filter(|m| !applied.contains(m.version))
        .collect())
}

/// Run one migration and record it, atomically.
fn apply(conn: &Connection, migration: &Migration) -> Result<()> {
    tracing::info!("Applying migration {} ({})", migration.version, migration.name);

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql).with_context(|| {
        format!("Migration {} ({}) failed", migration.version, migration.name)
    })?;
    tx.execute(
        "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)",
        (migration.version, migration.name, chrono::Utc::now().to_rfc3339()),
    )?;
    tx.commit()?;

    Ok(())
}
