//! SQLite-backed persistence.
//!
//! [`Database`] owns a single connection behind a mutex and implements one
//! repository trait per entity (see [`repository`]). Every query on notes,
//! folders and tags carries the owner's id; cross-user rows are invisible.

mod folders;
mod named;
mod notes;
pub mod repository;
mod schema;
mod tags;
mod users;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{functions::FunctionFlags, Connection};
use uuid::Uuid;

pub use repository::*;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::from_connection(conn)
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "noteful")
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("noteful.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        register_functions(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn()?;
        schema::run_migrations(&conn)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database lock poisoned"))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// SQL helpers not provided by SQLite itself.
///
/// `fold_case(text)` lowercases with full Unicode rules; the built-in
/// `lower()` only folds ASCII.
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
    )?;
    Ok(())
}

/// Whether `err` is a UNIQUE constraint violation raised by SQLite.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<rusqlite::Error>(),
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Current time at the precision timestamps are stored with.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so that timestamps sort lexically in SQL.
fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_timestamps_sort_chronologically() {
        // Unpadded RFC 3339 would order "00Z" after "00.1Z" lexically.
        let later = DateTime::parse_from_rfc3339("2024-03-01T10:00:00.1Z")
            .unwrap()
            .with_timezone(&Utc);
        let earlier = DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert!(format_datetime(later) > format_datetime(earlier));
        assert_eq!(format_datetime(earlier).len(), format_datetime(later).len());
    }

    #[test]
    fn formatted_timestamps_round_trip() {
        let now = Utc::now();
        let parsed = parse_datetime(format_datetime(now));
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }

    #[test]
    fn fold_case_lowercases_non_ascii() {
        let db = Database::open_memory().unwrap();
        let conn = db.conn().unwrap();
        let folded: String = conn
            .query_row("SELECT fold_case('CAFÉ ÅNGSTRÖM')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "café ångström");

        let null: Option<String> = conn
            .query_row("SELECT fold_case(NULL)", [], |row| row.get(0))
            .unwrap();
        assert!(null.is_none());
    }

    #[test]
    fn unique_violation_is_detected() {
        let db = Database::open_memory().unwrap();
        db.migrate().unwrap();
        let conn = db.conn().unwrap();
        let insert = "INSERT INTO users (id, username, password, created_at) VALUES (?, 'bob', 'x', 'now')";
        conn.execute(insert, [Uuid::new_v4().to_string()]).unwrap();

        let err: anyhow::Error = conn
            .execute(insert, [Uuid::new_v4().to_string()])
            .unwrap_err()
            .into();

        assert!(is_unique_violation(&err));
        assert!(!is_unique_violation(&anyhow!("something else")));
    }
}
