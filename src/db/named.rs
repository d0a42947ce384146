//! Shared queries for the folder and tag tables, which have the same shape.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{format_datetime, now, parse_datetime, parse_uuid};

/// A row of `folders` or `tags`.
pub(super) struct NamedRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NamedRow {
    pub(super) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_uuid(row.get::<_, String>(0)?),
            user_id: parse_uuid(row.get::<_, String>(1)?),
            name: row.get(2)?,
            created_at: parse_datetime(row.get::<_, String>(3)?),
            updated_at: parse_datetime(row.get::<_, String>(4)?),
        })
    }
}

// `table` is always one of the two literal table names, never client input.

pub(super) fn find_all(conn: &Connection, table: &str, user_id: Uuid) -> Result<Vec<NamedRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, user_id, name, created_at, updated_at
         FROM {table} WHERE user_id = ? ORDER BY name"
    ))?;

    let rows = stmt
        .query_map([user_id.to_string()], NamedRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

pub(super) fn find_one(
    conn: &Connection,
    table: &str,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<NamedRow>> {
    let row = conn
        .query_row(
            &format!(
                "SELECT id, user_id, name, created_at, updated_at
                 FROM {table} WHERE id = ? AND user_id = ?"
            ),
            [id.to_string(), user_id.to_string()],
            NamedRow::from_row,
        )
        .optional()?;

    Ok(row)
}

pub(super) fn insert(conn: &Connection, table: &str, user_id: Uuid, name: &str) -> Result<NamedRow> {
    let id = Uuid::new_v4();
    let now = now();

    conn.execute(
        &format!(
            "INSERT INTO {table} (id, user_id, name, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)"
        ),
        (
            id.to_string(),
            user_id.to_string(),
            name,
            format_datetime(now),
            format_datetime(now),
        ),
    )?;

    Ok(NamedRow {
        id,
        user_id,
        name: name.to_string(),
        created_at: now,
        updated_at: now,
    })
}

pub(super) fn rename(
    conn: &Connection,
    table: &str,
    id: Uuid,
    user_id: Uuid,
    name: &str,
) -> Result<Option<NamedRow>> {
    let rows = conn.execute(
        &format!("UPDATE {table} SET name = ?, updated_at = ? WHERE id = ? AND user_id = ?"),
        (
            name,
            format_datetime(now()),
            id.to_string(),
            user_id.to_string(),
        ),
    )?;

    if rows == 0 {
        return Ok(None);
    }

    find_one(conn, table, id, user_id)
}

pub(super) fn delete(conn: &Connection, table: &str, id: Uuid, user_id: Uuid) -> Result<bool> {
    let rows = conn.execute(
        &format!("DELETE FROM {table} WHERE id = ? AND user_id = ?"),
        [id.to_string(), user_id.to_string()],
    )?;
    Ok(rows > 0)
}

/// Count the distinct rows among `ids` owned by `user_id`.
pub(super) fn count_owned(conn: &Connection, table: &str, ids: &[Uuid], user_id: Uuid) -> Result<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE user_id = ? AND id IN ({placeholders})");

    let mut params = Vec::with_capacity(ids.len() + 1);
    params.push(user_id.to_string());
    params.extend(ids.iter().map(Uuid::to_string));

    let count: i64 = conn.query_row(&sql, rusqlite::params_from_iter(params), |row| row.get(0))?;
    Ok(count as usize)
}
