use anyhow::Result;
use chrono::Duration;
use rusqlite::{OptionalExtension, Row};
use uuid::Uuid;

use super::{format_datetime, now, parse_datetime, parse_uuid, Database, UserRepository};
use crate::models::*;

const USER_COLUMNS: &str = "id, username, fullname, password, created_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: parse_uuid(row.get::<_, String>(0)?),
        username: row.get(1)?,
        fullname: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: parse_datetime(row.get::<_, String>(4)?),
    })
}

impl UserRepository for Database {
    fn create_user(&self, user: NewUser) -> Result<User> {
        let conn = self.conn()?;
        let id = Uuid::new_v4();
        let now = now();

        conn.execute(
            &format!("INSERT INTO users ({USER_COLUMNS}) VALUES (?, ?, ?, ?, ?)"),
            (
                id.to_string(),
                &user.username,
                &user.fullname,
                &user.password_hash,
                format_datetime(now),
            ),
        )?;

        Ok(User {
            id,
            username: user.username,
            fullname: user.fullname,
            password_hash: user.password_hash,
            created_at: now,
        })
    }

    fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"),
                [id.to_string()],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"),
                [username],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn create_token(&self, user_id: Uuid, ttl: Duration) -> Result<AuthToken> {
        let conn = self.conn()?;
        let token = Uuid::new_v4().simple().to_string();
        let now = now();
        let expires_at = now + ttl;

        conn.execute(
            "INSERT INTO auth_tokens (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
            (
                &token,
                user_id.to_string(),
                format_datetime(now),
                format_datetime(expires_at),
            ),
        )?;

        Ok(AuthToken {
            auth_token: token,
            expires_at,
        })
    }

    fn find_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT u.id, u.username, u.fullname, u.password, u.created_at
                 FROM auth_tokens t JOIN users u ON u.id = t.user_id
                 WHERE t.token = ? AND t.expires_at > ?",
                (token, format_datetime(now())),
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn purge_expired_tokens(&self) -> Result<usize> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "DELETE FROM auth_tokens WHERE expires_at <= ?",
            [format_datetime(now())],
        )?;
        Ok(rows)
    }
}
