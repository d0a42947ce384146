use anyhow::Result;
use uuid::Uuid;

use super::named::{self, NamedRow};
use super::{Database, TagRepository};
use crate::models::Tag;

const TABLE: &str = "tags";

impl From<NamedRow> for Tag {
    fn from(row: NamedRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TagRepository for Database {
    fn find_tags(&self, user_id: Uuid) -> Result<Vec<Tag>> {
        let conn = self.conn()?;
        let rows = named::find_all(&conn, TABLE, user_id)?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    fn find_tag(&self, id: Uuid, user_id: Uuid) -> Result<Option<Tag>> {
        let conn = self.conn()?;
        Ok(named::find_one(&conn, TABLE, id, user_id)?.map(Tag::from))
    }

    fn create_tag(&self, user_id: Uuid, name: &str) -> Result<Tag> {
        let conn = self.conn()?;
        named::insert(&conn, TABLE, user_id, name).map(Tag::from)
    }

    fn update_tag(&self, id: Uuid, user_id: Uuid, name: &str) -> Result<Option<Tag>> {
        let conn = self.conn()?;
        Ok(named::rename(&conn, TABLE, id, user_id, name)?.map(Tag::from))
    }

    /// The tag is also detached from every note that carried it.
    fn delete_tag(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let conn = self.conn()?;
        named::delete(&conn, TABLE, id, user_id)
    }

    fn count_tags(&self, ids: &[Uuid], user_id: Uuid) -> Result<usize> {
        let conn = self.conn()?;
        named::count_owned(&conn, TABLE, ids, user_id)
    }
}
