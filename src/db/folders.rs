use anyhow::Result;
use uuid::Uuid;

use super::named::{self, NamedRow};
use super::{Database, FolderRepository};
use crate::models::Folder;

const TABLE: &str = "folders";

impl From<NamedRow> for Folder {
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

impl FolderRepository for Database {
    fn find_folders(&self, user_id: Uuid) -> Result<Vec<Folder>> {
        let conn = self.conn()?;
        let rows = named::find_all(&conn, TABLE, user_id)?;
        Ok(rows.into_iter().map(Folder::from).collect())
    }

    fn find_folder(&self, id: Uuid, user_id: Uuid) -> Result<Option<Folder>> {
        let conn = self.conn()?;
        Ok(named::find_one(&conn, TABLE, id, user_id)?.map(Folder::from))
    }

    fn create_folder(&self, user_id: Uuid, name: &str) -> Result<Folder> {
        let conn = self.conn()?;
        named::insert(&conn, TABLE, user_id, name).map(Folder::from)
    }

    fn update_folder(&self, id: Uuid, user_id: Uuid, name: &str) -> Result<Option<Folder>> {
        let conn = self.conn()?;
        Ok(named::rename(&conn, TABLE, id, user_id, name)?.map(Folder::from))
    }

    /// Notes filed in the folder keep existing with `folder_id` cleared.
    fn delete_folder(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let conn = self.conn()?;
        named::delete(&conn, TABLE, id, user_id)
    }

    fn count_folders(&self, id: Uuid, user_id: Uuid) -> Result<usize> {
        let conn = self.conn()?;
        named::count_owned(&conn, TABLE, &[id], user_id)
    }
}
