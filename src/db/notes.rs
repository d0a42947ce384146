use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Row, ToSql};
use uuid::Uuid;

use super::named::NamedRow;
use super::{format_datetime, now, parse_datetime, parse_uuid, Database, NoteRepository};
use crate::models::*;

const NOTE_COLUMNS: &str = "id, user_id, title, content, folder_id, created_at, updated_at";

impl NoteRepository for Database {
    fn find_notes(&self, user_id: Uuid, filter: &NoteFilter) -> Result<Vec<Note>> {
        let conn = self.conn()?;

        let mut conditions = vec!["user_id = ?"];
        let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(user_id.to_string())];

        if let Some(term) = &filter.search_term {
            conditions.push(
                "(instr(fold_case(title), ?) > 0 OR instr(fold_case(coalesce(content, '')), ?) > 0)",
            );
            let term = term.to_lowercase();
            params.push(Box::new(term.clone()));
            params.push(Box::new(term));
        }
        if let Some(folder_id) = &filter.folder_id {
            conditions.push("folder_id = ?");
            params.push(Box::new(folder_id.clone()));
        }
        if let Some(tag_id) = &filter.tag_id {
            conditions.push(
                "EXISTS (SELECT 1 FROM note_tags nt WHERE nt.note_id = notes.id AND nt.tag_id = ?)",
            );
            params.push(Box::new(tag_id.clone()));
        }

        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE {} ORDER BY updated_at DESC, rowid DESC",
            conditions.join(" AND ")
        );
        let params_ref: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let mut notes = stmt
            .query_map(params_ref.as_slice(), note_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        for note in &mut notes {
            note.tags = note_tags(&conn, note.id)?;
        }

        Ok(notes)
    }

    fn find_note(&self, id: Uuid, user_id: Uuid) -> Result<Option<Note>> {
        let conn = self.conn()?;
        load_note(&conn, id, user_id)
    }

    fn create_note(&self, note: NewNote) -> Result<Note> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let id = Uuid::new_v4();
        let now = format_datetime(now());

        tx.execute(
            &format!("INSERT INTO notes ({NOTE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)"),
            (
                id.to_string(),
                note.user_id.to_string(),
                &note.title,
                &note.content,
                note.folder_id.map(|f| f.to_string()),
                &now,
                &now,
            ),
        )?;
        replace_note_tags(&tx, id, &note.tags)?;

        let created = load_note(&tx, id, note.user_id)?
            .ok_or_else(|| anyhow::anyhow!("Note {} vanished after insert", id))?;
        tx.commit()?;

        Ok(created)
    }

    fn update_note(&self, id: Uuid, user_id: Uuid, changes: NoteChanges) -> Result<Option<Note>> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let rows = tx.execute(
            "UPDATE notes SET
                title = COALESCE(?, title),
                content = ?,
                folder_id = COALESCE(?, folder_id),
                updated_at = ?
             WHERE id = ? AND user_id = ?",
            (
                &changes.title,
                &changes.content,
                changes.folder_id.map(|f| f.to_string()),
                format_datetime(now()),
                id.to_string(),
                user_id.to_string(),
            ),
        )?;

        if rows == 0 {
            return Ok(None);
        }

        replace_note_tags(&tx, id, &changes.tags)?;
        let updated = load_note(&tx, id, user_id)?;
        tx.commit()?;

        Ok(updated)
    }

    fn delete_note(&self, id: Uuid, user_id: Uuid) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "DELETE FROM notes WHERE id = ? AND user_id = ?",
            [id.to_string(), user_id.to_string()],
        )?;
        Ok(rows > 0)
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: parse_uuid(row.get::<_, String>(0)?),
        user_id: parse_uuid(row.get::<_, String>(1)?),
        title: row.get(2)?,
        content: row.get(3)?,
        folder_id: row.get::<_, Option<String>>(4)?.map(parse_uuid),
        tags: Vec::new(),
        created_at: parse_datetime(row.get::<_, String>(5)?),
        updated_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

fn load_note(conn: &Connection, id: Uuid, user_id: Uuid) -> Result<Option<Note>> {
    let note = conn
        .query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ? AND user_id = ?"),
            [id.to_string(), user_id.to_string()],
            note_from_row,
        )
        .optional()?;

    match note {
        Some(mut note) => {
            note.tags = note_tags(conn, note.id)?;
            Ok(Some(note))
        }
        None => Ok(None),
    }
}

/// The note's tags in attachment order.
fn note_tags(conn: &Connection, note_id: Uuid) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.id, t.user_id, t.name, t.created_at, t.updated_at
         FROM note_tags nt JOIN tags t ON t.id = nt.tag_id
         WHERE nt.note_id = ? ORDER BY nt.position",
    )?;

    let tags = stmt
        .query_map([note_id.to_string()], NamedRow::from_row)?
        .map(|row| row.map(Tag::from))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tags)
}

fn replace_note_tags(conn: &Connection, note_id: Uuid, tags: &[Uuid]) -> Result<()> {
    conn.execute("DELETE FROM note_tags WHERE note_id = ?", [note_id.to_string()])?;

    let mut stmt =
        conn.prepare_cached("INSERT INTO note_tags (note_id, tag_id, position) VALUES (?, ?, ?)")?;
    for (position, tag_id) in tags.iter().enumerate() {
        stmt.execute((note_id.to_string(), tag_id.to_string(), position as i64))?;
    }

    Ok(())
}
