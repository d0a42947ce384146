//! Repository interfaces, one per entity.
//!
//! Handlers and validators depend on these traits rather than on SQL. All
//! owner-scoped lookups take the caller's `user_id`; a row owned by someone
//! else behaves exactly like a missing one.

use anyhow::Result;
use chrono::Duration;
use uuid::Uuid;

use crate::models::*;

pub trait NoteRepository {
    /// Notes matching `filter`, most recently updated first.
    fn find_notes(&self, user_id: Uuid, filter: &NoteFilter) -> Result<Vec<Note>>;

    fn find_note(&self, id: Uuid, user_id: Uuid) -> Result<Option<Note>>;

    fn create_note(&self, note: NewNote) -> Result<Note>;

    /// Apply `changes`; `None` when no note matched.
    fn update_note(&self, id: Uuid, user_id: Uuid, changes: NoteChanges) -> Result<Option<Note>>;

    /// Returns whether a row was removed.
    fn delete_note(&self, id: Uuid, user_id: Uuid) -> Result<bool>;
}

pub trait FolderRepository {
    /// The user's folders ordered by name.
    fn find_folders(&self, user_id: Uuid) -> Result<Vec<Folder>>;

    fn find_folder(&self, id: Uuid, user_id: Uuid) -> Result<Option<Folder>>;

    fn create_folder(&self, user_id: Uuid, name: &str) -> Result<Folder>;

    fn update_folder(&self, id: Uuid, user_id: Uuid, name: &str) -> Result<Option<Folder>>;

    fn delete_folder(&self, id: Uuid, user_id: Uuid) -> Result<bool>;

    /// Number of folders with this id owned by `user_id` (0 or 1).
    fn count_folders(&self, id: Uuid, user_id: Uuid) -> Result<usize>;
}

pub trait TagRepository {
    /// The user's tags ordered by name.
    fn find_tags(&self, user_id: Uuid) -> Result<Vec<Tag>>;

    fn find_tag(&self, id: Uuid, user_id: Uuid) -> Result<Option<Tag>>;

    fn create_tag(&self, user_id: Uuid, name: &str) -> Result<Tag>;

    fn update_tag(&self, id: Uuid, user_id: Uuid, name: &str) -> Result<Option<Tag>>;

    fn delete_tag(&self, id: Uuid, user_id: Uuid) -> Result<bool>;

    /// Number of distinct tags among `ids` owned by `user_id`.
    ///
    /// Repeated ids are counted once.
    fn count_tags(&self, ids: &[Uuid], user_id: Uuid) -> Result<usize>;
}

pub trait UserRepository {
    /// Fails with a UNIQUE violation (see [`super::is_unique_violation`])
    /// when the username is taken.
    fn create_user(&self, user: NewUser) -> Result<User>;

    fn find_user(&self, id: Uuid) -> Result<Option<User>>;

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Issue a new bearer token for `user_id` valid for `ttl`.
    fn create_token(&self, user_id: Uuid, ttl: Duration) -> Result<AuthToken>;

    /// The owner of `token`, if it exists and has not expired.
    fn find_user_by_token(&self, token: &str) -> Result<Option<User>>;

    /// Remove expired tokens, returning how many were removed.
    fn purge_expired_tokens(&self) -> Result<usize>;
}
