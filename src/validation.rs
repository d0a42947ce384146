//! Reference checks that gate every note write.
//!
//! A note may only point at folders and tags owned by the same user. Both
//! checks are read-only and independent, so [`validate_references`] runs
//! them side by side and fails if either does.

use uuid::Uuid;

use crate::db::{FolderRepository, TagRepository};
use crate::error::{Error, Result};
use crate::models::parse_id;

/// Check an optional folder reference.
///
/// `None` passes with no folder. Otherwise the id must be well formed and
/// name a folder owned by `user_id`. Returns the parsed id.
pub async fn validate_folder_id<S>(store: &S, folder_id: Option<&str>, user_id: Uuid) -> Result<Option<Uuid>>
where
    S: FolderRepository + ?Sized,
{
    let Some(raw) = folder_id else {
        return Ok(None);
    };

    let id = parse_id(raw)
        .ok_or_else(|| Error::InvalidReference("The `folderId` is not valid".to_string()))?;

    if store.count_folders(id, user_id)? == 0 {
        return Err(Error::InvalidReference(
            "The `folderId` does not match any of your folders".to_string(),
        ));
    }

    Ok(Some(id))
}

/// Check a list of tag references.
///
/// Every id must be well formed, and the number of matching tags owned by
/// `user_id` must equal the length of the list. Ids are not deduplicated
/// first, so a list that repeats an id is rejected.
pub async fn validate_tag_ids<S>(store: &S, tags: &[String], user_id: Uuid) -> Result<Vec<Uuid>>
where
    S: TagRepository + ?Sized,
{
    if tags.is_empty() {
        return Ok(Vec::new());
    }

    let ids = tags
        .iter()
        .map(|tag| parse_id(tag))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::InvalidReference("The tags `id` is not valid".to_string()))?;

    let found = store.count_tags(&ids, user_id)?;
    if found != ids.len() {
        return Err(Error::InvalidReference(
            "The tags array contains an invalid id".to_string(),
        ));
    }

    Ok(ids)
}

/// Run both reference checks concurrently; succeed only if both do.
pub async fn validate_references<S>(
    store: &S,
    folder_id: Option<&str>,
    tags: &[String],
    user_id: Uuid,
) -> Result<(Option<Uuid>, Vec<Uuid>)>
where
    S: FolderRepository + TagRepository + ?Sized,
{
    tokio::try_join!(
        validate_folder_id(store, folder_id, user_id),
        validate_tag_ids(store, tags, user_id),
    )
}
