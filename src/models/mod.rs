//! Domain models for Noteful.
//!
//! # Entities
//!
//! - [`Note`]: A titled piece of text owned by a user, optionally filed in a
//!   [`Folder`] and labelled with [`Tag`]s.
//! - [`Folder`]: A named container for notes. Each note lives in at most one.
//! - [`Tag`]: A named label. A note carries an ordered list of them.
//! - [`User`]: An account. Every note, folder and tag is scoped to exactly one.
//!
//! Identifiers are UUIDs; [`parse_id`] is the single place that decides
//! whether a client-supplied string is a well-formed identifier.

mod folder;
mod id;
mod note;
mod tag;
mod user;

pub use folder::*;
pub use id::*;
pub use note::*;
pub use tag::*;
pub use user::*;
