//! Noteful: a note-taking REST API.
//!
//! Notes belong to a single user and may reference one of that user's
//! folders and any number of that user's tags. References are checked by
//! [`validation`] before any write reaches the [`db`] layer.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod password;
pub mod validation;

pub use error::{Error, Result};
