//! # Domain Models
//!
//! These structs represent the core entities of Postboard.
//! Identifiers are assigned by the store and never change after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result, MISSING_COMMENT_TEXT, MISSING_POST_FIELDS};

pub type PostId = i64;
pub type CommentId = i64;

/// The primary resource: a titled piece of writing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub contents: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A reply attached to exactly one Post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for inserting or fully replacing a Post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub contents: String,
}

/// Validated fields for inserting a Comment under an existing Post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub text: String,
    pub post_id: PostId,
}

/// Request body for creating or updating a Post, as sent by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub contents: Option<String>,
}

impl PostInput {
    /// Both fields must be present and non-empty.
    pub fn validate(self) -> Result<NewPost> {
        match (present(self.title), present(self.contents)) {
            (Some(title), Some(contents)) => Ok(NewPost { title, contents }),
            _ => Err(AppError::Validation(MISSING_POST_FIELDS)),
        }
    }
}

/// Request body for creating a Comment.
///
/// A `post_id` in the body is ignored; the parent always comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentInput {
    #[serde(default)]
    pub text: Option<String>,
}

impl CommentInput {
    /// Returns the comment text, which must be present and non-empty.
    pub fn validate(self) -> Result<String> {
        present(self.text).ok_or(AppError::Validation(MISSING_COMMENT_TEXT))
    }
}

impl NewComment {
    pub fn new(text: String, post_id: PostId) -> Self {
        Self { text, post_id }
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
