//! # AppError
//!
//! Centralized error handling for Postboard.
//! Every failure a request can hit falls into one of three kinds, each with a
//! fixed client-facing message.

use thiserror::Error;

pub const NOT_FOUND: &str = "The post with the specified ID does not exist.";
pub const POSTS_RETRIEVAL: &str = "The posts information could not be retrieved.";
pub const COMMENTS_RETRIEVAL: &str = "The comments information could not be retrieved.";
pub const POST_SAVE: &str = "There was an error while saving the post to the database";
pub const COMMENT_SAVE: &str = "There was an error while saving the comment to the database";
pub const POST_UPDATE: &str = "The post information could not be modified.";
pub const POST_REMOVE: &str = "The post could not be removed";
pub const MISSING_POST_FIELDS: &str = "Please provide title and contents for the post.";
pub const MISSING_COMMENT_TEXT: &str = "Please provide text for the comment.";

/// The primary error type for all pb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or empty. Raised before touching the store.
    #[error("{0}")]
    Validation(&'static str),

    /// The referenced Post does not exist.
    #[error("{}", NOT_FOUND)]
    NotFound,

    /// The store failed. `message` is what the client sees.
    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// A specialized Result type for Postboard logic.
pub type Result<T> = std::result::Result<T, AppError>;

/// Lifts a raw store result into the taxonomy, tagging failures with the
/// message for the operation in progress.
pub trait StoreResultExt<T> {
    fn or_store_error(self, message: &'static str) -> Result<T>;
}

impl<T> StoreResultExt<T> for anyhow::Result<T> {
    fn or_store_error(self, message: &'static str) -> Result<T> {
        self.map_err(|source| AppError::Store { message, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_cause() {
        let raw: anyhow::Result<()> = Err(anyhow::anyhow!("disk full"));
        let err = raw.or_store_error(POST_SAVE).unwrap_err();
        assert_eq!(err.to_string(), POST_SAVE);
        let cause = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(cause.as_deref(), Some("disk full"));
    }

    #[test]
    fn not_found_displays_fixed_message() {
        assert_eq!(AppError::NotFound.to_string(), NOT_FOUND);
    }
}
