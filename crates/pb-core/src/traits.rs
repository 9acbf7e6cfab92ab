//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::models::{Comment, CommentId, NewComment, NewPost, Post, PostId};

/// Data persistence contract for posts and their comments.
///
/// Failures are opaque to callers: the handler maps every `Err` to a 500
/// without looking at its cause.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    // Post Operations
    async fn list_posts(&self) -> anyhow::Result<Vec<Post>>;
    async fn get_post(&self, id: PostId) -> anyhow::Result<Option<Post>>;
    /// Inserts a post and returns its store-assigned id.
    async fn create_post(&self, post: NewPost) -> anyhow::Result<PostId>;
    /// Replaces title and contents. Updating a missing id is not an error.
    async fn update_post(&self, id: PostId, post: NewPost) -> anyhow::Result<()>;
    /// Removes a post together with its comments.
    async fn delete_post(&self, id: PostId) -> anyhow::Result<()>;

    // Comment Operations
    async fn list_comments_for_post(&self, post_id: PostId) -> anyhow::Result<Vec<Comment>>;
    async fn create_comment(&self, comment: NewComment) -> anyhow::Result<CommentId>;
    async fn get_comment(&self, id: CommentId) -> anyhow::Result<Option<Comment>>;
}
