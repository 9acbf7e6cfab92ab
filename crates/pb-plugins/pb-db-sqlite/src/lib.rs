//! # pb-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `pb-core` domain models.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use pb_core::models::{Comment, CommentId, NewComment, NewPost, Post, PostId};
use pb_core::traits::PostStore;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

const CREATE_POSTS: &str = "CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    contents TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const CREATE_COMMENTS: &str = "CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    post_id INTEGER NOT NULL REFERENCES posts(id),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

const CREATE_COMMENTS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments (post_id)";

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub struct SqlitePostStore {
    pool: SqlitePool,
}

impl SqlitePostStore {
    /// Opens (or creates) the database at `url` and ensures the schema exists.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        Self::connect(url, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Like [`SqlitePostStore::new`] with an explicit pool size.
    ///
    /// In-memory databases live and die with their connection, so they are
    /// pinned to a single connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if is_in_memory(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.ensure_schema().await?;
        log::debug!("sqlite store ready at {url}");
        Ok(store)
    }

    async fn ensure_schema(&self) -> anyhow::Result<()> {
        for statement in [CREATE_POSTS, CREATE_COMMENTS, CREATE_COMMENTS_INDEX] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn row_to_post(row: &SqliteRow) -> Result<Post, sqlx::Error> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        contents: row.try_get("contents")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn row_to_comment(row: &SqliteRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        text: row.try_get("text")?,
        post_id: row.try_get("post_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl PostStore for SqlitePostStore {
    async fn list_posts(&self) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query("SELECT * FROM posts ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_post).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn get_post(&self, id: PostId) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_post).transpose()?)
    }

    async fn create_post(&self, post: NewPost) -> anyhow::Result<PostId> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO posts (title, contents, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(post.title)
        .bind(post.contents)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update_post(&self, id: PostId, post: NewPost) -> anyhow::Result<()> {
        sqlx::query("UPDATE posts SET title = ?, contents = ?, updated_at = ? WHERE id = ?")
            .bind(post.title)
            .bind(post.contents)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Comments go first; `post_id` is a foreign key.
    async fn delete_post(&self, id: PostId) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE post_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_comments_for_post(&self, post_id: PostId) -> anyhow::Result<Vec<Comment>> {
        let rows = sqlx::query("SELECT * FROM comments WHERE post_id = ? ORDER BY id ASC")
            .bind(post_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_comment).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    async fn create_comment(&self, comment: NewComment) -> anyhow::Result<CommentId> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO comments (text, post_id, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(comment.text)
        .bind(comment.post_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_comment(&self, id: CommentId) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_comment).transpose()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqlitePostStore {
        SqlitePostStore::new("sqlite::memory:").await.unwrap()
    }

    fn new_post(title: &str, contents: &str) -> NewPost {
        NewPost { title: title.into(), contents: contents.into() }
    }

    #[tokio::test]
    async fn test_create_and_get_post() {
        let store = memory_store().await;

        let id = store.create_post(new_post("T", "C")).await.expect("Failed to create post");
        let post = store.get_post(id).await.unwrap().expect("post should exist");

        assert_eq!(post.id, id);
        assert_eq!(post.title, "T");
        assert_eq!(post.contents, "C");
        assert_eq!(post.created_at, post.updated_at);
    }

    #[tokio::test]
    async fn test_missing_post_is_none() {
        let store = memory_store().await;
        assert!(store.get_post(42).await.unwrap().is_none());
        assert!(store.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = memory_store().await;
        let id = store.create_post(new_post("old", "old body")).await.unwrap();

        store.update_post(id, new_post("new", "new body")).await.unwrap();

        let post = store.get_post(id).await.unwrap().unwrap();
        assert_eq!(post.title, "new");
        assert_eq!(post.contents, "new body");
        assert!(post.updated_at >= post.created_at);
    }

    #[tokio::test]
    async fn test_comments_are_scoped_to_their_post() {
        let store = memory_store().await;
        let first = store.create_post(new_post("a", "a")).await.unwrap();
        let second = store.create_post(new_post("b", "b")).await.unwrap();

        let comment_id = store.create_comment(NewComment::new("hi".into(), first)).await.unwrap();
        store.create_comment(NewComment::new("other".into(), second)).await.unwrap();

        let comments = store.list_comments_for_post(first).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, comment_id);
        assert_eq!(comments[0].post_id, first);

        let fetched = store.get_comment(comment_id).await.unwrap().unwrap();
        assert_eq!(fetched.text, "hi");
    }

    #[tokio::test]
    async fn test_delete_removes_post_and_comments() {
        let store = memory_store().await;
        let id = store.create_post(new_post("doomed", "x")).await.unwrap();
        let comment_id = store.create_comment(NewComment::new("bye".into(), id)).await.unwrap();

        store.delete_post(id).await.expect("delete with comments should succeed");

        assert!(store.get_post(id).await.unwrap().is_none());
        assert!(store.get_comment(comment_id).await.unwrap().is_none());
        assert!(store.list_comments_for_post(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_posts_in_insertion_order() {
        let store = memory_store().await;
        let a = store.create_post(new_post("a", "1")).await.unwrap();
        let b = store.create_post(new_post("b", "2")).await.unwrap();

        let ids: Vec<PostId> = store.list_posts().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a, b]);
    }
}
