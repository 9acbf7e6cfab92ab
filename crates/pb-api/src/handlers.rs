//! # pb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and Core traits.
//! Every handler runs the same pipeline: validate the body, check the post
//! exists, mutate, re-fetch, respond. Each store call is awaited before the
//! next one starts.

use actix_web::web::{self, Either};
use actix_web::HttpResponse;
use anyhow::Context;
use pb_core::error::{
    AppError, Result, StoreResultExt, COMMENTS_RETRIEVAL, COMMENT_SAVE, POSTS_RETRIEVAL,
    POST_REMOVE, POST_SAVE, POST_UPDATE,
};
use pb_core::models::{CommentInput, NewComment, Post, PostId, PostInput};
use pb_core::traits::PostStore;

use crate::error::ApiError;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub store: Box<dyn PostStore>,
}

impl AppState {
    pub fn new(store: Box<dyn PostStore>) -> Self {
        Self { store }
    }
}

pub type HandlerResult = std::result::Result<HttpResponse, ApiError>;

/// A JSON or urlencoded body. Extraction failures are kept so the handler
/// can treat an unreadable body as an empty one.
pub type Body<T> = std::result::Result<Either<web::Json<T>, web::Form<T>>, actix_web::Error>;

fn payload<T: Default>(body: Body<T>) -> T {
    match body {
        Ok(Either::Left(web::Json(input))) => input,
        Ok(Either::Right(web::Form(input))) => input,
        Err(err) => {
            log::debug!("treating unreadable body as empty: {err}");
            T::default()
        }
    }
}

/// Ids that do not parse cannot name a stored post.
fn parse_id(raw: &str) -> Result<PostId> {
    raw.parse().map_err(|_| AppError::NotFound)
}

async fn find_post(store: &dyn PostStore, id: PostId) -> Result<Post> {
    store
        .get_post(id)
        .await
        .or_store_error(POSTS_RETRIEVAL)?
        .ok_or(AppError::NotFound)
}

/// GET /api/posts
pub async fn list_posts(data: web::Data<AppState>) -> HandlerResult {
    let posts = data.store.list_posts().await.or_store_error(POSTS_RETRIEVAL)?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(data: web::Data<AppState>, path: web::Path<String>) -> HandlerResult {
    let id = parse_id(&path)?;
    let post = find_post(&*data.store, id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts/{id}/comments
///
/// An empty list is reported as a missing post: the store cannot tell
/// "no such post" from "post without comments".
pub async fn list_post_comments(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> HandlerResult {
    let id = parse_id(&path)?;
    let comments = data
        .store
        .list_comments_for_post(id)
        .await
        .or_store_error(COMMENTS_RETRIEVAL)?;

    if comments.is_empty() {
        return Err(AppError::NotFound.into());
    }
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/posts
///
/// Responds with the post as re-read from the store, not the insert result.
pub async fn create_post(data: web::Data<AppState>, body: Body<PostInput>) -> HandlerResult {
    let new_post = payload(body).validate()?;

    let id = data.store.create_post(new_post).await.or_store_error(POST_SAVE)?;
    let created = data
        .store
        .get_post(id)
        .await
        .and_then(|post| post.with_context(|| format!("post {id} missing after insert")))
        .or_store_error(POST_SAVE)?;

    log::info!("created post {id}");
    Ok(HttpResponse::Created().json(created))
}

/// POST /api/posts/{id}/comments
///
/// Text is validated before the parent lookup, so a missing text is a 400
/// even for an unknown post.
pub async fn create_comment(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: Body<CommentInput>,
) -> HandlerResult {
    let text = payload(body).validate()?;
    let post_id = parse_id(&path)?;
    find_post(&*data.store, post_id).await?;

    let id = data
        .store
        .create_comment(NewComment::new(text, post_id))
        .await
        .or_store_error(COMMENT_SAVE)?;
    let created = data
        .store
        .get_comment(id)
        .await
        .and_then(|comment| comment.with_context(|| format!("comment {id} missing after insert")))
        .or_store_error(COMMENT_SAVE)?;

    log::info!("created comment {id} on post {post_id}");
    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/posts/{id}
///
/// Responds with the post as it reads after the write.
pub async fn update_post(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: Body<PostInput>,
) -> HandlerResult {
    let changes = payload(body).validate()?;
    let id = parse_id(&path)?;
    find_post(&*data.store, id).await?;

    data.store.update_post(id, changes).await.or_store_error(POST_UPDATE)?;
    let updated = find_post(&*data.store, id).await?;

    log::info!("updated post {id}");
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(data: web::Data<AppState>, path: web::Path<String>) -> HandlerResult {
    let id = parse_id(&path)?;
    find_post(&*data.store, id).await?;

    data.store.delete_post(id).await.or_store_error(POST_REMOVE)?;

    log::info!("deleted post {id}");
    Ok(HttpResponse::NoContent().finish())
}
