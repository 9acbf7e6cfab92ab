//! # pb-api
//!
//! The web routing and orchestration layer for Postboard.

pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::web;

pub use error::ApiError;
pub use handlers::AppState;

/// Configures the post and comment routes under `/api/posts`.
///
/// # Developer Note
/// Registered as a `ServiceConfig` so tests can mount the exact same table
/// on an in-process `App`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/posts")
            .route("", web::get().to(handlers::list_posts))
            .route("", web::post().to(handlers::create_post))
            .route("/{id}", web::get().to(handlers::get_post))
            .route("/{id}", web::put().to(handlers::update_post))
            .route("/{id}", web::delete().to(handlers::delete_post))
            .route("/{id}/comments", web::get().to(handlers::list_post_comments))
            .route("/{id}/comments", web::post().to(handlers::create_comment)),
    );
}
