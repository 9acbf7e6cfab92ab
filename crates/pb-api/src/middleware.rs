//! postboard/crates/pb-api/src/middleware.rs Middleware
//!
//! Custom middleware for logging, path normalization and CORS.

use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath, TrailingSlash};

/// Request logger. The 'default' format outputs:
/// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn standard_middleware() -> Logger {
    Logger::default()
}

/// Lets `/api/posts/` and `/api/posts/1/` reach the same handlers as their
/// slash-less forms.
pub fn normalize_path() -> NormalizePath {
    NormalizePath::new(TrailingSlash::Trim)
}

// Configures CORS (Cross-Origin Resource Sharing)
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_any_header()
        .max_age(3600)
}
