//! Web error handling for Yatube.
//!
//! Handlers return [`WebError`]; [`render_error_pages`] fills the 404 and
//! 500 responses with the matching templates.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use super::state::AppState;
use crate::YatubeError;

/// Errors a handler can end with.
#[derive(Error, Debug)]
pub enum WebError {
    /// No such page or object.
    #[error("not found")]
    NotFound,

    /// Storage, template or other server-side failure.
    ///
    /// The message is logged, never sent to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WebError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::NotFound => StatusCode::NOT_FOUND,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<YatubeError> for WebError {
    fn from(err: YatubeError) -> Self {
        match err {
            YatubeError::NotFound(_) => WebError::NotFound,
            other => WebError::Internal(other.to_string()),
        }
    }
}

/// Marker on error responses whose body is still a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPage(pub StatusCode);

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let WebError::Internal(ref message) = self {
            tracing::error!("Internal error: {}", message);
        }

        let mut response = (status, status.canonical_reason().unwrap_or("Error")).into_response();
        response.extensions_mut().insert(ErrorPage(status));
        response
    }
}

/// Middleware that renders `core/404.html` / `core/500.html` for error responses.
///
/// When the error template itself fails the plain placeholder is sent.
pub async fn render_error_pages(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let viewer = state.session.claims_from_headers(request.headers());

    let response = next.run(request).await;
    let Some(ErrorPage(status)) = response.extensions().get::<ErrorPage>().copied() else {
        return response;
    };

    let template = if status == StatusCode::NOT_FOUND {
        "core/404.html"
    } else {
        "core/500.html"
    };

    let mut context = state.context(viewer.as_ref());
    context.insert("path", &path);

    match state.templates.render(template, &context) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {}: {}", template, YatubeError::from(e));
            response
        }
    }
}

/// 404 for unmatched routes.
pub async fn not_found() -> WebError {
    WebError::NotFound
}
