//! Router configuration for the web frontend.

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::error::{not_found, render_error_pages};
use super::handlers::{
    create_form, create_submit, edit_form, edit_submit, group_posts, index, login_form,
    login_submit, logout, post_detail, profile, signup_form, signup_submit,
};
use super::middleware::session_auth;
use super::state::AppState;

/// Create the main router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let post_routes = Router::new()
        .route("/", get(index))
        .route("/group/:slug/", get(group_posts))
        .route("/profile/:username/", get(profile))
        .route("/posts/create/", get(create_form).post(create_submit))
        .route("/posts/:id/", get(post_detail))
        .route("/posts/:id/edit/", get(edit_form).post(edit_submit));

    let auth_routes = Router::new()
        .route("/signup/", get(signup_form).post(signup_submit))
        .route("/login/", get(login_form).post(login_submit))
        .route("/logout/", get(logout).post(logout));

    let session = app_state.session.clone();

    Router::new()
        .merge(post_routes)
        .nest("/auth", auth_routes)
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(move |req, next| {
                    let state = session.clone();
                    session_auth(state, req, next)
                }))
                .layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    render_error_pages,
                )),
        )
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
