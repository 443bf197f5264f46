//! Middleware for the web frontend.

pub mod auth;

pub use auth::{
    login_url, session_auth, CurrentUser, RequireUser, SessionState, LOGIN_URL,
};
