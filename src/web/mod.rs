//! Web frontend for Yatube.
//!
//! Server-rendered HTML pages on axum, with Tera templates and a
//! cookie-carried session.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod redirect;
pub mod router;
pub mod server;
pub mod state;
pub mod templates;

pub use error::WebError;
pub use router::create_router;
pub use server::WebServer;
pub use state::AppState;
