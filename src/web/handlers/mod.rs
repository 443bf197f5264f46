//! Page handlers for the web frontend.

pub mod auth;
pub mod posts;

pub use auth::*;
pub use posts::*;
