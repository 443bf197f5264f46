//! Yatube - a small blogging site.
//!
//! Users publish short text posts, optionally filed under a group, and
//! browse them as paginated listings per site, group or author.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod form;
pub mod logging;
pub mod posts;
pub mod web;

pub use auth::{
    authenticate, hash_password, register, verify_password, PasswordError, RegistrationError,
    RegistrationRequest, SessionClaims, SessionKeys, ValidationError,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{Result, YatubeError};
pub use form::FormErrors;
pub use posts::{Group, Post, PostService, PostView};
