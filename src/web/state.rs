//! Shared application state.

use std::sync::Arc;

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::auth::{SessionClaims, SessionKeys};
use crate::config::Config;
use crate::db::Database;
use crate::Result;

use super::error::WebError;
use super::middleware::SessionState;
use super::templates;

/// Application state shared across handlers.
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Compiled templates.
    pub templates: Tera,
    /// Session token settings.
    pub session: Arc<SessionState>,
    /// Site name shown in titles and the header.
    pub site_name: String,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, templates: Tera, session: SessionState, site_name: impl Into<String>) -> Self {
        Self {
            db,
            templates,
            session: Arc::new(session),
            site_name: site_name.into(),
        }
    }

    /// Build the state from the configuration, loading the templates it names.
    pub fn from_config(db: Database, config: &Config) -> Result<Self> {
        let session = SessionState::new(
            SessionKeys::new(&config.auth.session_secret, config.auth.session_expiry_secs),
            &config.auth.cookie_name,
        );
        Ok(Self::new(
            db,
            templates::load(&config.templates)?,
            session,
            &config.site.name,
        ))
    }

    /// Base context every page gets: the site name and the viewer.
    pub fn context(&self, viewer: Option<&SessionClaims>) -> Context {
        let mut context = Context::new();
        context.insert("site_name", &self.site_name);
        context.insert("user", &viewer.map(Viewer::from));
        context
    }

    /// Render a template to an HTML response.
    pub fn render(&self, name: &str, context: &Context) -> std::result::Result<Html<String>, WebError> {
        self.templates
            .render(name, context)
            .map(Html)
            .map_err(|e| WebError::Internal(crate::YatubeError::from(e).to_string()))
    }
}

/// The logged-in user as templates see it.
#[derive(Debug, Serialize)]
struct Viewer {
    id: i64,
    username: String,
}

impl From<&SessionClaims> for Viewer {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username.clone(),
        }
    }
}
