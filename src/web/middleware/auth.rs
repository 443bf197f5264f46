//! Session authentication middleware.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::auth::{SessionClaims, SessionKeys};
use crate::db::UserRepository;
use crate::web::error::WebError;
use crate::web::redirect::found;
use crate::web::state::AppState;

/// Path of the login page.
pub const LOGIN_URL: &str = "/auth/login/";

/// Session settings available to extractors.
#[derive(Clone, Debug)]
pub struct SessionState {
    keys: SessionKeys,
    cookie_name: String,
}

impl SessionState {
    /// Create session state from keys and the cookie name.
    pub fn new(keys: SessionKeys, cookie_name: impl Into<String>) -> Self {
        Self {
            keys,
            cookie_name: cookie_name.into(),
        }
    }

    /// Token keys.
    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Read and verify the session from a `Bearer` header or the session cookie.
    ///
    /// The header wins when both are present. Invalid tokens count as no session.
    pub fn claims_from_headers(&self, headers: &HeaderMap) -> Option<SessionClaims> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string)
            .or_else(|| {
                CookieJar::from_headers(headers)
                    .get(&self.cookie_name)
                    .map(|c| c.value().to_string())
            })?;

        match self.keys.verify(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!("Session validation failed: {}", e);
                None
            }
        }
    }

    /// Cookie carrying a freshly issued token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Cookie that clears the session in the browser.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((self.cookie_name.clone(), String::new()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        cookie.make_removal();
        cookie
    }
}

/// Login page URL that returns to `next` afterwards.
///
/// `next` is percent-encoded except for `/`.
pub fn login_url(next: &str) -> String {
    format!(
        "{}?next={}",
        LOGIN_URL,
        urlencoding::encode(next).replace("%2F", "/")
    )
}

fn path_and_query(uri: &Uri) -> &str {
    uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/")
}

fn session_state(parts: &Parts) -> Option<&Arc<SessionState>> {
    parts.extensions.get::<Arc<SessionState>>()
}

/// Extractor for the (optional) logged-in user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<SessionClaims>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let claims = session_state(parts).and_then(|s| s.claims_from_headers(&parts.headers));
            Ok(CurrentUser(claims))
        })
    }
}

/// Extractor for handlers that need a logged-in user.
///
/// Anonymous requests are redirected to the login page with `next` set to
/// the requested path and query. So are sessions whose user no longer
/// exists or has been deactivated.
#[derive(Debug, Clone)]
pub struct RequireUser(pub SessionClaims);

impl FromRequestParts<Arc<AppState>> for RequireUser {
    type Rejection = Response;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let to_login = || found(&login_url(path_and_query(&parts.uri)));

            let Some(claims) = state.session.claims_from_headers(&parts.headers) else {
                return Err(to_login());
            };

            let user = UserRepository::new(state.db.pool())
                .get_by_id(claims.sub)
                .await
                .map_err(|e| WebError::from(e).into_response())?;

            match user {
                Some(user) if user.is_active => Ok(RequireUser(claims)),
                _ => {
                    tracing::debug!(user_id = claims.sub, "Session user is missing or inactive");
                    Err(to_login())
                }
            }
        })
    }
}

/// Middleware function to inject session state into request extensions.
pub async fn session_auth(
    session: Arc<SessionState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(session);
    next.run(request).await
}
