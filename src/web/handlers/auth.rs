//! Signup, login and logout handlers.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{authenticate, register, RegistrationError, RegistrationRequest};
use crate::db::UserRepository;
use crate::form::FormErrors;
use crate::web::error::WebError;
use crate::web::middleware::CurrentUser;
use crate::web::redirect::found;
use crate::web::state::AppState;
use crate::YatubeError;

/// Shown when the username or password is wrong.
pub const INVALID_LOGIN_MESSAGE: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

/// Signup form fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SignupInput {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password1: String,
    #[serde(skip_serializing)]
    pub password2: String,
}

/// Login form fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginInput {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub next: String,
}

/// `?next=` on the login page.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: Option<String>,
}

/// Where to go after logging in. Only local paths are followed.
pub fn safe_next(next: &str) -> &str {
    let is_local = next.starts_with('/') && !next.starts_with("//") && !next.contains('\\');
    if is_local {
        next
    } else {
        "/"
    }
}

fn signup_page(
    state: &AppState,
    input: &SignupInput,
    errors: &FormErrors,
) -> Result<Response, WebError> {
    let mut context = state.context(None);
    context.insert("form", input);
    context.insert("errors", errors);
    Ok(state.render("users/signup.html", &context)?.into_response())
}

fn login_page(state: &AppState, input: &LoginInput, errors: &FormErrors) -> Result<Response, WebError> {
    let mut context = state.context(None);
    context.insert("form", input);
    context.insert("errors", errors);
    Ok(state.render("users/login.html", &context)?.into_response())
}

/// GET /auth/signup/
pub async fn signup_form(State(state): State<Arc<AppState>>) -> Result<Response, WebError> {
    signup_page(&state, &SignupInput::default(), &FormErrors::new())
}

/// POST /auth/signup/ - Create an account and go to the index.
pub async fn signup_submit(
    State(state): State<Arc<AppState>>,
    Form(input): Form<SignupInput>,
) -> Result<Response, WebError> {
    let request = RegistrationRequest::new(&input.username, &input.password1)
        .with_confirmation(&input.password2)
        .with_name(&input.first_name, &input.last_name)
        .with_email(&input.email);

    let repo = UserRepository::new(state.db.pool());
    let mut errors = FormErrors::new();
    match register(&repo, request).await {
        Ok(_) => return Ok(found("/")),
        Err(RegistrationError::Invalid(invalid)) => {
            for e in invalid {
                errors.add(e.field(), capitalize(&e.to_string()));
            }
        }
        Err(RegistrationError::UsernameExists) => {
            errors.add("username", "A user with that username already exists.");
        }
        Err(e) => return Err(WebError::Internal(e.to_string())),
    }

    signup_page(&state, &input, &errors)
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// GET /auth/login/
pub async fn login_form(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NextQuery>,
) -> Result<Response, WebError> {
    let input = LoginInput {
        next: query.next.unwrap_or_default(),
        ..LoginInput::default()
    };
    login_page(&state, &input, &FormErrors::new())
}

/// POST /auth/login/ - Start a session and follow `next`.
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(input): Form<LoginInput>,
) -> Result<Response, WebError> {
    let repo = UserRepository::new(state.db.pool());
    let user = match authenticate(&repo, &input.username, &input.password).await {
        Ok(user) => user,
        Err(YatubeError::Auth(_)) => {
            let mut errors = FormErrors::new();
            errors.add("credentials", INVALID_LOGIN_MESSAGE);
            return login_page(&state, &input, &errors);
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.session.keys().issue(&user)?;
    tracing::info!(username = %user.username, user_id = user.id, "User logged in");

    let jar = jar.add(state.session.session_cookie(token));
    Ok((jar, found(safe_next(&input.next))).into_response())
}

/// GET|POST /auth/logout/ - Drop the session cookie.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    CurrentUser(viewer): CurrentUser,
    jar: CookieJar,
) -> Result<Response, WebError> {
    if let Some(claims) = viewer {
        tracing::info!(username = %claims.username, "User logged out");
    }

    let jar = jar.add(state.session.removal_cookie());
    let context = state.context(None);
    let page = state.render("users/logged_out.html", &context)?;
    Ok((jar, page).into_response())
}
