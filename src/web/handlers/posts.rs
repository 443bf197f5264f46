//! Post handlers: listings, detail, create and edit.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::SessionClaims;
use crate::form::FormErrors;
use crate::posts::{CreateOutcome, EditAccess, EditOutcome, Group, PostFormInput, PostService};
use crate::web::error::WebError;
use crate::web::middleware::{CurrentUser, RequireUser};
use crate::web::redirect::found;
use crate::web::state::AppState;

/// `?page=N` on listing routes. Kept raw so bad values can fall back.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

fn parse_post_id(raw: &str) -> Result<i64, WebError> {
    raw.parse::<i64>().map_err(|_| WebError::NotFound)
}

fn detail_url(post_id: i64) -> String {
    format!("/posts/{post_id}/")
}

fn profile_url(username: &str) -> String {
    format!("/profile/{}/", urlencoding::encode(username))
}

/// GET / - All posts, newest first.
pub async fn index(
    State(state): State<Arc<AppState>>,
    CurrentUser(viewer): CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let page = PostService::new(&state.db)
        .index(query.page.as_deref())
        .await?;

    let mut context = state.context(viewer.as_ref());
    context.insert("page_obj", &page);
    state.render("posts/index.html", &context)
}

/// GET /group/{slug}/ - Posts in one group.
pub async fn group_posts(
    State(state): State<Arc<AppState>>,
    CurrentUser(viewer): CurrentUser,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let listing = PostService::new(&state.db)
        .group_posts(&slug, query.page.as_deref())
        .await?;

    let mut context = state.context(viewer.as_ref());
    context.insert("group", &listing.group);
    context.insert("page_obj", &listing.page);
    state.render("posts/group_list.html", &context)
}

/// GET /profile/{username}/ - Posts by one author.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(viewer): CurrentUser,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let listing = PostService::new(&state.db)
        .profile(&username, query.page.as_deref())
        .await?;

    let mut context = state.context(viewer.as_ref());
    context.insert("author", &listing.author);
    context.insert("post_count", &listing.post_count);
    context.insert("page_obj", &listing.page);
    state.render("posts/profile.html", &context)
}

/// GET /posts/{id}/ - A single post.
pub async fn post_detail(
    State(state): State<Arc<AppState>>,
    CurrentUser(viewer): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, WebError> {
    let post_id = parse_post_id(&raw_id)?;
    let detail = PostService::new(&state.db).post_detail(post_id).await?;

    let is_author = viewer
        .as_ref()
        .is_some_and(|claims| claims.sub == detail.post.author.id);

    let mut context = state.context(viewer.as_ref());
    context.insert("post", &detail.post);
    context.insert("author_post_count", &detail.author_post_count);
    context.insert("is_author", &is_author);
    state.render("posts/post_detail.html", &context)
}

struct FormPage<'a> {
    input: &'a PostFormInput,
    errors: &'a FormErrors,
    groups: &'a [Group],
    editing: Option<i64>,
}

fn render_form(
    state: &AppState,
    viewer: &SessionClaims,
    page: FormPage<'_>,
) -> Result<Response, WebError> {
    let mut context = state.context(Some(viewer));
    context.insert("form", page.input);
    context.insert("errors", page.errors);
    context.insert("groups", page.groups);
    context.insert("is_edit", &page.editing.is_some());
    context.insert("post_id", &page.editing);
    Ok(state
        .render("posts/create_post.html", &context)?
        .into_response())
}

/// GET /posts/create/ - Empty post form.
pub async fn create_form(
    State(state): State<Arc<AppState>>,
    RequireUser(viewer): RequireUser,
) -> Result<Response, WebError> {
    let groups = PostService::new(&state.db).groups().await?;
    render_form(
        &state,
        &viewer,
        FormPage {
            input: &PostFormInput::default(),
            errors: &FormErrors::new(),
            groups: &groups,
            editing: None,
        },
    )
}

/// POST /posts/create/ - Store a new post and go to the author's profile.
pub async fn create_submit(
    State(state): State<Arc<AppState>>,
    RequireUser(viewer): RequireUser,
    Form(input): Form<PostFormInput>,
) -> Result<Response, WebError> {
    let service = PostService::new(&state.db);
    match service.create_post(viewer.sub, &input).await? {
        CreateOutcome::Created(_) => Ok(found(&profile_url(&viewer.username))),
        CreateOutcome::Invalid(errors) => {
            let groups = service.groups().await?;
            render_form(
                &state,
                &viewer,
                FormPage {
                    input: &input,
                    errors: &errors,
                    groups: &groups,
                    editing: None,
                },
            )
        }
    }
}

/// GET /posts/{id}/edit/ - Prefilled form for the author, detail page for anyone else.
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    RequireUser(viewer): RequireUser,
    Path(raw_id): Path<String>,
) -> Result<Response, WebError> {
    let post_id = parse_post_id(&raw_id)?;
    let service = PostService::new(&state.db);

    let post = match service.edit_access(viewer.sub, post_id).await? {
        EditAccess::Author(post) => post,
        EditAccess::Forbidden => return Ok(found(&detail_url(post_id))),
    };

    let groups = service.groups().await?;
    render_form(
        &state,
        &viewer,
        FormPage {
            input: &PostFormInput::prefilled(post.text, post.group_id),
            errors: &FormErrors::new(),
            groups: &groups,
            editing: Some(post_id),
        },
    )
}

/// POST /posts/{id}/edit/ - Apply an edit by the author.
pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    RequireUser(viewer): RequireUser,
    Path(raw_id): Path<String>,
    Form(input): Form<PostFormInput>,
) -> Result<Response, WebError> {
    let post_id = parse_post_id(&raw_id)?;
    let service = PostService::new(&state.db);

    match service.edit_post(viewer.sub, post_id, &input).await? {
        EditOutcome::Forbidden | EditOutcome::Updated(_) => Ok(found(&detail_url(post_id))),
        EditOutcome::Invalid(errors) => {
            let groups = service.groups().await?;
            render_form(
                &state,
                &viewer,
                FormPage {
                    input: &input,
                    errors: &errors,
                    groups: &groups,
                    editing: Some(post_id),
                },
            )
        }
    }
}
