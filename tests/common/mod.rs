//! Test helpers for the HTTP integration tests.
//!
//! Provides a router-backed `TestServer` over an in-memory database plus
//! shortcuts for seeding users, groups and posts.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;

use yatube::auth::SessionKeys;
use yatube::db::{NewUser, User, UserRepository};
use yatube::posts::{
    Group, GroupRepository, NewGroup, NewPost, Post, PostFilter, PostRepository,
};
use yatube::web::middleware::SessionState;
use yatube::web::{create_router, templates, AppState};
use yatube::Database;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";
pub const COOKIE_NAME: &str = "yatube_session";

/// A running app plus direct access to its database.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub keys: SessionKeys,
}

/// Create a test server with an in-memory database.
pub async fn spawn_app() -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let keys = SessionKeys::new(TEST_SECRET, 3600);

    let state = AppState::new(
        db.clone(),
        templates::builtin().expect("Failed to compile templates"),
        SessionState::new(keys.clone(), COOKIE_NAME),
        "Yatube",
    );

    let router = create_router(Arc::new(state));
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, db, keys }
}

impl TestApp {
    /// Store a user directly. The password hash is a placeholder, so the
    /// user can only act through [`TestApp::cookie`] or [`TestApp::bearer`].
    pub async fn create_user(&self, username: &str) -> User {
        UserRepository::new(self.db.pool())
            .create(&NewUser::new(username, "not-a-real-hash"))
            .await
            .expect("Failed to create user")
    }

    /// `Cookie` header value carrying a session for `user`.
    pub fn cookie(&self, user: &User) -> String {
        let token = self.keys.issue(user).expect("Failed to issue token");
        format!("{COOKIE_NAME}={token}")
    }

    /// `Authorization` header value carrying a session for `user`.
    pub fn bearer(&self, user: &User) -> String {
        let token = self.keys.issue(user).expect("Failed to issue token");
        format!("Bearer {token}")
    }

    pub async fn create_group(&self, title: &str, slug: &str) -> Group {
        GroupRepository::new(self.db.pool())
            .create(&NewGroup::new(title, slug).with_description("Test group"))
            .await
            .expect("Failed to create group")
    }

    pub async fn create_post(&self, author: &User, text: &str, group: Option<&Group>) -> Post {
        let mut new_post = NewPost::new(author.id, text);
        if let Some(group) = group {
            new_post = new_post.with_group(group.id);
        }
        PostRepository::new(self.db.pool())
            .create(&new_post)
            .await
            .expect("Failed to create post")
    }

    pub async fn post_count(&self) -> i64 {
        PostRepository::new(self.db.pool())
            .count(PostFilter::All)
            .await
            .expect("Failed to count posts")
    }

    pub async fn get_post(&self, id: i64) -> Post {
        PostRepository::new(self.db.pool())
            .get_by_id(id)
            .await
            .expect("Failed to load post")
            .expect("Post does not exist")
    }
}

/// Number of posts rendered on a listing page.
pub fn rendered_posts(html: &str) -> usize {
    html.matches("<article class=\"post\"").count()
}
