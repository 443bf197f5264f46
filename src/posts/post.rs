//! Post model for Yatube.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::db::user::display_name;
use crate::db::UserSummary;

/// Storage format of `created_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Post entity as stored.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Post body.
    pub text: String,
    /// Creation timestamp (UTC).
    pub created_at: String,
    /// ID of the user who wrote the post. Never changes.
    pub author_id: i64,
    /// ID of the group the post belongs to, if any.
    pub group_id: Option<i64>,
}

impl Post {
    /// Whether `user_id` wrote this post.
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

/// Group reference shown next to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupLink {
    /// Group title.
    pub title: String,
    /// Group slug.
    pub slug: String,
}

/// Post with its author and group joined in, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    /// Post ID.
    pub id: i64,
    /// Post body.
    pub text: String,
    /// Raw creation timestamp.
    pub created_at: String,
    /// Human-readable creation date.
    pub pub_date: String,
    /// Author.
    pub author: UserSummary,
    /// Group, if any.
    pub group: Option<GroupLink>,
}

/// Row shape of the post listing query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct PostRow {
    pub id: i64,
    pub text: String,
    pub created_at: String,
    pub author_id: i64,
    pub author_username: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub group_title: Option<String>,
    pub group_slug: Option<String>,
}

impl PostRow {
    pub(crate) fn into_view(self) -> PostView {
        let display_name = display_name(
            &self.author_username,
            &self.author_first_name,
            &self.author_last_name,
        );

        let group = match (self.group_title, self.group_slug) {
            (Some(title), Some(slug)) => Some(GroupLink { title, slug }),
            _ => None,
        };

        PostView {
            id: self.id,
            pub_date: format_pub_date(&self.created_at),
            created_at: self.created_at,
            text: self.text,
            author: UserSummary {
                id: self.author_id,
                username: self.author_username,
                display_name,
            },
            group,
        }
    }
}

/// Format a stored timestamp as e.g. `5 March 2024, 14:07`.
///
/// Unparseable values are returned unchanged.
pub fn format_pub_date(created_at: &str) -> String {
    NaiveDateTime::parse_from_str(created_at, TIMESTAMP_FORMAT)
        .map(|dt| dt.format("%-d %B %Y, %H:%M").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Post body.
    pub text: String,
    /// Author.
    pub author_id: i64,
    /// Group, if any.
    pub group_id: Option<i64>,
}

impl NewPost {
    /// Create a new post without a group.
    pub fn new(author_id: i64, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author_id,
            group_id: None,
        }
    }

    /// Put the post in a group.
    pub fn with_group(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

/// Data for updating an existing post.
///
/// The author cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    /// New body.
    pub text: Option<String>,
    /// New group (`Some(None)` removes the post from its group).
    pub group_id: Option<Option<i64>>,
}

impl PostUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set new group.
    pub fn group(mut self, group_id: Option<i64>) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.group_id.is_none()
    }
}
