//! Post repository for Yatube.

use sqlx::QueryBuilder;

use super::post::{NewPost, Post, PostRow, PostUpdate, PostView};
use crate::db::DbPool;
use crate::{Result, YatubeError};

const POST_COLUMNS: &str = "id, text, created_at, author_id, group_id";

const VIEW_SELECT: &str = "SELECT p.id, p.text, p.created_at, p.author_id,
        u.username AS author_username,
        u.first_name AS author_first_name,
        u.last_name AS author_last_name,
        g.title AS group_title,
        g.slug AS group_slug
    FROM posts p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN post_groups g ON g.id = p.group_id";

/// Which posts a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    /// Every post.
    All,
    /// Posts in the group with this ID.
    Group(i64),
    /// Posts written by the user with this ID.
    Author(i64),
}

impl PostFilter {
    fn push_where(&self, query: &mut QueryBuilder<'_, sqlx::Sqlite>) {
        match *self {
            PostFilter::All => {}
            PostFilter::Group(group_id) => {
                query.push(" WHERE p.group_id = ");
                query.push_bind(group_id);
            }
            PostFilter::Author(author_id) => {
                query.push(" WHERE p.author_id = ");
                query.push_bind(author_id);
            }
        }
    }
}

/// Repository for post persistence.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// Returns the created post with the assigned ID and timestamp.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (text, author_id, group_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_post.text)
        .bind(new_post.author_id)
        .bind(new_post.group_id)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| YatubeError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(post)
    }

    /// Get a post with its author and group joined in.
    pub async fn get_view(&self, id: i64) -> Result<Option<PostView>> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{VIEW_SELECT} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row.map(PostRow::into_view))
    }

    /// Update a post by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated post, or None if not found.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref text) = update.text {
            separated.push("text = ");
            separated.push_bind_unseparated(text);
        }
        if let Some(group_id) = update.group_id {
            separated.push("group_id = ");
            separated.push_bind_unseparated(group_id);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// List one slice of posts, newest first.
    pub async fn list(&self, filter: PostFilter, offset: i64, limit: i64) -> Result<Vec<PostView>> {
        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(VIEW_SELECT);
        filter.push_where(&mut query);
        query.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let rows = query
            .build_query_as::<PostRow>()
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().map(PostRow::into_view).collect())
    }

    /// Count the posts a filter covers.
    pub async fn count(&self, filter: PostFilter) -> Result<i64> {
        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM posts p");
        filter.push_where(&mut query);

        let count: i64 = query.build_query_scalar().fetch_one(self.pool).await?;
        Ok(count)
    }
}
