//! Posts and groups for Yatube.
//!
//! This module provides:
//! - Post and group models with their repositories
//! - Page-number pagination for listings
//! - The post form and its validation
//! - `PostService`, which ties the above together with author checks

mod form;
mod group;
mod group_repository;
mod paginator;
mod post;
mod post_repository;
mod service;

pub use form::{PostForm, PostFormInput, INVALID_GROUP_MESSAGE};
pub use group::{Group, NewGroup};
pub use group_repository::GroupRepository;
pub use paginator::{Page, Paginator, POSTS_PER_PAGE};
pub use post::{format_pub_date, GroupLink, NewPost, Post, PostUpdate, PostView, TIMESTAMP_FORMAT};
pub use post_repository::{PostFilter, PostRepository};
pub use service::{
    CreateOutcome, EditAccess, EditOutcome, GroupPage, PostDetail, PostService, ProfilePage,
};
