//! Post service for Yatube.
//!
//! High-level read and write operations for posts, with pagination and
//! author checks built in. Handlers talk to this layer only.

use tracing::info;

use super::form::PostFormInput;
use super::group::Group;
use super::group_repository::GroupRepository;
use super::paginator::{Page, Paginator, POSTS_PER_PAGE};
use super::post::{NewPost, Post, PostUpdate, PostView};
use super::post_repository::{PostFilter, PostRepository};
use crate::db::{Database, UserRepository, UserSummary};
use crate::form::FormErrors;
use crate::{Result, YatubeError};

/// A group listing page.
#[derive(Debug, Clone)]
pub struct GroupPage {
    pub group: Group,
    pub page: Page<PostView>,
}

/// An author's profile page.
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub author: UserSummary,
    /// Total number of posts by the author.
    pub post_count: i64,
    pub page: Page<PostView>,
}

/// A single post with its author's post count.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: PostView,
    pub author_post_count: i64,
}

/// Result of a create submission.
#[derive(Debug, Clone)]
pub enum CreateOutcome {
    /// The post was stored.
    Created(Post),
    /// The form was rejected; nothing was stored.
    Invalid(FormErrors),
}

/// Whether a user may open the edit form of a post.
#[derive(Debug, Clone)]
pub enum EditAccess {
    /// The user wrote the post.
    Author(Post),
    /// Someone else wrote it.
    Forbidden,
}

/// Result of an edit submission.
#[derive(Debug, Clone)]
pub enum EditOutcome {
    /// The user is not the author; nothing was changed.
    Forbidden,
    /// The form was rejected; nothing was changed.
    Invalid(FormErrors),
    /// The post was updated.
    Updated(Post),
}

/// Service for post operations.
pub struct PostService<'a> {
    db: &'a Database,
}

impl<'a> PostService<'a> {
    /// Create a new PostService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn posts(&self) -> PostRepository<'_> {
        PostRepository::new(self.db.pool())
    }

    fn groups_repo(&self) -> GroupRepository<'_> {
        GroupRepository::new(self.db.pool())
    }

    async fn paginate(&self, filter: PostFilter, raw_page: Option<&str>) -> Result<Page<PostView>> {
        let repo = self.posts();
        let paginator = Paginator::new(repo.count(filter).await?, POSTS_PER_PAGE);
        let number = paginator.resolve(raw_page);
        let items = repo
            .list(filter, paginator.offset(number), paginator.per_page())
            .await?;
        Ok(paginator.page(number, items))
    }

    /// One page of all posts, newest first.
    pub async fn index(&self, raw_page: Option<&str>) -> Result<Page<PostView>> {
        self.paginate(PostFilter::All, raw_page).await
    }

    /// One page of the posts in the group with this slug.
    pub async fn group_posts(&self, slug: &str, raw_page: Option<&str>) -> Result<GroupPage> {
        let group = self
            .groups_repo()
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| YatubeError::NotFound("group".to_string()))?;

        let page = self.paginate(PostFilter::Group(group.id), raw_page).await?;
        Ok(GroupPage { group, page })
    }

    /// One page of the posts written by `username`.
    pub async fn profile(&self, username: &str, raw_page: Option<&str>) -> Result<ProfilePage> {
        let author = UserRepository::new(self.db.pool())
            .get_by_username(username)
            .await?
            .ok_or_else(|| YatubeError::NotFound("user".to_string()))?;

        let page = self.paginate(PostFilter::Author(author.id), raw_page).await?;
        Ok(ProfilePage {
            author: author.summary(),
            post_count: page.count,
            page,
        })
    }

    /// A single post.
    pub async fn post_detail(&self, post_id: i64) -> Result<PostDetail> {
        let repo = self.posts();
        let post = repo
            .get_view(post_id)
            .await?
            .ok_or_else(|| YatubeError::NotFound("post".to_string()))?;
        let author_post_count = repo.count(PostFilter::Author(post.author.id)).await?;

        Ok(PostDetail {
            post,
            author_post_count,
        })
    }

    /// Every group, for the form's group selector.
    pub async fn groups(&self) -> Result<Vec<Group>> {
        self.groups_repo().list_all().await
    }

    /// Validate and store a new post by `author_id`.
    pub async fn create_post(&self, author_id: i64, input: &PostFormInput) -> Result<CreateOutcome> {
        let groups = self.groups().await?;
        let form = match input.clean(&groups) {
            Ok(form) => form,
            Err(errors) => return Ok(CreateOutcome::Invalid(errors)),
        };

        let mut new_post = NewPost::new(author_id, form.text);
        if let Some(group_id) = form.group_id {
            new_post = new_post.with_group(group_id);
        }

        let post = self.posts().create(&new_post).await?;
        info!(post_id = post.id, author_id, "Post created");
        Ok(CreateOutcome::Created(post))
    }

    async fn get_post(&self, post_id: i64) -> Result<Post> {
        self.posts()
            .get_by_id(post_id)
            .await?
            .ok_or_else(|| YatubeError::NotFound("post".to_string()))
    }

    /// Check whether `actor_id` may edit the post.
    pub async fn edit_access(&self, actor_id: i64, post_id: i64) -> Result<EditAccess> {
        let post = self.get_post(post_id).await?;
        if post.is_authored_by(actor_id) {
            Ok(EditAccess::Author(post))
        } else {
            info!(post_id, actor_id, "Edit form refused to non-author");
            Ok(EditAccess::Forbidden)
        }
    }

    /// Validate and apply an edit by `actor_id`.
    ///
    /// Only the author may change a post; the author itself never changes.
    pub async fn edit_post(
        &self,
        actor_id: i64,
        post_id: i64,
        input: &PostFormInput,
    ) -> Result<EditOutcome> {
        let post = self.get_post(post_id).await?;
        if !post.is_authored_by(actor_id) {
            info!(post_id, actor_id, "Edit refused to non-author");
            return Ok(EditOutcome::Forbidden);
        }

        let groups = self.groups().await?;
        let form = match input.clean(&groups) {
            Ok(form) => form,
            Err(errors) => return Ok(EditOutcome::Invalid(errors)),
        };

        let update = PostUpdate::new().text(form.text).group(form.group_id);
        let updated = self
            .posts()
            .update(post.id, &update)
            .await?
            .ok_or_else(|| YatubeError::NotFound("post".to_string()))?;

        info!(post_id, actor_id, "Post edited");
        Ok(EditOutcome::Updated(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewUser;
    use crate::posts::NewGroup;

    async fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let users = UserRepository::new(db.pool());
        let leo = users.create(&NewUser::new("leo", "hash")).await.unwrap().id;
        let anna = users.create(&NewUser::new("anna", "hash")).await.unwrap().id;
        (db, leo, anna)
    }

    fn input(text: &str, group: &str) -> PostFormInput {
        PostFormInput {
            text: text.to_string(),
            group: group.to_string(),
        }
    }

    async fn create(service: &PostService<'_>, author_id: i64, text: &str) -> Post {
        match service.create_post(author_id, &input(text, "")).await.unwrap() {
            CreateOutcome::Created(post) => post,
            CreateOutcome::Invalid(errors) => panic!("unexpected errors: {errors:?}"),
        }
    }

    #[tokio::test]
    async fn test_index_pagination() {
        let (db, leo, _) = setup().await;
        let service = PostService::new(&db);
        for i in 0..13 {
            create(&service, leo, &format!("Post {i}")).await;
        }

        let first = service.index(None).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0].text, "Post 12");
        assert_eq!(first.num_pages, 2);

        let second = service.index(Some("2")).await.unwrap();
        assert_eq!(second.items.len(), 3);
        assert_eq!(second.items[2].text, "Post 0");

        let beyond = service.index(Some("50")).await.unwrap();
        assert_eq!(beyond.number, 2);
    }

    #[tokio::test]
    async fn test_index_empty() {
        let (db, _, _) = setup().await;
        let page = PostService::new(&db).index(Some("3")).await.unwrap();
        assert_eq!(page.number, 1);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_group_posts() {
        let (db, leo, _) = setup().await;
        let group = GroupRepository::new(db.pool())
            .create(&NewGroup::new("Cats", "cats"))
            .await
            .unwrap();
        let service = PostService::new(&db);

        service
            .create_post(leo, &input("In group", &group.id.to_string()))
            .await
            .unwrap();
        create(&service, leo, "Outside").await;

        let listing = service.group_posts("cats", None).await.unwrap();
        assert_eq!(listing.group, group);
        assert_eq!(listing.page.count, 1);
        assert_eq!(listing.page.items[0].text, "In group");

        let missing = service.group_posts("dogs", None).await;
        assert!(matches!(missing, Err(YatubeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_profile() {
        let (db, leo, anna) = setup().await;
        let service = PostService::new(&db);
        create(&service, leo, "Leo 1").await;
        create(&service, leo, "Leo 2").await;
        create(&service, anna, "Anna 1").await;

        let profile = service.profile("leo", None).await.unwrap();
        assert_eq!(profile.author.username, "leo");
        assert_eq!(profile.post_count, 2);
        assert!(profile.page.items.iter().all(|p| p.author.id == leo));

        let missing = service.profile("nobody", None).await;
        assert!(matches!(missing, Err(YatubeError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_post_detail() {
        let (db, leo, _) = setup().await;
        let service = PostService::new(&db);
        let post = create(&service, leo, "Hello").await;
        create(&service, leo, "Again").await;

        let detail = service.post_detail(post.id).await.unwrap();
        assert_eq!(detail.post.text, "Hello");
        assert_eq!(detail.author_post_count, 2);

        assert!(matches!(
            service.post_detail(9999).await,
            Err(YatubeError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_invalid_stores_nothing() {
        let (db, leo, _) = setup().await;
        let service = PostService::new(&db);

        let outcome = service.create_post(leo, &input("  ", "")).await.unwrap();
        assert!(matches!(outcome, CreateOutcome::Invalid(_)));

        let outcome = service.create_post(leo, &input("Hi", "42")).await.unwrap();
        assert!(matches!(outcome, CreateOutcome::Invalid(_)));

        let count = PostRepository::new(db.pool())
            .count(PostFilter::All)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_edit_by_author() {
        let (db, leo, _) = setup().await;
        let service = PostService::new(&db);
        let post = create(&service, leo, "Old").await;

        assert!(matches!(
            service.edit_access(leo, post.id).await.unwrap(),
            EditAccess::Author(_)
        ));

        let outcome = service
            .edit_post(leo, post.id, &input("New", ""))
            .await
            .unwrap();
        match outcome {
            EditOutcome::Updated(updated) => {
                assert_eq!(updated.text, "New");
                assert_eq!(updated.author_id, leo);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_edit_by_non_author_is_forbidden() {
        let (db, leo, anna) = setup().await;
        let service = PostService::new(&db);
        let post = create(&service, leo, "Mine").await;

        assert!(matches!(
            service.edit_access(anna, post.id).await.unwrap(),
            EditAccess::Forbidden
        ));

        let outcome = service
            .edit_post(anna, post.id, &input("Hijacked", ""))
            .await
            .unwrap();
        assert!(matches!(outcome, EditOutcome::Forbidden));

        let stored = service.get_post(post.id).await.unwrap();
        assert_eq!(stored, post);
    }

    #[tokio::test]
    async fn test_edit_invalid_keeps_post() {
        let (db, leo, _) = setup().await;
        let service = PostService::new(&db);
        let post = create(&service, leo, "Keep me").await;

        let outcome = service.edit_post(leo, post.id, &input("", "")).await.unwrap();
        assert!(matches!(outcome, EditOutcome::Invalid(_)));
        assert_eq!(service.get_post(post.id).await.unwrap().text, "Keep me");
    }

    #[tokio::test]
    async fn test_edit_missing_post() {
        let (db, leo, _) = setup().await;
        let service = PostService::new(&db);

        assert!(matches!(
            service.edit_access(leo, 77).await,
            Err(YatubeError::NotFound(_))
        ));
        assert!(matches!(
            service.edit_post(leo, 77, &input("x", "")).await,
            Err(YatubeError::NotFound(_))
        ));
    }
}
