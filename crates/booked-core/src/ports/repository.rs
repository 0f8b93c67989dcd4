use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, FollowKind, Post, Profile, Report, ReportOutcome, User};
use crate::error::RepoError;

/// Identity store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Users with the given ids, in no particular order. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    /// Insert a user together with its empty profile, as one unit.
    ///
    /// A duplicate username yields [`RepoError::Constraint`].
    async fn create(&self, user: User) -> Result<(User, Profile), RepoError>;

    /// Overwrite username, email and `updated_at` of an existing user.
    async fn update(&self, user: User) -> Result<User, RepoError>;
}

/// Follow and email-follow edges, stored on profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError>;

    /// Returns `false` if the edge already existed.
    async fn add_edge(&self, kind: FollowKind, actor: Uuid, target: Uuid)
    -> Result<bool, RepoError>;

    /// Returns `false` if there was no such edge.
    async fn remove_edge(
        &self,
        kind: FollowKind,
        actor: Uuid,
        target: Uuid,
    ) -> Result<bool, RepoError>;

    /// Users whose `kind` set contains `target`, ordered by username.
    async fn inbound(&self, kind: FollowKind, target: Uuid) -> Result<Vec<User>, RepoError>;
}

/// Post store. Every listing is ordered newest first.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Delete a post with its comments and reports.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Post>, RepoError>;

    async fn find_by_authors(&self, authors: &[Uuid]) -> Result<Vec<Post>, RepoError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError>;

    /// Comments on a post, oldest first.
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find_by_post_id(&self, post_id: Uuid) -> Result<Vec<Report>, RepoError>;

    /// Store `report`, count the reports on its post and remove the post
    /// (with comments and reports) when [`ReportOutcome::for_count`] says so.
    ///
    /// Implementations run all of it as one atomic unit so that concurrent
    /// reports cannot both observe a count below the threshold.
    async fn file(&self, report: Report) -> Result<ReportOutcome, RepoError>;
}

/// Every store port, bundled for the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub reports: Arc<dyn ReportRepository>,
}

impl Repositories {
    /// Use a single backend for every port.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + ProfileRepository
            + PostRepository
            + CommentRepository
            + ReportRepository
            + 'static,
    {
        Self {
            users: store.clone(),
            profiles: store.clone(),
            posts: store.clone(),
            comments: store.clone(),
            reports: store,
        }
    }
}
