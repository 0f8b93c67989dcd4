//! Post listings.

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::Repositories;

pub struct FeedService {
    repos: Repositories,
}

impl FeedService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Posts by every user `user` follows, newest first.
    ///
    /// The user's own posts only show up through a self-follow.
    pub async fn feed(&self, user: Uuid) -> Result<Vec<Post>, DomainError> {
        let profile = self
            .repos
            .profiles
            .find_by_user_id(user)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user))?;

        if profile.follows.is_empty() {
            return Ok(Vec::new());
        }

        let authors: Vec<Uuid> = profile.follows.into_iter().collect();
        Ok(self.repos.posts.find_by_authors(&authors).await?)
    }

    /// Every post, newest first.
    pub async fn home(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repos.posts.list_recent().await?)
    }

    /// Posts owned by `user`, newest first.
    pub async fn posts_by(&self, user: Uuid) -> Result<Vec<Post>, DomainError> {
        Ok(self.repos.posts.find_by_user_id(user).await?)
    }
}
