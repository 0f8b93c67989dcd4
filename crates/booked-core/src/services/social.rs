//! Follow graph operations.

use uuid::Uuid;

use crate::domain::{FollowKind, Post, Profile, User};
use crate::error::DomainError;
use crate::ports::Repositories;

/// What a viewer sees on another user's profile page.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user: User,
    pub posts: Vec<Post>,
    pub own_profile: bool,
    pub is_following: bool,
    pub emails_enabled: bool,
}

/// Maintains the two independent edge sets of every profile.
pub struct SocialGraphService {
    repos: Repositories,
}

impl SocialGraphService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    async fn require_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.repos
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    async fn profile(&self, user_id: Uuid) -> Result<Profile, DomainError> {
        self.repos
            .profiles
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))
    }

    async fn link(&self, kind: FollowKind, actor: Uuid, target: Uuid) -> Result<(), DomainError> {
        self.require_user(target).await?;
        let added = self.repos.profiles.add_edge(kind, actor, target).await?;
        tracing::debug!(?kind, %actor, %target, added, "Edge added");
        Ok(())
    }

    async fn unlink(&self, kind: FollowKind, actor: Uuid, target: Uuid) -> Result<(), DomainError> {
        self.require_user(target).await?;
        let removed = self.repos.profiles.remove_edge(kind, actor, target).await?;
        tracing::debug!(?kind, %actor, %target, removed, "Edge removed");
        Ok(())
    }

    pub async fn follow(&self, actor: Uuid, target: Uuid) -> Result<(), DomainError> {
        self.link(FollowKind::Follow, actor, target).await
    }

    /// Leaves any email-follow edge to `target` in place.
    pub async fn unfollow(&self, actor: Uuid, target: Uuid) -> Result<(), DomainError> {
        self.unlink(FollowKind::Follow, actor, target).await
    }

    pub async fn email_follow(&self, actor: Uuid, target: Uuid) -> Result<(), DomainError> {
        self.link(FollowKind::EmailFollow, actor, target).await
    }

    pub async fn email_unfollow(&self, actor: Uuid, target: Uuid) -> Result<(), DomainError> {
        self.unlink(FollowKind::EmailFollow, actor, target).await
    }

    /// Users that follow `user`, ordered by username.
    pub async fn followers(&self, user: Uuid) -> Result<Vec<User>, DomainError> {
        self.profile(user).await?;
        Ok(self.repos.profiles.inbound(FollowKind::Follow, user).await?)
    }

    /// Users that `user` follows, ordered by username.
    pub async fn following(&self, user: Uuid) -> Result<Vec<User>, DomainError> {
        let profile = self.profile(user).await?;
        let ids: Vec<Uuid> = profile.follows.into_iter().collect();

        let mut users = self.repos.users.find_by_ids(&ids).await?;
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    pub async fn is_following(&self, actor: Uuid, target: Uuid) -> Result<bool, DomainError> {
        Ok(self.profile(actor).await?.contains(FollowKind::Follow, target))
    }

    pub async fn has_email_follow(&self, actor: Uuid, target: Uuid) -> Result<bool, DomainError> {
        Ok(self
            .profile(actor)
            .await?
            .contains(FollowKind::EmailFollow, target))
    }

    pub async fn view_profile(
        &self,
        viewer: Uuid,
        target: Uuid,
    ) -> Result<ProfileView, DomainError> {
        let user = self.require_user(target).await?;
        let posts = self.repos.posts.find_by_user_id(target).await?;
        let profile = self.profile(viewer).await?;

        Ok(ProfileView {
            user,
            posts,
            own_profile: viewer == target,
            is_following: profile.contains(FollowKind::Follow, target),
            emails_enabled: profile.contains(FollowKind::EmailFollow, target),
        })
    }
}
