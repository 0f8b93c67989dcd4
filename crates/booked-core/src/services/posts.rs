//! Post lifecycle: create, read, edit, delete, comment.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, Post, validate_post_input};
use crate::error::DomainError;
use crate::ports::{Clock, Repositories};

use super::NotificationService;
use super::moderation::reported_by;

/// A post with everything its detail page needs.
#[derive(Debug, Clone)]
pub struct PostDetails {
    pub post: Post,
    pub comments: Vec<Comment>,
    /// Whether the viewer has already reported this post.
    pub reported: bool,
}

pub struct PostService {
    repos: Repositories,
    notifier: Arc<NotificationService>,
    clock: Arc<dyn Clock>,
}

impl PostService {
    pub fn new(
        repos: Repositories,
        notifier: Arc<NotificationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repos,
            notifier,
            clock,
        }
    }

    async fn require_post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))
    }

    /// Store a new post, then notify the author's email followers.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        heading: String,
        text: String,
    ) -> Result<Post, DomainError> {
        validate_post_input(&heading, &text)?;

        let author = self
            .repos
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(author_id))?;

        let post = Post::new(author.id, heading, text, self.clock.now());
        let post = self.repos.posts.insert(post).await?;
        tracing::info!(post_id = %post.id, author = %author.username, "Post created");

        self.notifier.notify_new_post(&author, &post).await;

        Ok(post)
    }

    pub async fn post_details(
        &self,
        post_id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<PostDetails, DomainError> {
        let post = self.require_post(post_id).await?;
        let comments = self.repos.comments.find_by_post_id(post_id).await?;

        let reported = match viewer {
            Some(viewer) => reported_by(&self.repos, post_id, viewer).await?,
            None => false,
        };

        Ok(PostDetails {
            post,
            comments,
            reported,
        })
    }

    /// Edit heading and text while the edit window is open.
    ///
    /// The window is checked before ownership. A successful edit restarts it.
    pub async fn edit_post(
        &self,
        post_id: Uuid,
        requester: Uuid,
        heading: String,
        text: String,
    ) -> Result<Post, DomainError> {
        validate_post_input(&heading, &text)?;

        let mut post = self.require_post(post_id).await?;
        let now = self.clock.now();

        if !post.within_edit_window(now) {
            return Err(DomainError::EditWindowClosed(post_id));
        }
        if !post.is_owned_by(requester) {
            return Err(DomainError::PermissionDenied);
        }

        post.apply_edit(heading, text, now);
        let post = self
            .repos
            .posts
            .update(post)
            .await
            .map_err(|e| e.or_missing(DomainError::post_not_found(post_id)))?;
        tracing::debug!(%post_id, "Post edited");

        Ok(post)
    }

    /// Delete a post the requester owns, with its comments and reports.
    pub async fn delete_post(&self, post_id: Uuid, requester: Uuid) -> Result<(), DomainError> {
        let post = self.require_post(post_id).await?;
        if !post.is_owned_by(requester) {
            return Err(DomainError::PermissionDenied);
        }

        self.repos
            .posts
            .delete(post_id)
            .await
            .map_err(|e| e.or_missing(DomainError::post_not_found(post_id)))?;
        tracing::info!(%post_id, "Post deleted by owner");
        Ok(())
    }

    pub async fn comment(
        &self,
        post_id: Uuid,
        author: Uuid,
        text: String,
    ) -> Result<Comment, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation("Text is required".to_string()));
        }

        let post = self.require_post(post_id).await?;
        let comment = Comment::new(post.id, author, text, self.clock.now());

        Ok(self.repos.comments.insert(comment).await?)
    }
}
