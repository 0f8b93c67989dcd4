//! "New post" notifications.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{FollowKind, Post, User};
use crate::error::DomainError;
use crate::ports::{MailMessage, Mailer, Repositories};

pub struct NotificationService {
    repos: Repositories,
    mailer: Arc<dyn Mailer>,
    from: String,
}

impl NotificationService {
    pub fn new(repos: Repositories, mailer: Arc<dyn Mailer>, from: impl Into<String>) -> Self {
        Self {
            repos,
            mailer,
            from: from.into(),
        }
    }

    /// Emails of every user with email notifications enabled for `author`.
    ///
    /// Plain followers are not included.
    pub async fn recipients(&self, author: Uuid) -> Result<Vec<String>, DomainError> {
        let users = self
            .repos
            .profiles
            .inbound(FollowKind::EmailFollow, author)
            .await?;

        Ok(users.into_iter().map(|u| u.email).collect())
    }

    fn message(&self, author: &User, post: &Post, to: String) -> MailMessage {
        MailMessage {
            subject: format!("New post on Booked! By {}", author.username),
            body: format!(
                "{} just posted on Booked!\n\n\"{}\"\n",
                author.username, post.heading
            ),
            from: self.from.clone(),
            to: vec![to],
        }
    }

    /// Send one message per recipient. Returns how many were accepted.
    ///
    /// Never fails: the post is already stored when this runs.
    pub async fn notify_new_post(&self, author: &User, post: &Post) -> usize {
        let recipients = match self.recipients(author.id).await {
            Ok(recipients) => recipients,
            Err(e) => {
                tracing::warn!(
                    post_id = %post.id,
                    error = %e,
                    "Could not resolve notification recipients"
                );
                return 0;
            }
        };

        let mut delivered = 0;
        for to in recipients {
            match self.mailer.send(self.message(author, post, to)).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        post_id = %post.id,
                        error = %e,
                        "New post notification not sent"
                    );
                }
            }
        }

        tracing::debug!(post_id = %post.id, delivered, "New post notifications dispatched");
        delivered
    }
}
