//! Abuse reports and automatic removal.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Report, ReportOutcome, validate_reason};
use crate::error::DomainError;
use crate::ports::{Clock, Repositories};

pub struct ModerationService {
    repos: Repositories,
    clock: Arc<dyn Clock>,
}

impl ModerationService {
    pub fn new(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// File a report against a post.
    ///
    /// The post's owner at this moment is recorded as the reported user. The
    /// same user may report a post more than once and every report counts.
    pub async fn report(
        &self,
        post_id: Uuid,
        reporting_user: Uuid,
        reason: String,
        detail: Option<String>,
    ) -> Result<ReportOutcome, DomainError> {
        validate_reason(&reason)?;

        let post = self
            .repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        let report = Report::new(
            post.id,
            post.user_id,
            reporting_user,
            reason,
            detail.unwrap_or_default(),
            self.clock.now(),
        );

        let outcome = self
            .repos
            .reports
            .file(report)
            .await
            .map_err(|e| e.or_missing(DomainError::post_not_found(post_id)))?;

        if outcome.is_removed() {
            tracing::info!(%post_id, ?outcome, "Post removed after reports");
        } else {
            tracing::debug!(%post_id, ?outcome, "Report recorded");
        }

        Ok(outcome)
    }

    pub async fn has_reported(&self, post_id: Uuid, user: Uuid) -> Result<bool, DomainError> {
        reported_by(&self.repos, post_id, user).await
    }
}

/// Whether `user` has filed at least one report against the post.
pub(crate) async fn reported_by(
    repos: &Repositories,
    post_id: Uuid,
    user: Uuid,
) -> Result<bool, DomainError> {
    let reports = repos.reports.find_by_post_id(post_id).await?;
    Ok(reports.iter().any(|r| r.reporting_user_id == user))
}
