use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Longest accepted report reason.
pub const MAX_REASON_LEN: usize = 100;

/// A post is removed once it has strictly more reports than this.
pub const REMOVAL_THRESHOLD: usize = 2;

/// Report entity - a complaint filed against a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub post_id: Uuid,
    /// Owner of the post when the report was filed.
    pub reported_user_id: Option<Uuid>,
    pub reporting_user_id: Uuid,
    pub reason: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(
        post_id: Uuid,
        reported_user_id: Option<Uuid>,
        reporting_user_id: Uuid,
        reason: String,
        detail: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            reported_user_id,
            reporting_user_id,
            reason,
            detail,
            created_at: now,
        }
    }
}

/// What happened to the post after a report was filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// The report was stored and the post stays visible.
    Recorded { report_count: usize },
    /// The report pushed the post over the threshold; the post, its comments
    /// and its reports are gone.
    PostRemoved { report_count: usize },
}

impl ReportOutcome {
    /// Decide the outcome for a post that now holds `report_count` reports.
    pub fn for_count(report_count: usize) -> Self {
        if report_count > REMOVAL_THRESHOLD {
            Self::PostRemoved { report_count }
        } else {
            Self::Recorded { report_count }
        }
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, Self::PostRemoved { .. })
    }
}

pub fn validate_reason(reason: &str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::Validation("Reason is required".to_string()));
    }
    if reason.chars().count() > MAX_REASON_LEN {
        return Err(DomainError::Validation(format!(
            "Reason must be at most {MAX_REASON_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_threshold() {
        assert_eq!(
            ReportOutcome::for_count(2),
            ReportOutcome::Recorded { report_count: 2 }
        );
        assert!(ReportOutcome::for_count(3).is_removed());
        assert!(ReportOutcome::for_count(7).is_removed());
    }

    #[test]
    fn test_validate_reason() {
        assert!(validate_reason("spam").is_ok());
        assert!(validate_reason("").is_err());
        assert!(validate_reason(&"r".repeat(MAX_REASON_LEN + 1)).is_err());
    }
}
