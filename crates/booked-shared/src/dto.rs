//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// The signed-in user's own account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Another user as anyone may see them. Carries no email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditProfileRequest {
    pub username: String,
    pub email: String,
}

/// Body of both post creation and post edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub heading: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author: Option<Uuid>,
    pub heading: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Edits are accepted until this instant.
    pub editable_until: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A post with its comments, as seen by one viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailsResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
    /// Whether the viewer has already reported this post.
    pub reported: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub reason: String,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Recorded,
    PostRemoved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub status: ReportStatus,
    pub report_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserSummary,
    pub posts: Vec<PostResponse>,
    pub own_profile: bool,
    pub is_following: bool,
    pub emails_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_detail_is_optional() {
        let req: ReportRequest = serde_json::from_str(r#"{"reason":"spam"}"#).unwrap();
        assert_eq!(req.reason, "spam");
        assert!(req.detail.is_none());
    }

    #[test]
    fn test_report_status_is_snake_case() {
        let body = serde_json::to_value(ReportResponse {
            status: ReportStatus::PostRemoved,
            report_count: 3,
        })
        .unwrap();

        assert_eq!(body["status"], "post_removed");
        assert_eq!(body["report_count"], 3);
    }
}
