use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Longest accepted heading, as typed by the author.
pub const MAX_HEADING_LEN: usize = 200;

/// Seconds after posting (or after the last edit) during which a post can be edited.
pub const EDIT_WINDOW_SECS: i64 = 5 * 60;

/// Appended to the heading of an edited post, at most once.
pub const EDITED_SUFFIX: &str = " (edited)";

/// Post entity - a short text post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Owner. `None` once the link to the author has been lost.
    pub user_id: Option<Uuid>,
    pub heading: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `user_id`.
    pub fn new(user_id: Uuid, heading: String, text: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: Some(user_id),
            heading,
            text,
            created_at: now,
        }
    }

    pub fn edit_window() -> TimeDelta {
        TimeDelta::seconds(EDIT_WINDOW_SECS)
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == Some(user_id)
    }

    /// Whether the edit window is still open at `now`, regardless of who asks.
    pub fn within_edit_window(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at < Self::edit_window()
    }

    pub fn is_editable_by(&self, user_id: Uuid, now: DateTime<Utc>) -> bool {
        self.within_edit_window(now) && self.is_owned_by(user_id)
    }

    /// Replace heading and text.
    ///
    /// The heading gets [`EDITED_SUFFIX`] unless it already ends with it, and
    /// `created_at` moves to `now`, which restarts the edit window.
    pub fn apply_edit(&mut self, heading: String, text: String, now: DateTime<Utc>) {
        self.heading = if heading.ends_with(EDITED_SUFFIX) {
            heading
        } else {
            heading + EDITED_SUFFIX
        };
        self.text = text;
        self.created_at = now;
    }
}

pub fn validate_post_input(heading: &str, text: &str) -> Result<(), DomainError> {
    if heading.trim().is_empty() {
        return Err(DomainError::Validation("Heading is required".to_string()));
    }
    if heading.chars().count() > MAX_HEADING_LEN {
        return Err(DomainError::Validation(format!(
            "Heading must be at most {MAX_HEADING_LEN} characters"
        )));
    }
    if text.trim().is_empty() {
        return Err(DomainError::Validation("Text is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_at(now: DateTime<Utc>) -> (Uuid, Post) {
        let owner = Uuid::new_v4();
        let post = Post::new(owner, "Hello".to_string(), "World".to_string(), now);
        (owner, post)
    }

    #[test]
    fn test_edit_window_boundaries() {
        let t = Utc::now();
        let (owner, post) = post_at(t);

        assert!(post.is_editable_by(owner, t + TimeDelta::seconds(4 * 60 + 59)));
        assert!(!post.is_editable_by(owner, t + TimeDelta::seconds(5 * 60)));
        assert!(!post.is_editable_by(owner, t + TimeDelta::seconds(5 * 60 + 1)));
    }

    #[test]
    fn test_only_owner_can_edit() {
        let t = Utc::now();
        let (_, post) = post_at(t);

        assert!(!post.is_editable_by(Uuid::new_v4(), t));
    }

    #[test]
    fn test_ownerless_post_is_never_editable() {
        let t = Utc::now();
        let (owner, mut post) = post_at(t);
        post.user_id = None;

        assert!(!post.is_editable_by(owner, t));
    }

    #[test]
    fn test_edit_resets_window() {
        let t = Utc::now();
        let (owner, mut post) = post_at(t);

        let edited_at = t + TimeDelta::minutes(2);
        post.apply_edit("Hello".to_string(), "Again".to_string(), edited_at);

        assert_eq!(post.created_at, edited_at);
        assert!(post.is_editable_by(owner, t + TimeDelta::seconds(6 * 60)));
        assert!(post.is_editable_by(owner, edited_at + TimeDelta::seconds(4 * 60 + 59)));
        assert!(!post.is_editable_by(owner, edited_at + TimeDelta::seconds(5 * 60 + 1)));
    }

    #[test]
    fn test_edited_suffix_added_once() {
        let t = Utc::now();
        let (_, mut post) = post_at(t);

        post.apply_edit("Hello".to_string(), "x".to_string(), t);
        assert_eq!(post.heading, "Hello (edited)");

        let heading = post.heading.clone();
        post.apply_edit(heading, "y".to_string(), t);
        assert_eq!(post.heading, "Hello (edited)");
        assert_eq!(post.text, "y");
    }

    #[test]
    fn test_validate_post_input() {
        assert!(validate_post_input("Heading", "Body").is_ok());
        assert!(validate_post_input("", "Body").is_err());
        assert!(validate_post_input("Heading", "  ").is_err());
        assert!(validate_post_input(&"h".repeat(MAX_HEADING_LEN), "Body").is_ok());
        assert!(validate_post_input(&"h".repeat(MAX_HEADING_LEN + 1), "Body").is_err());
    }
}
