//! Domain entities - the core business objects.

mod comment;
mod post;
mod profile;
mod report;
mod user;

pub use comment::Comment;
pub use post::{EDIT_WINDOW_SECS, EDITED_SUFFIX, MAX_HEADING_LEN, Post, validate_post_input};
pub use profile::{FollowKind, Profile};
pub use report::{MAX_REASON_LEN, REMOVAL_THRESHOLD, Report, ReportOutcome, validate_reason};
pub use user::{MAX_USERNAME_LEN, User, validate_email, validate_username};
