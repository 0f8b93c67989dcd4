//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod mailer;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use clock::{Clock, SystemClock};
pub use mailer::{MailError, MailMessage, Mailer};
pub use repository::{
    CommentRepository, PostRepository, ProfileRepository, ReportRepository, Repositories,
    UserRepository,
};
