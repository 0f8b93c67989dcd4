//! # Booked Infrastructure
//!
//! Concrete implementations of the ports defined in `booked-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL store via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `webhook-mail` - Mail delivery through an HTTP relay

pub mod database;
pub mod mail;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::InMemoryStore;
pub use mail::{InMemoryMailer, LogMailer};

#[cfg(feature = "postgres")]
pub use database::PostgresStore;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtTokenService};

#[cfg(feature = "webhook-mail")]
pub use mail::WebhookMailer;
