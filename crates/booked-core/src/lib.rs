//! # Booked Core
//!
//! The domain layer of Booked: users, profiles with their follow and
//! email-follow graphs, posts, comments and reports, plus the rules that
//! derive feeds, notification recipients and moderation outcomes from them.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::Services;
