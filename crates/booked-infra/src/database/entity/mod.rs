//! SeaORM entities, one module per table.

pub mod comment;
pub mod email_follow;
pub mod follow;
pub mod post;
pub mod profile;
pub mod report;
pub mod user;
