//! # Booked Shared
//!
//! Wire types of the HTTP API. Kept free of domain and server crates so a
//! client can depend on it alone.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
