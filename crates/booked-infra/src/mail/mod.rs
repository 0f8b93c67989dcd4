//! Mail transports.

mod log;
mod memory;

#[cfg(feature = "webhook-mail")]
mod webhook;

pub use log::LogMailer;
pub use memory::InMemoryMailer;

#[cfg(feature = "webhook-mail")]
pub use webhook::WebhookMailer;
