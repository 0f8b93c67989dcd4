//! Mailer that keeps every message in memory.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use booked_core::ports::{MailError, MailMessage, Mailer};

/// Records sent messages. Can be switched into a failing transport.
#[derive(Default)]
pub struct InMemoryMailer {
    sent: Mutex<Vec<MailMessage>>,
    failing: AtomicBool,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails.
    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.failing.store(true, Ordering::Relaxed);
        mailer
    }

    pub async fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(MailError::Transport("transport unavailable".to_string()));
        }
        self.sent.lock().await.push(message);
        Ok(())
    }
}
