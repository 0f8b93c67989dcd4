//! Mailer that hands messages to an HTTP mail relay.

use async_trait::async_trait;

use booked_core::ports::{MailError, MailMessage, Mailer};

/// POSTs each message as JSON to a relay endpoint.
pub struct WebhookMailer {
    url: String,
    client: reqwest::Client,
}

impl WebhookMailer {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for WebhookMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.url)
            .json(&message)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected(format!("relay answered {status}")));
        }

        tracing::debug!(to = ?message.to, "Mail handed to relay");
        Ok(())
    }
}
