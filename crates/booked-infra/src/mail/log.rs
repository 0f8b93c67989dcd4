//! Mailer that only logs - the default when no relay is configured.

use async_trait::async_trait;

use booked_core::ports::{MailError, MailMessage, Mailer};

pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        tracing::info!(
            from = %message.from,
            to = ?message.to,
            subject = %message.subject,
            "Mail not delivered (log mailer)"
        );
        Ok(())
    }
}
