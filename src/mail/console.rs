use async_trait::async_trait;
use tracing::info;

use super::{MailError, Mailer, OutgoingEmail};

/// Writes messages to the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if email.to.is_empty() {
            return Err(MailError::NoRecipients);
        }

        info!(
            from = %email.from,
            to = %email.to.join(", "),
            subject = %email.subject,
            body = %email.body,
            "email"
        );
        Ok(())
    }
}
