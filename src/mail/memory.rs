use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{MailError, Mailer, OutgoingEmail};

/// Keeps every sent message in an outbox instead of delivering it.
///
/// Clones share the same outbox.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailer {
    outbox: Arc<RwLock<Vec<OutgoingEmail>>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages sent so far, oldest first.
    pub async fn outbox(&self) -> Vec<OutgoingEmail> {
        self.outbox.read().await.clone()
    }

    pub async fn clear(&self) {
        self.outbox.write().await.clear();
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        if email.to.is_empty() {
            return Err(MailError::NoRecipients);
        }
        self.outbox.write().await.push(email.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_outbox() {
        let mailer = InMemoryMailer::new();
        let handle = mailer.clone();

        let email = OutgoingEmail::new("hi", "body", "from@example.com", vec!["to@example.com".into()]);
        mailer.send(&email).await.unwrap();

        assert_eq!(handle.outbox().await, vec![email]);

        handle.clear().await;
        assert!(mailer.outbox().await.is_empty());
    }

    #[tokio::test]
    async fn rejects_message_without_recipients() {
        let mailer = InMemoryMailer::new();
        let email = OutgoingEmail::new("hi", "body", "from@example.com", Vec::new());
        assert!(matches!(
            mailer.send(&email).await,
            Err(MailError::NoRecipients)
        ));
        assert!(mailer.outbox().await.is_empty());
    }
}
