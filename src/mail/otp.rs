use metrics::counter;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{MailError, Mailer, OutgoingEmail};
use crate::config::AppConfig;

/// Subject line of every verification email.
pub const OTP_SUBJECT: &str = "CreativeBook Email Verification";

/// Body of the verification email for `code`.
pub fn otp_body(code: impl Display) -> String {
    format!("Your verification code is: {}", code)
}

/// Sends one-time verification codes by email.
///
/// Codes are generated and checked elsewhere; this only formats the fixed
/// message and hands it to the configured [`Mailer`]. Nothing is retried or
/// deduplicated, so every call produces one outbound message.
#[derive(Clone)]
pub struct OtpMailer {
    mailer: Arc<dyn Mailer>,
    from_address: String,
}

impl OtpMailer {
    pub fn new(mailer: Arc<dyn Mailer>, from_address: impl Into<String>) -> Self {
        Self {
            mailer,
            from_address: from_address.into(),
        }
    }

    /// Uses `default_from_email` as the sender.
    pub fn from_config(mailer: Arc<dyn Mailer>, config: &AppConfig) -> Self {
        Self::new(mailer, config.default_from_email.clone())
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    /// Emails `code` to `email`. Delivery errors from the mailer are returned unchanged.
    #[instrument(skip_all, fields(recipient = %email))]
    pub async fn send_otp_email(&self, email: &str, code: impl Display) -> Result<(), MailError> {
        let message = OutgoingEmail::new(
            OTP_SUBJECT,
            otp_body(code),
            self.from_address.as_str(),
            vec![email.to_string()],
        );

        self.mailer.send(&message).await?;

        counter!("creativebook_otp_emails_sent_total", 1);
        info!("verification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::{InMemoryMailer, MockMailer};
    use assert_matches::assert_matches;

    const FROM: &str = "noreply@creativebook.example";

    #[tokio::test]
    async fn sends_exactly_one_message_with_fixed_template() {
        let mut mock = MockMailer::new();
        mock.expect_send()
            .times(1)
            .withf(|email| {
                email.subject == "CreativeBook Email Verification"
                    && email.body == "Your verification code is: 482913"
                    && email.from == FROM
                    && email.to == vec!["alice@example.com".to_string()]
            })
            .returning(|_| Ok(()));

        let otp = OtpMailer::new(Arc::new(mock), FROM);
        otp.send_otp_email("alice@example.com", "482913")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn mailer_failure_is_returned_without_retry() {
        let mut mock = MockMailer::new();
        mock.expect_send()
            .times(1)
            .returning(|_| Err(MailError::Transport("connection refused".into())));

        let otp = OtpMailer::new(Arc::new(mock), FROM);
        let result = otp.send_otp_email("alice@example.com", "482913").await;

        assert_matches!(result, Err(MailError::Transport(msg)) if msg == "connection refused");
    }

    #[tokio::test]
    async fn numeric_and_string_codes_render_literally() {
        let mailer = InMemoryMailer::new();
        let otp = OtpMailer::new(Arc::new(mailer.clone()), FROM);

        otp.send_otp_email("bob@example.com", 482913u32).await.unwrap();
        otp.send_otp_email("bob@example.com", "007").await.unwrap();

        let outbox = mailer.outbox().await;
        assert_eq!(outbox.len(), 2);
        assert_eq!(outbox[0].body, "Your verification code is: 482913");
        assert_eq!(outbox[1].body, "Your verification code is: 007");
    }

    #[tokio::test]
    async fn repeated_calls_send_repeated_emails() {
        let mailer = InMemoryMailer::new();
        let otp = OtpMailer::new(Arc::new(mailer.clone()), FROM);

        for _ in 0..3 {
            otp.send_otp_email("carol@example.com", "111111").await.unwrap();
        }

        let outbox = mailer.outbox().await;
        assert_eq!(outbox.len(), 3);
        assert!(outbox.iter().all(|m| m == &outbox[0]));
    }

    #[test]
    fn sender_defaults_to_configured_address() {
        let mut config = AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            8000,
            "test".into(),
        );
        config.default_from_email = "hello@creativebook.example".into();

        let otp = OtpMailer::from_config(Arc::new(InMemoryMailer::new()), &config);
        assert_eq!(otp.from_address(), "hello@creativebook.example");
    }
}
