//! Outbound email.
//!
//! Delivery goes through the [`Mailer`] trait so callers never depend on a
//! concrete transport. Three backends are available, selected by
//! `email.backend`:
//!
//! - `smtp`: relays through an SMTP server with lettre
//! - `console`: writes every message to the log
//! - `memory`: keeps messages in an in-process outbox (tests, local tooling)

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::EmailConfig;

pub mod console;
pub mod memory;
pub mod otp;
pub mod smtp;

pub use console::ConsoleMailer;
pub use memory::InMemoryMailer;
pub use otp::{OtpMailer, OTP_SUBJECT};
pub use smtp::SmtpMailer;

/// A fully composed message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

impl OutgoingEmail {
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        from: impl Into<String>,
        to: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            from: from.into(),
            to,
        }
    }
}

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Message has no recipients")]
    NoRecipients,

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unsupported mail backend: {0}")]
    UnsupportedBackend(String),
}

/// Trait for mail delivery backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message to every address in `email.to`.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Builds the backend named by `config.backend`.
pub fn build_mailer(config: &EmailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config.backend.to_ascii_lowercase().as_str() {
        "smtp" => Ok(Arc::new(SmtpMailer::from_config(config)?)),
        "console" => Ok(Arc::new(ConsoleMailer)),
        "memory" => Ok(Arc::new(InMemoryMailer::new())),
        other => Err(MailError::UnsupportedBackend(other.to_string())),
    }
}
