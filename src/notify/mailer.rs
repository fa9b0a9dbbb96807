//! Outbound mail capability: `send(from, to, subject, html) -> ok | error`

use serde::Serialize;

use crate::error::MailError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

pub enum Mailer {
    /// Log the message instead of sending it
    Log,
    Resend(ResendMailer),
}

impl Mailer {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Mailer::Log => "log",
            Mailer::Resend(_) => "resend",
        }
    }

    pub async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        match self {
            Mailer::Log => {
                tracing::info!(
                    from = %email.from,
                    to = ?email.to,
                    subject = %email.subject,
                    "Lead email (log only)"
                );
                tracing::info!("{}", email.html);
                Ok(())
            }
            Mailer::Resend(mailer) => mailer.send(email).await,
        }
    }
}

/// Resend transactional email API
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ResendMailer {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("effluentic/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MailError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| MailError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), "Lead email accepted");
        Ok(())
    }
}
