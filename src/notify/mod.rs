//! Lead notifications
//!
//! `email` renders the message; `mailer` delivers it (api feature only).
//! Delivery is best-effort: callers log a failure and carry on.

pub mod email;
#[cfg(feature = "api")]
pub mod mailer;

pub use email::{escape_html, lead_subject, render_lead_email, RenderedEmail};
#[cfg(feature = "api")]
pub use mailer::{Mailer, OutboundEmail, ResendMailer};

#[cfg(feature = "api")]
use crate::config::Brand;
#[cfg(feature = "api")]
use crate::error::MailError;
#[cfg(feature = "api")]
use crate::records::LeadRecord;

/// Renders lead emails for a brand and hands them to the mailer
#[cfg(feature = "api")]
pub struct LeadNotifier {
    pub mailer: Mailer,
    pub brand: Brand,
    pub from: String,
    pub to: Vec<String>,
}

#[cfg(feature = "api")]
impl LeadNotifier {
    pub fn log_only(brand: Brand) -> Self {
        Self {
            mailer: Mailer::Log,
            brand,
            from: brand.default_sender().to_string(),
            to: Vec::new(),
        }
    }

    pub async fn notify(&self, lead: &LeadRecord) -> Result<(), MailError> {
        let rendered = render_lead_email(self.brand, lead);
        let email = OutboundEmail {
            from: self.from.clone(),
            to: self.to.clone(),
            subject: rendered.subject,
            html: rendered.html,
        };
        self.mailer.send(&email).await
    }
}
