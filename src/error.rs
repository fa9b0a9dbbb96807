//! Error types for request validation and downstream services

use thiserror::Error;

/// Rejected input. Detected before any side effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: &'static str },

    #[error("Unknown technology '{0}' (expected 'daf' or 'clarifier')")]
    UnknownTechnology(String),
}

/// Record store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Datastore request failed: {0}")]
    Http(String),

    #[error("Datastore returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode datastore response: {0}")]
    Decode(String),

    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Outbound email failures
#[derive(Error, Debug)]
pub enum MailError {
    #[error("Email request failed: {0}")]
    Http(String),

    #[error("Email provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}
