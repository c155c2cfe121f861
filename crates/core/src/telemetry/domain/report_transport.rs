use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
}

/// Body of a count report: `{"person": <count>}`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountReport {
    pub person: usize,
}

/// Delivers one count report and returns the receiver's response body.
pub trait ReportTransport {
    fn send(&self, report: &CountReport) -> Result<String, TransportError>;
}
