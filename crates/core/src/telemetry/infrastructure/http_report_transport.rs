use std::time::Duration;

use reqwest::blocking::Client;

use crate::telemetry::domain::report_transport::{CountReport, ReportTransport, TransportError};

/// Posts count reports as JSON to a fixed URL.
///
/// The client is built once with a whole-request timeout. Any HTTP status
/// counts as delivered; the body is handed back for logging.
pub struct HttpReportTransport {
    client: Client,
    url: String,
}

impl HttpReportTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                url: self.url.clone(),
            }
        } else {
            TransportError::Request {
                url: self.url.clone(),
                message: error.to_string(),
            }
        }
    }
}

impl ReportTransport for HttpReportTransport {
    fn send(&self, report: &CountReport) -> Result<String, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .json(report)
            .send()
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("{} answered with status {status}", self.url);
        }
        response.text().map_err(|e| self.request_error(e))
    }
}
