use std::time::{Duration, Instant};

use crate::telemetry::domain::report_transport::{CountReport, ReportTransport, TransportError};

/// Result of one [`TelemetryReporter::maybe_report`] call.
#[derive(Debug)]
pub enum ReportOutcome {
    /// The interval has not elapsed since the last attempt.
    NotDue,
    Sent {
        report: CountReport,
        response: String,
    },
    Failed {
        report: CountReport,
        error: TransportError,
    },
}

/// Rate-limits count reports to one attempt per interval.
///
/// Idle until `interval` has passed since the last attempt, then Due. A due
/// call makes exactly one transport attempt and restarts the interval at
/// `now`, whether or not the attempt succeeded. Failures are logged and
/// returned as [`ReportOutcome::Failed`], never propagated.
pub struct TelemetryReporter {
    transport: Box<dyn ReportTransport>,
    interval: Duration,
    last_report: Option<Instant>,
}

impl TelemetryReporter {
    /// A reporter that has never reported, so its first call is due.
    pub fn new(transport: Box<dyn ReportTransport>, interval: Duration) -> Self {
        Self {
            transport,
            interval,
            last_report: None,
        }
    }

    /// A reporter whose first report is due one interval after `start`.
    pub fn starting_at(
        transport: Box<dyn ReportTransport>,
        interval: Duration,
        start: Instant,
    ) -> Self {
        Self {
            transport,
            interval,
            last_report: Some(start),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_report(&self) -> Option<Instant> {
        self.last_report
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_report {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn maybe_report(&mut self, count: usize, now: Instant) -> ReportOutcome {
        if !self.is_due(now) {
            return ReportOutcome::NotDue;
        }
        self.last_report = Some(now);

        let report = CountReport { person: count };
        match self.transport.send(&report) {
            Ok(response) => {
                log::info!(
                    "Sent: {} | Response: {}",
                    serde_json::to_string(&report).unwrap_or_default(),
                    response.trim()
                );
                ReportOutcome::Sent { report, response }
            }
            Err(error) => {
                log::warn!("Error sending count report: {error}");
                ReportOutcome::Failed { report, error }
            }
        }
    }
}
