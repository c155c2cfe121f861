pub mod report_transport;
pub mod telemetry_reporter;
