pub mod http_report_transport;
