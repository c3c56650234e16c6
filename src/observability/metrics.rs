//! Metrics collection.
//!
//! # Metrics
//! - `transporter_backend_probes_total` (counter): health probes by outcome
//! - `transporter_backend_resolutions_total` (counter): locator runs by result
//! - `transporter_requests_total` (counter): backend requests by method, status
//! - `transporter_request_duration_seconds` (histogram): request latency
//!
//! # Design Decisions
//! - No exporter is installed by this crate; without a recorder the macros are no-ops
//! - Status label is "error" when no response was received

use std::time::Instant;

use metrics::{counter, histogram};

/// Outcome of a single health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Up,
    BadStatus,
    Unreachable,
    Timeout,
    Skipped,
}

impl ProbeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeOutcome::Up => "up",
            ProbeOutcome::BadStatus => "bad_status",
            ProbeOutcome::Unreachable => "unreachable",
            ProbeOutcome::Timeout => "timeout",
            ProbeOutcome::Skipped => "skipped",
        }
    }
}

pub fn record_probe(outcome: ProbeOutcome) {
    counter!("transporter_backend_probes_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_resolution(success: bool) {
    let result = if success { "resolved" } else { "unreachable" };
    counter!("transporter_backend_resolutions_total", "result" => result).increment(1);
}

pub fn record_request(method: &str, status: Option<u16>, start: Instant) {
    let status = status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "error".to_string());
    counter!(
        "transporter_requests_total",
        "method" => method.to_string(),
        "status" => status
    )
    .increment(1);
    histogram!("transporter_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}
