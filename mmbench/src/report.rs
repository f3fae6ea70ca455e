//! Summaries of a finished benchmark.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// What a single worker counted while it ran.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct Tally {
    pub(crate) requests: u64,
    pub(crate) errors: u64,
    /// Sum of the time each request took, send to reply.
    pub(crate) latency: Duration,
}

impl Tally {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            requests: self.requests + other.requests,
            errors: self.errors + other.errors,
            latency: self.latency + other.latency,
        }
    }
}

/// The result of running one command against the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub name: String,
    /// When the benchmark started, RFC 3339 in UTC.
    pub started: String,
    pub clients: usize,
    /// Requests that received a reply, errors included.
    pub requests: u64,
    /// Requests the server answered with an error.
    pub errors: u64,
    pub elapsed_secs: f64,
    pub requests_per_sec: f64,
    pub mean_latency_ms: f64,
}

impl Report {
    pub(crate) fn new(
        name: &str,
        started: OffsetDateTime,
        clients: usize,
        elapsed: Duration,
        tally: Tally,
    ) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        let requests_per_sec = if elapsed_secs > 0.0 {
            tally.requests as f64 / elapsed_secs
        } else {
            0.0
        };
        let mean_latency_ms = if tally.requests > 0 {
            tally.latency.as_secs_f64() * 1_000.0 / tally.requests as f64
        } else {
            0.0
        };
        Self {
            name: name.to_owned(),
            started: started
                .format(&Rfc3339)
                .expect("RFC-3339 is a valid format"),
            clients,
            requests: tally.requests,
            errors: tally.errors,
            elapsed_secs,
            requests_per_sec,
            mean_latency_ms,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} requests in {:.2}s over {} clients, {:.2} requests per second, {:.3} ms mean \
             latency",
            self.name,
            self.requests,
            self.elapsed_secs,
            self.clients,
            self.requests_per_sec,
            self.mean_latency_ms,
        )?;
        if self.errors > 0 {
            write!(f, ", {} errors", self.errors)?;
        }
        Ok(())
    }
}
