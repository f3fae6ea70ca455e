//! Runs a command against the server from several connections at once.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use payload::Generator;
use protocol::{Cmd, Response};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::report::{Report, Tally};
use crate::{Client, Shape, Workload};

/// Settings for a benchmark run. Each call to [`Bench::run`] measures one command.
#[derive(Debug, Clone)]
pub struct Bench {
    pub addr: SocketAddr,
    /// Number of connections issuing requests concurrently.
    pub clients: usize,
    /// Total requests across all clients.
    pub requests: u64,
    /// How long to wait for each connection to open.
    pub connect_timeout: Duration,
}

impl Bench {
    /// Benchmarks one of the built-in workloads.
    pub fn run_workload(&self, workload: Workload, shape: &Shape) -> Result<Report> {
        self.run(workload.name(), |generator| workload.build(generator, shape))
    }

    /// Sends `requests` commands made by `build`, each on whichever client claims it first, and
    /// reports how long that took.
    ///
    /// All clients connect before the clock starts. Every client draws its payloads from its own
    /// [`Generator`].
    pub fn run<'c, F>(&self, name: &str, build: F) -> Result<Report>
    where
        F: Fn(&mut Generator) -> Cmd<'c> + Sync,
    {
        let clients = (0..self.clients)
            .map(|_| Client::connect(self.addr, self.connect_timeout))
            .collect::<Result<Vec<_>>>()?;
        debug!(name, clients = clients.len(), "Clients connected");

        let claimed = AtomicU64::new(0);
        let started = OffsetDateTime::now_utc();
        let start = Instant::now();
        let tally = thread::scope(|s| {
            let handles: Vec<_> = clients
                .into_iter()
                .enumerate()
                .map(|(worker, client)| {
                    let claimed = &claimed;
                    let build = &build;
                    s.spawn(move || self.work(worker, client, claimed, build))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(anyhow!("Benchmark worker panicked")))
                })
                .try_fold(Tally::default(), |total, tally| {
                    Ok::<_, anyhow::Error>(total.merge(tally?))
                })
        })?;
        let elapsed = start.elapsed();

        let report = Report::new(name, started, self.clients, elapsed, tally);
        info!(
            name,
            requests = report.requests,
            errors = report.errors,
            ?elapsed,
            "Benchmark finished"
        );
        Ok(report)
    }

    /// Issues requests on one client until every request has been claimed.
    fn work<'c, F>(
        &self,
        worker: usize,
        mut client: Client,
        claimed: &AtomicU64,
        build: &F,
    ) -> Result<Tally>
    where
        F: Fn(&mut Generator) -> Cmd<'c>,
    {
        let mut generator = Generator::for_worker(worker);
        let mut tally = Tally::default();
        while claimed.fetch_add(1, Ordering::Relaxed) < self.requests {
            let cmd = build(&mut generator);
            let sent = Instant::now();
            let response = client.issue(&cmd)?;
            tally.latency += sent.elapsed();
            tally.requests += 1;

            if let Response::Err(e) = response {
                // Usually the same error every time, e.g. the module isn't loaded.
                if tally.errors == 0 {
                    warn!(
                        worker,
                        addr = %client.addr(),
                        %e,
                        cmd = cmd.name(),
                        "Server replied with an error"
                    );
                }
                tally.errors += 1;
            }
        }
        debug!(worker, ?tally, "Worker done");
        Ok(tally)
    }
}
