use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use mmbench::{Bench, Shape, Workload};
use tracing::{debug, info};

/// Compares `MULTIMAP.INSERT` against `SET` on a Redis-compatible server using random keys and
/// values.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Address of the server to benchmark.
    #[clap(long, default_value = "127.0.0.1:6379")]
    addr: SocketAddr,

    /// Number of concurrent connections.
    #[clap(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    clients: u32,

    /// Total number of requests per command.
    #[clap(long, default_value_t = 100_000, value_parser = clap::value_parser!(u64).range(1..))]
    requests: u64,

    /// Top-level key that every `MULTIMAP.INSERT` writes to.
    #[clap(long, default_value = "map")]
    map: String,

    /// Length of each random key.
    #[clap(long, default_value_t = 5)]
    key_len: usize,

    /// Length of each random value.
    #[clap(long, default_value_t = 10)]
    value_len: usize,

    /// Commands to benchmark, in order.
    #[clap(
        long,
        value_enum,
        value_delimiter = ',',
        default_values = ["multimap.insert", "set"]
    )]
    tests: Vec<Workload>,

    /// Print each report as a line of JSON.
    #[clap(long)]
    json: bool,

    /// How long to wait for a connection to open, in milliseconds.
    #[clap(long, default_value_t = 1_000, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: u64,

    /// Log more. Repeat for even more.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    match args.verbose {
        0 => logging::configure(),
        verbose => logging::configure_with(logging::level_for_verbosity(verbose)),
    }

    let bench = Bench {
        addr: args.addr,
        clients: args.clients as usize,
        requests: args.requests,
        connect_timeout: Duration::from_millis(args.timeout_ms),
    };
    let shape = Shape {
        map: args.map,
        key_len: args.key_len,
        value_len: args.value_len,
    };
    info!(
        %bench.addr,
        bench.clients,
        bench.requests,
        ?args.tests,
        version = env!("CARGO_PKG_VERSION"),
        "Starting benchmark",
    );
    debug!(?shape, "Payload shape");

    for workload in args.tests {
        let report = bench.run_workload(workload, &shape)?;
        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{report}");
        }
    }

    Ok(())
}
