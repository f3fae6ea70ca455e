//! Drives `MULTIMAP.INSERT` and `SET` against a server and reports how fast it answered.
//!
//! A [`Bench`] opens its connections through [`Client`], hands every worker its own
//! [`payload::Generator`], and asks a [`Workload`] to turn random strings into the next command.

mod bench;
mod client;
mod report;
mod workload;

pub use bench::Bench;
pub use client::Client;
pub use report::Report;
pub use workload::{Shape, Workload};
