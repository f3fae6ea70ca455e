//! Random payloads for load generation.
//!
//! Keys and values sent by the benchmark are strings of ASCII letters. Every string comes from
//! either the process-wide source behind [`random_string`] or from a [`Generator`] owned by a
//! single worker. Both are seeded from [`process_seed`], which is initialized from the clock the
//! first time anything asks for it.

mod generator;
mod letters;

pub use generator::{process_seed, random_string, Generator};
pub use letters::{Letters, ALPHABET};
