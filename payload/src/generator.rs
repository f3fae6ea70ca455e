//! Seeding and the two ways of drawing random strings.

use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::DistString;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::Letters;

static SEED: OnceLock<u64> = OnceLock::new();
static SHARED: OnceLock<Mutex<StdRng>> = OnceLock::new();

/// Returns the seed for this process, initializing it from the current time on first use.
///
/// Later calls return the same value, so every source derived from it is reproducible within a
/// single run but differs between runs.
pub fn process_seed() -> u64 {
    *SEED.get_or_init(|| {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            // A clock before 1970 is broken, but the OS RNG still gives us a usable seed.
            .unwrap_or_else(|_| rand::random());
        debug!(seed, "Seeded payload generator");
        seed
    })
}

/// Returns `len` random letters drawn from the process-wide source.
///
/// Safe to call from any number of threads; callers are serialized on a mutex for the duration of
/// the draw. Workers that generate a lot should own a [`Generator`] instead.
pub fn random_string(len: usize) -> String {
    let shared = SHARED.get_or_init(|| Mutex::new(StdRng::seed_from_u64(process_seed())));
    // Nothing can panic halfway through a draw and leave the RNG unusable.
    let mut rng = shared.lock().unwrap_or_else(PoisonError::into_inner);
    Letters.sample_string(&mut *rng, len)
}

/// A random source owned by one worker.
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// Creates a deterministic `Generator`. Mostly useful for tests and in-process benches.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the `Generator` for the worker with the given id. Distinct ids get distinct
    /// streams, and none of them share a stream with [`random_string`].
    pub fn for_worker(worker: usize) -> Self {
        Self::from_seed(process_seed().wrapping_add(worker as u64 + 1))
    }

    /// Returns `len` random letters.
    pub fn string(&mut self, len: usize) -> String {
        Letters.sample_string(&mut self.rng, len)
    }
}
