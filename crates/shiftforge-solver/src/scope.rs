//! Per-worker search scope.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// State one search worker carries through its tree.
///
/// Terminations read it; the worker owns it exclusively.
pub struct SearchScope {
    worker: usize,
    seed: u64,
    rng: ChaCha8Rng,
    started_at: Instant,
    node_count: u64,
}

impl SearchScope {
    /// Creates a scope whose clock started at `started_at`, shared by all
    /// workers of one solve.
    pub fn new(worker: usize, seed: u64, started_at: Instant) -> Self {
        Self {
            worker,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            started_at,
            node_count: 0,
        }
    }

    pub fn worker(&self) -> usize {
        self.worker
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    pub fn increment_node_count(&mut self) -> u64 {
        self.node_count += 1;
        self.node_count
    }
}
