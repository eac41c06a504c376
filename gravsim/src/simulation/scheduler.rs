//! Recursive parallel decomposition of the all-pairs force computation
//!
//! The body range is split in half until a block is small enough to handle
//! directly. Each split resolves the pairs inside the left half, the pairs
//! inside the right half, and then the "cross block" of pairs spanning both
//! halves:
//!
//! ```text
//!   pairs([lo, hi)) = pairs([lo, mid)) + pairs([mid, hi)) + [lo, mid) x [mid, hi)
//! ```
//!
//! The two halves are disjoint sub-slices (`split_at_mut`), so they can run on
//! different workers without locking any accumulator. The cross block touches
//! both halves and only starts once both have joined.
//!
//! Every unordered pair is visited exactly once: by the triangle scan of the
//! leaf block containing both bodies, or by the cross block of the one split
//! that separates them.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use log::{info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::simulation::error::SimError;
use crate::simulation::forces::apply_pairwise_force;
use crate::simulation::states::Body;

/// Maximum number of workers a single computation may use
pub const DEFAULT_THREAD_BUDGET: usize = 8;

/// Ranges at or below this size are resolved by a direct triangle scan
pub const DEFAULT_BLOCK_SIZE: usize = 64;

pub struct ForceScheduler {
    thread_budget: usize,
    block_size: usize,
    pool: Option<ThreadPool>, // None: everything runs on the caller
}

impl ForceScheduler {
    /// Build a scheduler with its own worker pool of `thread_budget` threads.
    ///
    /// If the pool cannot be created the scheduler still works, running
    /// every branch on the calling thread.
    pub fn new(thread_budget: usize, block_size: usize) -> Result<Self, SimError> {
        if thread_budget == 0 {
            return Err(SimError::InvalidEngine("thread_budget must be at least 1".into()));
        }
        if block_size == 0 {
            return Err(SimError::InvalidEngine("block_size must be at least 1".into()));
        }

        let pool = if thread_budget > 1 {
            let built = ThreadPoolBuilder::new()
                .num_threads(thread_budget)
                .thread_name(|i| format!("gravsim-force-{i}"))
                .build();
            match built {
                Ok(pool) => {
                    info!("force scheduler: {thread_budget} workers, block size {block_size}");
                    Some(pool)
                }
                Err(e) => {
                    warn!("force scheduler: worker pool unavailable ({e}), running sequentially");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self::with_pool(thread_budget, block_size, pool))
    }

    /// Assemble a scheduler from an already-built pool. Arguments are
    /// assumed valid.
    fn with_pool(thread_budget: usize, block_size: usize, pool: Option<ThreadPool>) -> Self {
        Self {
            thread_budget,
            block_size,
            pool,
        }
    }

    pub fn thread_budget(&self) -> usize {
        self.thread_budget
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Whether branches can actually run on more than one thread
    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Accumulate the pairwise force for every unordered pair of `bodies`.
    ///
    /// Accumulators are added to, not reset.
    pub fn compute(&self, bodies: &mut [Body]) -> Result<(), SimError> {
        self.compute_with(bodies, apply_pairwise_force)
    }

    /// Run `pair` once for every unordered pair `(i, j)`, `i < j`, with body
    /// `i` as the first argument.
    ///
    /// A panic in any branch is caught once every branch has finished and is
    /// returned as [`SimError::ForceComputation`].
    pub fn compute_with<F>(&self, bodies: &mut [Body], pair: F) -> Result<(), SimError>
    where
        F: Fn(&mut Body, &mut Body) + Sync,
    {
        let block_size = self.block_size;
        let pair = &pair;

        let result = panic::catch_unwind(AssertUnwindSafe(|| match &self.pool {
            Some(pool) => pool.install(|| compute_range(bodies, self.thread_budget, block_size, pair)),
            None => compute_range(bodies, 1, block_size, pair),
        }));

        result.map_err(|payload| SimError::ForceComputation(panic_message(payload.as_ref())))
    }
}

fn compute_range<F>(bodies: &mut [Body], threads: usize, block_size: usize, pair: &F)
where
    F: Fn(&mut Body, &mut Body) + Sync,
{
    let count = bodies.len();
    if count <= block_size {
        triangle(bodies, pair);
        return;
    }

    let (left, right) = bodies.split_at_mut(count / 2);

    if threads > 1 {
        // one branch may be stolen by another worker; both must finish here
        rayon::join(
            || compute_range(left, threads - 1, block_size, pair),
            || compute_range(right, threads - 1, block_size, pair),
        );
    } else {
        compute_range(left, threads, block_size, pair);
        compute_range(right, threads, block_size, pair);
    }

    cross_block(left, right, pair);
}

/// Pairs `(i, j)` with `i < j` inside one block
fn triangle<F>(bodies: &mut [Body], pair: &F)
where
    F: Fn(&mut Body, &mut Body),
{
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let bi = &mut head[i];
        for bj in tail.iter_mut() {
            pair(bi, bj);
        }
    }
}

/// Pairs spanning two adjacent blocks
fn cross_block<F>(left: &mut [Body], right: &mut [Body], pair: &F)
where
    F: Fn(&mut Body, &mut Body),
{
    for bi in left.iter_mut() {
        for bj in right.iter_mut() {
            pair(bi, bj);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::accumulate_forces_sequential;
    use crate::simulation::states::{ForceKind, NVec2};

    fn cloud(n: usize) -> Vec<Body> {
        (0..n)
            .map(|i| {
                let x = NVec2::new((i * 37 % 500) as f64, (i * 91 % 300) as f64);
                let kind = if i % 5 == 0 { ForceKind::Repulsive } else { ForceKind::Attractive };
                Body::new(format!("c{i}"), 100.0 + i as f64, 1.0, x, NVec2::zeros(), false, kind)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn missing_pool_falls_back_to_caller_thread() {
        let scheduler = ForceScheduler::with_pool(8, 4, None);
        assert!(!scheduler.is_parallel());
        assert_eq!(scheduler.thread_budget(), 8);

        let mut expected = cloud(100);
        accumulate_forces_sequential(&mut expected);

        let mut bodies = cloud(100);
        let caller = std::thread::current().id();
        scheduler
            .compute_with(&mut bodies, |a, b| {
                assert_eq!(std::thread::current().id(), caller);
                apply_pairwise_force(a, b);
            })
            .unwrap();

        for (got, want) in bodies.iter().zip(&expected) {
            let tolerance = 1e-9 * (1.0 + want.force().norm());
            assert!((got.force() - want.force()).norm() <= tolerance, "{}", got.name());
        }
    }
}
