//! Range-partitioning executor.
//!
//! [`RangeExecutor::execute`] splits a target window into contiguous chunks,
//! one per pool worker, and runs a [`RangeWorker`] on every chunk in
//! parallel. Operand windows with the same length as the target are taken to
//! be sample-aligned with it and are cut at the same positions; shorter or
//! longer operands are handed whole to every chunk.
//!
//! Short targets are not worth dividing: below the minimum division size the
//! worker runs once, on the calling thread.

use log::trace;

use crate::config::ExecutorConfig;
use crate::error::ProcessingError;
use crate::pool::{run_guarded, CorePool};
use crate::sequence::{View, ViewMut};

/// An in-place operation over one window of samples.
///
/// `target` is exclusive to this invocation; `operands` are read-only and may
/// be shared with other invocations running at the same time.
pub trait RangeWorker<M, V>: Sync {
    fn operate(&self, target: &mut M, operands: &[V]);
}

impl<M, V, F> RangeWorker<M, V> for F
where
    F: Fn(&mut M, &[V]) + Sync,
{
    fn operate(&self, target: &mut M, operands: &[V]) {
        self(target, operands)
    }
}

/// Divides range work across a [`CorePool`].
#[derive(Debug, Clone, Copy)]
pub struct RangeExecutor<'p> {
    pool: &'p CorePool,
    minimum_division_size: usize,
}

impl<'p> RangeExecutor<'p> {
    /// Executor over `pool` using the configured minimum division size.
    pub fn new(pool: &'p CorePool) -> Self {
        Self::with_minimum_division_size(pool, ExecutorConfig::from_env().minimum_division_size)
    }

    /// Executor over `pool` that splits only targets of at least
    /// `minimum_division_size` samples.
    pub fn with_minimum_division_size(pool: &'p CorePool, minimum_division_size: usize) -> Self {
        Self {
            pool,
            minimum_division_size,
        }
    }

    /// Executor over `pool` with the minimum division size from `config`.
    pub fn from_config(pool: &'p CorePool, config: &ExecutorConfig) -> Self {
        Self::with_minimum_division_size(pool, config.minimum_division_size)
    }

    /// Pool the chunks run on.
    pub fn pool(&self) -> &'p CorePool {
        self.pool
    }

    /// Shortest target that is split across cores.
    pub fn minimum_division_size(&self) -> usize {
        self.minimum_division_size
    }

    /// Run `worker` over `target`, in parallel chunks when it is long enough.
    ///
    /// Blocks until every chunk is done. If any chunk panics the first
    /// failure is returned and the contents of `target` are unspecified.
    pub fn execute<M, V, W>(&self, worker: &W, target: M, operands: &[V]) -> Result<(), ProcessingError>
    where
        M: ViewMut,
        V: View,
        W: RangeWorker<M, V> + ?Sized,
    {
        let length = target.len();
        if length == 0 || length < self.minimum_division_size {
            trace!(
                "running {} samples on the calling thread (minimum division size {})",
                length,
                self.minimum_division_size
            );
            let mut target = target;
            return run_guarded(|| worker.operate(&mut target, operands));
        }

        let chunk_size = length.div_ceil(self.pool.cores());
        let first = target.start();
        trace!(
            "dividing [{}, {}] into chunks of {} samples",
            first,
            target.end(),
            chunk_size
        );

        let mut tasks = Vec::with_capacity(self.pool.cores());
        let mut rest = target;
        loop {
            let chunk_length = chunk_size.min(rest.len());
            let split = rest.start() + chunk_length;
            let (mut chunk, tail) = rest.split_at(split);
            let offset = chunk.start() - first;
            let chunk_operands: Vec<V> = operands
                .iter()
                .map(|operand| {
                    if operand.len() == length {
                        let start = operand.start() + offset;
                        operand.subsequence(start, start + chunk_length - 1)
                    } else {
                        *operand
                    }
                })
                .collect();
            tasks.push(move || worker.operate(&mut chunk, &chunk_operands));

            if tail.is_empty() {
                break;
            }
            rest = tail;
        }

        self.pool.submit_all(tasks).map(|_| ())
    }
}
