//! Fixed-size worker pool sized to the host's cores.
//!
//! [`CorePool`] wraps a [`rayon::ThreadPool`] with a fixed number of named
//! threads (`pool-worker-1`, `pool-worker-2`, ...). Work is submitted as a
//! batch through [`CorePool::submit_all`], which blocks until every task has
//! finished. A panicking task is logged with the name of the thread it ran on
//! and reported back to the caller as [`ProcessingError::WorkerFailure`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::OnceLock;

use log::{debug, error, trace};

use crate::config::ExecutorConfig;
use crate::error::ProcessingError;

static GLOBAL_POOL: OnceLock<CorePool> = OnceLock::new();

/// Prefix of every pool thread name.
pub const THREAD_NAME_PREFIX: &str = "pool-worker-";

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn current_worker_name() -> String {
    std::thread::current()
        .name()
        .unwrap_or("unnamed")
        .to_string()
}

/// Run `task` on the current thread, turning a panic into a
/// [`ProcessingError::WorkerFailure`].
pub(crate) fn run_guarded<T, F>(task: F) -> Result<T, ProcessingError>
where
    F: FnOnce() -> T,
{
    panic::catch_unwind(AssertUnwindSafe(task)).map_err(|payload| {
        let worker = current_worker_name();
        let cause = panic_message(payload.as_ref());
        error!("uncaught panic in thread {}: {}", worker, cause);
        ProcessingError::WorkerFailure { worker, cause }
    })
}

/// A bounded pool of persistent worker threads.
#[derive(Debug)]
pub struct CorePool {
    cores: usize,
    pool: rayon::ThreadPool,
}

impl CorePool {
    /// Build a pool with exactly `cores` workers (at least one).
    pub fn new(cores: usize) -> Result<Self, ProcessingError> {
        let cores = cores.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(cores)
            .thread_name(|index| format!("{}{}", THREAD_NAME_PREFIX, index + 1))
            .start_handler(|index| trace!("created thread {}{}", THREAD_NAME_PREFIX, index + 1))
            .panic_handler(|payload| {
                error!(
                    "uncaught panic in thread {}: {}",
                    current_worker_name(),
                    panic_message(payload.as_ref())
                )
            })
            .build()
            .map_err(|err| ProcessingError::PoolBuild(err.to_string()))?;
        debug!(
            "created a parallel execution environment using {} threads",
            cores
        );
        Ok(Self { cores, pool })
    }

    /// Build a pool sized from `config`.
    pub fn from_config(config: &ExecutorConfig) -> Result<Self, ProcessingError> {
        Self::new(config.cores)
    }

    /// Build a pool with `max(available cores - 1, 1)` workers, or the
    /// `PARDFT_THREADS` override.
    pub fn try_default() -> Result<Self, ProcessingError> {
        Self::from_config(&ExecutorConfig::from_env())
    }

    /// The process-wide pool, built on first use with [`try_default`].
    ///
    /// [`try_default`]: CorePool::try_default
    pub fn global() -> Result<&'static CorePool, ProcessingError> {
        if let Some(pool) = GLOBAL_POOL.get() {
            return Ok(pool);
        }
        let pool = Self::try_default()?;
        // A concurrent caller may have won the race; its pool is kept and
        // ours is dropped.
        Ok(GLOBAL_POOL.get_or_init(|| pool))
    }

    /// Number of worker threads.
    pub fn cores(&self) -> usize {
        self.cores
    }

    /// Run every task on the pool and wait for all of them.
    ///
    /// Results come back in submission order. If any task panics, the error
    /// of the lowest-numbered failing task is returned and the other results
    /// are discarded.
    pub fn submit_all<'a, T, F>(&self, tasks: Vec<F>) -> Result<Vec<T>, ProcessingError>
    where
        F: FnOnce() -> T + Send + 'a,
        T: Send + 'a,
    {
        let total = tasks.len();
        let (sender, receiver) = mpsc::channel();
        self.pool.scope(move |scope| {
            for (index, task) in tasks.into_iter().enumerate() {
                let sender = sender.clone();
                scope.spawn(move |_| {
                    let result = run_guarded(task);
                    // The receiver outlives the scope, so this cannot fail.
                    let _ = sender.send((index, result));
                });
            }
        });

        let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
        let mut failure: Option<(usize, ProcessingError)> = None;
        for (index, result) in receiver.try_iter() {
            match result {
                Ok(value) => slots[index] = Some(value),
                Err(err) => {
                    if failure.as_ref().map_or(true, |(first, _)| index < *first) {
                        failure = Some((index, err));
                    }
                }
            }
        }
        if let Some((_, err)) = failure {
            return Err(err);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    ProcessingError::Interrupted(format!("task {} did not report a result", index))
                })
            })
            .collect()
    }
}
