//! Parallel execution settings.
//!
//! Defaults come from the host and can be overridden through the environment:
//!
//! * `PARDFT_THREADS` - number of pool workers (`0` keeps the default)
//! * `PARDFT_MIN_DIVISION_SIZE` - shortest range the range executor will split
//!
//! The environment is read once per process.

use std::sync::OnceLock;

use log::warn;

/// Shortest sequence worth splitting across cores. Below this the cost of
/// dividing the work outweighs the parallel speedup.
pub const DEFAULT_MINIMUM_DIVISION_SIZE: usize = 8820;

/// Overrides the worker count; `0` or an unparsable value keeps the default.
pub const THREADS_ENV: &str = "PARDFT_THREADS";
/// Overrides the minimum division size of the range executor.
pub const MIN_DIVISION_SIZE_ENV: &str = "PARDFT_MIN_DIVISION_SIZE";

static PARALLEL_ENV: OnceLock<ParallelEnv> = OnceLock::new();

struct ParallelEnv {
    threads: Option<usize>,
    minimum_division_size: Option<usize>,
}

fn parse_env(name: &str) -> Option<usize> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {}={:?}: not a non-negative integer", name, raw);
            None
        }
    }
}

fn parallel_env() -> &'static ParallelEnv {
    PARALLEL_ENV.get_or_init(|| ParallelEnv {
        threads: parse_env(THREADS_ENV).filter(|&threads| threads != 0),
        minimum_division_size: parse_env(MIN_DIVISION_SIZE_ENV),
    })
}

/// Worker count for a host with `available_processors` logical cores: one
/// core is left for the calling thread, but never fewer than one worker.
pub fn default_core_count(available_processors: usize) -> usize {
    available_processors.saturating_sub(1).max(1)
}

/// Settings for the worker pool and the range executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub cores: usize,
    pub minimum_division_size: usize,
}

impl ExecutorConfig {
    /// Host defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let env = parallel_env();
        Self {
            cores: env
                .threads
                .unwrap_or_else(|| default_core_count(num_cpus::get())),
            minimum_division_size: env
                .minimum_division_size
                .unwrap_or(DEFAULT_MINIMUM_DIVISION_SIZE),
        }
    }

    /// Use exactly `cores` workers.
    pub fn with_cores(mut self, cores: usize) -> Self {
        self.cores = cores.max(1);
        self
    }

    /// Split range work only for targets of at least `size` samples.
    pub fn with_minimum_division_size(mut self, size: usize) -> Self {
        self.minimum_division_size = size;
        self
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_one_core_for_the_caller() {
        assert_eq!(default_core_count(8), 7);
        assert_eq!(default_core_count(2), 1);
    }

    #[test]
    fn never_drops_below_one_worker() {
        assert_eq!(default_core_count(1), 1);
        assert_eq!(default_core_count(0), 1);
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = ExecutorConfig::from_env()
            .with_cores(3)
            .with_minimum_division_size(100);
        assert_eq!(config.cores, 3);
        assert_eq!(config.minimum_division_size, 100);
        assert_eq!(ExecutorConfig::from_env().with_cores(0).cores, 1);
    }
}
