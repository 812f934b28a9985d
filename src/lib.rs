//! # pardft - parallel direct DFT and sample-wise signal operations
//!
//! Discrete Fourier transforms and simple discrete systems over fixed-length
//! integer sample buffers, with the work divided across the host's cores.
//!
//! ## Overview
//!
//! - **Sequences**: owned integer buffers ([`RealSequence`],
//!   [`ComplexSequence`]) that hand out borrowed windows addressed by
//!   absolute sample index.
//! - **Pool**: a fixed set of named worker threads ([`CorePool`]).
//! - **Range executor**: splits a target window into one contiguous chunk per
//!   worker ([`RangeExecutor`]).
//! - **Summation executor**: one task per output point ([`SummationExecutor`]).
//! - **DFT**: direct `O(n²)` forward and inverse transforms with optional
//!   Hamming or Hanning windows ([`DftEngine`]).
//! - **Fast trigonometry**: table-driven `sin`/`cos` ([`fast_math`]).
//!
//! The DFT here is deliberately not an FFT, and samples are quantized to
//! `i32` on every store.
//!
//! ## Example
//!
//! ```
//! use pardft::{CorePool, DftEngine, RangeExecutor, SineWaveGenerator};
//!
//! let pool = CorePool::new(2)?;
//! let executor = RangeExecutor::new(&pool);
//! let wave = SineWaveGenerator::new(8000).generate(&executor, 1000.0, 0.001, 10_000, 0.0)?;
//!
//! let engine = DftEngine::new(&pool);
//! let spectrum = engine.forward(&wave)?;
//! assert!(spectrum.imaginary_values()[1] < -39_000);
//!
//! let restored = engine.inverse(&spectrum)?;
//! for (a, b) in wave.values().iter().zip(restored.values()) {
//!     assert!((a - b).abs() <= 1);
//! }
//! # Ok::<(), pardft::ProcessingError>(())
//! ```
//!
//! ## Configuration
//!
//! `PARDFT_THREADS` and `PARDFT_MIN_DIVISION_SIZE` override the default
//! worker count and minimum division size; see [`config`].

pub mod config;
pub mod error;
pub mod fast_math;
pub mod pool;
pub mod sequence;

/// Range-partitioning executor and the [`RangeWorker`] trait.
pub mod executor;
/// Point-partitioning executor and the [`SummationWorker`] trait.
pub mod summation;

pub mod dft;
pub mod sine;
pub mod system;
pub mod window;

pub use config::ExecutorConfig;
pub use dft::DftEngine;
pub use error::ProcessingError;
pub use executor::{RangeExecutor, RangeWorker};
pub use pool::CorePool;
pub use sequence::{
    ComplexPoint, ComplexSequence, ComplexView, ComplexViewMut, RealPoint, RealSequence,
    SequenceView, SequenceViewMut, Signal, View, ViewMut,
};
pub use sine::SineWaveGenerator;
pub use summation::{SummationExecutor, SummationWorker};
pub use system::DiscreteSystem;
pub use window::Window;
