//! Direct (non-FFT) discrete Fourier transform.
//!
//! The forward transform of `N` real samples is
//!
//! ```text
//! Re[k] =  Σ x[n]·w[n]·cos(2πnk/N)
//! Im[k] = -Σ x[n]·w[n]·sin(2πnk/N)
//! ```
//!
//! and the inverse is `x[n] = (1/N)·Σ (Re[k]·cos(2πnk/N) - Im[k]·sin(2πnk/N))`.
//! Sums are accumulated in `f64` and truncated toward zero when stored. Every
//! output bin is an independent task on the [`SummationExecutor`].
//!
//! The spectrum of a real signal is conjugate-symmetric, so the forward
//! transform only sums the first [`independent_points`] bins and fills the
//! rest as `Re[k] = Re[N-k]`, `Im[k] = -Im[N-k]` through the
//! [`RangeExecutor`].

use std::f64::consts::TAU;

use log::trace;

use crate::config::ExecutorConfig;
use crate::error::ProcessingError;
use crate::executor::{RangeExecutor, RangeWorker};
use crate::fast_math;
use crate::pool::CorePool;
use crate::sequence::{
    ComplexPoint, ComplexSequence, ComplexView, ComplexViewMut, RealPoint, RealSequence,
    SequenceView,
};
use crate::summation::{SummationExecutor, SummationWorker};
use crate::window::Window;

/// Number of bins of an `n`-point real spectrum that are not mirror images
/// of other bins.
pub fn independent_points(n: usize) -> usize {
    if n % 2 == 0 {
        n / 2 + 1
    } else {
        (n + 1) / 2
    }
}

/// Per-bin DFT summation with optional window weights.
#[derive(Debug, Clone, PartialEq)]
pub struct DftSummation {
    weights: Option<Vec<f64>>,
}

impl DftSummation {
    /// Summation for `len` input samples weighted by `window`.
    pub fn new(window: Window, len: usize) -> Self {
        let weights = window
            .raised_cosine()
            .map(|_| window.coefficients(len));
        Self { weights }
    }

    #[inline]
    fn weight(&self, n: usize) -> f64 {
        self.weights.as_ref().map_or(1.0, |weights| weights[n])
    }
}

impl SummationWorker<RealSequence, ComplexSequence> for DftSummation {
    fn forward(&self, point: usize, inputs: &[SequenceView<'_>], output: &mut ComplexPoint<'_>) {
        let Some(input) = inputs.first() else {
            panic!("forward DFT of bin {} has no input sequence", point);
        };
        let len = input.len() as f64;
        let mut real = 0.0f64;
        let mut imaginary = 0.0f64;
        for (n, &sample) in input.values().iter().enumerate() {
            let angle = TAU * n as f64 * point as f64 / len;
            let sample = sample as f64 * self.weight(n);
            real += sample * fast_math::cos(angle);
            imaginary -= sample * fast_math::sin(angle);
        }
        output.set(real as i32, imaginary as i32);
    }

    fn inverse(&self, point: usize, inputs: &[ComplexView<'_>], output: &mut RealPoint<'_>) {
        let Some(input) = inputs.first() else {
            panic!("inverse DFT of sample {} has no input spectrum", point);
        };
        let len = input.len() as f64;
        let mut sum = 0.0f64;
        for (k, (&real, &imaginary)) in input
            .real_values()
            .iter()
            .zip(input.imaginary_values())
            .enumerate()
        {
            let angle = TAU * point as f64 * k as f64 / len;
            sum += real as f64 * fast_math::cos(angle) - imaginary as f64 * fast_math::sin(angle);
        }
        output.set((sum / len) as i32);
    }
}

/// Fills the dependent upper half of a real spectrum from its lower half.
///
/// The target covers bins `[independent_points, N - 1]`; the single operand
/// covers `[0, independent_points - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpectrumMirror {
    independent_points: usize,
    offset: usize,
}

impl SpectrumMirror {
    fn new(len: usize) -> Self {
        Self {
            independent_points: independent_points(len),
            offset: if len % 2 == 0 { 2 } else { 1 },
        }
    }
}

impl<'a, 'b> RangeWorker<ComplexViewMut<'a>, ComplexView<'b>> for SpectrumMirror {
    fn operate(&self, target: &mut ComplexViewMut<'a>, operands: &[ComplexView<'b>]) {
        let Some(lower) = operands.first() else {
            panic!("spectrum mirror needs the independent half as an operand");
        };
        for k in target.indices() {
            let from = self.independent_points - (k - self.independent_points) - self.offset;
            let (real, imaginary) = lower.get(from);
            target.set(k, real, imaginary.saturating_neg());
        }
    }
}

/// Forward and inverse DFT over a [`CorePool`].
#[derive(Debug, Clone, Copy)]
pub struct DftEngine<'p> {
    range: RangeExecutor<'p>,
    summation: SummationExecutor<'p>,
    window: Window,
}

impl<'p> DftEngine<'p> {
    /// Engine without a window, using the configured minimum division size.
    pub fn new(pool: &'p CorePool) -> Self {
        Self {
            range: RangeExecutor::new(pool),
            summation: SummationExecutor::new(pool),
            window: Window::Rectangular,
        }
    }

    /// Engine without a window whose spectrum mirror is split according to
    /// `config`.
    pub fn from_config(pool: &'p CorePool, config: &ExecutorConfig) -> Self {
        Self {
            range: RangeExecutor::from_config(pool, config),
            summation: SummationExecutor::new(pool),
            window: Window::Rectangular,
        }
    }

    /// Apply `window` to the input of [`forward`](Self::forward).
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Window applied to forward input.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Spectrum of `input`, one bin per input sample.
    ///
    /// Bins are accumulated in `f64` and truncated toward zero on store. A
    /// bin whose magnitude exceeds the `i32` range saturates at `i32::MAX`
    /// or `i32::MIN`; this happens for example to `Re[0]` of more than about
    /// 65 000 full-scale samples.
    pub fn forward<'a>(
        &self,
        input: impl Into<SequenceView<'a>>,
    ) -> Result<ComplexSequence, ProcessingError> {
        let input = input.into();
        if input.is_empty() {
            return Err(ProcessingError::EmptyInput);
        }
        let len = input.len();
        let independent = independent_points(len);
        trace!(
            "forward DFT of {} samples ({} independent bins, {:?} window)",
            len,
            independent,
            self.window
        );

        let worker = DftSummation::new(self.window, len);
        let mut spectrum = ComplexSequence::new(len);
        self.summation
            .execute_forward_range::<RealSequence, ComplexSequence, _>(
                &worker,
                &[input],
                &mut spectrum,
                0..independent,
            )?;

        let (lower, upper) = spectrum.view_mut().split_at(independent);
        if !upper.is_empty() {
            self.range
                .execute(&SpectrumMirror::new(len), upper, &[lower.into_view()])?;
        }
        Ok(spectrum)
    }

    /// Real signal whose spectrum is `input`.
    ///
    /// The `1/N` scale is applied before truncation; samples outside the
    /// `i32` range saturate like the forward bins.
    pub fn inverse<'a>(
        &self,
        input: impl Into<ComplexView<'a>>,
    ) -> Result<RealSequence, ProcessingError> {
        let input = input.into();
        if input.is_empty() {
            return Err(ProcessingError::EmptyInput);
        }
        let len = input.len();
        trace!("inverse DFT of {} bins", len);

        let worker = DftSummation::new(Window::Rectangular, len);
        let mut signal = RealSequence::new(len);
        self.summation
            .execute_inverse::<RealSequence, ComplexSequence, _>(&worker, &[input], &mut signal)?;
        Ok(signal)
    }
}
