//! Sine-wave signal generation.

use std::f64::consts::TAU;

use log::trace;

use crate::error::ProcessingError;
use crate::executor::{RangeExecutor, RangeWorker};
use crate::fast_math;
use crate::sequence::{RealSequence, SequenceView, SequenceViewMut};

/// Relative distance from an integer below which a sample count is taken to
/// be that integer rather than rounded up.
const SAMPLE_COUNT_TOLERANCE: f64 = 1e-9;

/// Number of samples needed to cover `duration` seconds at `sample_rate`,
/// rounded up to the next whole sample.
///
/// Products within a relative `1e-9` of an integer count as that integer, so
/// float noise such as `44100.000000000004` does not add a sample. The same
/// tolerance also absorbs genuinely longer durations that close: one second
/// plus `1e-10` s at 44100 Hz gives 44100 samples, where an exact decimal
/// ceiling would give 44101.
pub fn sample_count(sample_rate: u32, duration: f64) -> usize {
    let exact = duration * sample_rate as f64;
    if !exact.is_finite() || exact <= 0.0 {
        return 0;
    }
    let nearest = exact.round();
    if (exact - nearest).abs() <= SAMPLE_COUNT_TOLERANCE * nearest.max(1.0) {
        nearest as usize
    } else {
        exact.ceil() as usize
    }
}

/// Writes `trunc(amplitude · sin(2π·f·n / rate + phase))` at every absolute
/// sample index `n` of its target.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SineWave {
    sample_rate: f64,
    frequency: f64,
    amplitude: i32,
    phase: f64,
}

impl<'a, 'b> RangeWorker<SequenceViewMut<'a>, SequenceView<'b>> for SineWave {
    fn operate(&self, target: &mut SequenceViewMut<'a>, _operands: &[SequenceView<'b>]) {
        trace!(
            "building sine wave from sample {} to {}",
            target.start(),
            target.end()
        );
        for n in target.indices() {
            let angle = TAU * self.frequency * n as f64 / self.sample_rate + self.phase;
            let value = self.amplitude as f64 * fast_math::sin(angle);
            target.set(n, value as i32);
        }
    }
}

/// Generates sampled sine waves at a fixed sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SineWaveGenerator {
    sample_rate: u32,
}

impl SineWaveGenerator {
    /// Generator sampling at `sample_rate` Hz.
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// Samples per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// A sine wave of `frequency` Hz lasting `duration` seconds, with peak
    /// `amplitude` and a phase offset of `phase` radians.
    pub fn generate(
        &self,
        executor: &RangeExecutor<'_>,
        frequency: f64,
        duration: f64,
        amplitude: i32,
        phase: f64,
    ) -> Result<RealSequence, ProcessingError> {
        let mut sequence = RealSequence::new(sample_count(self.sample_rate, duration));
        let worker = SineWave {
            sample_rate: self.sample_rate as f64,
            frequency,
            amplitude,
            phase,
        };
        executor.execute(&worker, sequence.view_mut(), &[] as &[SequenceView<'_>])?;
        Ok(sequence)
    }
}
