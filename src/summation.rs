//! Point-partitioning executor for summation transforms.
//!
//! Transforms such as the DFT compute every output sample from the whole
//! input. [`SummationExecutor`] therefore partitions the *output*: it submits
//! one task per output index, each task reading all of the inputs and holding
//! an exclusive handle to the single output sample it computes.

use core::ops::Range;

use log::trace;

use crate::error::ProcessingError;
use crate::pool::CorePool;
use crate::sequence::Signal;

/// A transform computed one output point at a time.
///
/// `forward` maps `T` inputs to a `V` output and `inverse` maps back. Each
/// call computes only the sample at `point`, which is also
/// `output.index()`.
pub trait SummationWorker<T: Signal, V: Signal>: Sync {
    fn forward(&self, point: usize, inputs: &[T::View<'_>], output: &mut V::Point<'_>);
    fn inverse(&self, point: usize, inputs: &[V::View<'_>], output: &mut T::Point<'_>);
}

/// Runs summation workers on a [`CorePool`], one task per output point.
#[derive(Debug, Clone, Copy)]
pub struct SummationExecutor<'p> {
    pool: &'p CorePool,
}

impl<'p> SummationExecutor<'p> {
    /// Executor submitting its tasks to `pool`.
    pub fn new(pool: &'p CorePool) -> Self {
        Self { pool }
    }

    /// Pool the per-point tasks run on.
    pub fn pool(&self) -> &'p CorePool {
        self.pool
    }

    /// Compute every point of `output` with [`SummationWorker::forward`].
    pub fn execute_forward<T, V, W>(
        &self,
        worker: &W,
        inputs: &[T::View<'_>],
        output: &mut V,
    ) -> Result<(), ProcessingError>
    where
        T: Signal,
        V: Signal,
        W: SummationWorker<T, V> + ?Sized,
    {
        let points = 0..output.len();
        self.execute_forward_range(worker, inputs, output, points)
    }

    /// Compute only the output indices in `points` with
    /// [`SummationWorker::forward`]; other samples of `output` are untouched.
    pub fn execute_forward_range<T, V, W>(
        &self,
        worker: &W,
        inputs: &[T::View<'_>],
        output: &mut V,
        points: Range<usize>,
    ) -> Result<(), ProcessingError>
    where
        T: Signal,
        V: Signal,
        W: SummationWorker<T, V> + ?Sized,
    {
        trace!("submitting {} forward summation points", points.len());
        let tasks: Vec<_> = output
            .points_mut(points.clone())
            .into_iter()
            .zip(points)
            .map(|(mut output, point)| move || worker.forward(point, inputs, &mut output))
            .collect();
        self.pool.submit_all(tasks).map(|_| ())
    }

    /// Compute every point of `output` with [`SummationWorker::inverse`].
    pub fn execute_inverse<T, V, W>(
        &self,
        worker: &W,
        inputs: &[V::View<'_>],
        output: &mut T,
    ) -> Result<(), ProcessingError>
    where
        T: Signal,
        V: Signal,
        W: SummationWorker<T, V> + ?Sized,
    {
        let points = 0..output.len();
        self.execute_inverse_range(worker, inputs, output, points)
    }

    /// Inverse counterpart of [`execute_forward_range`].
    ///
    /// [`execute_forward_range`]: SummationExecutor::execute_forward_range
    pub fn execute_inverse_range<T, V, W>(
        &self,
        worker: &W,
        inputs: &[V::View<'_>],
        output: &mut T,
        points: Range<usize>,
    ) -> Result<(), ProcessingError>
    where
        T: Signal,
        V: Signal,
        W: SummationWorker<T, V> + ?Sized,
    {
        trace!("submitting {} inverse summation points", points.len());
        let tasks: Vec<_> = output
            .points_mut(points.clone())
            .into_iter()
            .zip(points)
            .map(|(mut output, point)| move || worker.inverse(point, inputs, &mut output))
            .collect();
        self.pool.submit_all(tasks).map(|_| ())
    }
}
