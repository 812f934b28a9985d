//! Integer sample buffers and borrowed windows over them.
//!
//! [`RealSequence`] and [`ComplexSequence`] own their samples. Work on a part
//! of a sequence goes through windows that borrow the backing storage and keep
//! the absolute `[start, end]` position of the part they cover:
//!
//! * [`SequenceView`] / [`ComplexView`] are read-only, `Copy`, and may overlap.
//! * [`SequenceViewMut`] / [`ComplexViewMut`] are exclusive. They can only be
//!   split into disjoint halves, so code holding one window can never write
//!   outside of it.
//!
//! All windows are indexed by absolute sample number, the same index the
//! sample has in the owning sequence.

use core::ops::{Index, Range};

use crate::error::ProcessingError;

/// A read-only window that can be narrowed.
pub trait View: Copy + Send + Sync {
    /// Absolute index of the first sample.
    fn start(&self) -> usize;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Absolute index of the last sample.
    fn end(&self) -> usize {
        (self.start() + self.len()).saturating_sub(1)
    }
    /// The sub-window `[start, end]`, sharing the same storage.
    fn subsequence(&self, start: usize, end: usize) -> Self;
}

/// An exclusive window that can be divided into disjoint parts.
pub trait ViewMut: Send + Sized {
    fn start(&self) -> usize;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn end(&self) -> usize {
        (self.start() + self.len()).saturating_sub(1)
    }
    /// Split at absolute index `mid` into `[start, mid)` and `[mid, end]`.
    fn split_at(self, mid: usize) -> (Self, Self);
}

#[inline]
fn local(start: usize, len: usize, index: usize) -> usize {
    match index.checked_sub(start) {
        Some(offset) if offset < len => offset,
        _ => panic!(
            "index {} is outside the window starting at {} with {} samples",
            index, start, len
        ),
    }
}

#[inline]
fn local_range(start: usize, len: usize, from: usize, to: usize) -> Range<usize> {
    assert!(from <= to, "inverted window [{}, {}]", from, to);
    local(start, len, from)..local(start, len, to) + 1
}

#[inline]
fn split_offset(start: usize, len: usize, mid: usize) -> usize {
    match mid.checked_sub(start) {
        Some(offset) if offset <= len => offset,
        _ => panic!(
            "split point {} is outside the window starting at {} with {} samples",
            mid, start, len
        ),
    }
}

/// Read-only window over real samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceView<'a> {
    values: &'a [i32],
    start: usize,
}

impl<'a> SequenceView<'a> {
    /// Absolute index of the first sample.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Absolute index of the last sample.
    pub fn end(&self) -> usize {
        (self.start + self.values.len()).saturating_sub(1)
    }

    /// Absolute indices covered by this window.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.start + self.values.len()
    }

    /// Sample at absolute `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` lies outside the window.
    #[inline]
    pub fn get(&self, index: usize) -> i32 {
        self.values[local(self.start, self.values.len(), index)]
    }

    /// The samples in this window, first one at [`start`](Self::start).
    pub fn values(&self) -> &'a [i32] {
        self.values
    }

    /// The sub-window `[start, end]` in absolute indices.
    ///
    /// # Panics
    ///
    /// Panics if `[start, end]` is not inside this window.
    pub fn subsequence(&self, start: usize, end: usize) -> Self {
        let range = local_range(self.start, self.values.len(), start, end);
        Self {
            values: &self.values[range],
            start,
        }
    }
}

impl View for SequenceView<'_> {
    fn start(&self) -> usize {
        self.start
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn subsequence(&self, start: usize, end: usize) -> Self {
        SequenceView::subsequence(self, start, end)
    }
}

/// Exclusive window over real samples.
#[derive(Debug, PartialEq, Eq)]
pub struct SequenceViewMut<'a> {
    values: &'a mut [i32],
    start: usize,
}

impl<'a> SequenceViewMut<'a> {
    /// Absolute index of the first sample.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Absolute index of the last sample.
    pub fn end(&self) -> usize {
        (self.start + self.values.len()).saturating_sub(1)
    }

    /// Absolute indices covered by this window.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.start + self.values.len()
    }

    /// Sample at absolute `index`.
    #[inline]
    pub fn get(&self, index: usize) -> i32 {
        self.values[local(self.start, self.values.len(), index)]
    }

    /// Overwrite the sample at absolute `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` lies outside the window.
    #[inline]
    pub fn set(&mut self, index: usize, value: i32) {
        let offset = local(self.start, self.values.len(), index);
        self.values[offset] = value;
    }

    /// Mutable reference to the sample at absolute `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut i32 {
        let offset = local(self.start, self.values.len(), index);
        &mut self.values[offset]
    }

    /// The samples in this window.
    pub fn values(&self) -> &[i32] {
        &*self.values
    }

    /// The samples in this window, mutably.
    pub fn values_mut(&mut self) -> &mut [i32] {
        &mut *self.values
    }

    /// Reborrow as a read-only window.
    pub fn as_view(&self) -> SequenceView<'_> {
        SequenceView {
            values: &*self.values,
            start: self.start,
        }
    }

    /// Give up exclusivity, keeping the full borrow.
    pub fn into_view(self) -> SequenceView<'a> {
        SequenceView {
            values: self.values,
            start: self.start,
        }
    }

    /// Split at absolute index `mid` into `[start, mid)` and `[mid, end]`.
    pub fn split_at(self, mid: usize) -> (Self, Self) {
        let offset = split_offset(self.start, self.values.len(), mid);
        let (head, tail) = self.values.split_at_mut(offset);
        (
            Self {
                values: head,
                start: self.start,
            },
            Self {
                values: tail,
                start: mid,
            },
        )
    }
}

impl ViewMut for SequenceViewMut<'_> {
    fn start(&self) -> usize {
        self.start
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn split_at(self, mid: usize) -> (Self, Self) {
        SequenceViewMut::split_at(self, mid)
    }
}

/// Read-only window over complex samples stored as parallel real and
/// imaginary arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexView<'a> {
    real: &'a [i32],
    imaginary: &'a [i32],
    start: usize,
}

impl<'a> ComplexView<'a> {
    /// Absolute index of the first sample.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.real.len()
    }

    /// Whether the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Absolute index of the last sample.
    pub fn end(&self) -> usize {
        (self.start + self.real.len()).saturating_sub(1)
    }

    /// Absolute indices covered by this window.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.start + self.real.len()
    }

    /// `(real, imaginary)` at absolute `index`.
    #[inline]
    pub fn get(&self, index: usize) -> (i32, i32) {
        let offset = local(self.start, self.real.len(), index);
        (self.real[offset], self.imaginary[offset])
    }

    /// Real part at absolute `index`.
    #[inline]
    pub fn real(&self, index: usize) -> i32 {
        self.real[local(self.start, self.real.len(), index)]
    }

    /// Imaginary part at absolute `index`.
    #[inline]
    pub fn imaginary(&self, index: usize) -> i32 {
        self.imaginary[local(self.start, self.real.len(), index)]
    }

    /// Real parts of the window.
    pub fn real_values(&self) -> &'a [i32] {
        self.real
    }

    /// Imaginary parts of the window.
    pub fn imaginary_values(&self) -> &'a [i32] {
        self.imaginary
    }

    /// The sub-window `[start, end]` in absolute indices.
    pub fn subsequence(&self, start: usize, end: usize) -> Self {
        let range = local_range(self.start, self.real.len(), start, end);
        Self {
            real: &self.real[range.clone()],
            imaginary: &self.imaginary[range],
            start,
        }
    }
}

impl View for ComplexView<'_> {
    fn start(&self) -> usize {
        self.start
    }

    fn len(&self) -> usize {
        self.real.len()
    }

    fn subsequence(&self, start: usize, end: usize) -> Self {
        ComplexView::subsequence(self, start, end)
    }
}

/// Exclusive window over complex samples.
#[derive(Debug, PartialEq, Eq)]
pub struct ComplexViewMut<'a> {
    real: &'a mut [i32],
    imaginary: &'a mut [i32],
    start: usize,
}

impl<'a> ComplexViewMut<'a> {
    /// Absolute index of the first sample.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.real.len()
    }

    /// Whether the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Absolute index of the last sample.
    pub fn end(&self) -> usize {
        (self.start + self.real.len()).saturating_sub(1)
    }

    /// Absolute indices covered by this window.
    pub fn indices(&self) -> Range<usize> {
        self.start..self.start + self.real.len()
    }

    /// `(real, imaginary)` at absolute `index`.
    #[inline]
    pub fn get(&self, index: usize) -> (i32, i32) {
        let offset = local(self.start, self.real.len(), index);
        (self.real[offset], self.imaginary[offset])
    }

    /// Overwrite both parts at absolute `index`.
    #[inline]
    pub fn set(&mut self, index: usize, real: i32, imaginary: i32) {
        let offset = local(self.start, self.real.len(), index);
        self.real[offset] = real;
        self.imaginary[offset] = imaginary;
    }

    /// Real parts of the window, mutably.
    pub fn real_values_mut(&mut self) -> &mut [i32] {
        &mut *self.real
    }

    /// Imaginary parts of the window, mutably.
    pub fn imaginary_values_mut(&mut self) -> &mut [i32] {
        &mut *self.imaginary
    }

    /// Reborrow as a read-only window.
    pub fn as_view(&self) -> ComplexView<'_> {
        ComplexView {
            real: &*self.real,
            imaginary: &*self.imaginary,
            start: self.start,
        }
    }

    /// Give up exclusivity, keeping the full borrow.
    pub fn into_view(self) -> ComplexView<'a> {
        ComplexView {
            real: self.real,
            imaginary: self.imaginary,
            start: self.start,
        }
    }

    /// Split at absolute index `mid` into `[start, mid)` and `[mid, end]`.
    pub fn split_at(self, mid: usize) -> (Self, Self) {
        let offset = split_offset(self.start, self.real.len(), mid);
        let (real_head, real_tail) = self.real.split_at_mut(offset);
        let (imaginary_head, imaginary_tail) = self.imaginary.split_at_mut(offset);
        (
            Self {
                real: real_head,
                imaginary: imaginary_head,
                start: self.start,
            },
            Self {
                real: real_tail,
                imaginary: imaginary_tail,
                start: mid,
            },
        )
    }
}

impl ViewMut for ComplexViewMut<'_> {
    fn start(&self) -> usize {
        self.start
    }

    fn len(&self) -> usize {
        self.real.len()
    }

    fn split_at(self, mid: usize) -> (Self, Self) {
        ComplexViewMut::split_at(self, mid)
    }
}

/// Handle to a single real output sample.
#[derive(Debug)]
pub struct RealPoint<'a> {
    index: usize,
    value: &'a mut i32,
}

impl RealPoint<'_> {
    /// Absolute index of this sample.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current value.
    pub fn get(&self) -> i32 {
        *self.value
    }

    /// Overwrite the value.
    pub fn set(&mut self, value: i32) {
        *self.value = value;
    }
}

/// Handle to a single complex output sample.
#[derive(Debug)]
pub struct ComplexPoint<'a> {
    index: usize,
    real: &'a mut i32,
    imaginary: &'a mut i32,
}

impl ComplexPoint<'_> {
    /// Absolute index of this sample.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current `(real, imaginary)` value.
    pub fn get(&self) -> (i32, i32) {
        (*self.real, *self.imaginary)
    }

    /// Overwrite both parts.
    pub fn set(&mut self, real: i32, imaginary: i32) {
        *self.real = real;
        *self.imaginary = imaginary;
    }
}

/// An owned sequence whose samples can be handed out one output slot at a
/// time.
pub trait Signal {
    /// Read-only window type over this kind of sequence.
    type View<'a>: View
    where
        Self: 'a;
    /// Exclusive handle to one sample.
    type Point<'a>: Send
    where
        Self: 'a;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One handle per index in `points`, in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `points` extends past the end of the sequence.
    fn points_mut(&mut self, points: Range<usize>) -> Vec<Self::Point<'_>>;
}

/// Owned real-valued sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RealSequence {
    values: Vec<i32>,
}

impl RealSequence {
    /// Zero-filled sequence of `samples` samples, spanning `[0, samples - 1]`.
    pub fn new(samples: usize) -> Self {
        Self {
            values: vec![0; samples],
        }
    }

    /// Sequence holding `values`, spanning `[0, values.len() - 1]`.
    pub fn from_values(values: Vec<i32>) -> Self {
        Self { values }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sequence holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Absolute index of the first sample, always `0`.
    pub fn start(&self) -> usize {
        0
    }

    /// Absolute index of the last sample.
    pub fn end(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// All samples.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// All samples, mutably.
    pub fn values_mut(&mut self) -> &mut [i32] {
        &mut self.values
    }

    /// Take the samples out.
    pub fn into_values(self) -> Vec<i32> {
        self.values
    }

    /// Read-only window over the whole sequence.
    pub fn view(&self) -> SequenceView<'_> {
        SequenceView {
            values: &self.values,
            start: 0,
        }
    }

    /// Exclusive window over the whole sequence.
    pub fn view_mut(&mut self) -> SequenceViewMut<'_> {
        SequenceViewMut {
            values: &mut self.values,
            start: 0,
        }
    }

    /// Read-only window `[start, end]` sharing this sequence's storage.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end` is past the last sample.
    pub fn subsequence(&self, start: usize, end: usize) -> SequenceView<'_> {
        self.view().subsequence(start, end)
    }

    /// Exclusive window `[start, end]`.
    pub fn subsequence_mut(&mut self, start: usize, end: usize) -> SequenceViewMut<'_> {
        let range = local_range(0, self.values.len(), start, end);
        SequenceViewMut {
            values: &mut self.values[range],
            start,
        }
    }
}

impl From<Vec<i32>> for RealSequence {
    fn from(values: Vec<i32>) -> Self {
        Self::from_values(values)
    }
}

impl Index<usize> for RealSequence {
    type Output = i32;

    fn index(&self, index: usize) -> &i32 {
        &self.values[index]
    }
}

impl<'a> From<&'a RealSequence> for SequenceView<'a> {
    fn from(sequence: &'a RealSequence) -> Self {
        sequence.view()
    }
}

impl<'a> From<&'a mut RealSequence> for SequenceViewMut<'a> {
    fn from(sequence: &'a mut RealSequence) -> Self {
        sequence.view_mut()
    }
}

impl Signal for RealSequence {
    type View<'a> = SequenceView<'a>;
    type Point<'a> = RealPoint<'a>;

    fn len(&self) -> usize {
        self.values.len()
    }

    fn points_mut(&mut self, points: Range<usize>) -> Vec<RealPoint<'_>> {
        self.values[points.clone()]
            .iter_mut()
            .zip(points)
            .map(|(value, index)| RealPoint { index, value })
            .collect()
    }
}

/// Owned complex-valued sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComplexSequence {
    real: Vec<i32>,
    imaginary: Vec<i32>,
}

impl ComplexSequence {
    /// Zero-filled sequence of `samples` samples.
    pub fn new(samples: usize) -> Self {
        Self {
            real: vec![0; samples],
            imaginary: vec![0; samples],
        }
    }

    /// Build from separate real and imaginary parts of equal length.
    pub fn from_parts(real: Vec<i32>, imaginary: Vec<i32>) -> Result<Self, ProcessingError> {
        if real.len() != imaginary.len() {
            return Err(ProcessingError::MismatchedLengths);
        }
        Ok(Self { real, imaginary })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.real.len()
    }

    /// Whether the sequence holds no samples.
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Absolute index of the first sample, always `0`.
    pub fn start(&self) -> usize {
        0
    }

    /// Absolute index of the last sample.
    pub fn end(&self) -> usize {
        self.real.len().saturating_sub(1)
    }

    /// Real parts.
    pub fn real_values(&self) -> &[i32] {
        &self.real
    }

    /// Imaginary parts.
    pub fn imaginary_values(&self) -> &[i32] {
        &self.imaginary
    }

    /// `(real, imaginary)` at `index`.
    pub fn get(&self, index: usize) -> (i32, i32) {
        (self.real[index], self.imaginary[index])
    }

    /// Take the real and imaginary parts out.
    pub fn into_parts(self) -> (Vec<i32>, Vec<i32>) {
        (self.real, self.imaginary)
    }

    /// Read-only window over the whole sequence.
    pub fn view(&self) -> ComplexView<'_> {
        ComplexView {
            real: &self.real,
            imaginary: &self.imaginary,
            start: 0,
        }
    }

    /// Exclusive window over the whole sequence.
    pub fn view_mut(&mut self) -> ComplexViewMut<'_> {
        ComplexViewMut {
            real: &mut self.real,
            imaginary: &mut self.imaginary,
            start: 0,
        }
    }

    /// Read-only window `[start, end]` sharing this sequence's storage.
    pub fn subsequence(&self, start: usize, end: usize) -> ComplexView<'_> {
        self.view().subsequence(start, end)
    }

    /// Exclusive window `[start, end]`.
    pub fn subsequence_mut(&mut self, start: usize, end: usize) -> ComplexViewMut<'_> {
        let range = local_range(0, self.real.len(), start, end);
        ComplexViewMut {
            real: &mut self.real[range.clone()],
            imaginary: &mut self.imaginary[range],
            start,
        }
    }
}

impl<'a> From<&'a ComplexSequence> for ComplexView<'a> {
    fn from(sequence: &'a ComplexSequence) -> Self {
        sequence.view()
    }
}

impl<'a> From<&'a mut ComplexSequence> for ComplexViewMut<'a> {
    fn from(sequence: &'a mut ComplexSequence) -> Self {
        sequence.view_mut()
    }
}

impl Signal for ComplexSequence {
    type View<'a> = ComplexView<'a>;
    type Point<'a> = ComplexPoint<'a>;

    fn len(&self) -> usize {
        self.real.len()
    }

    fn points_mut(&mut self, points: Range<usize>) -> Vec<ComplexPoint<'_>> {
        let imaginary = &mut self.imaginary[points.clone()];
        self.real[points.clone()]
            .iter_mut()
            .zip(imaginary.iter_mut())
            .zip(points)
            .map(|((real, imaginary), index)| ComplexPoint {
                index,
                real,
                imaginary,
            })
            .collect()
    }
}
