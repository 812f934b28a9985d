//! Analysis windows applied to the input of the forward DFT.

use std::f64::consts::TAU;

use crate::fast_math;

/// Window applied sample-wise before the forward summation.
///
/// Every non-rectangular window here belongs to the raised-cosine family
/// `w[n] = offset - multiple · cos(2πn / N)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Window {
    /// `w[n] = 1`.
    #[default]
    Rectangular,
    /// Raised cosine with `offset = 0.54`, `multiple = 0.46`.
    Hamming,
    /// Raised cosine with `offset = multiple = 0.5`.
    Hanning,
    /// Raised cosine with caller-chosen coefficients.
    Cosine { offset: f64, multiple: f64 },
}

impl Window {
    /// `(offset, multiple)` of the raised-cosine form, `None` for
    /// [`Window::Rectangular`].
    pub fn raised_cosine(&self) -> Option<(f64, f64)> {
        match *self {
            Window::Rectangular => None,
            Window::Hamming => Some((0.54, 0.46)),
            Window::Hanning => Some((0.5, 0.5)),
            Window::Cosine { offset, multiple } => Some((offset, multiple)),
        }
    }

    /// Weight of sample `n` in a window of `len` samples.
    #[inline]
    pub fn coefficient(&self, n: usize, len: usize) -> f64 {
        match self.raised_cosine() {
            None => 1.0,
            Some((offset, multiple)) => {
                offset - multiple * fast_math::cos(TAU * n as f64 / len as f64)
            }
        }
    }

    /// All `len` weights of this window.
    pub fn coefficients(&self, len: usize) -> Vec<f64> {
        (0..len).map(|n| self.coefficient(n, len)).collect()
    }
}

/// Generate a Hann window of length `len`.
pub fn hann(len: usize) -> Vec<f64> {
    Window::Hanning.coefficients(len)
}

/// Generate a Hamming window of length `len`.
pub fn hamming(len: usize) -> Vec<f64> {
    Window::Hamming.coefficients(len)
}
