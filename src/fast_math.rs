//! Table-driven sine and cosine.
//!
//! One full period of `sin` is sampled into a table once; lookups linearly
//! interpolate between neighbouring entries. Results stay within `1e-5` of
//! [`f64::sin`] for the default table size, which is far cheaper than the
//! transcendental call in the `O(n²)` DFT loops.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::OnceLock;

/// Entries in the default table, covering `[0, 2π)`.
pub const SINE_TABLE_SIZE: usize = 8192;

/// Fractions closer than this to a bucket boundary read the table directly.
const INTERPOLATION_EPSILON: f64 = 1e-5;

static DEFAULT_TABLE: OnceLock<SineTable> = OnceLock::new();

/// Precomputed sine samples over one period.
#[derive(Debug, Clone)]
pub struct SineTable {
    values: Vec<f64>,
    buckets_per_radian: f64,
}

impl SineTable {
    /// Build a table with `size` entries.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "sine table needs at least one entry");
        let values = (0..size)
            .map(|i| (i as f64 * TAU / size as f64).sin())
            .collect();
        Self {
            values,
            buckets_per_radian: size as f64 / TAU,
        }
    }

    /// Number of table entries per period.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn sin(&self, radians: f64) -> f64 {
        let size = self.values.len();
        let bucket = radians * self.buckets_per_radian;
        let floor = bucket.floor();
        let fraction = bucket - floor;
        // Euclidean remainder keeps negative angles in range.
        let whole = (floor as i64).rem_euclid(size as i64) as usize;
        let next = (whole + 1) % size;

        if fraction <= INTERPOLATION_EPSILON {
            self.values[whole]
        } else if fraction >= 1.0 - INTERPOLATION_EPSILON {
            self.values[next]
        } else {
            let lower = self.values[whole];
            lower + (self.values[next] - lower) * fraction
        }
    }

    #[inline]
    pub fn cos(&self, radians: f64) -> f64 {
        self.sin(radians + FRAC_PI_2)
    }
}

impl Default for SineTable {
    fn default() -> Self {
        Self::new(SINE_TABLE_SIZE)
    }
}

/// The process-wide table used by [`sin`] and [`cos`].
pub fn table() -> &'static SineTable {
    DEFAULT_TABLE.get_or_init(SineTable::default)
}

/// Fast sine of `radians`.
#[inline]
pub fn sin(radians: f64) -> f64 {
    table().sin(radians)
}

/// Fast cosine of `radians`, computed as `sin(radians + π/2)`.
#[inline]
pub fn cos(radians: f64) -> f64 {
    table().cos(radians)
}
