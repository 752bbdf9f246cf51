//! Uniform random integers and colors
//!
//! Range reduction uses rejection sampling: the raw source range is split
//! into `range` equal buckets and draws landing in the leftover tail are
//! discarded. Plain `raw % range` would favor low values whenever `range`
//! does not divide the source range.

use rand_core::RngCore;

use crate::gfx::Color;

/// Largest raw value produced by the underlying source (`next_u32`)
pub const RAND_MAX: u32 = u32::MAX;

/// Random color and position generator
pub struct RandomColorGenerator<R> {
    rng: R,
}

impl<R: RngCore> RandomColorGenerator<R> {
    /// Wrap a raw random source
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniformly distributed integer in `[min, max]` (inclusive)
    ///
    /// Returns `min` when `max < min`.
    pub fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }

        // At most 2^32 for the full i32 span
        let range = (max as i64 - min as i64 + 1) as u64;
        if range > RAND_MAX as u64 {
            return min.wrapping_add(self.rng.next_u32() as i32);
        }

        let buckets = RAND_MAX as u64 / range;
        let limit = buckets * range;
        loop {
            let raw = self.rng.next_u32() as u64;
            if raw < limit {
                return (min as i64 + (raw / buckets) as i64) as i32;
            }
        }
    }

    /// Color with each channel drawn independently from `[0, 255]`
    pub fn random_color(&mut self) -> Color {
        let r = self.uniform_int(0, 255) as u8;
        let g = self.uniform_int(0, 255) as u8;
        let b = self.uniform_int(0, 255) as u8;
        Color::new(r, g, b)
    }

    /// Underlying source
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
