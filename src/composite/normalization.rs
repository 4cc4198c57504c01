//! Percentile-clip contrast stretch for single bands

use crate::error::{Error, Result};
use crate::types::{Band, Mask, VALID};
use tracing::trace;

/// Lower and upper percentiles mapped to 0 and 1 by [`normalize`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileClip {
    pub low: f32,
    pub high: f32,
}

impl PercentileClip {
    pub const DEFAULT: Self = Self {
        low: 2.0,
        high: 98.0,
    };

    /// # Errors
    ///
    /// Returns [`Error::InvalidPercentile`] unless `0 <= low < high <= 100`
    pub fn new(low: f32, high: f32) -> Result<Self> {
        let in_range = |p: f32| (0.0..=100.0).contains(&p);
        if !in_range(low) || !in_range(high) || low >= high {
            return Err(Error::InvalidPercentile { low, high });
        }
        Ok(Self { low, high })
    }
}

impl Default for PercentileClip {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Stretch a band to [0, 1] between two percentiles of its valid pixels.
///
/// Percentiles are taken over pixels whose mask is 255, or over every pixel
/// when no mask is given. With no valid pixels the bounds fall back to
/// [0, 1]. A flat band (equal bounds) yields all zeros. Invalid pixels and
/// non-finite samples are excluded from the percentiles and written as 0.
///
/// `mask`, when present, must have the same dimensions as `band`.
#[must_use]
pub fn normalize(band: &Band, mask: Option<&Mask>, clip: PercentileClip) -> Band {
    debug_assert!(mask.is_none_or(|m| m.dimensions() == band.dimensions()));

    let validity = mask.map(|m| m.as_raw().as_slice());
    let is_valid = |idx: usize, value: f32| {
        value.is_finite() && validity.is_none_or(|m| m[idx] == VALID)
    };

    let mut samples: Vec<f32> = band
        .iter()
        .enumerate()
        .filter(|&(idx, &value)| is_valid(idx, value))
        .map(|(_, &value)| value)
        .collect();

    let (p_low, p_high) = if samples.is_empty() {
        (0.0_f32, 1.0_f32)
    } else {
        samples.sort_unstable_by(f32::total_cmp);
        (percentile(&samples, clip.low), percentile(&samples, clip.high))
    };
    drop(samples);

    trace!(p_low, p_high, "percentile bounds");

    let range = p_high - p_low;
    let mut normalized = band.clone();
    for (idx, value) in normalized.iter_mut().enumerate() {
        *value = if !is_valid(idx, band.as_raw()[idx]) || !(range > 0.0 && range.is_finite()) {
            0.0
        } else {
            (value.clamp(p_low, p_high) - p_low) / range
        };
    }

    normalized
}

/// Linearly interpolated percentile of an ascending, non-empty slice
fn percentile(sorted: &[f32], pct: f32) -> f32 {
    let rank = f64::from(pct) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    let a = f64::from(sorted[lower]);
    let b = f64::from(sorted[upper]);
    (a + (b - a) * frac) as f32
}
