//! RGB composites from three bands

use super::normalization::{normalize, PercentileClip};
use crate::error::{Error, Result};
use crate::types::{band_of, mask_of, Band, BandId, BandSet, Dimensions, Mask, MaskSet, RgbOutput, VALID};
use std::borrow::Cow;
use std::str::FromStr;
use tracing::debug;

/// Band assignment for the red, green and blue channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channels {
    pub r: BandId,
    pub g: BandId,
    pub b: BandId,
}

impl Channels {
    #[must_use]
    pub const fn new(r: BandId, g: BandId, b: BandId) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn as_array(&self) -> [BandId; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Channels {
    type Err = Error;

    /// Parse `R,G,B`, e.g. `B08,B04,B03`
    fn from_str(s: &str) -> Result<Self> {
        let ids = s
            .split(',')
            .map(str::parse::<BandId>)
            .collect::<Result<Vec<_>>>()?;
        match ids.as_slice() {
            &[r, g, b] => Ok(Self::new(r, g, b)),
            _ => Err(Error::InvalidChannels(s.to_string())),
        }
    }
}

impl std::fmt::Display for Channels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R={r} G={g} B={b}", r = self.r, g = self.g, b = self.b)
    }
}

/// Build an 8-bit RGB composite from three bands.
///
/// With `normalize_bands`, each channel is percentile-stretched against its
/// own mask. Otherwise raw values are clamped to [0, 1]. Pixels invalid in
/// any of the three masks are black.
///
/// # Errors
///
/// Returns [`Error::MissingBand`] if a band or mask is absent and
/// [`Error::ShapeMismatch`] if the channels differ in size
pub fn build_rgb(
    bands: &BandSet,
    masks: &MaskSet,
    channels: Channels,
    normalize_bands: bool,
) -> Result<RgbOutput> {
    let ids = channels.as_array();

    let mut inputs: Vec<(&Band, &Mask)> = Vec::with_capacity(3);
    for id in ids {
        inputs.push((band_of(bands, id)?, mask_of(masks, id)?));
    }

    let expected = Dimensions::of(inputs[0].0);
    for (&id, (band, mask)) in ids.iter().zip(&inputs) {
        for actual in [Dimensions::of(*band), Dimensions::of(*mask)] {
            if actual != expected {
                return Err(Error::ShapeMismatch {
                    band: id,
                    expected,
                    actual,
                });
            }
        }
    }

    debug!(%channels, size = %expected, normalize = normalize_bands, "building composite");

    let planes: Vec<Cow<'_, Band>> = inputs
        .iter()
        .map(|&(band, mask)| {
            if normalize_bands {
                Cow::Owned(normalize(band, Some(mask), PercentileClip::DEFAULT))
            } else {
                Cow::Borrowed(band)
            }
        })
        .collect();

    let mut rgb = RgbOutput::new(expected.width, expected.height);
    for (idx, pixel) in rgb.pixels_mut().enumerate() {
        if inputs.iter().any(|(_, mask)| mask.as_raw()[idx] != VALID) {
            continue;
        }
        for (channel, plane) in pixel.0.iter_mut().zip(&planes) {
            *channel = to_u8(plane.as_raw()[idx]);
        }
    }

    Ok(rgb)
}

/// Scale a [0, 1] value to 0-255, truncating
#[inline]
fn to_u8(value: f32) -> u8 {
    // NaN clamps to NaN and casts to 0
    (value.clamp(0.0, 1.0) * 255.0_f32) as u8
}
