//! Index visualization

use crate::error::Error;
use crate::types::{Band, Mask, RgbOutput, VALID};
use image::Rgb;
use std::fmt;
use std::str::FromStr;

/// Colormaps for rendering index rasters.
///
/// Only `RdYlGn` exists: a linear red (-1), yellow (0), green (+1) ramp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Colormap {
    #[default]
    RdYlGn,
}

impl Colormap {
    pub const ALL: [Colormap; 1] = [Self::RdYlGn];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RdYlGn => "RdYlGn",
        }
    }

    /// Color for a single index value; values outside [-1, 1] saturate
    #[inline]
    #[must_use]
    pub fn color(self, value: f32) -> Rgb<u8> {
        match self {
            Self::RdYlGn => {
                let t = ((value + 1.0) / 2.0).clamp(0.0, 1.0);
                Rgb([((1.0 - t) * 255.0) as u8, (t * 255.0) as u8, 0])
            }
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmap| cmap.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownColormap(s.to_string()))
    }
}

/// Render an index raster to RGB.
///
/// No masking happens here: pixels zeroed upstream render as the ramp's
/// midpoint. Use [`apply_mask`] to black them out.
#[must_use]
pub fn visualize(index: &Band, colormap: Colormap) -> RgbOutput {
    let (width, height) = index.dimensions();
    let mut rgb = RgbOutput::new(width, height);
    for (out, value) in rgb.pixels_mut().zip(index.iter()) {
        *out = colormap.color(*value);
    }
    rgb
}

/// Black out pixels whose mask is not 255
pub fn apply_mask(rgb: &mut RgbOutput, mask: &Mask) {
    debug_assert_eq!(rgb.dimensions(), mask.dimensions());
    for (pixel, &valid) in rgb.pixels_mut().zip(mask.iter()) {
        if valid != VALID {
            *pixel = Rgb([0, 0, 0]);
        }
    }
}
