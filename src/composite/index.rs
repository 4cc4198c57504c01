//! Normalized difference spectral indices

use crate::error::{Error, Result};
use crate::types::{band_of, mask_of, Band, BandId, BandSet, Dimensions, Mask, MaskSet, INVALID, VALID};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Spectral indices of the form `(a - b) / (a + b)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectralIndex {
    /// Vegetation: NIR against red
    Ndvi,
    /// Moisture: narrow NIR against SWIR 1
    Moisture,
    /// Water: green against NIR
    Ndwi,
    /// Snow: green against SWIR 1
    Ndsi,
}

impl SpectralIndex {
    pub const ALL: [SpectralIndex; 4] = [Self::Ndvi, Self::Moisture, Self::Ndwi, Self::Ndsi];

    /// Bands `(a, b)` entering `(a - b) / (a + b)`
    #[must_use]
    pub const fn bands(self) -> (BandId, BandId) {
        match self {
            Self::Ndvi => (BandId::B08, BandId::B04),
            Self::Moisture => (BandId::B8A, BandId::B11),
            Self::Ndwi => (BandId::B03, BandId::B08),
            Self::Ndsi => (BandId::B03, BandId::B11),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ndvi => "NDVI",
            Self::Moisture => "Moisture Index",
            Self::Ndwi => "NDWI",
            Self::Ndsi => "NDSI",
        }
    }

    /// Compute the index over a band set.
    ///
    /// Pixels invalid in either input mask, pixels with a non-finite sample,
    /// and pixels where `a + b == 0` are 0 in the output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingBand`] if either band or mask is absent, and
    /// [`Error::ShapeMismatch`] if the inputs differ in size
    pub fn calculate(self, bands: &BandSet, masks: &MaskSet) -> Result<Band> {
        self.calculate_with_mask(bands, masks).map(|(index, _)| index)
    }

    /// Like [`SpectralIndex::calculate`], also returning the combined validity mask
    ///
    /// # Errors
    ///
    /// Same as [`SpectralIndex::calculate`]
    pub fn calculate_with_mask(self, bands: &BandSet, masks: &MaskSet) -> Result<(Band, Mask)> {
        let (a_id, b_id) = self.bands();
        let a = band_of(bands, a_id)?;
        let b = band_of(bands, b_id)?;
        let a_mask = mask_of(masks, a_id)?;
        let b_mask = mask_of(masks, b_id)?;

        let expected = Dimensions::of(a);
        for (id, dims) in [
            (a_id, Dimensions::of(a_mask)),
            (b_id, Dimensions::of(b)),
            (b_id, Dimensions::of(b_mask)),
        ] {
            if dims != expected {
                return Err(Error::ShapeMismatch {
                    band: id,
                    expected,
                    actual: dims,
                });
            }
        }

        debug!(index = self.name(), a = %a_id, b = %b_id, size = %expected, "computing index");
        Ok(normalized_difference(a, a_mask, b, b_mask))
    }
}

impl fmt::Display for SpectralIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpectralIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ndvi" => Ok(Self::Ndvi),
            "moisture" | "moisture index" | "ndmi" => Ok(Self::Moisture),
            "ndwi" => Ok(Self::Ndwi),
            "ndsi" => Ok(Self::Ndsi),
            _ => Err(Error::UnknownIndex(s.to_string())),
        }
    }
}

/// Pixel-wise `(a - b) / (a + b)` over equally sized inputs, with the
/// combined mask (valid only where both masks are 255 and both samples are
/// finite)
fn normalized_difference(a: &Band, a_mask: &Mask, b: &Band, b_mask: &Mask) -> (Band, Mask) {
    let (width, height) = a.dimensions();
    let mut index = Band::new(width, height);
    let mut combined = Mask::new(width, height);

    let inputs = a
        .iter()
        .zip(b.iter())
        .zip(a_mask.iter().zip(b_mask.iter()));

    for ((out, valid), ((&va, &vb), (&ma, &mb))) in index
        .iter_mut()
        .zip(combined.iter_mut())
        .zip(inputs)
    {
        if ma != VALID || mb != VALID || !va.is_finite() || !vb.is_finite() {
            *valid = INVALID;
            continue;
        }
        *valid = VALID;

        let sum = va + vb;
        if sum != 0.0 {
            let value = (va - vb) / sum;
            if value.is_finite() {
                *out = value;
            }
        }
    }

    (index, combined)
}
