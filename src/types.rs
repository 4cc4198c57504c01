//! Domain-specific types for Sentinel-2 rasters

use crate::error::Error;
use image::{GrayImage, ImageBuffer, Luma, RgbImage};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Single-band reflectance raster, nominally in [0, 1]
pub type Band = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Per-pixel validity, 255 = valid and 0 = no data
pub type Mask = GrayImage;

/// 8-bit RGB output image
pub type RgbOutput = RgbImage;

/// Bands of a single acquisition, keyed by identifier
pub type BandSet = BTreeMap<BandId, Band>;

/// Masks paired with a [`BandSet`]
pub type MaskSet = BTreeMap<BandId, Mask>;

/// Mask value marking a valid pixel
pub const VALID: u8 = 255;

/// Mask value marking an invalid pixel
pub const INVALID: u8 = 0;

/// Sentinel-2 MSI spectral band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BandId {
    B01,
    B02,
    B03,
    B04,
    B05,
    B06,
    B07,
    B08,
    B8A,
    B09,
    B11,
    B12,
}

impl BandId {
    /// All bands in product order
    pub const ALL: [BandId; 12] = [
        Self::B01,
        Self::B02,
        Self::B03,
        Self::B04,
        Self::B05,
        Self::B06,
        Self::B07,
        Self::B08,
        Self::B8A,
        Self::B09,
        Self::B11,
        Self::B12,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::B01 => "B01",
            Self::B02 => "B02",
            Self::B03 => "B03",
            Self::B04 => "B04",
            Self::B05 => "B05",
            Self::B06 => "B06",
            Self::B07 => "B07",
            Self::B08 => "B08",
            Self::B8A => "B8A",
            Self::B09 => "B09",
            Self::B11 => "B11",
            Self::B12 => "B12",
        }
    }

    #[must_use]
    pub const fn info(self) -> BandInfo {
        match self {
            Self::B01 => BandInfo::new("Coastal aerosol", 60, 443),
            Self::B02 => BandInfo::new("Blue", 10, 490),
            Self::B03 => BandInfo::new("Green", 10, 560),
            Self::B04 => BandInfo::new("Red", 10, 665),
            Self::B05 => BandInfo::new("Red Edge 1", 20, 705),
            Self::B06 => BandInfo::new("Red Edge 2", 20, 740),
            Self::B07 => BandInfo::new("Red Edge 3", 20, 783),
            Self::B08 => BandInfo::new("NIR", 10, 842),
            Self::B8A => BandInfo::new("NIR Narrow", 20, 865),
            Self::B09 => BandInfo::new("Water vapor", 60, 945),
            Self::B11 => BandInfo::new("SWIR 1", 20, 1610),
            Self::B12 => BandInfo::new("SWIR 2", 20, 2190),
        }
    }

    /// Human-readable label, e.g. `B04 - Red (665nm)`
    #[must_use]
    pub fn label(self) -> String {
        let info = self.info();
        format!(
            "{id} - {name} ({wavelength}nm)",
            id = self.as_str(),
            name = info.name,
            wavelength = info.wavelength_nm
        )
    }
}

impl FromStr for BandId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|band| band.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownBand(s.to_string()))
    }
}

impl fmt::Display for BandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static band metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandInfo {
    pub name: &'static str,
    pub resolution_m: u16,
    pub wavelength_nm: u16,
}

impl BandInfo {
    #[must_use]
    pub const fn new(name: &'static str, resolution_m: u16, wavelength_nm: u16) -> Self {
        Self {
            name,
            resolution_m,
            wavelength_nm,
        }
    }
}

impl fmt::Display for BandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{name}, {wavelength}nm, {resolution}m",
            name = self.name,
            wavelength = self.wavelength_nm,
            resolution = self.resolution_m
        )
    }
}

/// Raster dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn of<P, C>(image: &ImageBuffer<P, C>) -> Self
    where
        P: image::Pixel,
        C: std::ops::Deref<Target = [P::Subpixel]>,
    {
        let (width, height) = image.dimensions();
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{width}x{height}", width = self.width, height = self.height)
    }
}

/// Look up a band, failing with [`Error::MissingBand`] when absent
pub fn band_of(bands: &BandSet, id: BandId) -> Result<&Band, Error> {
    bands.get(&id).ok_or(Error::MissingBand(id))
}

/// Look up a mask, failing with [`Error::MissingBand`] when absent
pub fn mask_of(masks: &MaskSet, id: BandId) -> Result<&Mask, Error> {
    masks.get(&id).ok_or(Error::MissingBand(id))
}
