//! Acquisition discovery and raster loading
//!
//! This module maps calendar dates to export folders and loads band rasters
//! with their validity masks.

mod raster;
mod scanner;

pub use raster::{RasterSource, TiffRasterSource};
pub use scanner::{date_directory, discover_dates, parse_date, PRODUCT_MARKER};

use crate::error::Result;
use crate::types::{BandId, BandSet, MaskSet};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load a subset of bands from an acquisition folder, in parallel
///
/// # Errors
///
/// Returns the first load failure, typically [`crate::Error::NotFound`]
pub fn load_bands(
    source: &dyn RasterSource,
    dir: &Path,
    ids: &[BandId],
) -> Result<(BandSet, MaskSet)> {
    let loaded = ids
        .par_iter()
        .map(|&id| source.load_band(dir, id).map(|(band, mask)| (id, band, mask)))
        .collect::<Result<Vec<_>>>()?;

    let mut bands = BandSet::new();
    let mut masks = MaskSet::new();
    for (id, band, mask) in loaded {
        bands.insert(id, band);
        masks.insert(id, mask);
    }
    Ok((bands, masks))
}

/// Load all twelve bands from an acquisition folder
///
/// # Errors
///
/// Same as [`load_bands`]
pub fn load_all_bands(source: &dyn RasterSource, dir: &Path) -> Result<(BandSet, MaskSet)> {
    load_bands(source, dir, &BandId::ALL)
}

/// Bands and masks of one acquisition date
#[derive(Debug, Clone)]
pub struct Scene {
    pub date: NaiveDate,
    pub dir: PathBuf,
    pub bands: BandSet,
    pub masks: MaskSet,
}

impl Scene {
    /// Locate the folder for `date` under `root` and load `ids` from it
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the date folder or a band file
    /// is missing
    pub fn load(
        source: &dyn RasterSource,
        root: &Path,
        date: NaiveDate,
        ids: &[BandId],
    ) -> Result<Self> {
        let dir = date_directory(root, date)?;
        let (bands, masks) = load_bands(source, &dir, ids)?;
        info!(%date, dir = %dir.display(), bands = bands.len(), "loaded scene");
        Ok(Self {
            date,
            dir,
            bands,
            masks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{Band, Mask, RgbOutput, VALID};
    use assert_matches::assert_matches;
    use image::Luma;
    use std::fs;
    use tempfile::TempDir;

    /// In-memory source with a constant value per band
    struct ConstantSource {
        missing: Option<BandId>,
    }

    impl RasterSource for ConstantSource {
        fn load_band(&self, dir: &Path, band: BandId) -> Result<(Band, Mask)> {
            if self.missing == Some(band) {
                return Err(Error::not_found(format!("TIFF for band {band}"), dir));
            }
            let value = f32::from(band.info().wavelength_nm) / 10_000.0;
            Ok((
                Band::from_pixel(4, 4, Luma([value])),
                Mask::from_pixel(4, 4, Luma([VALID])),
            ))
        }

        fn load_true_color(&self, dir: &Path) -> Result<(RgbOutput, Mask)> {
            Err(Error::not_found("True color TIFF", dir))
        }
    }

    #[test]
    fn test_load_all_bands() {
        let source = ConstantSource { missing: None };
        let (bands, masks) = load_all_bands(&source, Path::new(".")).unwrap();

        assert_eq!(bands.len(), 12);
        assert_eq!(masks.len(), 12);
        assert!(bands.keys().copied().eq(BandId::ALL));
        assert_eq!(bands[&BandId::B04].get_pixel(0, 0)[0], 0.0665);
    }

    #[test]
    fn test_load_all_bands_propagates_not_found() {
        let source = ConstantSource {
            missing: Some(BandId::B09),
        };
        assert_matches!(
            load_all_bands(&source, Path::new(".")),
            Err(Error::NotFound { .. })
        );
    }

    #[test]
    fn test_scene_load() {
        let root = TempDir::new().unwrap();
        let name = format!("2024-11-02-00_00_2024-11-02-23_59_{PRODUCT_MARKER}");
        fs::create_dir(root.path().join(&name)).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let source = ConstantSource { missing: None };

        let scene = Scene::load(&source, root.path(), date, &[BandId::B08, BandId::B04]).unwrap();

        assert_eq!(scene.date, date);
        assert!(scene.dir.ends_with(&name));
        assert_eq!(scene.bands.len(), 2);
        assert!(scene.masks.contains_key(&BandId::B08));
    }

    #[test]
    fn test_scene_load_missing_date() {
        let root = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let source = ConstantSource { missing: None };

        assert_matches!(
            Scene::load(&source, root.path(), date, &BandId::ALL),
            Err(Error::NotFound { .. })
        );
    }
}
