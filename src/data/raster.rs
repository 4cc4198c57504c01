//! GeoTIFF band and true-color loading

use crate::error::{Error, Result};
use crate::types::{Band, BandId, Mask, RgbOutput, INVALID, VALID};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;
use tracing::debug;

/// GDAL_NODATA, stored as ASCII
const GDAL_NODATA_TAG: u16 = 42113;

/// Supplier of band rasters and masks for an acquisition folder
pub trait RasterSource: Send + Sync {
    /// Load one spectral band with its validity mask
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the folder holds no file for the band
    fn load_band(&self, dir: &Path, band: BandId) -> Result<(Band, Mask)>;

    /// Load the 8-bit true-color rendering with its shared mask
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the folder holds no true-color file
    fn load_true_color(&self, dir: &Path) -> Result<(RgbOutput, Mask)>;
}

/// Reads float GeoTIFF exports named `*_{BAND}_*.tiff` and `*_True_color.tiff`
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffRasterSource;

impl RasterSource for TiffRasterSource {
    fn load_band(&self, dir: &Path, band: BandId) -> Result<(Band, Mask)> {
        let needle = format!("_{band}_");
        let path = find_file(dir, |name| name.contains(&needle))?
            .ok_or_else(|| Error::not_found(format!("TIFF for band {band}"), dir))?;

        let raster = FloatRaster::open(&path)?;
        if raster.channels != 1 {
            return Err(Error::UnsupportedRaster {
                path,
                reason: format!("expected a single band, found {} channels", raster.channels),
            });
        }

        let (width, height) = (raster.width, raster.height);
        let mask = raster.mask();
        let band_raster = Band::from_raw(width, height, raster.plane(0)).ok_or_else(|| Error::UnsupportedRaster {
            path: path.clone(),
            reason: "sample count does not match dimensions".to_string(),
        })?;

        debug!(path = %path.display(), %band, width, height, "loaded band");
        Ok((band_raster, mask))
    }

    fn load_true_color(&self, dir: &Path) -> Result<(RgbOutput, Mask)> {
        let path = find_file(dir, |name| name.ends_with("_True_color.tiff"))?
            .ok_or_else(|| Error::not_found("True color TIFF", dir))?;

        let raster = FloatRaster::open(&path)?;
        if raster.channels != 3 {
            return Err(Error::UnsupportedRaster {
                path,
                reason: format!("expected 3 color channels, found {}", raster.channels),
            });
        }

        let (width, height) = (raster.width, raster.height);
        let pixels: Vec<u8> = raster
            .samples
            .chunks_exact(raster.stride())
            .flat_map(|px| [px[0], px[1], px[2]].map(|v| (v * 255.0_f32) as u8))
            .collect();
        let mask = raster.mask();

        let rgb = RgbOutput::from_raw(width, height, pixels).ok_or_else(|| Error::UnsupportedRaster {
            path: path.clone(),
            reason: "sample count does not match dimensions".to_string(),
        })?;

        debug!(path = %path.display(), width, height, "loaded true color");
        Ok((rgb, mask))
    }
}

/// Decoded float TIFF with interleaved samples
struct FloatRaster {
    width: u32,
    height: u32,
    /// Color channels, excluding alpha
    channels: usize,
    has_alpha: bool,
    nodata: Option<f32>,
    samples: Vec<f32>,
}

impl FloatRaster {
    fn open(path: &Path) -> Result<Self> {
        let file = BufReader::new(File::open(path)?);
        let mut decoder = Decoder::new(file)?.with_limits(Limits::unlimited());

        let (width, height) = decoder.dimensions()?;
        let (channels, has_alpha) = match decoder.colortype()? {
            tiff::ColorType::Gray(_) => (1, false),
            tiff::ColorType::GrayA(_) => (1, true),
            tiff::ColorType::RGB(_) => (3, false),
            tiff::ColorType::RGBA(_) => (3, true),
            other => {
                return Err(Error::UnsupportedRaster {
                    path: path.to_path_buf(),
                    reason: format!("color type {other:?}"),
                });
            }
        };

        let nodata = match decoder.find_tag(Tag::from_u16_exhaustive(GDAL_NODATA_TAG))? {
            Some(tiff::decoder::ifd::Value::Ascii(text)) => {
                text.trim_matches(|c: char| c == '\0' || c.is_whitespace()).parse::<f32>().ok()
            }
            _ => None,
        };

        let samples = match decoder.read_image()? {
            DecodingResult::F32(buf) => buf,
            DecodingResult::F64(buf) => buf.into_iter().map(|v| v as f32).collect(),
            _ => {
                return Err(Error::UnsupportedRaster {
                    path: path.to_path_buf(),
                    reason: "expected floating point samples".to_string(),
                });
            }
        };

        let raster = Self {
            width,
            height,
            channels,
            has_alpha,
            nodata,
            samples,
        };
        if raster.samples.len() != raster.stride() * width as usize * height as usize {
            return Err(Error::UnsupportedRaster {
                path: path.to_path_buf(),
                reason: "sample count does not match dimensions".to_string(),
            });
        }
        Ok(raster)
    }

    #[inline]
    fn stride(&self) -> usize {
        self.channels + usize::from(self.has_alpha)
    }

    /// Validity per pixel: alpha when present, otherwise nodata and NaN
    fn mask(&self) -> Mask {
        let stride = self.stride();
        let pixels = self
            .samples
            .chunks_exact(stride)
            .map(|px| {
                let valid = if self.has_alpha {
                    px[stride - 1] > 0.0
                } else {
                    px.iter().all(|&v| !v.is_nan() && self.nodata.is_none_or(|nd| v != nd))
                };
                if valid { VALID } else { INVALID }
            })
            .collect();
        Mask::from_raw(self.width, self.height, pixels).unwrap_or_else(|| Mask::new(self.width, self.height))
    }

    /// Samples of one channel, row-major
    fn plane(&self, channel: usize) -> Vec<f32> {
        self.samples
            .iter()
            .skip(channel)
            .step_by(self.stride())
            .copied()
            .collect()
    }
}

/// First `.tiff` file in `dir` (by name) whose name satisfies `matches`
fn find_file(dir: &Path, matches: impl Fn(&str) -> bool) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_match = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.ends_with(".tiff") && matches(name));
        if is_match && path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates.into_iter().next())
}
