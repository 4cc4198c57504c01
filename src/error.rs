use crate::types::{BandId, Dimensions};
use std::path::PathBuf;

/// Errors raised while loading or processing Sentinel-2 rasters
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required band is absent from a band or mask set
    #[error("Band {0} is missing from the band set")]
    MissingBand(BandId),

    #[error("Unknown band identifier: {0}")]
    UnknownBand(String),

    #[error("Invalid channel list {0:?}: expected three comma-separated bands, e.g. B08,B04,B03")]
    InvalidChannels(String),

    #[error("Unknown composite preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown colormap: {0} (supported: rdylgn)")]
    UnknownColormap(String),

    #[error("Unknown spectral index: {0}")]
    UnknownIndex(String),

    /// Channel rasters of a composite or index do not share dimensions
    #[error("Raster size mismatch: {band} is {actual}, expected {expected}")]
    ShapeMismatch {
        band: BandId,
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("Invalid percentile clip ({low}, {high}): expected 0 <= low < high <= 100")]
    InvalidPercentile { low: f32, high: f32 },

    /// No file or directory matches the request
    #[error("{what} not found in {}", dir.display())]
    NotFound { what: String, dir: PathBuf },

    #[error("Unsupported raster {}: {reason}", path.display())]
    UnsupportedRaster { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF decoding error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub(crate) fn not_found(what: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            what: what.into(),
            dir: dir.into(),
        }
    }
}

/// Result alias for mimosa operations
pub type Result<T> = std::result::Result<T, Error>;
