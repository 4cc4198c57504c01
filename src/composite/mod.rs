//! Band math and compositing
//!
//! Percentile normalization, normalized difference indices, RGB composites
//! and index colormaps. Everything here is pure and works on in-memory
//! rasters.

mod colormap;
mod index;
mod normalization;
pub mod presets;
mod rgb;

pub use colormap::{apply_mask, visualize, Colormap};
pub use index::SpectralIndex;
pub use normalization::{normalize, PercentileClip};
pub use presets::{lookup as lookup_preset, Preset, PRESETS};
pub use rgb::{build_rgb, Channels};
