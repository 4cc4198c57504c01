pub mod cli;
pub mod composite;
pub mod data;
pub mod display;
pub mod error;
pub mod listing;
pub mod types;

// Re-export commonly used items
pub use error::{Error, Result};
pub use types::{Band, BandId, BandSet, Mask, MaskSet};
