//! Named band assignments matching the Copernicus Browser Sentinel-2 layers

use super::rgb::Channels;
use crate::error::{Error, Result};
use crate::types::BandId::{B02, B03, B04, B08, B11, B12, B8A};

/// A named RGB band assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub channels: Channels,
}

pub static PRESETS: [Preset; 5] = [
    Preset {
        name: "True Color",
        channels: Channels::new(B04, B03, B02),
    },
    Preset {
        name: "False Color",
        channels: Channels::new(B08, B04, B03),
    },
    Preset {
        name: "Highlight Optimized Natural Color",
        channels: Channels::new(B04, B03, B02),
    },
    Preset {
        name: "False Color Urban",
        channels: Channels::new(B12, B11, B04),
    },
    Preset {
        name: "SWIR",
        channels: Channels::new(B12, B8A, B04),
    },
];

/// Look up a preset by exact name
///
/// # Errors
///
/// Returns [`Error::UnknownPreset`] if no preset has that name
pub fn lookup(name: &str) -> Result<Channels> {
    PRESETS
        .iter()
        .find(|preset| preset.name == name)
        .map(|preset| preset.channels)
        .ok_or_else(|| Error::UnknownPreset(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_preset_count_and_unique_names() {
        let names: std::collections::HashSet<_> = PRESETS.iter().map(|p| p.name).collect();
        assert_eq!(PRESETS.len(), 5);
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_lookup_true_color() {
        let channels = lookup("True Color").unwrap();
        assert_eq!(channels, Channels::new(B04, B03, B02));
    }

    #[test]
    fn test_lookup_swir() {
        let channels = lookup("SWIR").unwrap();
        assert_eq!((channels.r, channels.g, channels.b), (B12, B8A, B04));
    }

    #[test]
    fn test_lookup_invalid() {
        assert_matches!(lookup("Invalid Preset"), Err(Error::UnknownPreset(name)) if name == "Invalid Preset");
    }
}
