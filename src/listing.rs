use crate::composite::{SpectralIndex, PRESETS};
use crate::types::BandId;
use chrono::NaiveDate;

pub fn print_dates(dates: &[NaiveDate]) {
    if dates.is_empty() {
        println!("No acquisitions found");
        return;
    }
    for date in dates {
        println!("{date}");
    }
}

pub fn print_bands() {
    for band in BandId::ALL {
        let info = band.info();
        println!("{:4}: {:16} {:>5}nm {:>3}m", band, info.name, info.wavelength_nm, info.resolution_m);
    }
}

pub fn print_presets() {
    for preset in &PRESETS {
        println!("{:34}: {}", preset.name, preset.channels);
    }
    println!();
    for index in SpectralIndex::ALL {
        let (a, b) = index.bands();
        println!("{:34}: ({a} - {b}) / ({a} + {b})", index.name());
    }
}
