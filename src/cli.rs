use crate::composite::{Channels, Colormap, SpectralIndex};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sentinel-2 band composites and spectral indices
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Folder holding one export folder per acquisition date
    #[arg(long, env = "MIMOSA_DATA_DIR", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Log filter (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List acquisition dates found in the data folder
    Dates,

    /// List Sentinel-2 bands with wavelength and resolution
    Bands,

    /// List composite presets
    Presets,

    /// Render an RGB composite from three bands
    Composite {
        /// Acquisition date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// Preset name, e.g. "False Color"
        #[arg(short, long, default_value = "True Color", conflicts_with = "bands")]
        preset: String,

        /// Explicit band assignment, e.g. B08,B04,B03
        #[arg(short, long)]
        bands: Option<Channels>,

        /// Use raw reflectance instead of the 2-98 percentile stretch
        #[arg(long)]
        raw: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render a normalized difference index
    Index {
        /// Acquisition date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// NDVI, Moisture, NDWI or NDSI
        #[arg(short, long)]
        index: SpectralIndex,

        /// Colormap (only rdylgn is available)
        #[arg(short, long, default_value = "rdylgn")]
        colormap: Colormap,

        /// Paint no-data pixels black instead of mid-ramp yellow
        #[arg(long)]
        mask_nodata: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the pre-rendered true color image
    TrueColor {
        /// Acquisition date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Where a rendered image goes
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Write to this file (format from extension) instead of the terminal
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Preview width in terminal columns
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Preview height in terminal rows
    #[arg(short = 'H', long)]
    pub height: Option<u32>,
}
