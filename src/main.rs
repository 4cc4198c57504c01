use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use image::DynamicImage;
use mimosa::cli::{Args, Command};
use mimosa::composite::{self, Channels, Colormap, SpectralIndex};
use mimosa::data::{self, RasterSource, Scene, TiffRasterSource};
use mimosa::{display, listing};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let root = args.data_dir.as_path();
    let source = TiffRasterSource;

    match &args.command {
        Command::Dates => {
            let dates = data::discover_dates(root)
                .with_context(|| format!("Failed to scan {}", root.display()))?;
            listing::print_dates(&dates);
        }
        Command::Bands => listing::print_bands(),
        Command::Presets => listing::print_presets(),
        Command::Composite {
            date,
            preset,
            bands,
            raw,
            output,
        } => {
            let channels = match bands {
                Some(channels) => *channels,
                None => composite::lookup_preset(preset)?,
            };
            let image = render_composite(&source, root, *date, channels, !raw)?;
            display::emit_image(image, output)?;
        }
        Command::Index {
            date,
            index,
            colormap,
            mask_nodata,
            output,
        } => {
            let image = render_index(&source, root, *date, *index, *colormap, *mask_nodata)?;
            display::emit_image(image, output)?;
        }
        Command::TrueColor { date, output } => {
            let dir = data::date_directory(root, *date)?;
            let (rgb, _mask) = source
                .load_true_color(&dir)
                .with_context(|| format!("Failed to load true color for {date}"))?;
            display::emit_image(DynamicImage::ImageRgb8(rgb), output)?;
        }
    }

    Ok(())
}

/// Load the three channel bands for `date` and build the composite
fn render_composite(
    source: &dyn RasterSource,
    root: &Path,
    date: NaiveDate,
    channels: Channels,
    normalize: bool,
) -> Result<DynamicImage> {
    let scene = Scene::load(source, root, date, &channels.as_array())
        .with_context(|| format!("Failed to load bands for {date}"))?;
    info!(%date, %channels, "rendering composite");

    let rgb = composite::build_rgb(&scene.bands, &scene.masks, channels, normalize)?;
    Ok(DynamicImage::ImageRgb8(rgb))
}

/// Load the index bands for `date`, compute the index and colorize it
fn render_index(
    source: &dyn RasterSource,
    root: &Path,
    date: NaiveDate,
    index: SpectralIndex,
    colormap: Colormap,
    mask_nodata: bool,
) -> Result<DynamicImage> {
    let (a, b) = index.bands();
    let scene = Scene::load(source, root, date, &[a, b])
        .with_context(|| format!("Failed to load bands for {date}"))?;
    info!(%date, %index, %colormap, "rendering index");

    let (values, mask) = index.calculate_with_mask(&scene.bands, &scene.masks)?;
    let mut rgb = composite::visualize(&values, colormap);
    if mask_nodata {
        composite::apply_mask(&mut rgb, &mask);
    }
    Ok(DynamicImage::ImageRgb8(rgb))
}
