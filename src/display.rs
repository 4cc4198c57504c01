use crate::cli::OutputArgs;
use anyhow::{anyhow, Context, Result};
use image::DynamicImage;
use std::io::{IsTerminal, Write};
use std::path::Path;
use tracing::info;
use viuer::{print, Config as ViuerConfig};

/// Write the image to `--output`, or preview it in the terminal
pub fn emit_image(image: DynamicImage, output: &OutputArgs) -> Result<()> {
    match &output.output {
        Some(path) => save_image(&image, path),
        None => print_image(&image, output),
    }
}

pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to write image: {}", path.display()))?;
    info!(path = %path.display(), width = image.width(), height = image.height(), "wrote image");
    Ok(())
}

pub fn print_image(image: &DynamicImage, output: &OutputArgs) -> Result<()> {
    let is_tty = std::io::stdout().is_terminal();

    let (config_width, config_height) = match (output.width, output.height) {
        (Some(w), ..) => (Some(w), None),
        (None, Some(h)) => (None, Some(h)),
        (None, None) => (Some(48), None),
    };

    let config = ViuerConfig {
        width: config_width,
        height: config_height,
        absolute_offset: false,
        use_kitty: is_tty,
        use_iterm: is_tty,
        use_sixel: is_tty,
        ..Default::default()
    };

    std::io::stdout().flush()
        .map_err(|e| anyhow!("Failed to flush stdout: {e}"))?;

    print(image, &config)
        .map_err(|e| anyhow!("Failed to display image: {e}"))?;

    Ok(())
}
