//! Image encoding for finished renders.
//!
//! `.ppm` paths get an ASCII P3 file; everything else goes through the
//! `image` crate, which picks the format from the extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use lumen_renderer::ImageBuffer;

/// Save a rendered image.
pub fn save_image(rendered: &ImageBuffer, path: &Path) -> Result<()> {
    let is_ppm = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_ppm(rendered, &mut writer)?;
        writer.flush()?;
    } else {
        image::save_buffer(
            path,
            &rendered.to_rgb8(),
            rendered.width,
            rendered.height,
            image::ColorType::Rgb8,
        )
        .with_context(|| format!("encoding {}", path.display()))?;
    }

    info!("Saved {}x{} image to {}", rendered.width, rendered.height, path.display());
    Ok(())
}

/// Write an ASCII PPM (P3), top row first, one pixel per line.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgb in image.to_rgb8().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}
