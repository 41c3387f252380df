use serde::{Deserialize, Serialize};

use crate::core::color_map::{ColorMap, ColorMapKeyFrame, ColorMapper};
use crate::core::file_io::FilePrefix;

#[derive(Serialize, Deserialize, Debug)]
pub struct ColorSwatchParams {
    pub resolution: (u32, u32),
    pub keyframes: Vec<ColorMapKeyFrame>,
}

/**
 * Renders the continuous color map as a horizontal gradient strip, for
 * tuning keyframes before committing them to a tile parameter file. Samples
 * the splines directly rather than a palette lookup table, so what you see
 * is the unquantized interpolant.
 */
pub fn generate_color_swatch(
    params: &ColorSwatchParams,
    file_prefix: FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    let color_map = ColorMap::new(&params.keyframes);
    let (width, height) = params.resolution;

    let denominator = width.saturating_sub(1).max(1) as f32;
    let mut imgbuf = image::ImageBuffer::new(width, height);
    for (x, _y, pixel) in imgbuf.enumerate_pixels_mut() {
        let color = color_map.compute_pixel(x as f32 / denominator);
        *pixel = image::Rgba([color.r, color.g, color.b, color.a]);
    }

    let render_path = file_prefix.full_path_with_suffix(".png");
    imgbuf.save(&render_path)?;
    log::info!("Wrote color swatch to: {}", render_path.display());

    Ok(())
}
