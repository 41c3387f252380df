use serde::{Deserialize, Serialize};

use crate::core::color_map::PaletteParams;
use crate::core::file_io::{serialize_to_json_or_panic, FilePrefix};
use crate::core::stopwatch::Stopwatch;
use crate::tiles::rasterize::{render_tile, RenderedTile, TileRequest};

/**
 * Parameter file contents for the `render` subcommand: one tile request plus
 * the palette recipe used to color it.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TileRenderParams {
    pub request: TileRequest,
    pub palette: PaletteParams,
}

/// Copies a finished tile into an `image` buffer for PNG encoding. The tile
/// stores (alpha, red, green, blue); PNG wants RGBA.
fn to_image_buffer(tile: &RenderedTile) -> image::RgbaImage {
    let mut imgbuf = image::ImageBuffer::new(tile.width(), tile.height());
    for (x, y, pixel) in imgbuf.enumerate_pixels_mut() {
        let color = tile.pixel(x, y);
        *pixel = image::Rgba([color.r, color.g, color.b, color.a]);
    }
    imgbuf
}

/**
 * Renders the requested tile and writes the `.png`, a copy of the parameters
 * as `.json`, and a `_diagnostics.txt` with timing splits, all sharing the
 * same file prefix.
 */
pub fn render_tile_to_files(
    params: &TileRenderParams,
    file_prefix: FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stopwatch = Stopwatch::new("Tile Render".to_owned());

    serialize_to_json_or_panic(file_prefix.full_path_with_suffix(".json"), params);

    let palette = params.palette.build();
    stopwatch.record_split("build palette");

    let tile = render_tile(&params.request, &palette)?;
    stopwatch.record_split("render tile");

    let render_path = file_prefix.full_path_with_suffix(".png");
    to_image_buffer(&tile).save(&render_path)?;
    log::info!("Wrote tile image to: {}", render_path.display());
    stopwatch.record_split("write PNG");

    let mut diagnostics_file = file_prefix.create_file_with_suffix("_diagnostics.txt");
    stopwatch.display(&mut diagnostics_file)?;

    Ok(())
}
