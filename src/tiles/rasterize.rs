use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

use crate::core::color_map::Palette;
use crate::core::complex::{Complex, PlaneRect};
use crate::core::pixel::PixelColor;
use crate::tiles::budget::IterationBudget;
use crate::tiles::escape::EscapeSequence;

/**
 * Everything needed to render one tile: the plane rectangle to sample, the
 * output resolution, the caller's zoom factor, and the iteration budget (or
 * the rule to derive it from the zoom factor). Transient -- built per render
 * call and consumed entirely within it.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TileRequest {
    pub rect: PlaneRect,
    pub resolution: nalgebra::Vector2<u32>,
    pub zoom_hint: f64,
    pub budget: IterationBudget,
}

/**
 * Finished tile: a row-major buffer of opaque ARGB pixels. Ownership
 * transfers to the caller on return; the renderer keeps no reference and no
 * cache -- tile identity and eviction belong to the tile host.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTile {
    width: u32,
    height: u32,
    pixels: Vec<PixelColor>,
}

impl RenderedTile {
    /**
     * Wraps an existing pixel buffer, enforcing the packing-stage contract:
     * positive dimensions and exactly `width * height` pixels.
     */
    pub fn from_pixels(
        width: u32,
        height: u32,
        pixels: Vec<PixelColor>,
    ) -> Result<RenderedTile, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::ZeroResolution { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(RenderError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(RenderedTile {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel sequence, top row first.
    pub fn pixels(&self) -> &[PixelColor] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> PixelColor {
        assert!(x < self.width && y < self.height);
        self.pixels[(y * self.width + x) as usize]
    }

    /// Flattens the tile into (alpha, red, green, blue) byte quadruples, the
    /// exact layout the bitmap packer consumes.
    pub fn to_argb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.to_argb_bytes());
        }
        bytes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    ZeroResolution { width: u32, height: u32 },
    EmptyPalette,
    PixelCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroResolution { width, height } => {
                write!(f, "Tile resolution must be positive, got {}x{}", width, height)
            }
            Self::EmptyPalette => {
                write!(f, "Palette must contain at least one entry")
            }
            Self::PixelCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Pixel buffer holds {} entries, resolution requires {}",
                    actual, expected
                )
            }
        }
    }
}

impl Error for RenderError {}

/// Maps one pixel coordinate to its plane point. The vertical axis is
/// flipped: row 0 (top of the tile) maps to `rect.max.im`. This convention
/// is part of the render contract, not an implementation detail.
fn plane_point(rect: &PlaneRect, col: u32, row: u32, width: u32, height: u32) -> Complex {
    let u = col as f64 / width as f64;
    let v = (height - row) as f64 / height as f64;
    Complex::new(u, v).lerp(&rect.min, &rect.max)
}

/**
 * Renders one tile: for every output pixel, map it into the requested
 * rectangle, run the escape sequence, and look the smooth dwell up in the
 * palette. Row 0 of the output is the top of the tile and samples
 * `rect.max.im` (flipped vertical axis).
 *
 * Every pixel is independent, so rows fan out across the rayon pool, each
 * worker writing its own disjoint slice of the buffer; the result is
 * byte-identical regardless of scheduling, and identical requests always
 * produce identical tiles.
 *
 * Contract violations (zero resolution, empty palette) are rejected before
 * any pixel work starts; no partial tile is ever returned.
 */
pub fn render_tile(request: &TileRequest, palette: &Palette) -> Result<RenderedTile, RenderError> {
    let width = request.resolution[0];
    let height = request.resolution[1];
    if width == 0 || height == 0 {
        return Err(RenderError::ZeroResolution { width, height });
    }
    if palette.is_empty() {
        return Err(RenderError::EmptyPalette);
    }

    let max_iter = request.budget.resolve(request.zoom_hint);

    let mut pixels = vec![PixelColor::BLACK; (width as usize) * (height as usize)];
    pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, row_pixels)| {
            for (col, pixel) in row_pixels.iter_mut().enumerate() {
                let point = plane_point(&request.rect, col as u32, row as u32, width, height);
                let smooth = EscapeSequence::smooth_escape_value(&point, max_iter);
                *pixel = palette.color_at(smooth as f32);
            }
        });

    Ok(RenderedTile {
        width,
        height,
        pixels,
    })
}
