use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::interpolation::{InterpolationKeyframe, MonotoneCubicSpline};
use crate::core::lookup_table::LookupTable;
use crate::core::pixel::PixelColor;

/**
 * Represents a single "keyframe" of the color map, pairing a
 * "query" with the color that should be produced at that query point.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct ColorMapKeyFrame {
    pub query: f32,       // specify location of this color within the map; on [0,1]
    pub rgb_raw: [u8; 3], // [R, G, B]
}

pub trait ColorMapper {
    fn compute_pixel(&self, query: f32) -> PixelColor;
}

/**
 * Continuous color map over [0,1]: one monotone cubic interpolant per RGB
 * channel, evaluated independently and clamped into [0, 255]. The monotone
 * splines cannot overshoot between keyframes, so clamping never causes
 * visible ringing near a saturated keyframe color.
 *
 * Keyframe queries must be strictly increasing. With no keyframes every
 * query maps to black; with one keyframe the map is constant.
 */
pub struct ColorMap {
    channels: [MonotoneCubicSpline<f32>; 3],
}

impl ColorMap {
    pub fn new(keyframes: &[ColorMapKeyFrame]) -> Self {
        let channel_spline = |channel: usize| {
            let channel_keyframes: Vec<InterpolationKeyframe<f32>> = keyframes
                .iter()
                .map(|keyframe| InterpolationKeyframe {
                    input: keyframe.query,
                    output: keyframe.rgb_raw[channel] as f32,
                })
                .collect();
            MonotoneCubicSpline::new(&channel_keyframes)
        };
        Self {
            channels: [channel_spline(0), channel_spline(1), channel_spline(2)],
        }
    }

    pub fn compute_channels(&self, query: f32) -> Vector3<f32> {
        Vector3::new(
            self.channels[0].evaluate(query),
            self.channels[1].evaluate(query),
            self.channels[2].evaluate(query),
        )
    }
}

impl ColorMapper for ColorMap {
    fn compute_pixel(&self, query: f32) -> PixelColor {
        PixelColor::from_channels(&self.compute_channels(query))
    }
}

/**
 * Immutable dense palette: the color map precomputed into a lookup table of
 * `entry_count` colors over [0,1], indexed by `floor(query * (N - 1))` with
 * clamping at both ends. Built once per palette definition and shared
 * read-only by every concurrent tile render; there is no incremental
 * update, a keyframe change requires a full rebuild.
 */
pub struct Palette {
    table: LookupTable<PixelColor>,
}

pub const DEFAULT_PALETTE_ENTRY_COUNT: usize = 512;

impl Palette {
    pub fn build(keyframes: &[ColorMapKeyFrame], entry_count: usize) -> Palette {
        let color_map = ColorMap::new(keyframes);
        Palette {
            table: LookupTable::new([0.0, 1.0], entry_count, |query| {
                color_map.compute_pixel(query)
            }),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Palette entry for a normalized query; must not be called when empty.
    pub fn color_at(&self, query: f32) -> PixelColor {
        *self.table.lookup(query)
    }
}

impl ColorMapper for Palette {
    fn compute_pixel(&self, query: f32) -> PixelColor {
        self.color_at(query)
    }
}

/**
 * Serializable recipe for building a `Palette`, the form used in parameter
 * files.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PaletteParams {
    pub keyframes: Vec<ColorMapKeyFrame>,
    pub entry_count: usize,
}

impl PaletteParams {
    pub fn build(&self) -> Palette {
        Palette::build(&self.keyframes, self.entry_count)
    }
}

impl Default for PaletteParams {
    fn default() -> PaletteParams {
        PaletteParams {
            keyframes: classic_keyframes(),
            entry_count: DEFAULT_PALETTE_ENTRY_COUNT,
        }
    }
}

/// The classic blue-white-orange gradient. The last knot sits below 1.0, so
/// constant extrapolation keeps the top of the range (points deep inside the
/// set) dark.
pub fn classic_keyframes() -> Vec<ColorMapKeyFrame> {
    vec![
        ColorMapKeyFrame {
            query: 0.0,
            rgb_raw: [0, 7, 100],
        },
        ColorMapKeyFrame {
            query: 0.16,
            rgb_raw: [32, 107, 203],
        },
        ColorMapKeyFrame {
            query: 0.42,
            rgb_raw: [237, 255, 255],
        },
        ColorMapKeyFrame {
            query: 0.6425,
            rgb_raw: [255, 170, 0],
        },
        ColorMapKeyFrame {
            query: 0.8575,
            rgb_raw: [0, 2, 0],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_map_is_exact_at_keyframes() {
        let keyframes = classic_keyframes();
        let color_map = ColorMap::new(&keyframes);
        for keyframe in &keyframes {
            let pixel = color_map.compute_pixel(keyframe.query);
            assert_eq!(
                (pixel.r, pixel.g, pixel.b),
                (
                    keyframe.rgb_raw[0],
                    keyframe.rgb_raw[1],
                    keyframe.rgb_raw[2]
                ),
                "mismatch at query {}",
                keyframe.query
            );
            assert_eq!(pixel.a, 255);
        }
    }

    #[test]
    fn test_palette_first_entry_matches_first_keyframe() {
        let palette = Palette::build(&classic_keyframes(), DEFAULT_PALETTE_ENTRY_COUNT);
        assert_eq!(
            palette.color_at(0.0),
            PixelColor {
                a: 255,
                r: 0,
                g: 7,
                b: 100
            }
        );
    }

    #[test]
    fn test_palette_top_of_range_is_last_keyframe_color() {
        let palette = Palette::build(&classic_keyframes(), DEFAULT_PALETTE_ENTRY_COUNT);
        // Queries at or beyond the last knot extrapolate to its color.
        assert_eq!(
            palette.color_at(1.0),
            PixelColor {
                a: 255,
                r: 0,
                g: 2,
                b: 0
            }
        );
    }

    #[test]
    fn test_empty_keyframes_build_a_black_palette() {
        let palette = Palette::build(&[], 64);
        assert_eq!(palette.entry_count(), 64);
        assert_eq!(palette.color_at(0.0), PixelColor::BLACK);
        assert_eq!(palette.color_at(0.5), PixelColor::BLACK);
        assert_eq!(palette.color_at(1.0), PixelColor::BLACK);
    }

    #[test]
    fn test_single_keyframe_builds_a_constant_palette() {
        let keyframes = [ColorMapKeyFrame {
            query: 0.5,
            rgb_raw: [10, 20, 30],
        }];
        let palette = Palette::build(&keyframes, 16);
        let expected = PixelColor {
            a: 255,
            r: 10,
            g: 20,
            b: 30,
        };
        assert_eq!(palette.color_at(0.0), expected);
        assert_eq!(palette.color_at(1.0), expected);
    }

    #[test]
    fn test_zero_entry_palette_is_reported_empty() {
        let palette = Palette::build(&classic_keyframes(), 0);
        assert!(palette.is_empty());
    }
}
