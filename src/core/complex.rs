use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/**
 * A point in the complex plane, stored as a pair of 64-bit floats.
 *
 * Pure value type: all arithmetic returns new values and never traps.
 * Intermediate results may legitimately overflow to infinity while a
 * divergent escape sequence is running; downstream code treats any
 * non-finite magnitude as "escaped".
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Complex {
        Complex { re, im }
    }

    /// Complex square, expanded as `(re² − im², 2·re·im)`.
    /// One multiply cheaper than going through a general complex product.
    pub fn square(&self) -> Complex {
        Complex {
            re: self.re * self.re - self.im * self.im,
            im: 2.0 * self.re * self.im,
        }
    }

    pub fn length_squared(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /**
     * Treats `self` as a normalized coordinate `(u, v)` and maps it into the
     * rectangle spanned by `min` and `max`, componentwise:
     * `min + self * (max - min)`.
     */
    pub fn lerp(&self, min: &Complex, max: &Complex) -> Complex {
        Complex {
            re: min.re + self.re * (max.re - min.re),
            im: min.im + self.im * (max.im - min.im),
        }
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, other: Complex) -> Complex {
        Complex {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, other: Complex) -> Complex {
        Complex {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
}

/**
 * Axis-aligned rectangle in the complex plane, the region sampled by one
 * tile render. `min.re <= max.re` and `min.im <= max.im` are *not* enforced:
 * inverted rectangles simply produce a flipped mapping, and a degenerate
 * rectangle (`min == max`) maps every pixel to the same point.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PlaneRect {
    pub min: Complex,
    pub max: Complex,
}

impl PlaneRect {
    pub fn new(min: Complex, max: Complex) -> PlaneRect {
        PlaneRect { min, max }
    }

    /// The rectangle framing the entire Mandelbrot set at zoom factor one.
    pub fn default_view() -> PlaneRect {
        PlaneRect {
            min: Complex::new(-2.5, -1.5),
            max: Complex::new(1.5, 1.5),
        }
    }

    /// Diagonal extent, used as the zoom measure by the iteration budget.
    pub fn diagonal(&self) -> f64 {
        (self.max - self.min).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_square_matches_expanded_product() {
        let z = Complex::new(3.0, -2.0);
        let squared = z.square();
        assert_relative_eq!(squared.re, 5.0);
        assert_relative_eq!(squared.im, -12.0);
    }

    #[test]
    fn test_length_of_pythagorean_pair() {
        let z = Complex::new(3.0, 4.0);
        assert_relative_eq!(z.length_squared(), 25.0);
        assert_relative_eq!(z.length(), 5.0);
    }

    #[test]
    fn test_lerp_hits_corners_and_midpoint() {
        let min = Complex::new(-2.0, -1.0);
        let max = Complex::new(2.0, 3.0);

        let low = Complex::new(0.0, 0.0).lerp(&min, &max);
        assert_eq!(low, min);

        let upp = Complex::new(1.0, 1.0).lerp(&min, &max);
        assert_eq!(upp, max);

        let mid = Complex::new(0.5, 0.5).lerp(&min, &max);
        assert_relative_eq!(mid.re, 0.0);
        assert_relative_eq!(mid.im, 1.0);
    }

    #[test]
    fn test_lerp_of_degenerate_rect_is_constant() {
        let corner = Complex::new(0.25, -0.75);
        let mapped = Complex::new(0.7, 0.3).lerp(&corner, &corner);
        assert_eq!(mapped, corner);
    }

    #[test]
    fn test_default_view_diagonal() {
        // 4.0 wide, 3.0 tall.
        assert_relative_eq!(PlaneRect::default_view().diagonal(), 5.0);
    }

    #[test]
    fn test_overflow_is_tolerated() {
        let z = Complex::new(1e200, 0.0);
        let squared = z.square();
        assert!(squared.length_squared().is_infinite());
    }
}
