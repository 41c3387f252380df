use num_traits::Float;

/// Generic keyframe: maps an input (query) to an output value.
#[derive(Clone, Copy, Debug)]
pub struct InterpolationKeyframe<T> {
    pub input: T,
    pub output: T,
}

/**
 * Piecewise cubic Hermite interpolant with the Fritsch-Carlson tangent
 * limiter. The interpolant passes exactly through every keyframe, and the
 * limiter keeps each segment within the interval spanned by its two
 * keyframe outputs -- no overshoot or undershoot between knots.
 *
 * Queries below the first knot or at/above the last knot return that knot's
 * output exactly (constant extrapolation). Fewer than two keyframes
 * degenerate to a constant (or zero) function. Keyframe inputs must be
 * strictly increasing; violating that yields an undefined interpolant, not a
 * runtime failure.
 */
pub struct MonotoneCubicSpline<T: Float> {
    queries: Vec<T>,
    values: Vec<T>,
    // Hermite tangent per knot, then quadratic/cubic coefficients per interval.
    tangents: Vec<T>,
    c2: Vec<T>,
    c3: Vec<T>,
}

impl<T: Float> MonotoneCubicSpline<T> {
    pub fn new(keyframes: &[InterpolationKeyframe<T>]) -> Self {
        let queries: Vec<T> = keyframes.iter().map(|k| k.input).collect();
        let values: Vec<T> = keyframes.iter().map(|k| k.output).collect();

        let n = keyframes.len();
        if n < 2 {
            return Self {
                queries,
                values,
                tangents: Vec::new(),
                c2: Vec::new(),
                c3: Vec::new(),
            };
        }

        let two = T::from(2.0).unwrap();
        let three = T::from(3.0).unwrap();

        // Consecutive differences and secant slopes.
        let dx: Vec<T> = (0..n - 1).map(|i| queries[i + 1] - queries[i]).collect();
        let slopes: Vec<T> = (0..n - 1)
            .map(|i| (values[i + 1] - values[i]) / dx[i])
            .collect();

        // Interior tangents: zero at local extrema, otherwise the weighted
        // harmonic mean of the neighboring secants (Fritsch-Carlson).
        let mut tangents = Vec::with_capacity(n);
        tangents.push(slopes[0]);
        for i in 1..n - 1 {
            let slope_prev = slopes[i - 1];
            let slope_next = slopes[i];
            if slope_prev * slope_next <= T::zero() {
                tangents.push(T::zero());
            } else {
                let h_prev = dx[i - 1];
                let h_next = dx[i];
                let span = h_prev + h_next;
                tangents.push(
                    three * span
                        / ((span + h_next) / slope_prev + (span + h_prev) / slope_next),
                );
            }
        }
        tangents.push(slopes[n - 2]);

        // Remaining polynomial coefficients, one pair per interval.
        let mut c2 = Vec::with_capacity(n - 1);
        let mut c3 = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let inv_dx = T::one() / dx[i];
            let common = tangents[i] + tangents[i + 1] - two * slopes[i];
            c2.push((slopes[i] - tangents[i] - common) * inv_dx);
            c3.push(common * inv_dx * inv_dx);
        }

        Self {
            queries,
            values,
            tangents,
            c2,
            c3,
        }
    }

    pub fn evaluate(&self, query: T) -> T {
        match self.values.len() {
            0 => T::zero(),
            1 => self.values[0],
            n => {
                // A NaN query fails every comparison below; pin it to the
                // first knot instead of indexing with a garbage interval.
                if query.is_nan() || query <= self.queries[0] {
                    return self.values[0];
                }
                // The rightmost knot must give an exact result, not an
                // extrapolation with a vanishing denominator.
                if query >= self.queries[n - 1] {
                    return self.values[n - 1];
                }
                let idx = self.queries.partition_point(|q| *q <= query) - 1;
                let diff = query - self.queries[idx];
                let diff_sqr = diff * diff;
                self.values[idx]
                    + self.tangents[idx] * diff
                    + self.c2[idx] * diff_sqr
                    + self.c3[idx] * diff * diff_sqr
            }
        }
    }
}
