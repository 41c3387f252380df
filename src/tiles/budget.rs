use serde::{Deserialize, Serialize};

use crate::core::complex::PlaneRect;

/// Default multiplier for the zoom-scaled budget. Renderers of this kind
/// tune the constant somewhere in the 40-65 range. The scaling policy is a
/// heuristic trade between boundary detail and compute cost, not an
/// exactness guarantee, which is why the constant is carried in the
/// parameter file rather than hard-coded.
pub const DEFAULT_BASE_ITERATIONS: u32 = 48;

/**
 * Iteration budget for one tile render: either an explicit count, or a rule
 * that derives the count from the caller's zoom factor. Deeper zoom needs
 * more iterations to separate points near the set boundary; shallow zoom
 * wastes cycles on a large budget.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum IterationBudget {
    Fixed(u32),
    ZoomScaled(ZoomScaledBudget),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ZoomScaledBudget {
    pub base_iterations: u32,
}

impl ZoomScaledBudget {
    /**
     * `max_iter = base_iterations * max(1, log2(zoom_factor))`, floored at
     * one iteration. There is no upper cap; a caller that needs one imposes
     * it on the zoom factor it supplies.
     */
    pub fn max_iterations(&self, zoom_factor: f64) -> u32 {
        let scale = zoom_factor.log2().max(1.0);
        let count = (self.base_iterations as f64 * scale) as u32;
        count.max(1)
    }
}

impl IterationBudget {
    pub fn resolve(&self, zoom_factor: f64) -> u32 {
        match self {
            IterationBudget::Fixed(count) => (*count).max(1),
            IterationBudget::ZoomScaled(budget) => budget.max_iterations(zoom_factor),
        }
    }
}

impl Default for IterationBudget {
    fn default() -> IterationBudget {
        IterationBudget::ZoomScaled(ZoomScaledBudget {
            base_iterations: DEFAULT_BASE_ITERATIONS,
        })
    }
}

/**
 * Zoom factor implied by a requested rectangle: the diagonal of the default
 * full-set view divided by the rectangle's diagonal. A degenerate rectangle
 * derives zoom factor one rather than infinity, so rule-derived budgets stay
 * finite.
 */
pub fn zoom_factor_for_rect(rect: &PlaneRect) -> f64 {
    let diagonal = rect.diagonal();
    if diagonal > 0.0 {
        PlaneRect::default_view().diagonal() / diagonal
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::complex::Complex;

    #[test]
    fn test_shallow_zoom_uses_the_base_budget() {
        let budget = ZoomScaledBudget { base_iterations: 48 };
        // log2(zoom) <= 1 for zoom <= 2, so the base count applies.
        assert_eq!(budget.max_iterations(1.0), 48);
        assert_eq!(budget.max_iterations(2.0), 48);
        assert_eq!(budget.max_iterations(0.25), 48);
    }

    #[test]
    fn test_budget_grows_logarithmically_with_zoom() {
        let budget = ZoomScaledBudget { base_iterations: 48 };
        assert_eq!(budget.max_iterations(16.0), 48 * 4);
        assert_eq!(budget.max_iterations(1024.0), 48 * 10);
    }

    #[test]
    fn test_budget_never_drops_below_one() {
        let budget = ZoomScaledBudget { base_iterations: 0 };
        assert_eq!(budget.max_iterations(1024.0), 1);
        assert_eq!(IterationBudget::Fixed(0).resolve(1.0), 1);
    }

    #[test]
    fn test_fixed_budget_ignores_zoom() {
        let budget = IterationBudget::Fixed(300);
        assert_eq!(budget.resolve(1.0), 300);
        assert_eq!(budget.resolve(1e9), 300);
    }

    #[test]
    fn test_zoom_factor_of_the_default_view_is_one() {
        assert_eq!(zoom_factor_for_rect(&PlaneRect::default_view()), 1.0);
    }

    #[test]
    fn test_degenerate_rect_derives_zoom_one() {
        let corner = Complex::new(-0.75, 0.1);
        let rect = PlaneRect::new(corner, corner);
        assert_eq!(zoom_factor_for_rect(&rect), 1.0);
    }
}
