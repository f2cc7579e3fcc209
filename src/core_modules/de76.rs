// THEORY:
// CIE76 is the original color-difference formula: the straight-line distance between
// two points in L*a*b*. It is cheap and symmetric but overstates differences among
// saturated colors, which is what CIE94 and CIEDE2000 later corrected.

use crate::core_modules::lab::lab::Lab;
use crate::core_modules::numeric::DeltaE;

/// Euclidean distance between two colors.
pub fn delta_e76(x1: &Lab, x2: &Lab) -> DeltaE {
    let delta_l = x1.l - x2.l;
    let delta_a = x1.a - x2.a;
    let delta_b = x1.b - x2.b;

    (delta_l * delta_l + delta_a * delta_a + delta_b * delta_b).sqrt()
}
