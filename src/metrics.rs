// THEORY:
// The `metrics` module is the public face of the color-difference engine for single
// color pairs: three free functions, one per formula. They are thin, allocation-free
// wrappers over the core formulas and are safe to call from any number of threads at
// once, since every evaluation lives entirely on the caller's stack.
//
// Invalid input is never rejected. A component that is `NaN` or infinite (for example
// from `Lab::parse` on non-numeric text) yields a `NaN` or infinite result, which is
// returned as-is.

use crate::core_modules::de00::delta_e00;
use crate::core_modules::de76::delta_e76;
use crate::core_modules::de94::delta_e94_default;
use crate::core_modules::lab::lab::{Lab, Weights};
use crate::core_modules::numeric::DeltaE;

/// CIE76: Euclidean distance in L*a*b*.
pub fn get_delta_e76(lab1: &Lab, lab2: &Lab) -> DeltaE {
    delta_e76(lab1, lab2)
}

/// CIE94 with graphic-arts constants; `lab1` is the reference color.
pub fn get_delta_e94(lab1: &Lab, lab2: &Lab) -> DeltaE {
    delta_e94_default(lab1, lab2)
}

/// CIEDE2000, optionally with parametric weights (kL, kC, kH).
pub fn get_delta_e00(lab1: &Lab, lab2: &Lab, weights: Option<&Weights>) -> DeltaE {
    delta_e00(lab1, lab2, weights)
}
