// THEORY:
// CIE94 keeps the lightness/chroma/hue decomposition of CIE76 but scales the chroma
// and hue terms by the chroma of the reference color, so saturated colors tolerate
// larger absolute differences. The first argument is the reference; the formula is
// therefore not symmetric.
//
// The hue difference is recovered from the identity ΔH² = Δa² + Δb² − ΔC². For two
// colors of (nearly) identical hue that expression can land a few ulps below zero,
// which would turn the whole result into `NaN`. It is clamped at zero, while a
// genuine `NaN` from bad input still propagates.

use crate::core_modules::lab::lab::{Lab, Weights};
use crate::core_modules::numeric::{DeltaE, non_negative};

/// Chroma weighting constant (graphic arts).
pub const K1: f64 = 0.045;
/// Hue weighting constant (graphic arts).
pub const K2: f64 = 0.015;

/// CIE94 difference with unit parametric factors.
pub fn delta_e94_default(x1: &Lab, x2: &Lab) -> DeltaE {
    delta_e94(x1, x2, &Weights::default())
}

/// CIE94 difference of `x2` from the reference `x1`.
pub fn delta_e94(x1: &Lab, x2: &Lab, weights: &Weights) -> DeltaE {
    let delta_l = x1.l - x2.l;
    let c1 = x1.chroma();
    let c2 = x2.chroma();
    let delta_c = c1 - c2;

    let delta_a = x1.a - x2.a;
    let delta_b = x1.b - x2.b;
    let delta_h_squared = delta_a * delta_a + delta_b * delta_b - delta_c * delta_c;
    let delta_h = non_negative(delta_h_squared).sqrt();

    let s_c = 1.0 + K1 * c1;
    let s_h = 1.0 + K2 * c1;

    let lightness = delta_l / weights.k_l();
    let chroma = delta_c / (weights.k_c() * s_c);
    let hue = delta_h / (weights.k_h() * s_h);

    (lightness * lightness + chroma * chroma + hue * hue).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pair() {
        let x1 = Lab::new(36.0, 60.0, 41.0);
        let x2 = Lab::new(55.0, 66.0, 77.0);
        assert!(
            (delta_e94_default(&x1, &x2) - 22.849281934529994).abs() < 1e-12
        );
    }

    #[test]
    fn handles_floating_point_error() {
        let x1 = Lab::new(53.23288178584245, 80.10930952982204, 67.22006831026425);
        let x2 = Lab::new(50.9588099835815, 77.47798295202801, 65.01211079141827);
        let result = delta_e94_default(&x1, &x2);
        assert!(!result.is_nan());
        assert!((result - 2.3524048718867823).abs() < 1e-12);
    }

    #[test]
    fn identity_is_zero() {
        let x = Lab::new(62.0, -12.5, 33.0);
        assert_eq!(delta_e94_default(&x, &x), 0.0);
    }

    #[test]
    fn lightness_weight_scales_lightness_term() {
        let x1 = Lab::new(40.0, 0.0, 0.0);
        let x2 = Lab::new(60.0, 0.0, 0.0);
        assert!(
            (delta_e94(&x1, &x2, &Weights::new(2.0, 1.0, 1.0)) - 10.0).abs() < 1e-12
        );
        assert!(
            (delta_e94(&x1, &x2, &Weights::new(0.0, 0.0, 0.0)) - 20.0).abs() < 1e-12
        );
    }

    #[test]
    fn nan_propagates_through_clamp() {
        let x1 = Lab::new(50.0, f64::NAN, 0.0);
        assert!(delta_e94_default(&x1, &Lab::default()).is_nan());
    }
}
