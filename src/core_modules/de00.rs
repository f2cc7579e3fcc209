// THEORY:
// CIEDE2000 is the most perceptually accurate of the three color-difference formulas,
// and the only one with real algorithmic structure. It corrects CIE94 with:
//   • an a*-axis rescaling (a′) that lifts near-neutral colors,
//   • lightness, chroma and hue scale factors (S_L, S_C, S_H) that depend on the
//     pair's mean lightness, chroma and hue,
//   • a rotation term (R_T) coupling chroma and hue differences in the blue region.
//
// The evaluation is one fixed pipeline of roughly fifteen intermediate quantities.
// Each step reads only values computed before it, so the whole evaluation is built as
// a single immutable `Ciede2000` record in dependency order. Nothing outlives the call
// except that record, and callers who only want the number use `delta_e00`.
//
// Angles:
// All hue state is held in degrees between steps. Conversion to radians happens only
// at the point of a trig call, through `degrees_to_radians`/`radians_to_degrees`.
//
// Undefined hue:
// A color with zero chroma has no hue. `hue_angle` resolves atan2(0, 0) to 0°, and
// `delta_hue_angle` forces Δh′ to 0 when either raw chroma is 0, so the hue term of a
// neutral color never depends on the other color's angle.

use crate::core_modules::lab::lab::{Lab, Weights};
use crate::core_modules::numeric::{DeltaE, non_negative};

pub type Degrees = f64;
pub type Radians = f64;

/// 25⁷, the knee of the chroma compression terms.
const TWENTY_FIVE_POW_7: f64 = 6_103_515_625.0;

/// A fully evaluated CIEDE2000 comparison.
///
/// Fields are named after the quantities of the published formula; "prime" marks the
/// values computed from the rescaled a′ axis and "bar" marks pair means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ciede2000 {
    pub k_l: f64,
    pub k_c: f64,
    pub k_h: f64,
    pub delta_l_prime: f64,
    pub l_bar: f64,
    pub c1: f64,
    pub c2: f64,
    pub c_bar: f64,
    pub a_prime1: f64,
    pub a_prime2: f64,
    pub c_prime1: f64,
    pub c_prime2: f64,
    pub c_bar_prime: f64,
    pub delta_c_prime: f64,
    pub s_l: f64,
    pub s_c: f64,
    pub h_prime1: Degrees,
    pub h_prime2: Degrees,
    pub delta_h_prime: Degrees,
    pub delta_big_h_prime: f64,
    pub h_bar_prime: Degrees,
    pub t: f64,
    pub s_h: f64,
    pub r_t: f64,
}

impl Ciede2000 {
    /// Runs every step of the formula for `x1` against `x2`.
    pub fn evaluate(x1: &Lab, x2: &Lab, weights: &Weights) -> Self {
        let Lab { l: l1, a: a1, b: b1 } = *x1;
        let Lab { l: l2, a: a2, b: b2 } = *x2;

        let delta_l_prime = l2 - l1;
        let l_bar = (l1 + l2) / 2.0;

        let c1 = (a1 * a1 + b1 * b1).sqrt();
        let c2 = (a2 * a2 + b2 * b2).sqrt();
        let c_bar = (c1 + c2) / 2.0;

        // Both colors use the pair mean C̄ here, not their own chroma.
        let g = 1.0 - chroma_compression(c_bar);
        let a_prime1 = a1 + (a1 / 2.0) * g;
        let a_prime2 = a2 + (a2 / 2.0) * g;

        let c_prime1 = (a_prime1 * a_prime1 + b1 * b1).sqrt();
        let c_prime2 = (a_prime2 * a_prime2 + b2 * b2).sqrt();
        let c_bar_prime = (c_prime1 + c_prime2) / 2.0;
        let delta_c_prime = c_prime2 - c_prime1;

        let l_offset_sq = (l_bar - 50.0) * (l_bar - 50.0);
        let s_l = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
        let s_c = 1.0 + 0.045 * c_bar_prime;

        let h_prime1 = hue_angle(b1, a_prime1);
        let h_prime2 = hue_angle(b2, a_prime2);
        let delta_h_prime = delta_hue_angle(c1, c2, h_prime1, h_prime2);

        let delta_big_h_prime =
            2.0 * (c_prime1 * c_prime2).sqrt() * (degrees_to_radians(delta_h_prime) / 2.0).sin();

        let h_bar_prime = mean_hue_angle(h_prime1, h_prime2);
        let t = hue_weighting(h_bar_prime);
        let s_h = 1.0 + 0.015 * c_bar_prime * t;
        let r_t = rotation(c_bar_prime, h_bar_prime);

        Self {
            k_l: weights.k_l(),
            k_c: weights.k_c(),
            k_h: weights.k_h(),
            delta_l_prime,
            l_bar,
            c1,
            c2,
            c_bar,
            a_prime1,
            a_prime2,
            c_prime1,
            c_prime2,
            c_bar_prime,
            delta_c_prime,
            s_l,
            s_c,
            h_prime1,
            h_prime2,
            delta_h_prime,
            delta_big_h_prime,
            h_bar_prime,
            t,
            s_h,
            r_t,
        }
    }

    /// Weighted lightness term ΔL′ / (k_L·S_L).
    pub fn lightness_term(&self) -> f64 {
        self.delta_l_prime / (self.k_l * self.s_l)
    }

    /// Weighted chroma term ΔC′ / (k_C·S_C).
    pub fn chroma_term(&self) -> f64 {
        self.delta_c_prime / (self.k_c * self.s_c)
    }

    /// Weighted hue term ΔH′ / (k_H·S_H).
    pub fn hue_term(&self) -> f64 {
        self.delta_big_h_prime / (self.k_h * self.s_h)
    }

    pub fn delta_e(&self) -> DeltaE {
        let lightness = self.lightness_term();
        let chroma = self.chroma_term();
        let hue = self.hue_term();

        let radicand =
            lightness * lightness + chroma * chroma + hue * hue + self.r_t * chroma * hue;

        // Rounding can push a zero radicand a few ulps negative for near-identical inputs.
        non_negative(radicand).sqrt()
    }
}

/// CIEDE2000 difference between two colors. `None` means unit parametric factors.
pub fn delta_e00(x1: &Lab, x2: &Lab, weights: Option<&Weights>) -> DeltaE {
    let weights = weights.copied().unwrap_or_default();
    Ciede2000::evaluate(x1, x2, &weights).delta_e()
}

/// √(C⁷ / (C⁷ + 25⁷))
fn chroma_compression(chroma: f64) -> f64 {
    let chroma_pow_7 = chroma.powi(7);
    (chroma_pow_7 / (chroma_pow_7 + TWENTY_FIVE_POW_7)).sqrt()
}

/// Hue angle in [0, 360). The undefined angle of the origin resolves to 0.
fn hue_angle(b: f64, a_prime: f64) -> Degrees {
    if b == 0.0 && a_prime == 0.0 {
        return 0.0;
    }

    let angle = radians_to_degrees(b.atan2(a_prime));
    if angle >= 0.0 { angle } else { angle + 360.0 }
}

/// Signed hue difference along the shorter arc.
fn delta_hue_angle(c1: f64, c2: f64, h_prime1: Degrees, h_prime2: Degrees) -> Degrees {
    if c1 == 0.0 || c2 == 0.0 {
        return 0.0;
    }

    if (h_prime1 - h_prime2).abs() <= 180.0 {
        h_prime2 - h_prime1
    } else if h_prime2 <= h_prime1 {
        h_prime2 - h_prime1 + 360.0
    } else {
        h_prime2 - h_prime1 - 360.0
    }
}

/// Mean hue taken on the side of the circle where the two angles are closer.
fn mean_hue_angle(h_prime1: Degrees, h_prime2: Degrees) -> Degrees {
    if (h_prime1 - h_prime2).abs() > 180.0 {
        (h_prime1 + h_prime2 + 360.0) / 2.0
    } else {
        (h_prime1 + h_prime2) / 2.0
    }
}

fn hue_weighting(h_bar_prime: Degrees) -> f64 {
    1.0 - 0.17 * degrees_to_radians(h_bar_prime - 30.0).cos()
        + 0.24 * degrees_to_radians(2.0 * h_bar_prime).cos()
        + 0.32 * degrees_to_radians(3.0 * h_bar_prime + 6.0).cos()
        - 0.20 * degrees_to_radians(4.0 * h_bar_prime - 63.0).cos()
}

fn rotation(c_bar_prime: f64, h_bar_prime: Degrees) -> f64 {
    let hue_offset = (h_bar_prime - 275.0) / 25.0;
    let delta_theta = 60.0 * (-(hue_offset * hue_offset)).exp();

    -2.0 * chroma_compression(c_bar_prime) * degrees_to_radians(delta_theta).sin()
}

fn degrees_to_radians(degrees: Degrees) -> Radians {
    degrees * (std::f64::consts::PI / 180.0)
}

fn radians_to_degrees(radians: Radians) -> Degrees {
    radians * (180.0 / std::f64::consts::PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Identity pairs and the black/near-white pair first, then pairs 1-34 of Sharma,
    /// Wu & Dalal, "The CIEDE2000 Color-Difference Formula: Implementation Notes,
    /// Supplementary Test Data, and Mathematical Observations".
    const REFERENCE_PAIRS: [([f64; 3], [f64; 3], f64); 37] = [
        ([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 0.0),
        ([99.5, 0.005, -0.010], [99.5, 0.005, -0.010], 0.0),
        ([100.0, 0.005, -0.010], [0.0, 0.0, 0.0], 100.0),
        ([50.0, 2.6772, -79.7751], [50.0, 0.0, -82.7485], 2.0425),
        ([50.0, 3.1571, -77.2803], [50.0, 0.0, -82.7485], 2.8615),
        ([50.0, 2.8361, -74.0200], [50.0, 0.0, -82.7485], 3.4412),
        ([50.0, -1.3802, -84.2814], [50.0, 0.0, -82.7485], 1.0000),
        ([50.0, -1.1848, -84.8006], [50.0, 0.0, -82.7485], 1.0000),
        ([50.0, -0.9009, -85.5211], [50.0, 0.0, -82.7485], 1.0000),
        ([50.0, 0.0, 0.0], [50.0, -1.0, 2.0], 2.3669),
        ([50.0, -1.0, 2.0], [50.0, 0.0, 0.0], 2.3669),
        ([50.0, 2.4900, -0.0010], [50.0, -2.4900, 0.0009], 7.1792),
        ([50.0, 2.4900, -0.0010], [50.0, -2.4900, 0.0010], 7.1792),
        ([50.0, 2.4900, -0.0010], [50.0, -2.4900, 0.0011], 7.2195),
        ([50.0, 2.4900, -0.0010], [50.0, -2.4900, 0.0012], 7.2195),
        ([50.0, -0.0010, 2.4900], [50.0, 0.0009, -2.4900], 4.8045),
        ([50.0, -0.0010, 2.4900], [50.0, 0.0010, -2.4900], 4.8045),
        ([50.0, -0.0010, 2.4900], [50.0, 0.0011, -2.4900], 4.7461),
        ([50.0, 2.5000, 0.0000], [50.0, 0.0000, -2.5000], 4.3065),
        ([50.0, 2.5000, 0.0000], [73.0, 25.0000, -18.0000], 27.1492),
        ([50.0, 2.5000, 0.0000], [61.0, -5.0000, 29.0000], 22.8977),
        ([50.0, 2.5000, 0.0000], [56.0, -27.0000, -3.0000], 31.9030),
        ([50.0, 2.5000, 0.0000], [58.0, 24.0000, 15.0000], 19.4535),
        ([50.0, 2.5000, 0.0000], [50.0, 3.1736, 0.5854], 1.0000),
        ([50.0, 2.5000, 0.0000], [50.0, 3.2972, 0.0000], 1.0000),
        ([50.0, 2.5000, 0.0000], [50.0, 1.8634, 0.5757], 1.0000),
        ([50.0, 2.5000, 0.0000], [50.0, 3.2592, 0.3350], 1.0000),
        ([60.2574, -34.0099, 36.2677], [60.4626, -34.1751, 39.4387], 1.2644),
        ([63.0109, -31.0961, -5.8663], [62.8187, -29.7946, -4.0864], 1.2630),
        ([61.2901, 3.7196, -5.3901], [61.4292, 2.2480, -4.9620], 1.8731),
        ([35.0831, -44.1164, 3.7933], [35.0232, -40.0716, 1.5901], 1.8645),
        ([22.7233, 20.0904, -46.6940], [23.0331, 14.9730, -42.5619], 2.0373),
        ([36.4612, 47.8580, 18.3852], [36.2715, 50.5065, 21.2231], 1.4146),
        ([90.8027, -2.0831, 1.4410], [91.1528, -1.6435, 0.0447], 1.4441),
        ([90.9257, -0.5406, -0.9208], [88.6381, -0.8985, -0.7239], 1.5381),
        ([6.7747, -0.2908, -2.4247], [5.8714, -0.0985, -2.2286], 0.6377),
        ([2.0776, 0.0795, -1.1350], [0.9033, -0.0636, -0.5514], 0.9082),
    ];

    fn assert_close_4dp(expected: f64, actual: f64, context: &str) {
        assert!(
            (expected - actual).abs() < 5e-5,
            "{context}: expected {expected:.4}, got {actual:.6}"
        );
    }

    #[test]
    fn reference_pair() {
        let x1 = Lab::new(36.0, 60.0, 41.0);
        let x2 = Lab::new(55.0, 66.0, 77.0);
        assert!((delta_e00(&x1, &x2, None) - 22.3945069524179).abs() < 1e-9);
    }

    #[test]
    fn reference_table_in_both_orders() {
        for (index, (c1, c2, expected)) in REFERENCE_PAIRS.iter().enumerate() {
            let x1 = Lab::from(*c1);
            let x2 = Lab::from(*c2);
            let forward = delta_e00(&x1, &x2, None);
            let backward = delta_e00(&x2, &x1, None);
            assert_close_4dp(*expected, forward, &format!("row {index}"));
            assert_close_4dp(*expected, backward, &format!("row {index} swapped"));
        }
    }

    #[test]
    fn hue_angle_resolves_origin_to_zero() {
        assert_eq!(hue_angle(0.0, 0.0), 0.0);
        assert_eq!(hue_angle(-0.0, 0.0), 0.0);
        assert!((hue_angle(1.0, 0.0) - 90.0).abs() < 1e-12);
        assert!((hue_angle(-1.0, 0.0) - 270.0).abs() < 1e-12);
        assert!((hue_angle(0.0, -1.0) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn delta_hue_takes_shorter_arc() {
        assert_eq!(delta_hue_angle(1.0, 1.0, 10.0, 30.0), 20.0);
        assert_eq!(delta_hue_angle(1.0, 1.0, 350.0, 10.0), 20.0);
        assert_eq!(delta_hue_angle(1.0, 1.0, 10.0, 350.0), -20.0);
        assert_eq!(delta_hue_angle(0.0, 1.0, 10.0, 350.0), 0.0);
    }

    #[test]
    fn mean_hue_wraps_around_zero() {
        assert_eq!(mean_hue_angle(10.0, 30.0), 20.0);
        assert_eq!(mean_hue_angle(350.0, 10.0), 360.0);
        assert_eq!(mean_hue_angle(180.0, 0.0), 90.0);
    }

    #[test]
    fn zero_chroma_makes_hue_term_vanish() {
        let neutral = Lab::new(50.0, 0.0, 0.0);
        let chromatic = [
            (10.0, 0.0),
            (0.0, 10.0),
            (-10.0, 0.0),
            (0.0, -10.0),
            (-7.0, 7.0),
        ];
        for (a, b) in chromatic {
            let colored = Lab::new(50.0, a, b);
            let forward = Ciede2000::evaluate(&neutral, &colored, &Weights::default());
            let backward = Ciede2000::evaluate(&colored, &neutral, &Weights::default());
            assert_eq!(forward.delta_h_prime, 0.0);
            assert_eq!(forward.delta_big_h_prime, 0.0);
            assert_eq!(forward.hue_term(), 0.0);
            assert_eq!(backward.delta_h_prime, 0.0);
        }
    }

    #[test]
    fn weights_scale_their_terms() {
        let x1 = Lab::new(36.0, 60.0, 41.0);
        let x2 = Lab::new(55.0, 66.0, 77.0);
        let unit = Ciede2000::evaluate(&x1, &x2, &Weights::default());
        let heavy = Ciede2000::evaluate(&x1, &x2, &Weights::new(2.0, 1.0, 0.5));

        assert!(
            (heavy.lightness_term() - unit.lightness_term() / 2.0).abs() < 1e-12
        );
        assert_eq!(heavy.chroma_term(), unit.chroma_term());
        assert!((heavy.hue_term() - unit.hue_term() * 2.0).abs() < 1e-12);

        let hue_only = delta_e00(&x1, &x2, Some(&Weights::new(1.0, 1.0, 0.5)));
        assert!((hue_only - 30.285918547258184).abs() < 1e-9);
    }

    #[test]
    fn falsy_weights_match_defaults() {
        let x1 = Lab::new(36.0, 60.0, 41.0);
        let x2 = Lab::new(55.0, 66.0, 77.0);
        let zeroed = Weights::new(0.0, 0.0, 0.0);
        assert_eq!(
            delta_e00(&x1, &x2, Some(&zeroed)),
            delta_e00(&x1, &x2, None)
        );
    }

    #[test]
    fn near_identical_inputs_stay_finite() {
        let x1 = Lab::new(53.23288178584245, 80.10930952982204, 67.22006831026425);
        let x2 = Lab::new(53.23288178584246, 80.10930952982205, 67.22006831026424);
        let result = delta_e00(&x1, &x2, None);
        assert!(result.is_finite());
        assert!(result >= 0.0);
        assert!(result < 1e-9);
    }

    #[test]
    fn invalid_input_passes_through() {
        let parsed = Lab::parse("fifty", "0", "0");
        assert!(delta_e00(&parsed, &Lab::default(), None).is_nan());

        let infinite = Lab::new(f64::INFINITY, 0.0, 0.0);
        let result = delta_e00(&infinite, &Lab::default(), None);
        assert!(result.is_nan() || result.is_infinite());
    }

    #[test]
    fn inputs_are_untouched() {
        let x1 = Lab::new(50.0, 2.5, 0.0);
        let x2 = Lab::new(73.0, 25.0, -18.0);
        let (before1, before2) = (x1, x2);
        let _ = delta_e00(&x1, &x2, None);
        assert_eq!(x1, before1);
        assert_eq!(x2, before2);
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        fn lab() -> impl Strategy<Value = Lab> {
            (0.0_f64..=100.0, -128.0_f64..=128.0, -128.0_f64..=128.0)
                .prop_map(|(l, a, b)| Lab::new(l, a, b))
        }

        proptest! {
            #[test]
            fn symmetric(x1 in lab(), x2 in lab()) {
                let forward = delta_e00(&x1, &x2, None);
                let backward = delta_e00(&x2, &x1, None);
                prop_assert!((forward - backward).abs() < 1e-9, "{} vs {}", forward, backward);
            }

            #[test]
            fn identity_is_zero(x in lab()) {
                prop_assert_eq!(delta_e00(&x, &x, None), 0.0);
            }

            #[test]
            fn non_negative_and_finite(x1 in lab(), x2 in lab()) {
                let result = delta_e00(&x1, &x2, None);
                prop_assert!(result.is_finite());
                prop_assert!(result >= 0.0);
            }

            #[test]
            fn neutral_color_ignores_other_hue(l in 0.0_f64..=100.0, x2 in lab()) {
                let neutral = Lab::new(l, 0.0, 0.0);
                let evaluation = Ciede2000::evaluate(&neutral, &x2, &Weights::default());
                prop_assert_eq!(evaluation.delta_h_prime, 0.0);
                prop_assert_eq!(evaluation.hue_term(), 0.0);
            }
        }
    }
}
