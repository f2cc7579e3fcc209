// THEORY:
// The `Lab` module is the most fundamental unit of the color-difference engine. It is a
// "dumb" data container for a single point in the CIE L*a*b* color space plus the
// parametric weight set that the difference formulas accept.
//
// Key architectural principles:
// 1.  **Plain Values**: `Lab` and `Weights` are `Copy` records. The formulas receive
//     them by reference and read their fields into locals; nothing is ever written
//     back into caller-owned data.
// 2.  **Lenient Coercion**: Colors frequently arrive as text (form fields, CSV cells).
//     `Lab::parse` coerces each component the way a lenient float parser does: the
//     longest leading numeric prefix wins, anything else becomes `NaN`. No validation
//     or clamping is performed; out-of-range values simply flow through the math.
// 3.  **Falsy Weights**: A weight of `0` or `NaN` is treated as "not supplied" and
//     resolves to `1`. This keeps a zeroed weight from dividing a term by zero.

pub mod lab {
    pub type Lightness = f64;
    pub type Axis = f64;
    pub type Chroma = f64;
    pub type Weight = f64;

    /// A color in the CIE L*a*b* space.
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
    pub struct Lab {
        /// Lightness, nominally 0-100.
        pub l: Lightness,
        /// Green-red axis, nominally -128 to 128.
        pub a: Axis,
        /// Blue-yellow axis, nominally -128 to 128.
        pub b: Axis,
    }

    impl Lab {
        pub const fn new(l: Lightness, a: Axis, b: Axis) -> Self {
            Self { l, a, b }
        }

        /// Builds a color from textual components. Unparseable components become `NaN`.
        pub fn parse(l: &str, a: &str, b: &str) -> Self {
            Self::new(coerce(l), coerce(a), coerce(b))
        }

        /// Magnitude of the (a, b) vector.
        pub fn chroma(&self) -> Chroma {
            (self.a * self.a + self.b * self.b).sqrt()
        }
    }

    impl From<[f64; 3]> for Lab {
        fn from(values: [f64; 3]) -> Self {
            Lab::new(values[0], values[1], values[2])
        }
    }

    impl From<(f64, f64, f64)> for Lab {
        fn from((l, a, b): (f64, f64, f64)) -> Self {
            Lab::new(l, a, b)
        }
    }

    impl From<Lab> for [f64; 3] {
        fn from(lab: Lab) -> Self {
            [lab.l, lab.a, lab.b]
        }
    }

    /// Parametric factors (kL, kC, kH) scaling the lightness, chroma and hue terms.
    #[derive(Debug, Clone, Copy, PartialEq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub struct Weights {
        pub lightness: Weight,
        pub chroma: Weight,
        pub hue: Weight,
    }

    impl Default for Weights {
        fn default() -> Self {
            Self {
                lightness: 1.0,
                chroma: 1.0,
                hue: 1.0,
            }
        }
    }

    impl Weights {
        pub const fn new(lightness: Weight, chroma: Weight, hue: Weight) -> Self {
            Self {
                lightness,
                chroma,
                hue,
            }
        }

        pub fn k_l(&self) -> Weight {
            resolve(self.lightness)
        }

        pub fn k_c(&self) -> Weight {
            resolve(self.chroma)
        }

        pub fn k_h(&self) -> Weight {
            resolve(self.hue)
        }
    }

    fn resolve(weight: Weight) -> Weight {
        if weight == 0.0 || weight.is_nan() {
            1.0
        } else {
            weight
        }
    }

    /// Coerces text to a float using its longest leading numeric prefix.
    ///
    /// Leading whitespace is skipped and `Infinity` (optionally signed) is recognised.
    /// Text with no numeric prefix yields `NaN`.
    pub fn coerce(text: &str) -> f64 {
        let trimmed = text.trim_start();

        let (sign, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (-1.0, &trimmed[1..]),
            Some(b'+') => (1.0, &trimmed[1..]),
            _ => (1.0, trimmed),
        };
        if unsigned.starts_with("Infinity") {
            return sign * f64::INFINITY;
        }

        // Only ASCII bytes are counted, so every prefix length is a char boundary.
        let mut end = trimmed
            .bytes()
            .take_while(|c| {
                c.is_ascii_digit() || matches!(c, b'+' | b'-' | b'.' | b'e' | b'E')
            })
            .count();

        while end > 0 {
            if let Ok(value) = trimmed[..end].parse::<f64>() {
                return value;
            }
            end -= 1;
        }

        f64::NAN
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::lab::*;

    #[test]
    fn lab_uses_uppercase_component_names() {
        let lab = Lab::new(36.0, 60.0, 41.0);
        let json = serde_json::to_value(lab).unwrap();
        assert_eq!(json, serde_json::json!({ "L": 36.0, "A": 60.0, "B": 41.0 }));

        let text = r#"{"L": 55, "A": 66, "B": 77}"#;
        let parsed: Lab = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, Lab::new(55.0, 66.0, 77.0));
    }

    #[test]
    fn partial_weights_fill_in_unit_factors() {
        let weights: Weights = serde_json::from_str(r#"{"hue": 2.0}"#).unwrap();
        assert_eq!(weights, Weights::new(1.0, 1.0, 2.0));

        let round_tripped: Weights =
            serde_json::from_str(&serde_json::to_string(&weights).unwrap()).unwrap();
        assert_eq!(round_tripped, weights);
    }
}
