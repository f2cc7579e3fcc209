// THEORY:
// The `SmartPixel` module provides the analytical capabilities for single pixels.
// It is a "smart" wrapper around a "dumb" `Pixel`: it converts the pixel to L*a*b*
// once in its constructor and caches the result, so a pixel compared against many
// others (a reference swatch against a whole palette, say) pays for the conversion
// only once.
//
// Every comparison takes another `SmartPixel` plus the `Formula` and `Weights` to
// measure with. A `SmartPixel` is meaningless on its own; its value is in the
// relationship it measures.

pub mod smart_pixel {
    use crate::core_modules::formula::Formula;
    use crate::core_modules::lab::lab::{Lab, Weights};
    use crate::core_modules::numeric::DeltaE;
    use crate::core_modules::pixel::pixel::Pixel;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct SmartPixel {
        pub pixel: Pixel,
        /// The pre-calculated L*a*b* value, cached for one-to-many comparisons.
        lab: Lab,
    }

    impl SmartPixel {
        pub fn new(pixel: Pixel) -> Self {
            Self {
                lab: pixel.to_lab(),
                pixel,
            }
        }

        pub fn lab(&self) -> &Lab {
            &self.lab
        }

        pub fn delta_e(&self, other: &SmartPixel, formula: Formula, weights: &Weights) -> DeltaE {
            formula.compute(&self.lab, &other.lab, weights)
        }

        /// Index and distance of the closest candidate, or `None` for an empty slice.
        pub fn nearest<'a>(
            &self,
            candidates: &'a [SmartPixel],
            formula: Formula,
            weights: &Weights,
        ) -> Option<(usize, &'a SmartPixel, DeltaE)> {
            candidates
                .iter()
                .enumerate()
                .map(|(index, candidate)| {
                    (index, candidate, self.delta_e(candidate, formula, weights))
                })
                .min_by(|left, right| left.2.total_cmp(&right.2))
        }
    }

    impl From<Pixel> for SmartPixel {
        fn from(pixel: Pixel) -> Self {
            SmartPixel::new(pixel)
        }
    }
}
