// THEORY:
// `Formula` names the three "lenses" the engine can look through when it measures how
// different two colors are. Higher layers (pixels, chunks, whole images) never call a
// formula directly; they carry a `Formula` value and ask it to compute, so the choice
// of metric is a configuration detail rather than a code path.
//
// - `Cie76`: plain Euclidean distance. Cheapest, least perceptual.
// - `Cie94`: chroma-scaled distance. Asymmetric; the first color is the reference.
// - `Ciede2000`: the perceptual standard and the default.

use crate::core_modules::de00::delta_e00;
use crate::core_modules::de76::delta_e76;
use crate::core_modules::de94::delta_e94;
use crate::core_modules::lab::lab::{Lab, Weights};
use crate::core_modules::numeric::DeltaE;
use crate::error::ParseFormulaError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Formula {
    Cie76,
    Cie94,
    #[default]
    Ciede2000,
}

impl Formula {
    pub const ALL: [Formula; 3] = [Formula::Cie76, Formula::Cie94, Formula::Ciede2000];

    /// Difference of `x2` from `x1`. CIE76 ignores the weights.
    pub fn compute(&self, x1: &Lab, x2: &Lab, weights: &Weights) -> DeltaE {
        match self {
            Formula::Cie76 => delta_e76(x1, x2),
            Formula::Cie94 => delta_e94(x1, x2, weights),
            Formula::Ciede2000 => delta_e00(x1, x2, Some(weights)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Formula::Cie76 => "cie76",
            Formula::Cie94 => "cie94",
            Formula::Ciede2000 => "ciede2000",
        }
    }

    pub fn is_symmetric(&self) -> bool {
        !matches!(self, Formula::Cie94)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Formula {
    type Err = ParseFormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "76" | "de76" | "cie76" => Ok(Formula::Cie76),
            "94" | "de94" | "cie94" => Ok(Formula::Cie94),
            "00" | "2000" | "de00" | "cie00" | "ciede2000" => Ok(Formula::Ciede2000),
            _ => Err(ParseFormulaError(s.to_string())),
        }
    }
}
