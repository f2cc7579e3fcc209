// THEORY:
// This file is the main entry point for the `delta_e` library crate.
//
// The crate measures how different two colors look. Its heart is the CIEDE2000
// formula (with CIE76 and CIE94 alongside it), exposed for single L*a*b* pairs through
// the `metrics` functions. On top of that core sit the pixel bridge (sRGB bytes to
// L*a*b*) and two image comparators that turn a pair of RGBA images into a chunked
// ΔE map, one synchronous (`pipeline`) and one backed by a tokio worker pool
// (`parallel_pipeline`).
//
// Layering:
//   core_modules  - data containers (`Lab`, `Pixel`, `Chunk`), the three formulas,
//                   and their "smart" comparators
//   metrics       - the three pair functions
//   pipeline      - whole-image comparison, configuration and reports
//   error         - the error types of the image layer (color math never fails)

pub mod core_modules;
pub mod error;
pub mod metrics;
pub mod parallel_pipeline;
pub mod pipeline;

pub use core_modules::de00::Ciede2000;
pub use core_modules::formula::Formula;
pub use core_modules::lab::lab::{Lab, Weights};
pub use core_modules::numeric::DeltaE;
pub use core_modules::pixel::pixel::Pixel;
pub use core_modules::smart_pixel::smart_pixel::SmartPixel;
pub use error::{CompareError, CompareResult, ParseFormulaError};
pub use metrics::{get_delta_e00, get_delta_e76, get_delta_e94};
pub use parallel_pipeline::ParallelComparator;
pub use pipeline::{ComparisonConfig, DifferenceReport, ImageComparator};
