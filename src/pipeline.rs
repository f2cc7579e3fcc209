// THEORY:
// The `pipeline` module is the top-level API for comparing whole images. It wires the
// core layers together: the `GridManager` slices both frames into chunks, each chunk
// is summarised by its mean L*a*b* value, and the configured `Formula` measures the
// difference between corresponding chunks. The result is a `DifferenceReport`: a
// coarse ΔE map plus the summary numbers most callers actually want (worst chunk,
// mean, and how many chunks cross the "noticeable" threshold).

use crate::core_modules::chunk::chunk::Chunk;
use crate::core_modules::formula::Formula;
use crate::core_modules::grid_manager::GridManager;
use crate::core_modules::lab::lab::Weights;
use crate::core_modules::numeric::{DeltaE, nan_aware_max};
use crate::error::{CompareError, CompareResult};
use image::RgbaImage;
use tracing::{debug, warn};

/// A ΔE around 2.3 is commonly cited as the just-noticeable difference.
pub const JUST_NOTICEABLE_DIFFERENCE: DeltaE = 2.3;

/// Configuration for image comparison, allowing for tunable behavior.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComparisonConfig {
    pub formula: Formula,
    pub weights: Weights,
    pub chunk_width: u32,
    pub chunk_height: u32,
    /// Chunks whose ΔE exceeds this value count as noticeably different.
    pub noticeable_threshold: DeltaE,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            formula: Formula::default(),
            weights: Weights::default(),
            chunk_width: 8,
            chunk_height: 8,
            noticeable_threshold: JUST_NOTICEABLE_DIFFERENCE,
        }
    }
}

/// The outcome of comparing two images.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceReport {
    pub formula: Formula,
    pub grid_width: u32,
    pub grid_height: u32,
    /// Row-major ΔE per chunk.
    pub chunk_deltas: Vec<DeltaE>,
    pub max_delta: DeltaE,
    pub mean_delta: DeltaE,
    pub noticeable_chunks: usize,
}

impl DifferenceReport {
    pub(crate) fn from_deltas(
        config: &ComparisonConfig,
        grid_width: u32,
        grid_height: u32,
        chunk_deltas: Vec<DeltaE>,
    ) -> Self {
        let non_finite = chunk_deltas
            .iter()
            .filter(|delta| !delta.is_finite())
            .count();
        if non_finite > 0 {
            warn!(non_finite, formula = %config.formula, "non-finite chunk differences");
        }

        // A NaN chunk poisons the maximum the same way it poisons the mean.
        let max_delta = chunk_deltas.iter().copied().fold(0.0, nan_aware_max);
        let mean_delta = if chunk_deltas.is_empty() {
            0.0
        } else {
            chunk_deltas.iter().sum::<DeltaE>() / chunk_deltas.len() as DeltaE
        };
        let noticeable_chunks = chunk_deltas
            .iter()
            .filter(|delta| **delta > config.noticeable_threshold)
            .count();

        debug!(
            grid_width,
            grid_height,
            max_delta,
            mean_delta,
            noticeable_chunks,
            "difference report ready"
        );

        Self {
            formula: config.formula,
            grid_width,
            grid_height,
            chunk_deltas,
            max_delta,
            mean_delta,
            noticeable_chunks,
        }
    }

    pub fn delta_at(&self, chunk_x: u32, chunk_y: u32) -> Option<DeltaE> {
        if chunk_x >= self.grid_width || chunk_y >= self.grid_height {
            return None;
        }
        self.chunk_deltas
            .get((chunk_y * self.grid_width + chunk_x) as usize)
            .copied()
    }

    pub fn is_noticeable(&self) -> bool {
        self.noticeable_chunks > 0
    }
}

/// ΔE between the mean colors of two chunks.
pub fn compare_chunks(
    reference: &Chunk,
    sample: &Chunk,
    formula: Formula,
    weights: &Weights,
) -> DeltaE {
    formula.compute(&reference.average_lab(), &sample.average_lab(), weights)
}

pub(crate) fn check_dimensions(reference: &RgbaImage, sample: &RgbaImage) -> CompareResult<()> {
    if reference.dimensions() != sample.dimensions() {
        return Err(CompareError::DimensionMismatch {
            left_width: reference.width(),
            left_height: reference.height(),
            right_width: sample.width(),
            right_height: sample.height(),
        });
    }
    Ok(())
}

pub(crate) fn check_chunk_size(config: &ComparisonConfig) -> CompareResult<()> {
    if config.chunk_width == 0 || config.chunk_height == 0 {
        return Err(CompareError::InvalidChunkSize {
            width: config.chunk_width,
            height: config.chunk_height,
        });
    }
    Ok(())
}

/// Synchronous, single-threaded image comparator.
#[derive(Debug, Clone)]
pub struct ImageComparator {
    config: ComparisonConfig,
}

impl ImageComparator {
    pub fn new(config: ComparisonConfig) -> CompareResult<Self> {
        check_chunk_size(&config)?;
        debug!(?config, "image comparator ready");
        Ok(Self { config })
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Compares `sample` against `reference`. For CIE94 the reference side matters.
    pub fn compare(
        &self,
        reference: &RgbaImage,
        sample: &RgbaImage,
    ) -> CompareResult<DifferenceReport> {
        check_dimensions(reference, sample)?;
        self.compare_raw(
            reference.width(),
            reference.height(),
            reference.as_raw(),
            sample.as_raw(),
        )
    }

    /// Compares two raw RGBA8 buffers of the given size.
    pub fn compare_raw(
        &self,
        width: u32,
        height: u32,
        reference: &[u8],
        sample: &[u8],
    ) -> CompareResult<DifferenceReport> {
        let grid = GridManager::new(
            width,
            height,
            self.config.chunk_width,
            self.config.chunk_height,
        )?;
        grid.check_frame(reference)?;
        grid.check_frame(sample)?;

        let mut chunk_deltas = Vec::with_capacity(grid.chunk_count());
        for chunk_y in 0..grid.grid_height() {
            for chunk_x in 0..grid.grid_width() {
                let left = grid.extract_chunk(reference, chunk_x, chunk_y);
                let right = grid.extract_chunk(sample, chunk_x, chunk_y);
                chunk_deltas.push(compare_chunks(
                    &left,
                    &right,
                    self.config.formula,
                    &self.config.weights,
                ));
            }
        }

        Ok(DifferenceReport::from_deltas(
            &self.config,
            grid.grid_width(),
            grid.grid_height(),
            chunk_deltas,
        ))
    }
}
