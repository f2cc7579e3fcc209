// THEORY:
// The `GridManager` slices a raw RGBA8 frame into a 2D grid of `Chunk`s. It is the
// bridge between a flat byte buffer and the chunk-based comparison performed by the
// pipelines.
//
// Key architectural principles:
// 1.  **Orchestration, not analysis**: It only knows geometry. It never measures
//     color; it hands out chunks in row-major order.
// 2.  **No dropped pixels**: The grid is `ceil(image / chunk)` in each direction, so
//     the right and bottom edges produce smaller chunks instead of being ignored.
// 3.  **Row access**: The parallel pipeline distributes whole rows of chunks to its
//     workers, so rows are a first-class unit here.

use crate::core_modules::chunk::chunk::Chunk;
use crate::core_modules::pixel::pixel::Pixel;
use crate::error::{CompareError, CompareResult};

const CHANNELS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridManager {
    image_width: u32,
    image_height: u32,
    chunk_width: u32,
    chunk_height: u32,
    grid_width: u32,
    grid_height: u32,
}

impl GridManager {
    pub fn new(
        image_width: u32,
        image_height: u32,
        chunk_width: u32,
        chunk_height: u32,
    ) -> CompareResult<Self> {
        if chunk_width == 0 || chunk_height == 0 {
            return Err(CompareError::InvalidChunkSize {
                width: chunk_width,
                height: chunk_height,
            });
        }

        Ok(Self {
            image_width,
            image_height,
            chunk_width,
            chunk_height,
            grid_width: image_width.div_ceil(chunk_width),
            grid_height: image_height.div_ceil(chunk_height),
        })
    }

    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    pub fn grid_height(&self) -> u32 {
        self.grid_height
    }

    pub fn chunk_count(&self) -> usize {
        (self.grid_width * self.grid_height) as usize
    }

    /// Number of bytes an RGBA8 frame of this grid's image size must hold.
    pub fn frame_len(&self) -> usize {
        self.image_width as usize * self.image_height as usize * CHANNELS
    }

    pub fn check_frame(&self, frame: &[u8]) -> CompareResult<()> {
        let expected = self.frame_len();
        if frame.len() != expected {
            return Err(CompareError::BufferSize {
                width: self.image_width,
                height: self.image_height,
                expected,
                actual: frame.len(),
            });
        }
        Ok(())
    }

    /// Extracts the chunk at grid position (`chunk_x`, `chunk_y`).
    ///
    /// The frame must already have passed `check_frame`.
    pub fn extract_chunk(&self, frame: &[u8], chunk_x: u32, chunk_y: u32) -> Chunk {
        let start_x = chunk_x * self.chunk_width;
        let start_y = chunk_y * self.chunk_height;
        let width = self.chunk_width.min(self.image_width.saturating_sub(start_x));
        let height = self.chunk_height.min(self.image_height.saturating_sub(start_y));

        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in start_y..start_y + height {
            let row_start = (y as usize * self.image_width as usize + start_x as usize) * CHANNELS;
            let row_end = row_start + width as usize * CHANNELS;
            pixels.extend(
                frame[row_start..row_end]
                    .chunks_exact(CHANNELS)
                    .map(|bytes| Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])),
            );
        }

        Chunk::new(width, height, pixels)
    }

    /// All chunks of grid row `chunk_y`, left to right.
    pub fn extract_row(&self, frame: &[u8], chunk_y: u32) -> Vec<Chunk> {
        (0..self.grid_width)
            .map(|chunk_x| self.extract_chunk(frame, chunk_x, chunk_y))
            .collect()
    }
}
