// THEORY:
// The `Chunk` module represents a spatial grouping of pixels, the unit of regional
// comparison when two whole images are measured against each other.
//
// Key architectural principles:
// 1.  **Spatial Pooling**: Comparing images chunk by chunk moves from millions of
//     per-pixel ΔE evaluations to a few thousand, and yields a coarse difference map
//     that is easy to threshold.
// 2.  **Noise Reduction**: Single-pixel noise (sensor grain, dithering) is averaged
//     away before any formula runs, so only spatially coherent color shifts register.
// 3.  **Perceptual Averaging**: The summary of a chunk is its mean L*a*b* value, not
//     its mean byte value. Gamma-encoded bytes do not average to the perceptual mean:
//     half black, half white averages to byte 127, which sits near L* 53, not 50.
// 4.  **Data Container**: `Chunk` knows how to summarise its own pixels. It does not
//     know how to compare itself to another chunk; that is the pipeline's job.

pub mod chunk {
    use crate::core_modules::lab::lab::Lab;
    use crate::core_modules::pixel::pixel::Pixel;

    /// A rectangular block of pixels. Edge chunks may be smaller than the grid's
    /// nominal chunk size.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Chunk {
        pub width: u32,
        pub height: u32,
        /// Row-major pixels, `width * height` of them.
        pub pixels: Vec<Pixel>,
    }

    impl Chunk {
        pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
            debug_assert_eq!(pixels.len(), (width * height) as usize);
            Self {
                width,
                height,
                pixels,
            }
        }

        pub fn is_empty(&self) -> bool {
            self.pixels.is_empty()
        }

        /// Mean L*a*b* value of the chunk. An empty chunk averages to the origin.
        pub fn average_lab(&self) -> Lab {
            if self.pixels.is_empty() {
                return Lab::default();
            }

            let (mut sum_l, mut sum_a, mut sum_b) = (0.0f64, 0.0f64, 0.0f64);
            for pixel in &self.pixels {
                let lab = pixel.to_lab();
                sum_l += lab.l;
                sum_a += lab.a;
                sum_b += lab.b;
            }

            let count = self.pixels.len() as f64;
            Lab::new(sum_l / count, sum_a / count, sum_b / count)
        }
    }
}
