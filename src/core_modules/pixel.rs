// THEORY:
// The `Pixel` module is the bridge between raw image bytes and the L*a*b* space the
// color-difference formulas work in. It is a "dumb" data container for a single RGBA
// pixel plus the single-pixel transforms needed to place it in L*a*b*.
//
// Conversion chain (D65 throughout):
//   sRGB byte  → linear light   (256-entry `OnceLock` LUT, no `powf` per pixel)
//   linear RGB → XYZ            (sRGB primaries matrix)
//   XYZ        → L*a*b*         (CIE cube-root companding against the D65 white)
//
// Alpha is not a color: it is carried along but never enters the conversion.
// Anything that needs a second pixel (differences, averages) belongs in `SmartPixel`
// or `Chunk`.

pub mod pixel {
    use crate::core_modules::lab::lab::Lab;
    use std::sync::OnceLock;

    pub type Byte = u8;
    pub type Channel = Byte;
    pub type LinearChannel = f64;

    /// D65 reference white in XYZ, Y normalised to 1.
    pub const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

    const LAB_EPSILON: f64 = 216.0 / 24389.0;
    const LAB_KAPPA: f64 = 24389.0 / 27.0;

    // Fast path: 256-entry LUT for sRGB (0..255) -> linear normalized (0..1)
    static SRGB_TO_LINEAR_LUT: OnceLock<[LinearChannel; 256]> = OnceLock::new();

    /// A single RGBA pixel in 8-bit sRGB.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Pixel {
        pub red: Channel,
        pub green: Channel,
        pub blue: Channel,
        pub alpha: Channel,
    }

    impl Pixel {
        pub const fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }

        pub const fn opaque(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel::new(red, green, blue, u8::MAX)
        }

        #[inline]
        fn srgb_to_linear(srgb_value: Byte) -> LinearChannel {
            let table = SRGB_TO_LINEAR_LUT.get_or_init(|| {
                let mut table = [0.0f64; 256];
                for (i, entry) in table.iter_mut().enumerate() {
                    let srgb_normalized = i as f64 / 255.0;
                    *entry = if srgb_normalized <= 0.04045 {
                        srgb_normalized / 12.92
                    } else {
                        ((srgb_normalized + 0.055) / 1.055).powf(2.4)
                    };
                }
                table
            });
            table[srgb_value as usize]
        }

        /// Gamma-decoded (R, G, B) in 0..1.
        pub fn linear_rgb(&self) -> (LinearChannel, LinearChannel, LinearChannel) {
            (
                Self::srgb_to_linear(self.red),
                Self::srgb_to_linear(self.green),
                Self::srgb_to_linear(self.blue),
            )
        }

        /// CIE XYZ (D65) with Y of reference white equal to 1.
        pub fn to_xyz(&self) -> [f64; 3] {
            let (r, g, b) = self.linear_rgb();
            [
                0.4124564 * r + 0.3575761 * g + 0.1804375 * b,
                0.2126729 * r + 0.7151522 * g + 0.0721750 * b,
                0.0193339 * r + 0.1191920 * g + 0.9503041 * b,
            ]
        }

        /// CIE L*a*b* relative to the D65 white.
        pub fn to_lab(&self) -> Lab {
            let [x, y, z] = self.to_xyz();
            let fx = lab_companding(x / D65_WHITE[0]);
            let fy = lab_companding(y / D65_WHITE[1]);
            let fz = lab_companding(z / D65_WHITE[2]);

            Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
        }
    }

    fn lab_companding(t: f64) -> f64 {
        if t > LAB_EPSILON {
            t.cbrt()
        } else {
            (LAB_KAPPA * t + 16.0) / 116.0
        }
    }

    impl From<[Byte; 4]> for Pixel {
        fn from(bytes: [Byte; 4]) -> Self {
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    impl From<image::Rgba<u8>> for Pixel {
        fn from(rgba: image::Rgba<u8>) -> Self {
            Pixel::from(rgba.0)
        }
    }

    impl From<Pixel> for image::Rgba<u8> {
        fn from(pixel: Pixel) -> Self {
            image::Rgba([pixel.red, pixel.green, pixel.blue, pixel.alpha])
        }
    }
}
