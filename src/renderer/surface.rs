use crate::style::Color;

/// Pixel layout of a [`Surface`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    #[default]
    Rgba8,
    Rgb8,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgba8 => 4,
            PixelFormat::Rgb8 => 3,
        }
    }
}

/// An 8-bit pixel buffer that text is painted into.
///
/// Pixels are row-major with the origin at the top-left. Color channels are
/// straight (not premultiplied) until [`Surface::premultiply`] is called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    pub width: usize,
    pub height: usize,
    pub format: PixelFormat,
    premultiplied: bool,
    pub pixels: Vec<u8>,
}

impl Surface {
    /// Allocates a surface filled with `clear`.
    pub fn new(width: usize, height: usize, use_alpha: bool, clear: Color) -> Self {
        let format = if use_alpha {
            PixelFormat::Rgba8
        } else {
            PixelFormat::Rgb8
        };
        let channels = format.channels();
        let clear = clear.to_rgba8();

        let len = width.saturating_mul(height);
        let mut pixels = Vec::with_capacity(len * channels);
        for _ in 0..len {
            pixels.extend_from_slice(&clear[..channels]);
        }

        Self {
            width,
            height,
            format,
            premultiplied: false,
            pixels,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn is_premultiplied(&self) -> bool {
        self.premultiplied
    }

    /// Row length in bytes.
    pub fn stride(&self) -> usize {
        self.width * self.format.channels()
    }

    /// Returns the pixel at `(x, y)` as RGBA. RGB surfaces report alpha 255.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.format.channels();
        let idx = (y * self.width + x) * channels;
        let p = &self.pixels[idx..idx + channels];
        Some(match self.format {
            PixelFormat::Rgba8 => [p[0], p[1], p[2], p[3]],
            PixelFormat::Rgb8 => [p[0], p[1], p[2], 255],
        })
    }

    /// Source-over blends `color` scaled by `coverage` (0-255) into the
    /// pixel at `(x, y)`. Out of bounds coordinates are ignored.
    pub fn blend(&mut self, x: isize, y: isize, color: Color, coverage: u8) {
        if coverage == 0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }

        let a = color.a * coverage as f32 / 255.0;
        if a <= 0.0 {
            return;
        }

        let channels = self.format.channels();
        let idx = (y * self.width + x) * channels;
        let px = &mut self.pixels[idx..idx + channels];
        let src = [color.r, color.g, color.b];

        match self.format {
            PixelFormat::Rgba8 => {
                let bg_a = px[3] as f32 / 255.0;
                let out_a = a + bg_a * (1.0 - a);
                if out_a > 0.0 {
                    for c in 0..3 {
                        let bg = px[c] as f32 / 255.0;
                        let out = (src[c] * a + bg * bg_a * (1.0 - a)) / out_a;
                        px[c] = to_u8(out);
                    }
                    px[3] = to_u8(out_a);
                }
            }
            PixelFormat::Rgb8 => {
                for c in 0..3 {
                    let bg = px[c] as f32 / 255.0;
                    px[c] = to_u8(src[c] * a + bg * (1.0 - a));
                }
            }
        }
    }

    /// Multiplies color channels by alpha. No-op for RGB surfaces or when
    /// already premultiplied.
    pub fn premultiply(&mut self) {
        if self.premultiplied || self.format != PixelFormat::Rgba8 {
            return;
        }
        for px in self.pixels.chunks_exact_mut(4) {
            let a = px[3] as u16;
            for c in &mut px[..3] {
                *c = ((*c as u16 * a + 127) / 255) as u8;
            }
        }
        self.premultiplied = true;
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
