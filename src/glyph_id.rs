use crate::font_provider::FaceKey;

pub const SUB_PIXEL_QUANTIZE: f32 = 256f32;

/// Cache key of a rasterized glyph: face, glyph index and quantized size.
///
/// Only stable for the lifetime of the font library that issued the face key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlyphId {
    face: FaceKey,
    glyph_index: u16,
    font_size: u32, // font size * SUB_PIXEL_QUANTIZE as u32
}

impl GlyphId {
    pub fn new(face: FaceKey, glyph_index: u16, font_size: f32) -> Self {
        Self {
            face,
            glyph_index,
            font_size: (font_size * SUB_PIXEL_QUANTIZE).round() as u32,
        }
    }

    pub fn face(&self) -> FaceKey {
        self.face
    }

    pub fn glyph_index(&self) -> u16 {
        self.glyph_index
    }

    pub fn font_size(&self) -> f32 {
        self.font_size as f32 / SUB_PIXEL_QUANTIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_within_quantum_share_an_id() {
        let face = FaceKey::new(3);
        assert_eq!(GlyphId::new(face, 7, 16.0), GlyphId::new(face, 7, 16.0001));
        assert_ne!(GlyphId::new(face, 7, 16.0), GlyphId::new(face, 7, 16.5));
        assert_eq!(GlyphId::new(face, 7, 12.5).font_size(), 12.5);
    }
}
