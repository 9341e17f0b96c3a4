//! Deterministic font and painter stand-ins for tests.

use fxhash::FxHashMap;

use crate::{
    font_provider::{FaceKey, FontHandle, FontProvider, FontRequest},
    renderer::{Surface, TextPainter},
    style::Color,
};

const BASE_SIZE: f32 = 16.0;

/// Fixed-advance fonts: every character is 10px wide at size 16 unless
/// overridden, ascent 12, descent 4, leading 2, all scaled with size.
#[derive(Clone, Debug)]
pub(crate) struct StubFonts {
    advance: f32,
    advances: FxHashMap<char, f32>,
}

impl Default for StubFonts {
    fn default() -> Self {
        Self {
            advance: 10.0,
            advances: FxHashMap::default(),
        }
    }
}

impl StubFonts {
    pub(crate) fn with_advance(mut self, ch: char, advance: f32) -> Self {
        self.advances.insert(ch, advance);
        self
    }

    pub(crate) fn handle(size: f32) -> FontHandle {
        let scale = size / BASE_SIZE;
        FontHandle {
            face: Some(FaceKey::new(0)),
            size,
            ascent: 12.0 * scale,
            descent: 4.0 * scale,
            leading: 2.0 * scale,
        }
    }
}

impl FontProvider for StubFonts {
    fn resolve(&self, request: &FontRequest<'_>) -> FontHandle {
        Self::handle(request.size)
    }

    fn measure(&self, font: &FontHandle, text: &str) -> [f32; 2] {
        let scale = font.size / BASE_SIZE;
        let width = text
            .chars()
            .map(|ch| self.advances.get(&ch).copied().unwrap_or(self.advance))
            .sum::<f32>()
            * scale;
        [width, font.text_height()]
    }
}

/// Paints each run as a solid block covering its measured box.
pub(crate) struct BlockPainter {
    pub(crate) fonts: StubFonts,
}

impl TextPainter for BlockPainter {
    fn draw_text(
        &self,
        surface: &mut Surface,
        font: &FontHandle,
        color: Color,
        origin: [f32; 2],
        text: &str,
    ) {
        let [width, height] = self.fonts.measure(font, text);
        let x0 = origin[0].round() as isize;
        let y0 = origin[1].round() as isize;
        for y in y0..y0 + height.round() as isize {
            for x in x0..x0 + width.round() as isize {
                surface.blend(x, y, color, 255);
            }
        }
    }
}
