//! Painting laid-out text into pixel buffers.

pub mod surface;

pub use surface::{PixelFormat, Surface};

use crate::{font_provider::FontHandle, style::Color};

/// Draws strings into a [`Surface`].
///
/// Implemented by [`FontLibrary`](crate::FontLibrary); tests and custom
/// backends can supply their own.
pub trait TextPainter {
    /// Draws `text` with its line box's top-left corner at `origin`.
    ///
    /// The baseline sits at `origin[1] + font.ascent`.
    fn draw_text(
        &self,
        surface: &mut Surface,
        font: &FontHandle,
        color: Color,
        origin: [f32; 2],
        text: &str,
    );
}

/// How [`StyledTextLayout::render_to_surface`](crate::text::StyledTextLayout::render_to_surface)
/// allocates its surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceOptions {
    /// RGBA8 when set, RGB8 otherwise.
    pub use_alpha: bool,
    /// Premultiply color by alpha once all text is painted.
    pub premultiplied: bool,
    pub clear_color: Color,
    /// Extra rows below the content size. Some rasterizers draw descenders
    /// one pixel past the measured height.
    pub extra_height: usize,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            use_alpha: true,
            premultiplied: false,
            clear_color: Color::TRANSPARENT,
            extra_height: 1,
        }
    }
}
