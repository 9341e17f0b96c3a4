use crate::style::{FontStyle, FontWeight, Style};

/// Opaque identifier of a loaded font face.
///
/// Keys are only meaningful to the [`FontProvider`] that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceKey(u32);

impl FaceKey {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

/// How to pick a substitute weight when the requested one is missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FallbackMode {
    /// Nearest lighter weight first, then nearest heavier.
    PreferLighter,
    /// Nearest heavier weight first, then nearest lighter.
    PreferHeavier,
    /// Lighter for targets at or below regular (400), heavier above it.
    #[default]
    Adaptive,
}

/// Everything needed to resolve a font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontRequest<'a> {
    pub family: &'a str,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub size: f32,
    pub fallback: FallbackMode,
}

impl<'a> FontRequest<'a> {
    pub fn from_style(style: &'a Style, fallback: FallbackMode) -> Self {
        Self {
            family: &style.font_family,
            weight: style.font_weight,
            style: style.font_style,
            size: style.font_size,
            fallback,
        }
    }
}

/// A resolved font at a specific size with its vertical metrics.
///
/// `ascent`, `descent` and `leading` are positive distances in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontHandle {
    /// `None` when no face could be found at all. Such handles measure
    /// zero-width text and draw nothing.
    pub face: Option<FaceKey>,
    pub size: f32,
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
}

impl FontHandle {
    /// A face-less handle with metrics estimated from the font size.
    pub fn estimated(size: f32) -> Self {
        Self {
            face: None,
            size,
            ascent: size * 0.8,
            descent: size * 0.2,
            leading: 0.0,
        }
    }

    /// Height of a single line of this font, without leading.
    pub fn text_height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Font resolution and measurement used by the layout.
///
/// Implementations must be idempotent for equal requests so repeated
/// layouts of the same content produce identical geometry. They may cache
/// internally; the layout never assumes exclusive access.
pub trait FontProvider: Send + Sync {
    /// Resolves a font, falling back as needed. Never fails.
    fn resolve(&self, request: &FontRequest<'_>) -> FontHandle;

    /// Measures `text` as one string, kerning included. Returns
    /// `[width, height]`.
    fn measure(&self, font: &FontHandle, text: &str) -> [f32; 2];
}
