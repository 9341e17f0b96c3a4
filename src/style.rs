//! The style value carried by every text segment.
//!
//! Styles cascade by value: a child style starts as a copy of its parent and
//! overrides individual fields through the `with_*` builders. Nothing mutates
//! a style that is already shared.

use std::fmt;

use crate::error::{Error, Result};

/// Numeric font weight on the 100–900 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: Self = Self(100);
    pub const EXTRA_LIGHT: Self = Self(200);
    pub const LIGHT: Self = Self(300);
    pub const REGULAR: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMIBOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);
    pub const EXTRA_BOLD: Self = Self(800);
    pub const HEAVY: Self = Self(900);

    /// Returns the conventional name for one of the nine named steps.
    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            100 => Some("thin"),
            200 => Some("extra-light"),
            300 => Some("light"),
            400 => Some("regular"),
            500 => Some("medium"),
            600 => Some("semibold"),
            700 => Some("bold"),
            800 => Some("extra-bold"),
            900 => Some("heavy"),
            _ => None,
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl From<u16> for FontWeight {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// Horizontal alignment of a line. Fixed per line.
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// Case transform applied to text before it is wrapped.
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

macro_rules! named_enum {
    ($ty:ident, $label:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Lowercase name as used in style sheets.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }

            /// Parses a lowercase name. Unknown names fall back to the
            /// default variant with a warning.
            pub fn from_name(name: &str) -> Self {
                match name {
                    $($name => Self::$variant,)+
                    other => {
                        log::warn!(
                            "{} '{}' is not supported. Defaulting to '{}'",
                            $label,
                            other,
                            Self::default().as_str()
                        );
                        Self::default()
                    }
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum!(FontStyle, "Font style", {
    Normal => "normal",
    Italic => "italic",
    Oblique => "oblique",
});

named_enum!(TextAlign, "Text align", {
    Left => "left",
    Center => "center",
    Right => "right",
});

named_enum!(TextTransform, "Text transform", {
    None => "none",
    Uppercase => "uppercase",
    Lowercase => "lowercase",
    Capitalize => "capitalize",
});

/// Straight (non-premultiplied) RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// `0xRRGGBB`, opaque.
    pub fn from_rgb_u32(value: u32) -> Self {
        Self::rgb(
            channel(value >> 16),
            channel(value >> 8),
            channel(value),
        )
    }

    /// `0xRRGGBBAA`.
    pub fn from_rgba_u32(value: u32) -> Self {
        Self::rgba(
            channel(value >> 24),
            channel(value >> 16),
            channel(value >> 8),
            channel(value),
        )
    }

    /// Parses `#RRGGBB`, `#RRGGBBAA`, `0xRRGGBB` or bare hex digits.
    ///
    /// Six or fewer digits are read as RGB, more as RGBA. An empty string is
    /// black.
    pub fn parse_hex(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::BLACK);
        }

        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);

        if digits.is_empty() || digits.len() > 8 {
            return Err(Error::InvalidColor(value.to_string()));
        }

        let parsed =
            u32::from_str_radix(digits, 16).map_err(|_| Error::InvalidColor(value.to_string()))?;

        if digits.len() <= 6 {
            Ok(Self::from_rgb_u32(parsed))
        } else {
            Ok(Self::from_rgba_u32(parsed))
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b),
            to_u8(self.a),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn channel(value: u32) -> f32 {
    (value & 0xff) as f32 / 255.0
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Resolved text style.
///
/// Equality is structural; floats compare by exact value.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub font_size: f32,
    pub color: Color,
    pub text_align: TextAlign,
    pub text_transform: TextTransform,
    /// Extra space added above each line, on top of the font leading.
    pub leading_offset: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_weight: FontWeight::REGULAR,
            font_style: FontStyle::Normal,
            font_size: 16.0,
            color: Color::BLACK,
            text_align: TextAlign::Left,
            text_transform: TextTransform::None,
            leading_offset: 0.0,
        }
    }
}

impl Style {
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn with_font_weight(mut self, font_weight: impl Into<FontWeight>) -> Self {
        self.font_weight = font_weight.into();
        self
    }

    pub fn with_font_style(mut self, font_style: FontStyle) -> Self {
        self.font_style = font_style;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_text_align(mut self, text_align: TextAlign) -> Self {
        self.text_align = text_align;
        self
    }

    pub fn with_text_transform(mut self, text_transform: TextTransform) -> Self {
        self.text_transform = text_transform;
        self
    }

    pub fn with_leading_offset(mut self, leading_offset: f32) -> Self {
        self.leading_offset = leading_offset;
        self
    }
}
