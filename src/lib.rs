//! # Kasane
//!
//! Styled text layout: markup in, word-wrapped lines and a pixel buffer out.
//!
//! ## Overview
//!
//! A [`StyledTextLayout`](text::StyledTextLayout) holds styled text segments
//! produced by the markup parser, breaks them into lines against a maximum
//! width, resolves the content size under padding and clipping rules, and
//! paints the result into a [`Surface`](renderer::Surface).
//!
//! Fonts are resolved and measured through the [`FontProvider`] trait and
//! painted through [`TextPainter`](renderer::TextPainter). [`FontLibrary`]
//! implements both on top of `fontdb` and `fontdue`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kasane::{FontLibrary, StyleSheet, renderer::SurfaceOptions, text::StyledTextLayout};
//!
//! // 1. Create a FontLibrary
//! let fonts = Arc::new(FontLibrary::new());
//! fonts.load_system_fonts();
//!
//! // 2. Optionally load named styles
//! let mut styles = StyleSheet::new();
//! styles.load_file("assets/styles.json", "styles").ok();
//!
//! // 3. Lay out text
//! let mut layout = StyledTextLayout::new(fonts.clone());
//! layout.set_max_width(400.0);
//! layout.set_text_named("A <b>bold</b> claim", "body", &styles);
//!
//! // 4. Render
//! let surface = layout.render_to_surface(fonts.as_ref(), &SurfaceOptions::default());
//! ```
//!
//! ## Features
//!
//! *   **Markup**: `<b>`, `<i>`, `<br>`, `<p>` and `&lt;`/`&gt;`, with custom tag handlers.
//! *   **Layout**: word wrap, no wrap, single line and break stripping modes.
//! *   **Font Management**: JSON font catalogs with weight fallback, plus system fonts.
//! *   **Never Fails**: bad markup, missing fonts and unknown styles degrade to defaults.

pub mod error;
pub mod font_catalog;
pub mod font_library;
pub mod font_provider;
pub mod font_storage;
pub mod glyph_id;
pub mod markup;
pub mod renderer;
pub mod style;
pub mod style_sheet;
pub mod text;

#[cfg(test)]
mod testing;

// common re-exports
pub use error::{Error, Result};
pub use font_catalog::FontCatalog;
pub use font_library::{FontLibrary, FontLibraryConfig};
pub use font_provider::{FallbackMode, FontHandle, FontProvider, FontRequest};
pub use font_storage::FontStorage;
pub use glyph_id::GlyphId;
pub use markup::ParseOptions;
pub use style::{Color, FontStyle, FontWeight, Style, TextAlign, TextTransform};
pub use style_sheet::StyleSheet;
pub use text::StyledTextLayout;

// re-export dependencies
pub use euclid;
pub use fontdb;
pub use fontdue;
pub use parking_lot;
