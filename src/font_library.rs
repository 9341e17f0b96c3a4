use std::{path::Path, sync::Arc};

use fxhash::FxHashMap;
use parking_lot::Mutex;

use crate::{
    error::{Error, Result},
    font_catalog::{CatalogMatch, FontCatalog},
    font_provider::{FaceKey, FallbackMode, FontHandle, FontProvider, FontRequest},
    font_storage::FontStorage,
    glyph_id::GlyphId,
    renderer::{Surface, TextPainter},
    style::{Color, FontStyle, FontWeight},
};

/// Defaults used when a requested font can't be found.
#[derive(Clone, Debug, PartialEq)]
pub struct FontLibraryConfig {
    pub default_family: String,
    pub default_weight: FontWeight,
    pub default_style: FontStyle,
    pub fallback: FallbackMode,
}

impl Default for FontLibraryConfig {
    fn default() -> Self {
        Self {
            default_family: "Arial".to_string(),
            default_weight: FontWeight::REGULAR,
            default_style: FontStyle::Normal,
            fallback: FallbackMode::Adaptive,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct HandleKey {
    family: String,
    weight: u16,
    style: FontStyle,
    size_bits: u32,
    fallback: FallbackMode,
}

impl HandleKey {
    fn new(request: &FontRequest<'_>) -> Self {
        Self {
            family: request.family.to_string(),
            weight: request.weight.0,
            style: request.style,
            size_bits: request.size.to_bits(),
            fallback: request.fallback,
        }
    }
}

struct RasterizedGlyph {
    metrics: fontdue::Metrics,
    coverage: Vec<u8>,
}

/// Font resolution, measurement and painting over `fontdb` and `fontdue`.
///
/// Faces come from a [`FontCatalog`] of explicit files first, then from the
/// `fontdb` database (system fonts or fonts loaded by hand). Resolved
/// handles and rasterized glyphs are cached, so a library is meant to be
/// created once and shared (it is `Send + Sync`).
///
/// The fields are public to allow direct access to the underlying storage
/// and catalog when necessary.
pub struct FontLibrary {
    /// The underlying font storage.
    pub font_storage: Mutex<FontStorage>,
    /// Font files by family, weight and style.
    pub catalog: Mutex<FontCatalog>,

    config: FontLibraryConfig,
    handles: Mutex<FxHashMap<HandleKey, FontHandle>>,
    glyphs: Mutex<FxHashMap<GlyphId, Arc<RasterizedGlyph>>>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Creates an empty library with the default configuration.
    pub fn new() -> Self {
        Self::with_config(FontLibraryConfig::default())
    }

    pub fn with_config(config: FontLibraryConfig) -> Self {
        Self {
            font_storage: Mutex::new(FontStorage::new()),
            catalog: Mutex::new(FontCatalog::new()),
            config,
            handles: Mutex::new(FxHashMap::default()),
            glyphs: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn config(&self) -> &FontLibraryConfig {
        &self.config
    }

    /// Drops cached handles and glyph bitmaps.
    pub fn clear_cache(&self) {
        self.handles.lock().clear();
        self.glyphs.lock().clear();
    }
}

/// font loading
impl FontLibrary {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
        self.handles.lock().clear();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.font_storage.lock().load_font_binary(data);
        self.handles.lock().clear();
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.font_storage
            .lock()
            .load_font_file(path)
            .map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })
            .inspect_err(|e| log::error!("{e}"))?;
        self.handles.lock().clear();
        Ok(())
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: impl AsRef<Path>) {
        self.font_storage.lock().load_fonts_dir(dir);
        self.handles.lock().clear();
    }

    /// Loads a catalog file and merges it into the catalog.
    pub fn load_catalog(&self, path: impl AsRef<Path>) -> Result<()> {
        self.catalog.lock().load_file(path)?;
        self.handles.lock().clear();
        Ok(())
    }

    /// Checks if no faces are known, either loaded or cataloged.
    pub fn is_empty(&self) -> bool {
        self.font_storage.lock().is_empty() && self.catalog.lock().is_empty()
    }

    /// Sets the family name for the "serif" generic family.
    pub fn set_serif_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_serif_family(family);
        self.handles.lock().clear();
    }

    /// Sets the family name for the "sans-serif" generic family.
    pub fn set_sans_serif_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_sans_serif_family(family);
        self.handles.lock().clear();
    }

    /// Sets the family name for the "monospace" generic family.
    pub fn set_monospace_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_monospace_family(family);
        self.handles.lock().clear();
    }
}

/// face resolution
impl FontLibrary {
    fn resolve_face(&self, request: &FontRequest<'_>) -> Option<FaceKey> {
        let mut storage = self.font_storage.lock();
        let catalog = self.catalog.lock();

        if let Some(face) = find_family(&mut storage, &catalog, request, &self.config) {
            return Some(face);
        }

        let default_family = self.config.default_family.as_str();
        if request.family != default_family {
            log::warn!(
                "Font family '{}' ({} {}) not found. Using '{}'",
                storage.family_name(request.family),
                request.weight.0,
                request.style,
                default_family
            );
            let default_request = FontRequest {
                family: default_family,
                ..*request
            };
            if let Some(face) = find_family(&mut storage, &catalog, &default_request, &self.config)
            {
                return Some(face);
            }
        }

        let face = storage.first_face();
        match face {
            Some(_) => log::warn!(
                "Default font '{default_family}' not found. Using the first available face"
            ),
            None => log::warn!("No fonts loaded. Using estimated metrics"),
        }
        face
    }

    fn handle_for(&self, face: Option<FaceKey>, size: f32) -> FontHandle {
        let Some(face) = face else {
            return FontHandle::estimated(size);
        };
        let Some(font) = self.font_storage.lock().font(face) else {
            return FontHandle::estimated(size);
        };

        match font.horizontal_line_metrics(size) {
            Some(metrics) => FontHandle {
                face: Some(face),
                size,
                ascent: metrics.ascent,
                descent: -metrics.descent,
                leading: metrics.line_gap,
            },
            None => FontHandle {
                face: Some(face),
                ..FontHandle::estimated(size)
            },
        }
    }

    fn font(&self, handle: &FontHandle) -> Option<Arc<fontdue::Font>> {
        self.font_storage.lock().font(handle.face?)
    }

    fn glyph(
        &self,
        font: &fontdue::Font,
        face: FaceKey,
        glyph_index: u16,
        size: f32,
    ) -> Arc<RasterizedGlyph> {
        let id = GlyphId::new(face, glyph_index, size);
        let mut glyphs = self.glyphs.lock();
        let glyph = glyphs.entry(id).or_insert_with(|| {
            let (metrics, coverage) = font.rasterize_indexed(glyph_index, id.font_size());
            Arc::new(RasterizedGlyph { metrics, coverage })
        });
        Arc::clone(glyph)
    }
}

fn find_family(
    storage: &mut FontStorage,
    catalog: &FontCatalog,
    request: &FontRequest<'_>,
    config: &FontLibraryConfig,
) -> Option<FaceKey> {
    match catalog.find(
        request.family,
        request.weight,
        request.style,
        request.fallback,
        config.default_style,
    ) {
        CatalogMatch::Face(path) => {
            let face = storage.face_from_path(path);
            if face.is_none() {
                log::error!("Failed to load font file '{}'", path.display());
            }
            face
        }
        CatalogMatch::MissingFace => {
            log::warn!(
                "Font '{}' has no face for weight {} ({})",
                request.family,
                request.weight.0,
                request.style
            );
            None
        }
        CatalogMatch::MissingFamily => {
            storage.query_family(request.family, request.weight, request.style)
        }
    }
}

impl FontProvider for FontLibrary {
    fn resolve(&self, request: &FontRequest<'_>) -> FontHandle {
        let key = HandleKey::new(request);
        if let Some(handle) = self.handles.lock().get(&key) {
            return *handle;
        }

        let face = self.resolve_face(request);
        let handle = self.handle_for(face, request.size);
        self.handles.lock().insert(key, handle);
        handle
    }

    fn measure(&self, font: &FontHandle, text: &str) -> [f32; 2] {
        let height = font.text_height();
        let Some(face) = self.font(font) else {
            return [0.0, height];
        };

        let mut width = 0.0;
        let mut prev: Option<u16> = None;
        for ch in text.chars() {
            let index = face.lookup_glyph_index(ch);
            if let Some(prev) = prev {
                width += face
                    .horizontal_kern_indexed(prev, index, font.size)
                    .unwrap_or(0.0);
            }
            width += face.metrics_indexed(index, font.size).advance_width;
            prev = Some(index);
        }

        [width, height]
    }
}

impl TextPainter for FontLibrary {
    fn draw_text(
        &self,
        surface: &mut Surface,
        font: &FontHandle,
        color: Color,
        origin: [f32; 2],
        text: &str,
    ) {
        let (Some(face_key), Some(face)) = (font.face, self.font(font)) else {
            return;
        };

        let baseline = origin[1] + font.ascent;
        let mut pen_x = origin[0];
        let mut prev: Option<u16> = None;

        for ch in text.chars() {
            let index = face.lookup_glyph_index(ch);
            if let Some(prev) = prev {
                pen_x += face
                    .horizontal_kern_indexed(prev, index, font.size)
                    .unwrap_or(0.0);
            }
            prev = Some(index);

            let glyph = self.glyph(&face, face_key, index, font.size);
            let metrics = &glyph.metrics;

            if metrics.width > 0 && metrics.height > 0 {
                let x = (pen_x + metrics.xmin as f32).round() as isize;
                let y = (baseline - (metrics.ymin as f32 + metrics.height as f32)).round() as isize;

                for row in 0..metrics.height {
                    for col in 0..metrics.width {
                        let coverage = glyph.coverage[row * metrics.width + col];
                        surface.blend(x + col as isize, y + row as isize, color, coverage);
                    }
                }
            }

            pen_x += metrics.advance_width;
        }
    }
}
