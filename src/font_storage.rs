use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use fxhash::FxHashMap;

use crate::{
    font_provider::FaceKey,
    style::{FontStyle, FontWeight},
};

/// Manages font loading and retrieval using `fontdb` and `fontdue`.
///
/// `fontdb` holds the set of known faces; `fontdue` fonts are parsed lazily
/// the first time a face is used. Every face handed out is interned as a
/// [`FaceKey`] so layouts never depend on `fontdb` ids directly.
pub struct FontStorage {
    /// This is the font set that has been loaded by fontdb.
    font_db: fontdb::Database,
    /// This is the font that has been loaded by fontdue.
    /// Not all fonts in fontdb are necessarily loaded here.
    loaded_font: FxHashMap<fontdb::ID, Arc<fontdue::Font>>,
    /// `FaceKey` index -> fontdb id.
    keys: Vec<fontdb::ID>,
    key_by_id: FxHashMap<fontdb::ID, FaceKey>,
    key_by_path: FxHashMap<PathBuf, FaceKey>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_font: FxHashMap::default(),
            keys: Vec::new(),
            key_by_id: FxHashMap::default(),
            key_by_path: FxHashMap::default(),
        }
    }
}

/// Loading fonts into fontdb and setting up fontdb.
impl FontStorage {
    /// Loads a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        self.font_db.load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&mut self, dir: impl AsRef<Path>) {
        self.font_db.load_fonts_dir(dir)
    }

    /// Loads the system fonts.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of known faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    /// Sets the family name for the "serif" generic family.
    pub fn set_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_serif_family(family);
    }

    /// Sets the family name for the "sans-serif" generic family.
    pub fn set_sans_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_sans_serif_family(family);
    }

    /// Sets the family name for the "monospace" generic family.
    pub fn set_monospace_family(&mut self, family: impl Into<String>) {
        self.font_db.set_monospace_family(family);
    }

    /// The concrete family `family` stands for. Generic names resolve to the
    /// configured generic families, other names are returned as is.
    pub fn family_name<'a>(&'a self, family: &'a str) -> &'a str {
        match family {
            "serif" => self.font_db.family_name(&fontdb::Family::Serif),
            "sans-serif" => self.font_db.family_name(&fontdb::Family::SansSerif),
            "monospace" => self.font_db.family_name(&fontdb::Family::Monospace),
            name => name,
        }
    }
}

/// Face lookup
impl FontStorage {
    /// Returns the face loaded from `path`, loading the file on first use.
    ///
    /// Returns `None` when the file can't be read or holds no faces.
    pub fn face_from_path(&mut self, path: &Path) -> Option<FaceKey> {
        if let Some(key) = self.key_by_path.get(path) {
            return Some(*key);
        }

        let ids = self
            .font_db
            .load_font_source(fontdb::Source::File(path.to_path_buf()));
        let id = *ids.first()?;
        let key = self.intern(id);
        self.key_by_path.insert(path.to_path_buf(), key);
        Some(key)
    }

    /// Finds the best face of `family` for the given weight and style.
    ///
    /// The generic names `serif`, `sans-serif` and `monospace` map to the
    /// configured generic families.
    pub fn query_family(
        &mut self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
    ) -> Option<FaceKey> {
        let family = match family {
            "serif" => fontdb::Family::Serif,
            "sans-serif" => fontdb::Family::SansSerif,
            "monospace" => fontdb::Family::Monospace,
            name => fontdb::Family::Name(name),
        };

        let query = fontdb::Query {
            families: &[family],
            weight: fontdb::Weight(weight.0),
            stretch: fontdb::Stretch::Normal,
            style: match style {
                FontStyle::Normal => fontdb::Style::Normal,
                FontStyle::Italic => fontdb::Style::Italic,
                FontStyle::Oblique => fontdb::Style::Oblique,
            },
        };

        let id = self.font_db.query(&query)?;
        Some(self.intern(id))
    }

    /// Any face at all, used as the last resort.
    pub fn first_face(&mut self) -> Option<FaceKey> {
        let id = self.font_db.faces().next()?.id;
        Some(self.intern(id))
    }

    /// Retrieves the parsed font for a face, loading it if necessary.
    pub fn font(&mut self, key: FaceKey) -> Option<Arc<fontdue::Font>> {
        use std::collections::hash_map::Entry;

        let id = *self.keys.get(key.index() as usize)?;

        match self.loaded_font.entry(id) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let font_result = self.font_db.with_face_data(id, |data, index| {
                    fontdue::Font::from_bytes(
                        data,
                        fontdue::FontSettings {
                            collection_index: index,
                            scale: 40.0,
                            load_substitutions: true,
                        },
                    )
                })?;

                match font_result {
                    Ok(font) => {
                        let r: &mut Arc<fontdue::Font> = entry.insert(Arc::new(font));
                        Some(Arc::clone(r))
                    }
                    Err(e) => {
                        log::error!("Failed to load font (id: {:?}): {}", id, e);
                        None
                    }
                }
            }
        }
    }

    fn intern(&mut self, id: fontdb::ID) -> FaceKey {
        if let Some(key) = self.key_by_id.get(&id) {
            return *key;
        }
        let key = FaceKey::new(self.keys.len() as u32);
        self.keys.push(id);
        self.key_by_id.insert(id, key);
        key
    }
}
