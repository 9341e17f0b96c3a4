use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use fxhash::FxHashMap;
use serde::Deserialize;

use crate::{
    error::{Result, read_to_string},
    font_provider::FallbackMode,
    style::{FontStyle, FontWeight},
};

/// Shape of a catalog file: `{"fonts": {family: {weight: {style: file}}}}`.
#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    fonts: BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>,
}

/// Outcome of a catalog lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogMatch<'a> {
    Face(&'a Path),
    /// The family is not in the catalog at all.
    MissingFamily,
    /// The family exists but has no face usable for the request.
    MissingFace,
}

/// Font files registered by family, weight and style.
#[derive(Clone, Debug, Default)]
pub struct FontCatalog {
    families: FxHashMap<String, BTreeMap<u16, FxHashMap<FontStyle, PathBuf>>>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and merges a catalog file. Relative font paths resolve against
    /// the directory containing `path`.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        log::info!("Loading font catalog from '{}'", path.display());
        let json = read_to_string(path).inspect_err(|e| log::error!("{e}"))?;
        let base_dir = path.parent().unwrap_or(Path::new(""));
        self.load_str(&json, base_dir)
    }

    /// Parses and merges a catalog from a JSON string.
    pub fn load_str(&mut self, json: &str, base_dir: &Path) -> Result<()> {
        let document: CatalogDocument = serde_json::from_str(json).inspect_err(|e| {
            log::error!("Could not parse font catalog: {e}");
        })?;

        for (family, weights) in document.fonts {
            for (weight, styles) in weights {
                let Some(weight) = parse_weight(&weight) else {
                    log::warn!("Ignoring font weight '{weight}' of family '{family}'");
                    continue;
                };
                for (style, file) in styles {
                    self.insert(
                        family.clone(),
                        weight,
                        FontStyle::from_name(&style),
                        base_dir.join(file),
                    );
                }
            }
        }
        Ok(())
    }

    pub fn insert(
        &mut self,
        family: impl Into<String>,
        weight: FontWeight,
        style: FontStyle,
        path: impl Into<PathBuf>,
    ) {
        self.families
            .entry(family.into())
            .or_default()
            .entry(weight.0)
            .or_default()
            .insert(style, path.into());
    }

    pub fn contains_family(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Finds the file for a face.
    ///
    /// Tries the exact weight and style, then the nearest weight with that
    /// style per `fallback`, then the same two steps with `default_style`.
    pub fn find(
        &self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
        fallback: FallbackMode,
        default_style: FontStyle,
    ) -> CatalogMatch<'_> {
        let Some(weights) = self.families.get(family) else {
            return CatalogMatch::MissingFamily;
        };

        let find_style = |style: FontStyle| {
            if let Some(path) = weights.get(&weight.0).and_then(|s| s.get(&style)) {
                return Some(path.as_path());
            }
            let candidates = weights
                .iter()
                .filter(|(_, styles)| styles.contains_key(&style))
                .map(|(w, _)| *w);
            let substitute = fallback_weight(candidates, weight.0, fallback)?;
            log::warn!(
                "Font '{family}' has no weight {} ({style}). Using {substitute}",
                weight.0
            );
            weights
                .get(&substitute)
                .and_then(|s| s.get(&style))
                .map(PathBuf::as_path)
        };

        if let Some(path) = find_style(style) {
            return CatalogMatch::Face(path);
        }
        if style != default_style {
            if let Some(path) = find_style(default_style) {
                log::warn!("Font '{family}' has no {style} style. Using {default_style}");
                return CatalogMatch::Face(path);
            }
        }
        CatalogMatch::MissingFace
    }
}

/// Picks the substitute for `target` among `available` weights.
///
/// Returns `None` only when `available` is empty.
pub fn fallback_weight(
    available: impl IntoIterator<Item = u16>,
    target: u16,
    mode: FallbackMode,
) -> Option<u16> {
    let mut lighter: Option<u16> = None;
    let mut heavier: Option<u16> = None;
    let mut exact = false;

    for weight in available {
        if weight < target {
            lighter = Some(lighter.map_or(weight, |w| w.max(weight)));
        } else if weight > target {
            heavier = Some(heavier.map_or(weight, |w| w.min(weight)));
        } else {
            exact = true;
        }
    }

    if exact {
        return Some(target);
    }

    match mode {
        FallbackMode::PreferLighter => lighter.or(heavier),
        FallbackMode::PreferHeavier => heavier.or(lighter),
        FallbackMode::Adaptive => {
            if target <= FontWeight::REGULAR.0 || heavier.is_none() {
                lighter.or(heavier)
            } else {
                heavier
            }
        }
    }
}

/// Reads a numeric weight or a weight name such as `"semibold"`.
pub(crate) fn parse_weight(value: &str) -> Option<FontWeight> {
    if let Ok(weight) = value.trim().parse::<u16>() {
        return Some(FontWeight(weight));
    }
    (1..=9)
        .map(|step| FontWeight(step * 100))
        .find(|w| w.name().is_some_and(|name| name.eq_ignore_ascii_case(value.trim())))
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const SOFIA: &str = r#"{
        "fonts": {
            "SofiaPro": {
                "300": { "normal": "SofiaPro-Light.otf", "italic": "SofiaPro-LightItalic.otf" },
                "400": { "normal": "SofiaPro-Regular.otf" },
                "500": { "normal": "SofiaPro-Medium.otf" },
                "600": { "normal": "SofiaPro-SemiBold.otf" }
            }
        }
    }"#;

    fn sofia() -> FontCatalog {
        let mut catalog = FontCatalog::new();
        catalog.load_str(SOFIA, Path::new("fonts")).unwrap();
        catalog
    }

    fn file_for(catalog: &FontCatalog, weight: u16, style: FontStyle, mode: FallbackMode) -> String {
        match catalog.find("SofiaPro", FontWeight(weight), style, mode, FontStyle::Normal) {
            CatalogMatch::Face(path) => path.file_name().unwrap().to_string_lossy().into_owned(),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn exact_match_resolves_relative_to_base_dir() {
        let catalog = sofia();
        let found = catalog.find(
            "SofiaPro",
            FontWeight::REGULAR,
            FontStyle::Normal,
            FallbackMode::Adaptive,
            FontStyle::Normal,
        );
        assert_eq!(
            found,
            CatalogMatch::Face(Path::new("fonts/SofiaPro-Regular.otf"))
        );
    }

    #[test]
    fn light_target_fallbacks() {
        let catalog = sofia();
        let n = FontStyle::Normal;
        assert_eq!(file_for(&catalog, 330, n, FallbackMode::Adaptive), "SofiaPro-Light.otf");
        assert_eq!(file_for(&catalog, 330, n, FallbackMode::PreferLighter), "SofiaPro-Light.otf");
        assert_eq!(file_for(&catalog, 330, n, FallbackMode::PreferHeavier), "SofiaPro-Regular.otf");
    }

    #[test]
    fn heavy_target_fallbacks() {
        let catalog = sofia();
        let n = FontStyle::Normal;
        assert_eq!(file_for(&catalog, 550, n, FallbackMode::Adaptive), "SofiaPro-SemiBold.otf");
        assert_eq!(file_for(&catalog, 550, n, FallbackMode::PreferLighter), "SofiaPro-Medium.otf");
        assert_eq!(file_for(&catalog, 550, n, FallbackMode::PreferHeavier), "SofiaPro-SemiBold.otf");
    }

    #[test]
    fn fallback_stays_within_requested_style() {
        let catalog = sofia();
        assert_eq!(
            file_for(&catalog, 500, FontStyle::Italic, FallbackMode::PreferHeavier),
            "SofiaPro-LightItalic.otf"
        );
    }

    #[test]
    fn missing_style_uses_default_style() {
        let mut catalog = FontCatalog::new();
        catalog.insert("Mono", FontWeight::REGULAR, FontStyle::Normal, "mono.ttf");
        let found = catalog.find(
            "Mono",
            FontWeight::BOLD,
            FontStyle::Oblique,
            FallbackMode::Adaptive,
            FontStyle::Normal,
        );
        assert_eq!(found, CatalogMatch::Face(Path::new("mono.ttf")));
    }

    #[test]
    fn unknown_family_and_face() {
        let mut catalog = FontCatalog::new();
        catalog.insert("Mono", FontWeight::REGULAR, FontStyle::Italic, "mono-i.ttf");
        assert_eq!(
            catalog.find(
                "Nope",
                FontWeight::REGULAR,
                FontStyle::Normal,
                FallbackMode::Adaptive,
                FontStyle::Normal
            ),
            CatalogMatch::MissingFamily
        );
        assert_eq!(
            catalog.find(
                "Mono",
                FontWeight::REGULAR,
                FontStyle::Normal,
                FallbackMode::Adaptive,
                FontStyle::Normal
            ),
            CatalogMatch::MissingFace
        );
    }

    #[test]
    fn adaptive_above_regular_without_heavier_goes_lighter() {
        assert_eq!(
            fallback_weight([300, 400], 700, FallbackMode::Adaptive),
            Some(400)
        );
        assert_eq!(fallback_weight([], 700, FallbackMode::Adaptive), None);
    }

    #[test]
    fn named_weights_are_accepted() {
        let mut catalog = FontCatalog::new();
        catalog
            .load_str(
                r#"{"fonts": {"Serif": {"bold": {"normal": "serif-bold.ttf"}}}}"#,
                Path::new(""),
            )
            .unwrap();
        assert!(matches!(
            catalog.find(
                "Serif",
                FontWeight::BOLD,
                FontStyle::Normal,
                FallbackMode::Adaptive,
                FontStyle::Normal
            ),
            CatalogMatch::Face(_)
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let mut catalog = FontCatalog::new();
        assert!(catalog.load_str("{ fonts: ", Path::new("")).is_err());
        assert!(catalog.is_empty());
    }
}
