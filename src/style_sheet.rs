use std::path::Path;

use fxhash::FxHashMap;
use serde_json::{Map, Value};

use crate::{
    error::{Result, read_to_string},
    font_catalog::parse_weight,
    style::{Color, FontStyle, FontWeight, Style, TextAlign, TextTransform},
};

/// Named styles loaded from a JSON document.
///
/// Every JSON object is a style. It inherits the style of the object that
/// contains it and overrides the keys it declares:
///
/// ```json
/// {
///     "styles": {
///         "fontFamily": "OpenSans",
///         "fontSize": 16,
///         "title": { "fontSize": 32, "fontWeight": 700,
///             "small": { "fontSize": 24 } }
///     }
/// }
/// ```
///
/// With the base path `"styles"` this yields `"title"` and `"title.small"`,
/// both using `OpenSans`.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    default_style: Style,
    styles: FxHashMap<String, Style>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sheet whose root cascade and miss fallback is `style`.
    pub fn with_default_style(style: Style) -> Self {
        Self {
            default_style: style,
            styles: FxHashMap::default(),
        }
    }

    pub fn default_style(&self) -> &Style {
        &self.default_style
    }

    pub fn set_default_style(&mut self, style: Style) {
        self.default_style = style;
    }

    /// Loads and merges styles from a JSON file.
    pub fn load_file(&mut self, path: impl AsRef<Path>, base_path: &str) -> Result<()> {
        let path = path.as_ref();
        log::info!("Loading styles from '{}'", path.display());
        let json = read_to_string(path).inspect_err(|e| log::error!("{e}"))?;
        self.load_str(&json, base_path)
    }

    /// Parses and merges styles from a JSON string.
    pub fn load_str(&mut self, json: &str, base_path: &str) -> Result<()> {
        let root: Value = serde_json::from_str(json).inspect_err(|e| {
            log::error!("Could not parse style sheet: {e}");
        })?;

        let base = self.default_style.clone();
        self.collect(&root, "", &base, base_path);
        Ok(())
    }

    /// Returns a copy of the named style, or the default style when the name
    /// is unknown.
    pub fn lookup(&self, name: &str) -> Style {
        match self.styles.get(name) {
            Some(style) => style.clone(),
            None => {
                log::warn!("Could not find style with key '{name}'");
                self.default_style.clone()
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    fn collect(&mut self, node: &Value, path: &str, parent: &Style, base_path: &str) {
        let Value::Object(object) = node else {
            return;
        };

        let style = apply_overrides(parent.clone(), object);

        // the document root and the base object only seed the cascade
        if !path.is_empty() && path != base_path {
            let key = strip_base_path(path, base_path);
            self.styles.insert(key.to_string(), style.clone());
        }

        for (key, child) in object {
            if !child.is_object() {
                continue;
            }
            let child_path = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}.{key}")
            };
            self.collect(child, &child_path, &style, base_path);
        }
    }
}

fn strip_base_path<'a>(path: &'a str, base_path: &str) -> &'a str {
    if base_path.is_empty() {
        return path;
    }
    path.strip_prefix(base_path)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(path)
}

fn apply_overrides(mut style: Style, object: &Map<String, Value>) -> Style {
    if let Some(family) = object.get("fontFamily").and_then(Value::as_str) {
        style.font_family = family.to_string();
    }
    if let Some(weight) = object.get("fontWeight").and_then(as_weight) {
        style.font_weight = weight;
    }
    if let Some(font_style) = object.get("fontStyle").and_then(Value::as_str) {
        style.font_style = FontStyle::from_name(font_style);
    }
    if let Some(size) = object.get("fontSize").and_then(Value::as_f64) {
        style.font_size = size as f32;
    }
    if let Some(color) = object.get("color").and_then(Value::as_str) {
        match Color::parse_hex(color) {
            Ok(color) => style.color = color,
            Err(e) => log::warn!("{e}; keeping inherited color"),
        }
    }
    if let Some(align) = object.get("textAlign").and_then(Value::as_str) {
        style.text_align = TextAlign::from_name(align);
    }
    if let Some(transform) = object.get("textTransform").and_then(Value::as_str) {
        style.text_transform = TextTransform::from_name(transform);
    }
    if let Some(offset) = object.get("leadingOffset").and_then(Value::as_f64) {
        style.leading_offset = offset as f32;
    }
    style
}

fn as_weight(value: &Value) -> Option<FontWeight> {
    let weight = match value {
        Value::Number(number) => number
            .as_u64()
            .and_then(|w| u16::try_from(w).ok())
            .map(FontWeight),
        Value::String(text) => parse_weight(text),
        _ => None,
    };
    if weight.is_none() {
        log::warn!("Invalid font weight {value}; keeping inherited weight");
    }
    weight
}
