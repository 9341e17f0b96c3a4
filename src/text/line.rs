use euclid::default::Size2D;

use crate::{
    font_provider::{FontHandle, FontProvider},
    style::{Color, TextAlign},
};

/// Text sharing one font and color, placed on a single line.
///
/// The measured size is cached until the text changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    font: FontHandle,
    color: Color,
    text: String,
    size: Option<Size2D<f32>>,
}

impl Run {
    pub fn new(font: FontHandle, color: Color) -> Self {
        Self {
            font,
            color,
            text: String::new(),
            size: None,
        }
    }

    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The cached size, `None` if the run changed since it was last measured.
    pub fn size(&self) -> Option<Size2D<f32>> {
        self.size
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
        self.size = None;
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        if len < self.text.len() {
            self.text.truncate(len);
            self.size = None;
        }
    }

    pub(crate) fn measure(&mut self, fonts: &dyn FontProvider) -> Size2D<f32> {
        *self.size.get_or_insert_with(|| {
            let [width, height] = fonts.measure(&self.font, &self.text);
            Size2D::new(width, height)
        })
    }
}

/// Aggregate metrics of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineExtents {
    /// Sum of run widths.
    pub width: f32,
    /// At least `ascent + descent + leading`.
    pub height: f32,
    pub ascent: f32,
    pub descent: f32,
    /// Zero when leading is disabled.
    pub leading: f32,
}

/// A row of runs with one alignment.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    runs: Vec<Run>,
    text_align: TextAlign,
    leading_offset: f32,
    leading_disabled: bool,
    extents: Option<LineExtents>,
}

impl Line {
    pub fn new(text_align: TextAlign, leading_offset: f32, leading_disabled: bool) -> Self {
        Self {
            runs: Vec::new(),
            text_align,
            leading_offset,
            leading_disabled,
            extents: None,
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    pub fn leading_offset(&self) -> f32 {
        self.leading_offset
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// The line's text with runs concatenated.
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    /// The cached extents, `None` if a run was added since the last
    /// measurement.
    pub fn extents(&self) -> Option<LineExtents> {
        self.extents
    }

    pub(crate) fn push_run(&mut self, run: Run) {
        self.runs.push(run);
        self.extents = None;
    }

    pub(crate) fn measure(&mut self, fonts: &dyn FontProvider) -> LineExtents {
        if let Some(extents) = self.extents {
            return extents;
        }

        let mut extents = LineExtents::default();
        let mut run_height: f32 = 0.0;

        for run in &mut self.runs {
            let size = run.measure(fonts);
            let font = run.font;
            extents.width += size.width;
            extents.ascent = extents.ascent.max(font.ascent);
            extents.descent = extents.descent.max(font.descent);
            if !self.leading_disabled {
                extents.leading = extents.leading.max(font.leading);
            }
            run_height = run_height.max(size.height);
        }

        extents.height = run_height.max(extents.ascent + extents.descent + extents.leading);
        self.extents = Some(extents);
        extents
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubFonts;

    fn font(size: f32) -> FontHandle {
        StubFonts::handle(size)
    }

    #[test]
    fn run_size_is_cached_until_text_changes() {
        let fonts = StubFonts::default();
        let mut run = Run::new(font(16.0), Color::BLACK);
        run.push_str("abc");
        assert_eq!(run.size(), None);
        assert_eq!(run.measure(&fonts).width, 30.0);
        assert_eq!(run.size().unwrap().width, 30.0);

        run.push_str("d");
        assert_eq!(run.size(), None);
        assert_eq!(run.measure(&fonts).width, 40.0);

        run.truncate(2);
        assert_eq!(run.text(), "ab");
        assert_eq!(run.measure(&fonts).width, 20.0);
    }

    #[test]
    fn line_extents_take_maxima_over_runs() {
        let fonts = StubFonts::default();
        let mut line = Line::new(TextAlign::Left, 0.0, false);

        let mut small = Run::new(font(16.0), Color::BLACK);
        small.push_str("ab");
        let mut large = Run::new(font(32.0), Color::BLACK);
        large.push_str("c");
        line.push_run(small);
        line.push_run(large);

        let extents = line.measure(&fonts);
        assert_eq!(extents.width, 20.0 + 20.0);
        assert_eq!(extents.ascent, 24.0);
        assert_eq!(extents.descent, 8.0);
        assert_eq!(extents.leading, 4.0);
        assert_eq!(extents.height, 24.0 + 8.0 + 4.0);
        assert_eq!(line.text(), "abc");
    }

    #[test]
    fn disabled_leading_is_zero() {
        let fonts = StubFonts::default();
        let mut line = Line::new(TextAlign::Center, 3.0, true);
        line.push_run(Run::new(font(16.0), Color::WHITE));
        let extents = line.measure(&fonts);
        assert_eq!(extents.leading, 0.0);
        assert_eq!(extents.height, 16.0);
        assert_eq!(extents.width, 0.0);
    }

    #[test]
    fn adding_a_run_invalidates_extents() {
        let fonts = StubFonts::default();
        let mut line = Line::new(TextAlign::Left, 0.0, true);
        line.measure(&fonts);
        assert!(line.extents().is_some());
        line.push_run(Run::new(font(16.0), Color::BLACK));
        assert_eq!(line.extents(), None);
    }

    #[test]
    fn empty_line_measures_zero() {
        let fonts = StubFonts::default();
        let mut line = Line::new(TextAlign::Left, 0.0, false);
        assert_eq!(line.measure(&fonts), LineExtents::default());
    }
}
