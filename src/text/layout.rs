use std::sync::Arc;

use euclid::default::{SideOffsets2D, Size2D};

use crate::{
    font_provider::{FallbackMode, FontProvider},
    markup::{ParseOptions, StyledTextParser, TagHandlers},
    renderer::{Surface, SurfaceOptions, TextPainter},
    style::{Color, FontStyle, FontWeight, Style, TextAlign, TextTransform},
    style_sheet::StyleSheet,
    text::{
        data::StyledText,
        line::Line,
        size::{ClipMode, SizePolicy},
        wrap::{self, LayoutMode, WrapSettings},
    },
};

/// A block of styled, word-wrapped text.
///
/// Segments are the source of truth; lines and the content size are caches
/// rebuilt lazily. Appending text extends the existing lines in place while
/// the layout is valid. Changing a setting that affects line breaks marks
/// the layout dirty, and the next geometry read replays every segment from
/// scratch. Settings that only affect the outer box mark the size dirty.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use kasane::{FontLibrary, renderer::SurfaceOptions, text::StyledTextLayout};
///
/// let fonts = Arc::new(FontLibrary::new());
/// fonts.load_system_fonts();
///
/// let mut layout = StyledTextLayout::new(fonts.clone());
/// layout.set_max_width(320.0);
/// layout.set_padding_symmetric(8.0, 12.0);
/// layout.set_text("Hello <b>bold</b> and <i>italic</i> world");
///
/// let surface = layout.render_to_surface(fonts.as_ref(), &SurfaceOptions::default());
/// assert_eq!(surface.width as i32, layout.text_width());
/// ```
pub struct StyledTextLayout {
    fonts: Arc<dyn FontProvider>,
    parser: StyledTextParser,

    segments: Vec<StyledText>,
    lines: Vec<Line>,
    current_style: Style,

    layout_mode: LayoutMode,
    leading_disabled: bool,
    fallback_mode: FallbackMode,
    size_policy: SizePolicy,

    text_size: Size2D<i32>,
    layout_dirty: bool,
    size_dirty: bool,
}

impl StyledTextLayout {
    pub fn new(fonts: Arc<dyn FontProvider>) -> Self {
        Self::with_parser(fonts, StyledTextParser::default())
    }

    /// Creates a layout whose markup parsing uses `parser`'s options and tag
    /// handlers.
    pub fn with_parser(fonts: Arc<dyn FontProvider>, parser: StyledTextParser) -> Self {
        Self {
            fonts,
            parser,
            segments: Vec::new(),
            lines: Vec::new(),
            current_style: Style::default(),
            layout_mode: LayoutMode::default(),
            leading_disabled: true,
            fallback_mode: FallbackMode::default(),
            size_policy: SizePolicy::default(),
            text_size: Size2D::new(0, 0),
            layout_dirty: false,
            size_dirty: false,
        }
    }

    pub fn with_style(fonts: Arc<dyn FontProvider>, style: Style) -> Self {
        let mut layout = Self::new(fonts);
        layout.current_style = style;
        layout
    }

    pub fn fonts(&self) -> &Arc<dyn FontProvider> {
        &self.fonts
    }
}

/// text
impl StyledTextLayout {
    /// Discards all segments and lines.
    pub fn clear_text(&mut self) {
        self.segments.clear();
        self.lines.clear();
        self.invalidate(true, true);
    }

    /// Replaces the content with parsed markup in the current style.
    pub fn set_text(&mut self, text: &str) {
        self.clear_text();
        self.append_text(text);
    }

    /// Replaces the content with parsed markup; `style` becomes the current
    /// style.
    pub fn set_text_styled(&mut self, text: &str, style: Style) {
        self.clear_text();
        self.append_text_styled(text, style);
    }

    pub fn set_text_named(&mut self, text: &str, style_name: &str, styles: &StyleSheet) {
        self.set_text_styled(text, styles.lookup(style_name));
    }

    /// Parses markup in the current style and appends it.
    pub fn append_text(&mut self, text: &str) {
        let segments = self.parser.parse(text, &self.current_style);
        self.append_segments(segments);
    }

    pub fn append_text_styled(&mut self, text: &str, style: Style) {
        self.current_style = style;
        self.append_text(text);
    }

    pub fn append_text_named(&mut self, text: &str, style_name: &str, styles: &StyleSheet) {
        self.append_text_styled(text, styles.lookup(style_name));
    }

    /// Replaces the content with unparsed text in the current style.
    pub fn set_plain_text(&mut self, text: &str) {
        self.clear_text();
        self.append_plain_text(text);
    }

    pub fn set_plain_text_styled(&mut self, text: &str, style: Style) {
        self.clear_text();
        self.append_plain_text_styled(text, style);
    }

    pub fn set_plain_text_named(&mut self, text: &str, style_name: &str, styles: &StyleSheet) {
        self.set_plain_text_styled(text, styles.lookup(style_name));
    }

    pub fn append_plain_text(&mut self, text: &str) {
        let segment = StyledText::new(self.current_style.clone(), text);
        self.append_segment(segment);
    }

    pub fn append_plain_text_styled(&mut self, text: &str, style: Style) {
        self.current_style = style;
        self.append_plain_text(text);
    }

    pub fn append_plain_text_named(&mut self, text: &str, style_name: &str, styles: &StyleSheet) {
        self.append_plain_text_styled(text, styles.lookup(style_name));
    }

    pub fn segments(&self) -> &[StyledText] {
        &self.segments
    }

    pub fn set_segment(&mut self, segment: StyledText) {
        self.clear_text();
        self.append_segment(segment);
    }

    pub fn set_segments(&mut self, segments: impl IntoIterator<Item = StyledText>) {
        self.clear_text();
        self.append_segments(segments);
    }

    /// Appends segments in order. The current style is left as it was.
    pub fn append_segments(&mut self, segments: impl IntoIterator<Item = StyledText>) {
        let base_style = self.current_style.clone();
        for segment in segments {
            self.append_segment(segment);
        }
        self.current_style = base_style;
    }

    /// Appends one segment, laying it out right away unless a full relayout
    /// is already pending.
    pub fn append_segment(&mut self, segment: StyledText) {
        if !self.layout_dirty || self.segments.is_empty() {
            let settings = self.wrap_settings();
            wrap::append_segment(&mut self.lines, &segment, &settings, &*self.fonts);
            self.layout_dirty = false;
        }
        self.segments.push(segment);
        self.size_dirty = true;
    }
}

/// styles
impl StyledTextLayout {
    /// The style new text is appended with.
    pub fn current_style(&self) -> &Style {
        &self.current_style
    }

    pub fn set_current_style(&mut self, style: Style) {
        self.current_style = style;
    }

    pub fn set_current_style_named(&mut self, style_name: &str, styles: &StyleSheet) {
        self.current_style = styles.lookup(style_name);
    }

    /// Applies `f` to the current style, and to every existing segment when
    /// `update_existing_text` is set.
    pub fn modify_styles(&mut self, update_existing_text: bool, f: impl Fn(&mut Style)) {
        if update_existing_text {
            for segment in &mut self.segments {
                f(&mut segment.style);
            }
            self.invalidate(true, true);
        }
        f(&mut self.current_style);
    }

    pub fn set_font_family(&mut self, family: &str, update_existing_text: bool) {
        self.modify_styles(update_existing_text, |s| s.font_family = family.to_string());
    }

    pub fn set_font_size(&mut self, size: f32, update_existing_text: bool) {
        self.modify_styles(update_existing_text, |s| s.font_size = size);
    }

    pub fn set_font_weight(&mut self, weight: FontWeight, update_existing_text: bool) {
        self.modify_styles(update_existing_text, |s| s.font_weight = weight);
    }

    pub fn set_font_style(&mut self, style: FontStyle, update_existing_text: bool) {
        self.modify_styles(update_existing_text, |s| s.font_style = style);
    }

    pub fn set_text_color(&mut self, color: Color, update_existing_text: bool) {
        self.modify_styles(update_existing_text, |s| s.color = color);
    }

    pub fn set_text_align(&mut self, align: TextAlign, update_existing_text: bool) {
        self.modify_styles(update_existing_text, |s| s.text_align = align);
    }

    pub fn set_text_transform(&mut self, transform: TextTransform, update_existing_text: bool) {
        self.modify_styles(update_existing_text, |s| s.text_transform = transform);
    }

    pub fn set_leading_offset(&mut self, offset: f32, update_existing_text: bool) {
        self.modify_styles(update_existing_text, |s| s.leading_offset = offset);
    }
}

/// parsing
impl StyledTextLayout {
    pub fn parse_options(&self) -> ParseOptions {
        self.parser.options
    }

    /// Options for text parsed from now on. Existing segments are kept.
    pub fn set_parse_options(&mut self, options: ParseOptions) {
        self.parser.options = options;
    }

    pub fn tag_handlers(&self) -> &TagHandlers {
        &self.parser.handlers
    }

    pub fn tag_handlers_mut(&mut self) -> &mut TagHandlers {
        &mut self.parser.handlers
    }

    pub fn set_tag_handlers(&mut self, handlers: TagHandlers) {
        self.parser.handlers = handlers;
    }
}

/// layout settings
impl StyledTextLayout {
    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        self.layout_mode = mode;
        self.invalidate(true, true);
    }

    pub fn clip_mode(&self) -> ClipMode {
        self.size_policy.clip_mode
    }

    pub fn set_clip_mode(&mut self, mode: ClipMode) {
        self.size_policy.clip_mode = mode;
        self.invalidate(true, true);
    }

    pub fn leading_disabled(&self) -> bool {
        self.leading_disabled
    }

    pub fn set_leading_disabled(&mut self, disabled: bool) {
        self.leading_disabled = disabled;
        self.invalidate(true, true);
    }

    pub fn size_trimming(&self) -> bool {
        self.size_policy.size_trimming
    }

    pub fn set_size_trimming(&mut self, enabled: bool) {
        self.size_policy.size_trimming = enabled;
        self.invalidate(false, true);
    }

    pub fn fallback_mode(&self) -> FallbackMode {
        self.fallback_mode
    }

    /// Weight fallback used when resolving fonts for this layout.
    pub fn set_fallback_mode(&mut self, mode: FallbackMode) {
        self.fallback_mode = mode;
        self.invalidate(true, true);
    }

    /// Maximum content size. Negative components are unconstrained.
    pub fn max_size(&self) -> Size2D<f32> {
        self.size_policy.max_size
    }

    pub fn set_max_size(&mut self, width: f32, height: f32) {
        self.size_policy.max_size = Size2D::new(width, height);
        self.invalidate(true, true);
    }

    pub fn max_width(&self) -> f32 {
        self.size_policy.max_size.width
    }

    /// Wrap points depend on the width, so this relayouts.
    pub fn set_max_width(&mut self, width: f32) {
        self.size_policy.max_size.width = width;
        self.invalidate(true, true);
    }

    pub fn max_height(&self) -> f32 {
        self.size_policy.max_size.height
    }

    pub fn set_max_height(&mut self, height: f32) {
        self.size_policy.max_size.height = height;
        self.invalidate(false, true);
    }

    pub fn padding(&self) -> SideOffsets2D<f32> {
        self.size_policy.padding
    }

    pub fn set_padding(&mut self, top: f32, right: f32, bottom: f32, left: f32) {
        self.size_policy.padding = SideOffsets2D::new(top, right, bottom, left);
        self.invalidate(true, true);
    }

    pub fn set_padding_uniform(&mut self, padding: f32) {
        self.set_padding(padding, padding, padding, padding);
    }

    pub fn set_padding_symmetric(&mut self, vertical: f32, horizontal: f32) {
        self.set_padding(vertical, horizontal, vertical, horizontal);
    }

    pub fn set_padding_top(&mut self, padding: f32) {
        self.size_policy.padding.top = padding;
        self.invalidate(false, true);
    }

    pub fn set_padding_bottom(&mut self, padding: f32) {
        self.size_policy.padding.bottom = padding;
        self.invalidate(false, true);
    }

    pub fn set_padding_left(&mut self, padding: f32) {
        self.size_policy.padding.left = padding;
        self.invalidate(true, true);
    }

    pub fn set_padding_right(&mut self, padding: f32) {
        self.size_policy.padding.right = padding;
        self.invalidate(true, true);
    }
}

/// geometry
impl StyledTextLayout {
    pub fn has_changes(&self) -> bool {
        self.layout_dirty || self.size_dirty
    }

    pub fn has_invalid_layout(&self) -> bool {
        self.layout_dirty
    }

    pub fn has_invalid_size(&self) -> bool {
        self.size_dirty
    }

    /// The validated lines.
    pub fn lines(&mut self) -> &[Line] {
        self.validate_size();
        &self.lines
    }

    /// The content size in whole pixels, padding included.
    pub fn text_size(&mut self) -> Size2D<i32> {
        self.validate_size();
        self.text_size
    }

    pub fn text_width(&mut self) -> i32 {
        self.text_size().width
    }

    pub fn text_height(&mut self) -> i32 {
        self.text_size().height
    }

    fn invalidate(&mut self, layout: bool, size: bool) {
        self.layout_dirty |= layout;
        self.size_dirty |= size;
    }

    fn wrap_settings(&self) -> WrapSettings {
        WrapSettings {
            mode: self.layout_mode,
            wrap_width: self.size_policy.wrap_width(),
            leading_disabled: self.leading_disabled,
            fallback: self.fallback_mode,
        }
    }

    fn validate_layout(&mut self) {
        if !self.layout_dirty {
            return;
        }

        self.lines.clear();
        let settings = self.wrap_settings();
        for segment in &self.segments {
            wrap::append_segment(&mut self.lines, segment, &settings, &*self.fonts);
        }
        log::debug!(
            "Laid out {} segments into {} lines",
            self.segments.len(),
            self.lines.len()
        );

        self.layout_dirty = false;
        self.size_dirty = true;
    }

    fn validate_size(&mut self) {
        self.validate_layout();

        if !self.size_dirty {
            return;
        }

        let fonts = &*self.fonts;
        let lines = self
            .lines
            .iter_mut()
            .map(|line| (line.measure(fonts), line.leading_offset()));
        self.text_size = self.size_policy.resolve(lines);
        self.size_dirty = false;
    }
}

/// rendering
impl StyledTextLayout {
    /// Paints the text into a new surface of the content size plus
    /// `options.extra_height` rows.
    ///
    /// Each line advances by its leading offset and leading before it is
    /// drawn and by ascent plus descent after. Runs within a line share a
    /// baseline at the line's ascent.
    pub fn render_to_surface(
        &mut self,
        painter: &dyn TextPainter,
        options: &SurfaceOptions,
    ) -> Surface {
        self.validate_size();

        let size = self.text_size;
        if size.width <= 0 || size.height <= 0 {
            log::warn!(
                "Rendering text with an empty content size ({}x{})",
                size.width,
                size.height
            );
        }

        let width = size.width.max(0) as usize;
        let height = size.height.max(0) as usize + options.extra_height;
        let mut surface = Surface::new(width, height, options.use_alpha, options.clear_color);

        let surface_width = width as f32;
        let padding = self.size_policy.padding;
        let fonts = &*self.fonts;
        let mut y = padding.top;

        for line in &mut self.lines {
            let extents = line.measure(fonts);
            y += line.leading_offset() + extents.leading;

            let mut x = match line.text_align() {
                TextAlign::Left => padding.left,
                TextAlign::Center => (surface_width - extents.width) * 0.5,
                TextAlign::Right => surface_width - extents.width - padding.right,
            };

            for run in line.runs() {
                let font = run.font();
                if !run.is_empty() {
                    let origin = [x, y + (extents.ascent - font.ascent)];
                    painter.draw_text(&mut surface, font, run.color(), origin, run.text());
                }
                x += run.size().map_or(0.0, |size| size.width);
            }

            y += extents.ascent + extents.descent;
        }

        if options.premultiplied {
            surface.premultiply();
        }
        surface
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{BlockPainter, StubFonts};

    fn layout() -> StyledTextLayout {
        StyledTextLayout::new(Arc::new(StubFonts::default()))
    }

    fn line_texts(layout: &mut StyledTextLayout) -> Vec<String> {
        layout.lines().iter().map(Line::text).collect()
    }

    fn painter() -> BlockPainter {
        BlockPainter {
            fonts: StubFonts::default(),
        }
    }

    #[test]
    fn fresh_layout_is_clean_and_empty() {
        let mut layout = layout();
        assert!(!layout.has_changes());
        assert!(layout.segments().is_empty());
        assert!(layout.lines().is_empty());
        assert_eq!(layout.text_size(), Size2D::new(0, 0));
        assert!(layout.leading_disabled());
        assert_eq!(layout.max_size(), Size2D::new(-1.0, -1.0));
    }

    #[test]
    fn wraps_inside_padded_max_width() {
        let mut layout = layout();
        layout.set_max_width(100.0);
        layout.set_padding_uniform(10.0);
        layout.set_text("aaaa bbbb cccc");

        assert_eq!(line_texts(&mut layout), vec!["aaaa ", "bbbb ", "cccc"]);
        assert_eq!(layout.text_size(), Size2D::new(100, 20 + 3 * 16));
    }

    #[test]
    fn word_that_fits_exactly_stays_on_the_line() {
        let mut layout = layout();
        layout.set_max_width(110.0);
        layout.set_padding_uniform(10.0);
        layout.set_text("aaaa bbbb cccc");

        assert_eq!(line_texts(&mut layout), vec!["aaaa bbbb", "cccc"]);
        assert_eq!(layout.text_width(), 110);
    }

    #[test]
    fn over_long_word_overflows_its_own_line() {
        let mut layout = layout();
        layout.set_max_width(50.0);
        layout.set_size_trimming(true);
        layout.set_clip_mode(ClipMode::NoClip);
        layout.set_text("tiny enormousword");

        assert_eq!(line_texts(&mut layout), vec!["tiny ", "enormousword"]);
        assert_eq!(layout.text_width(), 120);
    }

    #[test]
    fn size_trimming_reports_natural_width() {
        let mut layout = layout();
        layout.set_max_width(200.0);
        layout.set_padding_uniform(10.0);
        layout.set_text("aaaa bbbb cccc");
        assert_eq!(layout.text_width(), 200);

        layout.set_size_trimming(true);
        assert!(!layout.has_invalid_layout());
        assert_eq!(layout.text_width(), 160);
    }

    #[test]
    fn empty_text_keeps_one_segment_and_line() {
        let mut layout = layout();
        layout.set_text("");
        assert_eq!(layout.segments().len(), 1);
        assert_eq!(layout.lines().len(), 1);
        assert_eq!(layout.text_size(), Size2D::new(0, 16));
    }

    #[test]
    fn invalidation_flags_follow_the_setting_changed() {
        let mut layout = layout();
        layout.set_text("hello world");
        assert!(!layout.has_invalid_layout());
        assert!(layout.has_invalid_size());

        layout.text_size();
        assert!(!layout.has_changes());

        layout.set_padding_top(4.0);
        layout.set_max_height(100.0);
        assert!(!layout.has_invalid_layout());
        assert!(layout.has_invalid_size());
        layout.text_size();

        layout.set_max_width(40.0);
        assert!(layout.has_invalid_layout());
        layout.text_size();

        layout.set_padding_left(2.0);
        assert!(layout.has_invalid_layout());
        layout.text_size();

        let changes: [fn(&mut StyledTextLayout); 3] = [
            |l: &mut StyledTextLayout| l.set_layout_mode(LayoutMode::NoWrap),
            |l: &mut StyledTextLayout| l.set_clip_mode(ClipMode::NoClip),
            |l: &mut StyledTextLayout| l.set_leading_disabled(false),
        ];
        for change in changes {
            change(&mut layout);
            assert!(layout.has_invalid_layout() && layout.has_invalid_size());
            layout.text_size();
        }
    }

    #[test]
    fn style_changes_only_touch_existing_text_on_request() {
        let mut layout = layout();
        layout.set_text("one <b>two</b>");
        layout.text_size();

        layout.set_font_size(32.0, false);
        assert!(!layout.has_changes());
        assert!(layout.segments().iter().all(|s| s.style.font_size == 16.0));
        assert_eq!(layout.current_style().font_size, 32.0);

        layout.set_text_color(Color::WHITE, true);
        assert!(layout.has_invalid_layout());
        assert!(layout.segments().iter().all(|s| s.style.color == Color::WHITE));
        assert_eq!(layout.segments()[1].style.font_weight, FontWeight::BOLD);
        assert_eq!(layout.text_height(), 16);
    }

    #[test]
    fn appending_while_dirty_defers_to_replay() {
        let mut layout = layout();
        layout.set_plain_text("aaaa");
        layout.text_size();

        layout.set_max_width(60.0);
        layout.append_plain_text(" bbbb");
        assert!(layout.has_invalid_layout());
        assert_eq!(layout.segments().len(), 2);

        assert_eq!(line_texts(&mut layout), vec!["aaaa ", "bbbb"]);
    }

    #[test]
    fn appending_while_valid_extends_lines() {
        let mut layout = layout();
        layout.set_max_width(80.0);
        layout.set_plain_text("aaaa");
        layout.text_size();

        layout.append_plain_text(" bb");
        assert!(!layout.has_invalid_layout());
        assert!(layout.has_invalid_size());
        assert_eq!(line_texts(&mut layout), vec!["aaaa bb"]);
    }

    #[test]
    fn replay_reproduces_identical_lines() {
        let mut layout = layout();
        layout.set_max_width(120.0);
        layout.set_text("the <b>quick</b> brown<br/>fox <i>jumps</i> over the lazy dog");
        let before = layout.lines().to_vec();

        layout.set_layout_mode(LayoutMode::WordWrap);
        assert!(layout.has_invalid_layout());
        assert_eq!(layout.lines(), before.as_slice());
    }

    #[test]
    fn styled_and_named_variants_set_the_current_style() {
        let mut styles = StyleSheet::new();
        let title = Style::default().with_font_size(32.0).with_font_weight(FontWeight::BOLD);
        styles.insert("title", title.clone());

        let mut layout = layout();
        layout.set_text_named("Heading", "title", &styles);
        assert_eq!(layout.current_style(), &title);
        assert_eq!(layout.segments()[0].style, title);

        layout.append_plain_text_named(" missing", "nope", &styles);
        assert_eq!(layout.current_style(), styles.default_style());

        let small = Style::default().with_font_size(8.0);
        layout.set_plain_text_styled("x", small.clone());
        assert_eq!(layout.current_style(), &small);
    }

    #[test]
    fn append_segments_keeps_the_current_style() {
        let mut layout = layout();
        let base = layout.current_style().clone();
        layout.append_segments([
            StyledText::new(Style::default().with_font_size(40.0), "big"),
            StyledText::new(Style::default().with_color(Color::WHITE), "white"),
        ]);
        assert_eq!(layout.current_style(), &base);
        assert_eq!(layout.segments().len(), 2);
    }

    #[test]
    fn parse_options_apply_to_new_text() {
        let mut layout = layout();
        layout.set_parse_options(ParseOptions::STRIP_BREAK_TAGS);
        layout.set_text("a<br/>b");
        assert_eq!(line_texts(&mut layout), vec!["ab"]);
    }

    #[test]
    fn clear_text_empties_everything() {
        let mut layout = layout();
        layout.set_text("something");
        layout.clear_text();
        assert!(layout.segments().is_empty());
        assert!(layout.lines().is_empty());
        assert_eq!(layout.text_size(), Size2D::new(0, 0));
    }

    #[test]
    fn render_paints_runs_at_their_positions() {
        let mut layout = layout();
        layout.set_text_color(Color::WHITE, false);
        layout.set_text("ab");

        let surface = layout.render_to_surface(&painter(), &SurfaceOptions::default());
        assert_eq!((surface.width, surface.height), (20, 17));
        assert_eq!(surface.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(19, 15), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(0, 16), Some([0, 0, 0, 0]));
    }

    #[test]
    fn render_aligns_lines() {
        let mut layout = layout();
        layout.set_max_width(50.0);
        layout.set_text_color(Color::WHITE, false);

        layout.set_text_align(TextAlign::Right, false);
        layout.set_text("ab");
        let right = layout.render_to_surface(&painter(), &SurfaceOptions::default());
        assert_eq!(right.pixel(29, 0), Some([0, 0, 0, 0]));
        assert_eq!(right.pixel(30, 0), Some([255, 255, 255, 255]));

        layout.set_text_align(TextAlign::Center, false);
        layout.set_text("ab");
        let center = layout.render_to_surface(&painter(), &SurfaceOptions::default());
        assert_eq!(center.pixel(14, 0), Some([0, 0, 0, 0]));
        assert_eq!(center.pixel(15, 0), Some([255, 255, 255, 255]));
        assert_eq!(center.pixel(35, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn render_advances_by_leading() {
        let mut layout = layout();
        layout.set_leading_disabled(false);
        layout.set_text_color(Color::WHITE, false);
        layout.set_text("a\nb");
        assert_eq!(layout.text_height(), 36);

        let surface = layout.render_to_surface(&painter(), &SurfaceOptions::default());
        assert_eq!(surface.height, 37);
        assert_eq!(surface.pixel(0, 1), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(0, 2), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(0, 19), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(0, 20), Some([255, 255, 255, 255]));
    }

    #[test]
    fn runs_share_the_line_baseline() {
        let mut layout = layout();
        layout.set_text_color(Color::WHITE, false);
        layout.set_plain_text("a");
        let big = layout.current_style().clone().with_font_size(32.0);
        layout.append_plain_text_styled("b", big);

        let surface = layout.render_to_surface(&painter(), &SurfaceOptions::default());
        assert_eq!(surface.pixel(0, 11), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(0, 12), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(10, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn render_options_shape_the_surface() {
        let mut layout = layout();
        layout.set_text("ab");
        let options = SurfaceOptions {
            use_alpha: false,
            premultiplied: false,
            clear_color: Color::WHITE,
            extra_height: 0,
        };
        let rgb = layout.render_to_surface(&painter(), &options);
        assert_eq!(rgb.height, 16);
        assert_eq!(rgb.stride(), 20 * 3);
        assert_eq!(rgb.pixel(0, 0), Some([0, 0, 0, 255]));

        let premultiplied = SurfaceOptions {
            premultiplied: true,
            clear_color: Color::rgba(1.0, 1.0, 1.0, 0.5),
            ..SurfaceOptions::default()
        };
        let surface = layout.render_to_surface(&painter(), &premultiplied);
        assert!(surface.is_premultiplied());
        assert_eq!(surface.pixel(0, 16), Some([128, 128, 128, 128]));
    }
}
