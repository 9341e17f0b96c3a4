use std::mem;

use crate::{
    font_provider::{FallbackMode, FontProvider, FontRequest},
    style::Style,
    text::{
        data::StyledText,
        line::{Line, Run},
        transform::{is_blank, split_words, transform},
    },
};

/// How segments are broken into lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Break at newlines and wrap words that overflow the width.
    #[default]
    WordWrap,
    /// Break at newlines only.
    NoWrap,
    /// Never break. Newlines are dropped.
    SingleLine,
    /// Wrap words that overflow the width and drop newlines.
    StripBreaks,
}

impl LayoutMode {
    pub fn wraps_words(self) -> bool {
        matches!(self, LayoutMode::WordWrap | LayoutMode::StripBreaks)
    }
}

/// Settings that decide line structure. Lines built under equal settings
/// from equal segments are identical.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapSettings {
    pub mode: LayoutMode,
    /// Usable width, `None` for unconstrained.
    pub wrap_width: Option<f32>,
    pub leading_disabled: bool,
    pub fallback: FallbackMode,
}

fn new_line(style: &Style, settings: &WrapSettings) -> Line {
    Line::new(
        style.text_align,
        style.leading_offset,
        settings.leading_disabled,
    )
}

/// Lays out one segment after the lines built so far.
///
/// A segment continues the last line unless its alignment differs. Its text
/// is split into words and delimiters; a word that would push the line past
/// the wrap width moves to a new line, unless it is the first thing on the
/// line. Spaces and newlines that cause a break are dropped.
pub fn append_segment(
    lines: &mut Vec<Line>,
    segment: &StyledText,
    settings: &WrapSettings,
    fonts: &dyn FontProvider,
) {
    let style = &segment.style;

    let mut line = match lines.pop() {
        Some(line) if line.text_align() == style.text_align => line,
        Some(line) => {
            lines.push(line);
            new_line(style, settings)
        }
        None => new_line(style, settings),
    };

    let font = fonts.resolve(&FontRequest::from_style(style, settings.fallback));
    let mut run = Run::new(font, style.color);

    let text = transform(&segment.text, style.text_transform);
    let auto_wrap = settings.mode.wraps_words();
    let single_line = settings.mode == LayoutMode::SingleLine;

    for token in split_words(&text) {
        let is_newline = token == "\n";
        if is_newline && settings.mode == LayoutMode::StripBreaks {
            continue;
        }
        if single_line {
            if !is_newline {
                run.push_str(token);
            }
            continue;
        }

        let prev_len = run.text().len();
        run.push_str(token);

        let first_word = line.is_empty() && prev_len == 0;
        let overflows = auto_wrap
            && !first_word
            && settings.wrap_width.is_some_and(|max_width| {
                let line_width = line.measure(fonts).width + run.measure(fonts).width;
                line_width > max_width
            });

        if overflows || is_newline {
            run.truncate(prev_len);
            line.push_run(mem::replace(&mut run, Run::new(font, style.color)));
            lines.push(mem::replace(&mut line, new_line(style, settings)));

            if !is_newline && !is_blank(token) {
                run.push_str(token);
            }
        }
    }

    line.push_run(run);
    lines.push(line);
}
