use crate::style::Style;

/// A span of text sharing one resolved [`Style`].
///
/// Segments are what the markup parser produces and what a
/// [`StyledTextLayout`](super::StyledTextLayout) stores as its source of
/// truth. Lines and runs are always rebuilt from them.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledText {
    pub style: Style,
    pub text: String,
}

impl StyledText {
    pub fn new(style: Style, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    /// True if the segment is exactly one line break.
    pub fn is_line_break(&self) -> bool {
        self.text == "\n"
    }
}
