//! Markup parsing: turns a string with a small set of HTML-like tags into
//! styled text segments.
//!
//! Supported tags (case-insensitive): `<b>`/`<strong>`, `<i>`/`<em>`,
//! `<br>`/`<br/>`/`<br />`, `<p>`/`</p>` and the `&lt;`/`&gt;` entities.
//! Anything else is kept as literal text unless a custom [`TagHandlers`]
//! entry claims it.

/// Tag handlers and the segment-producing parser.
pub mod parser;
/// Splits raw markup into text and tag tokens.
pub mod tokenizer;

pub use parser::{
    StyleStack, StyledTextParser, TagContext, TagFlow, TagHandler, TagHandlers, parse,
};
pub use tokenizer::{Token, tokenize};

bitflags::bitflags! {
    /// Parser behavior flags. Combine with `|`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ParseOptions: u32 {
        /// `<i>` inside italic text switches back to normal.
        const INVERT_NESTED_ITALICS = 1 << 0;
        /// Drop `<p>` and `</p>` instead of emitting line breaks.
        const STRIP_PARAGRAPH_TAG = 1 << 1;
        /// Drop `<br>` instead of emitting line breaks.
        const STRIP_BREAK_TAGS = 1 << 2;
        /// Trim whitespace around the whole input before parsing.
        const TRIM_WHITESPACE = 1 << 3;
        /// Drop line breaks that would come before any other segment.
        const TRIM_LEADING_BREAKS = 1 << 4;
        /// Drop line break segments at the end of the result.
        const TRIM_TRAILING_BREAKS = 1 << 5;
    }
}
