use std::sync::Arc;

use fxhash::FxHashMap;

use crate::{
    style::{FontStyle, FontWeight, Style},
    text::StyledText,
};

use super::{
    ParseOptions,
    tokenizer::{Token, tokenize},
};

/// Stack of cascaded styles. The base style at the bottom is never popped.
#[derive(Clone, Debug)]
pub struct StyleStack {
    styles: Vec<Style>,
}

impl StyleStack {
    pub fn new(base: Style) -> Self {
        Self { styles: vec![base] }
    }

    pub fn top(&self) -> &Style {
        // the constructor guarantees one element and pop keeps it
        &self.styles[self.styles.len() - 1]
    }

    pub fn push(&mut self, style: Style) {
        self.styles.push(style);
    }

    /// Removes the innermost style. Does nothing at the base style.
    pub fn pop(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.styles.len()
    }
}

/// What a tag handler wants done with the token after it ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagFlow {
    /// The handler fully processed the token.
    Consumed,
    /// The token still needs default processing: the built-in handler for
    /// the same tag if there is one, otherwise appending it as text.
    Continue,
}

/// Mutable parse state handed to tag handlers.
pub struct TagContext<'a> {
    /// The token being processed. Handlers may rewrite it, e.g. replace a tag
    /// with the text it stands for, and return [`TagFlow::Continue`].
    pub token: &'a mut String,
    pub options: ParseOptions,
    pub segments: &'a mut Vec<StyledText>,
    pub styles: &'a mut StyleStack,
}

pub type TagHandler = Arc<dyn Fn(&mut TagContext<'_>) -> TagFlow + Send + Sync>;

/// Caller-supplied tag handlers, consulted before the built-in ones.
///
/// Keys are matched against the lowercased token, so `<Note>` and `<note>`
/// hit the same handler.
#[derive(Clone, Default)]
pub struct TagHandlers {
    handlers: FxHashMap<String, TagHandler>,
}

impl TagHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        tag: &str,
        handler: impl Fn(&mut TagContext<'_>) -> TagFlow + Send + Sync + 'static,
    ) {
        self.handlers.insert(tag.to_lowercase(), Arc::new(handler));
    }

    pub fn remove(&mut self, tag: &str) {
        self.handlers.remove(&tag.to_lowercase());
    }

    pub fn get(&self, tag: &str) -> Option<&TagHandler> {
        self.handlers.get(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for TagHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

/// The fixed built-in tag set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BuiltinTag {
    Root,
    Italic,
    Bold,
    Close,
    Break,
    Paragraph,
    LessThan,
    GreaterThan,
}

impl BuiltinTag {
    fn lookup(tag: &str) -> Option<Self> {
        let builtin = match tag {
            "<root>" | "</root>" => Self::Root,
            "<i>" | "<em>" => Self::Italic,
            "<b>" | "<strong>" => Self::Bold,
            "</i>" | "</em>" | "</b>" | "</strong>" => Self::Close,
            "<br>" | "<br/>" | "<br />" => Self::Break,
            "<p>" | "</p>" => Self::Paragraph,
            "&lt;" => Self::LessThan,
            "&gt;" => Self::GreaterThan,
            _ => return None,
        };
        Some(builtin)
    }

    fn apply(self, ctx: &mut TagContext<'_>) -> TagFlow {
        match self {
            Self::Root => TagFlow::Consumed,
            Self::Italic => {
                let top = ctx.styles.top();
                let invert = ctx.options.contains(ParseOptions::INVERT_NESTED_ITALICS)
                    && top.font_style == FontStyle::Italic;
                let font_style = if invert {
                    FontStyle::Normal
                } else {
                    FontStyle::Italic
                };
                let style = top.clone().with_font_style(font_style);
                ctx.styles.push(style);
                TagFlow::Consumed
            }
            Self::Bold => {
                let style = ctx.styles.top().clone().with_font_weight(FontWeight::BOLD);
                ctx.styles.push(style);
                TagFlow::Consumed
            }
            Self::Close => {
                ctx.styles.pop();
                TagFlow::Consumed
            }
            Self::Break => line_break(ctx, ParseOptions::STRIP_BREAK_TAGS),
            Self::Paragraph => line_break(ctx, ParseOptions::STRIP_PARAGRAPH_TAG),
            Self::LessThan => replace_token(ctx, "<"),
            Self::GreaterThan => replace_token(ctx, ">"),
        }
    }
}

fn line_break(ctx: &mut TagContext<'_>, strip_flag: ParseOptions) -> TagFlow {
    if ctx.options.contains(strip_flag) {
        return TagFlow::Consumed;
    }
    replace_token(ctx, "\n")
}

fn replace_token(ctx: &mut TagContext<'_>, replacement: &str) -> TagFlow {
    ctx.token.clear();
    ctx.token.push_str(replacement);
    TagFlow::Continue
}

/// Parses markup into styled segments.
///
/// The result is never empty: if nothing survives parsing a single empty
/// segment with `base_style` is returned.
pub fn parse(
    text: &str,
    base_style: &Style,
    options: ParseOptions,
    handlers: Option<&TagHandlers>,
) -> Vec<StyledText> {
    let text = if options.contains(ParseOptions::TRIM_WHITESPACE) {
        text.trim()
    } else {
        text
    };

    let source = format!("<root>{text}</root>");
    let mut segments: Vec<StyledText> = Vec::new();
    let mut styles = StyleStack::new(base_style.clone());

    for token in tokenize(&source) {
        match token {
            Token::Tag(tag) => {
                process_token(tag, options, handlers, &mut segments, &mut styles);
            }
            Token::Text(text) => {
                for piece in split_text_token(text) {
                    process_token(piece, options, handlers, &mut segments, &mut styles);
                }
            }
        }
    }

    if options.contains(ParseOptions::TRIM_TRAILING_BREAKS) {
        while segments.last().is_some_and(StyledText::is_line_break) {
            segments.pop();
        }
    }

    if segments.is_empty() {
        segments.push(StyledText::new(base_style.clone(), ""));
    }

    segments
}

fn process_token(
    raw: &str,
    options: ParseOptions,
    handlers: Option<&TagHandlers>,
    segments: &mut Vec<StyledText>,
    styles: &mut StyleStack,
) {
    let tag = raw.to_lowercase();
    let builtin = BuiltinTag::lookup(&tag);
    let mut token = raw.to_string();

    let mut ctx = TagContext {
        token: &mut token,
        options,
        segments: &mut *segments,
        styles: &mut *styles,
    };

    let flow = match handlers.and_then(|h| h.get(&tag)) {
        Some(custom) => match (custom.as_ref())(&mut ctx) {
            TagFlow::Consumed => TagFlow::Consumed,
            TagFlow::Continue => builtin.map_or(TagFlow::Continue, |b| b.apply(&mut ctx)),
        },
        None => builtin.map_or(TagFlow::Continue, |b| b.apply(&mut ctx)),
    };

    if flow == TagFlow::Consumed {
        return;
    }

    // Only literal line breaks are trimmed; `<br>` and `<p>` keep theirs.
    if tag == "\n"
        && options.contains(ParseOptions::TRIM_LEADING_BREAKS)
        && segments.is_empty()
    {
        return;
    }

    segments.push(StyledText::new(styles.top().clone(), token));
}

/// Splits a text token so that every `\n` and every `&lt;`/`&gt;` entity is
/// a piece of its own. Handlers can then be keyed on them like on tags.
fn split_text_token(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0usize;
    let mut index = 0usize;
    let bytes = text.as_bytes();

    while index < bytes.len() {
        let special_len = if bytes[index] == b'\n' {
            1
        } else if bytes[index] == b'&' && is_bracket_entity(&text[index..]) {
            4
        } else {
            0
        };

        if special_len == 0 {
            index += 1;
            continue;
        }

        if start < index {
            pieces.push(&text[start..index]);
        }
        pieces.push(&text[index..index + special_len]);
        index += special_len;
        start = index;
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

fn is_bracket_entity(rest: &str) -> bool {
    rest.get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case("&lt;") || head.eq_ignore_ascii_case("&gt;"))
}

/// Parser with default options and handlers, for callers that parse many
/// strings with the same settings.
#[derive(Clone, Debug, Default)]
pub struct StyledTextParser {
    pub options: ParseOptions,
    pub handlers: TagHandlers,
}

impl StyledTextParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            handlers: TagHandlers::new(),
        }
    }

    pub fn with_handlers(options: ParseOptions, handlers: TagHandlers) -> Self {
        Self { options, handlers }
    }

    pub fn parse(&self, text: &str, base_style: &Style) -> Vec<StyledText> {
        self.parse_with_options(text, base_style, self.options)
    }

    pub fn parse_with_options(
        &self,
        text: &str,
        base_style: &Style,
        options: ParseOptions,
    ) -> Vec<StyledText> {
        let handlers = (!self.handlers.is_empty()).then_some(&self.handlers);
        parse(text, base_style, options, handlers)
    }
}
