/// A piece of markup source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A maximal run of text between tags.
    Text(&'a str),
    /// A complete tag including its `<` and `>` delimiters.
    Tag(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Text(text) | Token::Tag(text) => text,
        }
    }
}

/// Splits `source` into alternating text and tag tokens.
///
/// A tag runs from a `<` to the next `>`, including any `<` in between, so
/// `a < b<i>` yields `a ` and the tag `< b<i>`. The parser treats such
/// unknown tags as literal text. An unterminated `<` ends
/// tokenization: the rest of the input is dropped with a warning and the
/// tokens collected so far are returned.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut cursor = 0usize;

    while let Some(open_rel) = source[cursor..].find('<') {
        let open = cursor + open_rel;

        let Some(close_rel) = source[open + 1..].find('>') else {
            log::warn!("Malformed style tag: {}", &source[open..]);
            push_text(&mut tokens, &source[cursor..open]);
            return tokens;
        };
        let close = open + 1 + close_rel;

        push_text(&mut tokens, &source[cursor..open]);
        tokens.push(Token::Tag(&source[open..=close]));
        cursor = close + 1;
    }

    push_text(&mut tokens, &source[cursor..]);
    tokens
}

fn push_text<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str) {
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
}
