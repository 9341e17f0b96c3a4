use std::borrow::Cow;

use crate::style::TextTransform;

/// Applies a text transform.
///
/// `Capitalize` uppercases the first alphabetic character of every maximal
/// alphabetic run and leaves everything else untouched, so `"o'neil-smith"`
/// becomes `"O'Neil-Smith"`.
pub fn transform(text: &str, mode: TextTransform) -> Cow<'_, str> {
    match mode {
        TextTransform::None => Cow::Borrowed(text),
        TextTransform::Uppercase => Cow::Owned(text.to_uppercase()),
        TextTransform::Lowercase => Cow::Owned(text.to_lowercase()),
        TextTransform::Capitalize => {
            let mut out = String::with_capacity(text.len());
            let mut in_word = false;
            for ch in text.chars() {
                if ch.is_alphabetic() {
                    if in_word {
                        out.push(ch);
                    } else {
                        out.extend(ch.to_uppercase());
                    }
                    in_word = true;
                } else {
                    out.push(ch);
                    in_word = false;
                }
            }
            Cow::Owned(out)
        }
    }
}

fn is_break_char(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\t')
}

/// Splits text into words and single-character delimiter tokens (space,
/// newline, tab). Concatenating the tokens yields the input.
pub fn split_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if is_break_char(ch) {
            if start < i {
                tokens.push(&text[start..i]);
            }
            tokens.push(&text[i..i + 1]);
            start = i + 1;
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Whether a token is a single space or tab.
pub(crate) fn is_blank(token: &str) -> bool {
    token == " " || token == "\t"
}
