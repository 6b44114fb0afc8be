//! Whitespace tokenizer
//!
//! Splits text into words, single spaces and single newlines. Classification
//! is per byte: only `b' '` and `b'\n'` are delimiters, everything else
//! (tabs, carriage returns, multi-byte characters) belongs to a word.

use std::borrow::Cow;

/// What a token is, derived from its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Space,
    Newline,
}

impl TokenKind {
    /// Classify a token's text
    pub fn of(text: &str) -> Self {
        match text.as_bytes() {
            [b'\n'] => TokenKind::Newline,
            [b' '] => TokenKind::Space,
            _ => TokenKind::Word,
        }
    }
}

/// Lazy iterator over the tokens of a text
///
/// Cheap to clone; a clone restarts from the position it was cloned at.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

/// Tokenize `text` into words, spaces and newlines
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }

        let end = match bytes[start] {
            b' ' | b'\n' => start + 1,
            _ => memchr::memchr2(b' ', b'\n', &bytes[start..])
                .map(|offset| start + offset)
                .unwrap_or(bytes.len()),
        };

        self.pos = end;
        // Delimiters are ASCII, so both ends fall on char boundaries
        Some(&self.text[start..end])
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

/// Replace `"\r\n"` and lone `'\r'` with `'\n'`
///
/// Borrows the input when it contains no carriage return.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if memchr::memchr(b'\r', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_spaces_newlines() {
        let tokens: Vec<_> = tokenize("hello  world\nfoo").collect();
        assert_eq!(tokens, vec!["hello", " ", " ", "world", "\n", "foo"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").count(), 0);
    }

    #[test]
    fn test_only_delimiters() {
        let tokens: Vec<_> = tokenize(" \n\n ").collect();
        assert_eq!(tokens, vec![" ", "\n", "\n", " "]);
    }

    #[test]
    fn test_tabs_and_unicode_stay_in_words() {
        let tokens: Vec<_> = tokenize("a\tb héllo\r\n").collect();
        assert_eq!(tokens, vec!["a\tb", " ", "héllo\r", "\n"]);
    }

    #[test]
    fn test_restartable() {
        let mut tokens = tokenize("one two");
        tokens.next();
        let rest: Vec<_> = tokens.clone().collect();
        assert_eq!(rest, vec![" ", "two"]);
        assert_eq!(tokens.count(), 2);
    }

    #[test]
    fn test_kind() {
        assert_eq!(TokenKind::of("\n"), TokenKind::Newline);
        assert_eq!(TokenKind::of(" "), TokenKind::Space);
        assert_eq!(TokenKind::of("  "), TokenKind::Word);
        assert_eq!(TokenKind::of("x"), TokenKind::Word);
    }

    #[test]
    fn test_normalize_newlines() {
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed(_)));
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
        assert_eq!(normalize_newlines("\r\r\n"), "\n\n");
    }
}
