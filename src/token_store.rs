//! Bounded, append-only storage for measured tokens

use crate::coordinates::LayoutRect;
use crate::error::{Error, Result};
use crate::tokenizer::{tokenize, TokenKind};

/// Default capacity, enough for a few pages of prose
pub const DEFAULT_CAPACITY: usize = 4096;

/// A span of the source text plus its bounding box
///
/// The text is borrowed from the buffer the store was built from, never copied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub bounds: LayoutRect,
}

impl Token<'_> {
    pub fn kind(&self) -> TokenKind {
        TokenKind::of(self.text)
    }

    pub fn is_newline(&self) -> bool {
        self.kind() == TokenKind::Newline
    }

    pub fn is_space(&self) -> bool {
        self.kind() == TokenKind::Space
    }
}

/// Ordered tokens in reading order, never more than `capacity` of them
#[derive(Debug)]
pub struct TokenStore<'a> {
    tokens: Vec<Token<'a>>,
    capacity: usize,
}

impl<'a> TokenStore<'a> {
    /// Empty store; `capacity` only bounds the count, storage grows on demand
    pub fn new(capacity: usize) -> Self {
        Self {
            tokens: Vec::new(),
            capacity,
        }
    }

    /// Tokenize `text` into a new store with zeroed boxes
    pub fn from_text(text: &'a str, capacity: usize) -> Result<Self> {
        let mut store = Self::new(capacity);
        // n bytes never make more than n tokens
        store.tokens.reserve(capacity.min(text.len()));
        for span in tokenize(text) {
            store.allocate(span, 0.0, 0.0)?;
        }
        log::debug!("Tokenized {} bytes into {} tokens", text.len(), store.len());
        Ok(store)
    }

    /// Append a token with the given size and a zero position
    ///
    /// Fails with [`Error::StoreFull`] once `len() == capacity()`.
    pub fn allocate(&mut self, text: &'a str, width: f32, height: f32) -> Result<&mut Token<'a>> {
        if self.tokens.len() >= self.capacity {
            return Err(Error::StoreFull {
                capacity: self.capacity,
            });
        }
        self.tokens.push(Token {
            text,
            bounds: LayoutRect::new(0.0, 0.0, width, height),
        });
        let last = self.tokens.len() - 1;
        Ok(&mut self.tokens[last])
    }

    pub fn get(&self, index: usize) -> Option<&Token<'a>> {
        self.tokens.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Token<'a>> {
        self.tokens.get_mut(index)
    }

    /// Release the backing storage
    pub fn clear(&mut self) {
        self.tokens = Vec::new();
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'a>> {
        self.tokens.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Token<'a>> {
        self.tokens.iter_mut()
    }

    /// Tokens that get drawn (everything except newlines)
    pub fn drawable(&self) -> impl Iterator<Item = &Token<'a>> {
        self.tokens.iter().filter(|t| !t.is_newline())
    }
}

impl<'s, 'a> IntoIterator for &'s TokenStore<'a> {
    type Item = &'s Token<'a>;
    type IntoIter = std::slice::Iter<'s, Token<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_get() {
        let mut store = TokenStore::new(4);
        let token = store.allocate("hello", 30.0, 12.0).unwrap();
        assert_eq!(token.bounds, LayoutRect::new(0.0, 0.0, 30.0, 12.0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().text, "hello");
        assert!(store.get(1).is_none());
    }

    #[test]
    fn test_rejects_exactly_at_capacity() {
        let mut store = TokenStore::new(2);
        store.allocate("a", 0.0, 0.0).unwrap();
        store.allocate("b", 0.0, 0.0).unwrap();

        let err = store.allocate("c", 0.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::StoreFull { capacity: 2 }));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().text, "b");
    }

    #[test]
    fn test_huge_capacity_is_only_a_limit() {
        let mut store = TokenStore::new(usize::MAX);
        assert!(store.allocate("a", 1.0, 1.0).is_ok());
        assert_eq!(store.len(), 1);

        let store = TokenStore::from_text("a b", usize::MAX / 2).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_zero_capacity() {
        let mut store = TokenStore::new(0);
        assert!(store.allocate("a", 0.0, 0.0).is_err());
    }

    #[test]
    fn test_clear_releases() {
        let mut store = TokenStore::from_text("a b", 8).unwrap();
        assert_eq!(store.len(), 3);
        store.clear();
        assert!(store.is_empty());
        assert!(store.get(0).is_none());
        store.allocate("again", 0.0, 0.0).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_from_text_overflow() {
        let result = TokenStore::from_text("a b c", 4);
        assert!(matches!(result, Err(Error::StoreFull { capacity: 4 })));
    }

    #[test]
    fn test_classification() {
        let store = TokenStore::from_text("hi there\n", 8).unwrap();
        let kinds: Vec<_> = store.iter().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Word, TokenKind::Space, TokenKind::Word, TokenKind::Newline]
        );
        assert!(store.get(1).unwrap().is_space());
        assert!(store.get(3).unwrap().is_newline());
        assert_eq!(store.drawable().count(), 3);
    }
}
