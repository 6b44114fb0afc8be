use proptest::prelude::*;
use tiny_render_speed::tokenizer::*;
use tiny_render_speed::{Error, TokenStore};

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z \n]{0,64}",
        "[a-zé\t\r \n]{0,64}",
        any::<String>(),
    ]
}

proptest! {
    #[test]
    fn prop_concatenation_reproduces_input(text in text_strategy()) {
        let joined: String = tokenize(&text).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn prop_spans_are_contiguous_and_non_empty(text in text_strategy()) {
        let base = text.as_ptr() as usize;
        let mut expected_start = 0;
        for token in tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert_eq!(token.as_ptr() as usize - base, expected_start);
            expected_start += token.len();
        }
        prop_assert_eq!(expected_start, text.len());
    }

    #[test]
    fn prop_classification(text in text_strategy()) {
        for token in tokenize(&text) {
            match TokenKind::of(token) {
                TokenKind::Newline => prop_assert_eq!(token, "\n"),
                TokenKind::Space => prop_assert_eq!(token, " "),
                TokenKind::Word => {
                    prop_assert!(!token.contains(' '));
                    prop_assert!(!token.contains('\n'));
                }
            }
        }
    }

    #[test]
    fn prop_normalized_text_has_no_carriage_returns(text in text_strategy()) {
        let normalized = normalize_newlines(&text);
        prop_assert!(!normalized.contains('\r'));
        // Every CRLF, lone CR and lone LF becomes exactly one LF
        let crlf = text.matches("\r\n").count();
        let cr = text.matches('\r').count();
        let lf = text.matches('\n').count();
        prop_assert_eq!(normalized.matches('\n').count(), cr + lf - crlf);
    }
}

#[test]
fn test_store_from_text_keeps_order() {
    let text = "one two\nthree";
    let store = TokenStore::from_text(text, 16).unwrap();
    let texts: Vec<_> = store.iter().map(|t| t.text).collect();
    assert_eq!(texts, vec!["one", " ", "two", "\n", "three"]);
}

#[test]
fn test_store_capacity_is_exact() {
    // 5 tokens fit in a store of 5, not in a store of 4
    assert_eq!(TokenStore::from_text("a b c", 5).unwrap().len(), 5);
    assert!(matches!(
        TokenStore::from_text("a b c", 4),
        Err(Error::StoreFull { capacity: 4 })
    ));
}

#[test]
fn test_crlf_text_tokenizes_like_lf() {
    let normalized = normalize_newlines("a\r\nb");
    let tokens: Vec<_> = tokenize(&normalized).collect();
    assert_eq!(tokens, vec!["a", "\n", "b"]);
}
