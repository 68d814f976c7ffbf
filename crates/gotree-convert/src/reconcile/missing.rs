//! Tokens the native tree does not record but the source text contains.
//!
//! Gaps between mapped children are scanned byte by byte; each recognised
//! first byte yields the full token text to expect at that offset.

use crate::tree::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingToken {
    pub text: &'static str,
    pub kind: TokenKind,
    /// Native kind given to the synthesized token; empty is suppressed.
    pub label: &'static str,
}

const fn other(text: &'static str) -> MissingToken {
    MissingToken {
        text,
        kind: TokenKind::Other,
        label: "",
    }
}

const fn keyword(text: &'static str) -> MissingToken {
    MissingToken {
        text,
        kind: TokenKind::Keyword,
        label: "",
    }
}

/// The token starting with `first`, if gaps may contain one.
pub fn lookup(first: u8) -> Option<MissingToken> {
    let token = match first {
        b',' => other(","),
        b';' => MissingToken {
            label: "Semicolon",
            ..other(";")
        },
        b'.' => other("."),
        b'[' => other("["),
        b']' => other("]"),
        b'=' => other("="),
        b':' => other(":"),
        b'<' => other("<-"),
        b't' => keyword("type"),
        b'r' => keyword("range"),
        b'e' => keyword("else"),
        b'c' => keyword("chan"),
        _ => return None,
    };
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_marked() {
        for (byte, text) in [(b't', "type"), (b'r', "range"), (b'e', "else"), (b'c', "chan")] {
            let token = lookup(byte).unwrap();
            assert_eq!(token.text, text);
            assert_eq!(token.kind, TokenKind::Keyword);
        }
    }

    #[test]
    fn test_semicolon_carries_label() {
        assert_eq!(lookup(b';').unwrap().label, "Semicolon");
        assert_eq!(lookup(b',').unwrap().label, "");
    }

    #[test]
    fn test_arrow_expects_two_bytes() {
        assert_eq!(lookup(b'<').unwrap().text, "<-");
    }

    #[test]
    fn test_unknown_bytes() {
        assert!(lookup(b'+').is_none());
        assert!(lookup(b'x').is_none());
        assert!(lookup(b'(').is_none());
    }
}
