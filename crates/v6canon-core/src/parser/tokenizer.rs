//! Group tokenizer — splits address text into hexadecimal group tokens
//!
//! Handles: hex digits (either case, lowered on the way in) and the `:`
//! separator. Anything else is rejected with its column.
//!
//! Guarantees:
//! - Deterministic: same input always produces same token stream
//! - Every error carries the 1-based column where it was found

use crate::{Error, Result};

/// Maximum number of hex digits in one group (16 bits)
pub const MAX_GROUP_DIGITS: usize = 4;

/// Position of a group in source text for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Zero-based group index
    pub group: usize,
    /// 1-based character column of the group's first digit
    pub column: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "group {} (column {})", self.group, self.column)
    }
}

/// One lower-cased hexadecimal group with its source position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupToken {
    pub text: String,
    pub span: Span,
}

/// Tokenizer for colon-separated hexadecimal groups
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
}

impl Tokenizer {
    /// Create a new tokenizer for the given input text
    pub fn new(text: &str) -> Self {
        Tokenizer {
            input: text.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input into a stream of group tokens
    ///
    /// Every separator must sit between two non-empty groups, so the
    /// `::` shorthand and stray leading or trailing colons are rejected.
    pub fn tokenize(&mut self) -> Result<Vec<GroupToken>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.read_group(tokens.len())?;
            tokens.push(token);

            // read_group stops only at a separator or end of input
            if self.advance().is_none() {
                break;
            }
        }

        Ok(tokens)
    }

    // ── Character helpers ──────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }

    // ── Groups ─────────────────────────────────────────────

    fn read_group(&mut self, index: usize) -> Result<GroupToken> {
        let span = Span {
            group: index,
            column: self.position + 1,
        };
        let mut text = String::with_capacity(MAX_GROUP_DIGITS);

        while let Some(ch) = self.peek() {
            if ch == ':' {
                break;
            }
            if !ch.is_ascii_hexdigit() {
                return Err(Error::InvalidAddressFormat(format!(
                    "non-hex character '{}' at column {}",
                    ch,
                    self.position + 1
                )));
            }
            text.push(ch.to_ascii_lowercase());
            self.advance();
        }

        if text.is_empty() {
            return Err(Error::InvalidAddressFormat(format!("empty {}", span)));
        }
        if text.len() > MAX_GROUP_DIGITS {
            return Err(Error::InvalidAddressFormat(format!(
                "{} has {} digits, at most {} allowed",
                span,
                text.len(),
                MAX_GROUP_DIGITS
            )));
        }

        Ok(GroupToken { text, span })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        Tokenizer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_tokenize_full_address() {
        assert_eq!(
            texts("2001:0db8:0000:0000:0000:ff00:0042:8329"),
            vec!["2001", "0db8", "0000", "0000", "0000", "ff00", "0042", "8329"]
        );
    }

    #[test]
    fn test_tokenize_lowercases() {
        assert_eq!(texts("ABCD:Ef01"), vec!["abcd", "ef01"]);
    }

    #[test]
    fn test_tokenize_short_groups() {
        assert_eq!(texts("1:22:333:4444"), vec!["1", "22", "333", "4444"]);
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = Tokenizer::new("1:22:333").tokenize().unwrap();
        let columns: Vec<usize> = tokens.iter().map(|t| t.span.column).collect();
        assert_eq!(columns, vec![1, 3, 6]);
        assert_eq!(tokens[2].span.group, 2);
    }

    #[test]
    fn test_tokenize_rejects_non_hex() {
        let err = Tokenizer::new("12g4:0000").tokenize().unwrap_err();
        assert!(err.to_string().contains("'g' at column 3"), "{}", err);
    }

    #[test]
    fn test_tokenize_rejects_empty_group() {
        assert!(Tokenizer::new("1::2").tokenize().is_err());
        assert!(Tokenizer::new(":1").tokenize().is_err());
        assert!(Tokenizer::new("1:").tokenize().is_err());
        assert!(Tokenizer::new("").tokenize().is_err());
    }

    #[test]
    fn test_tokenize_rejects_long_group() {
        let err = Tokenizer::new("12345:1").tokenize().unwrap_err();
        assert!(err.to_string().contains("5 digits"), "{}", err);
    }

    #[test]
    fn test_tokenize_rejects_whitespace() {
        assert!(Tokenizer::new("1:2 ").tokenize().is_err());
    }
}
