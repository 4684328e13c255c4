//! Expression Lexer
//!
//! Splits expression text into tokens. Only ASCII is meaningful here:
//! numbers, identifiers, arithmetic operators, commas, dots and parentheses.

use crate::error::ParseError;

/// Token types in an expression
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// Decimal literal like "3", "0.5", ".25" or "1e3"
    Number,
    /// Entity name, function name or member name
    Ident,
    Plus,
    Minus,
    Star,
    Slash,
    /// `**` or `^`
    Power,
    Comma,
    Dot,
    LParen,
    RParen,
}

/// A token with its text content
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// Tokenize an expression
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i];
        let start = i;

        match ch {
            b' ' | b'\t' | b'\r' | b'\n' => {
                i += 1;
            }

            b'0'..=b'9' => {
                i = scan_number(bytes, i);
                tokens.push(Token::new(TokenKind::Number, &input[start..i]));
            }

            // ".5" is a number, ".from_points" is a dot followed by a name
            b'.' if bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => {
                i = scan_number(bytes, i);
                tokens.push(Token::new(TokenKind::Number, &input[start..i]));
            }

            c if c.is_ascii_alphabetic() || c == b'_' => {
                i += 1;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push(Token::new(TokenKind::Ident, &input[start..i]));
            }

            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                tokens.push(Token::new(TokenKind::Power, "**"));
            }

            _ => {
                let kind = match ch {
                    b'+' => TokenKind::Plus,
                    b'-' => TokenKind::Minus,
                    b'*' => TokenKind::Star,
                    b'/' => TokenKind::Slash,
                    b'^' => TokenKind::Power,
                    b',' => TokenKind::Comma,
                    b'.' => TokenKind::Dot,
                    b'(' => TokenKind::LParen,
                    b')' => TokenKind::RParen,
                    _ => {
                        let unexpected = input[start..].chars().next().unwrap_or('?');
                        return Err(ParseError::new(format!(
                            "unexpected character '{unexpected}'"
                        )));
                    }
                };
                i += 1;
                tokens.push(Token::new(kind, &input[start..i]));
            }
        }
    }

    Ok(tokens)
}

/// Consume digits, one optional decimal point and an optional exponent.
fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    let mut seen_dot = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => i += 1,
            b'.' if !seen_dot && !bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic()) => {
                seen_dot = true;
                i += 1;
            }
            _ => break,
        }
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            while bytes.get(j).is_some_and(u8::is_ascii_digit) {
                j += 1;
            }
            i = j;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_tuple() {
        let tokens = tokenize("(0, 1.5)").unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[1].text, "0");
        assert_eq!(tokens[3].text, "1.5");
    }

    #[test]
    fn test_tokenize_shorthand_call() {
        assert_eq!(
            kinds(".from_points(A, B)"),
            vec![
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::Ident,
                TokenKind::Comma,
                TokenKind::Ident,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        let tokens = tokenize(".5 2e3 1.25e-2 7.").unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec![".5", "2e3", "1.25e-2", "7."]);
    }

    #[test]
    fn test_tokenize_power_operators() {
        assert_eq!(
            kinds("2**3^2"),
            vec![
                TokenKind::Number,
                TokenKind::Power,
                TokenKind::Number,
                TokenKind::Power,
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn test_tokenize_member_access() {
        assert_eq!(
            kinds("L.m"),
            vec![TokenKind::Ident, TokenKind::Dot, TokenKind::Ident]
        );
    }

    #[test]
    fn test_tokenize_rejects_unknown_characters() {
        assert!(tokenize("A; B").is_err());
        assert!(tokenize("__import__('os')").is_err());
        assert!(tokenize("π").is_err());
    }
}
