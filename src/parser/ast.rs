//! Abstract Syntax Tree for expressions
//!
//! The expression language is deliberately small: literals, names, tuples,
//! arithmetic, whitelisted function calls and member access. Evaluation
//! lives in the interpreter; this module only builds the tree.

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::error::ParseError;
use crate::parser::lexer::{Token, TokenKind};

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// A parsed expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// Reference to a named point or line
    Name(String),
    /// `(a, b, ...)` or a bare top-level `a, b`
    Tuple(Vec<Expr>),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `name(args)`
    Call { function: String, args: Vec<Expr> },
    /// `target.name`
    Attribute { target: Box<Expr>, name: String },
    /// `target.method(args)`, or `.method(args)` when the target is omitted
    MethodCall {
        target: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// Convert tokens into an expression tree
pub fn tokens_to_expr(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::new("empty expression"));
    }

    let mut stream = TokenStream {
        tokens: tokens.into_iter().peekable(),
    };
    let expr = stream.sequence()?;

    match stream.tokens.next() {
        None => Ok(expr),
        Some(token) => Err(ParseError::new(format!("unexpected '{}'", token.text))),
    }
}

struct TokenStream {
    tokens: Peekable<IntoIter<Token>>,
}

impl TokenStream {
    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.tokens.peek().map(|t| t.kind)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        self.tokens.next_if(|t| t.kind == kind).is_some()
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        match self.tokens.next() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(ParseError::new(format!(
                "expected {what}, found '{}'",
                token.text
            ))),
            None => Err(ParseError::new(format!(
                "expected {what}, found end of input"
            ))),
        }
    }

    /// One expression, or a comma-separated tuple of them.
    fn sequence(&mut self) -> Result<Expr, ParseError> {
        let first = self.expr()?;
        if !self.eat(TokenKind::Comma) {
            return Ok(first);
        }

        let mut items = vec![first];
        while !matches!(self.peek_kind(), None | Some(TokenKind::RParen)) {
            items.push(self.expr()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(Expr::Tuple(items))
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.tokens.next();
            lhs = Expr::binary(op, lhs, self.term()?);
        }
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.tokens.next();
            lhs = Expr::binary(op, lhs, self.unary()?);
        }
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.eat(TokenKind::Minus) {
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        if self.eat(TokenKind::Plus) {
            return self.unary();
        }
        self.power()
    }

    /// Right-associative, binds tighter than unary minus on its left.
    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.postfix()?;
        if self.eat(TokenKind::Power) {
            return Ok(Expr::binary(BinaryOp::Pow, base, self.unary()?));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        while self.eat(TokenKind::Dot) {
            let name = self.expect(TokenKind::Ident, "a member name")?.text;
            expr = if self.eat(TokenKind::LParen) {
                Expr::MethodCall {
                    target: Some(Box::new(expr)),
                    method: name,
                    args: self.arguments()?,
                }
            } else {
                Expr::Attribute {
                    target: Box::new(expr),
                    name,
                }
            };
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.tokens.next() else {
            return Err(ParseError::new("unexpected end of expression"));
        };

        match token.kind {
            TokenKind::Number => token
                .text
                .parse::<f64>()
                .map(Expr::Number)
                .map_err(|_| ParseError::new(format!("invalid number '{}'", token.text))),
            TokenKind::Ident => {
                if self.eat(TokenKind::LParen) {
                    Ok(Expr::Call {
                        function: token.text,
                        args: self.arguments()?,
                    })
                } else {
                    Ok(Expr::Name(token.text))
                }
            }
            TokenKind::LParen => {
                if self.peek_kind() == Some(TokenKind::RParen) {
                    return Err(ParseError::new("empty parentheses"));
                }
                let inner = self.sequence()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Dot => {
                let method = self.expect(TokenKind::Ident, "a factory name")?.text;
                self.expect(TokenKind::LParen, "'('")?;
                Ok(Expr::MethodCall {
                    target: None,
                    method,
                    args: self.arguments()?,
                })
            }
            _ => Err(ParseError::new(format!("unexpected '{}'", token.text))),
        }
    }

    /// Call arguments after the opening parenthesis, through the closing one.
    fn arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.eat(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            if self.eat(TokenKind::RParen) {
                return Ok(args);
            }
            self.expect(TokenKind::Comma, "',' or ')'")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse(input: &str) -> Result<Expr, ParseError> {
        tokens_to_expr(tokenize(input)?)
    }

    fn num(n: f64) -> Expr {
        Expr::Number(n)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("1 + 2 * 3").unwrap(),
            Expr::binary(
                BinaryOp::Add,
                num(1.0),
                Expr::binary(BinaryOp::Mul, num(2.0), num(3.0))
            )
        );
    }

    #[test]
    fn test_power_is_right_associative_and_beats_negation() {
        assert_eq!(
            parse("-2 ** 3 ** 2").unwrap(),
            Expr::Neg(Box::new(Expr::binary(
                BinaryOp::Pow,
                num(2.0),
                Expr::binary(BinaryOp::Pow, num(3.0), num(2.0))
            )))
        );
    }

    #[test]
    fn test_tuples() {
        assert_eq!(parse("(0, 1)").unwrap(), Expr::Tuple(vec![num(0.0), num(1.0)]));
        assert_eq!(parse("0, 1").unwrap(), Expr::Tuple(vec![num(0.0), num(1.0)]));
        assert_eq!(parse("(2)").unwrap(), num(2.0));
        assert!(parse("()").is_err());
    }

    #[test]
    fn test_shorthand_factory_call() {
        assert_eq!(
            parse(".from_points(A, B)").unwrap(),
            Expr::MethodCall {
                target: None,
                method: "from_points".to_string(),
                args: vec![Expr::Name("A".to_string()), Expr::Name("B".to_string())],
            }
        );
    }

    #[test]
    fn test_member_access_and_calls() {
        assert_eq!(
            parse("L.m").unwrap(),
            Expr::Attribute {
                target: Box::new(Expr::Name("L".to_string())),
                name: "m".to_string(),
            }
        );
        assert_eq!(
            parse("distance(A, B)").unwrap(),
            Expr::Call {
                function: "distance".to_string(),
                args: vec![Expr::Name("A".to_string()), Expr::Name("B".to_string())],
            }
        );
        assert!(matches!(
            parse("Line.from_slope(2, P)").unwrap(),
            Expr::MethodCall { target: Some(_), .. }
        ));
    }

    #[test]
    fn test_errors() {
        assert!(parse("").is_err());
        assert!(parse("1 +").is_err());
        assert!(parse("f(1,").is_err());
        assert!(parse("(1, 2").is_err());
        assert!(parse("1 2").is_err());
    }
}
