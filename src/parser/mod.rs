//! Parsers for command arguments
//!
//! Two small grammars: the free-form expression language used by `whats`,
//! point coordinates and shorthand factory calls, and the restricted
//! `Ax + By + C = 0` line equation.

pub mod ast;
pub mod equation;
pub mod lexer;

pub use ast::{BinaryOp, Expr};
pub use equation::{parse_equation, RawCoefficients};
pub use lexer::{tokenize, Token, TokenKind};

use crate::error::ParseError;

/// Parse expression text into an [`Expr`] tree.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    let tokens = lexer::tokenize(input)?;
    ast::tokens_to_expr(tokens)
}
