//! Command Interpreter
//!
//! Turns one line of user input into a registry update or a computed value.
//! Input is `<keyword> <arguments>`; the keyword `whats` evaluates the rest
//! of the line as an expression, every other keyword comes from the command
//! table.

pub mod commands;
pub mod eval;
pub mod value;

pub use commands::{Arg, CommandDef, COMMANDS};
pub use eval::evaluate;
pub use value::{format_number, Value};

use crate::error::CommandError;
use crate::parser::parse_expression;
use crate::registry::Registry;

/// Keyword that evaluates an arbitrary expression.
pub const WHATS: &str = "whats";

/// Two-column listing such as the lines or points table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: &'static str,
    pub headers: (&'static str, &'static str),
    pub rows: Vec<(String, String)>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column widths fitting the header and every row
    pub fn widths(&self) -> (usize, usize) {
        self.rows.iter().fold(
            (self.headers.0.len(), self.headers.1.len()),
            |(left, right), (a, b)| (left.max(a.len()), right.max(b.len())),
        )
    }
}

/// What a command produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Blank input
    Nothing,
    /// A definition was stored
    Confirmed,
    Value(Value),
    Tables(Vec<Table>),
    Message(String),
    /// The session should end
    Exit,
}

/// Run one line of input against the registry.
///
/// The registry is only modified by commands that succeed.
pub fn run_command(input: &str, registry: &mut Registry) -> Result<Outcome, CommandError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Outcome::Nothing);
    }

    let (keyword, remainder) = match input.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (input, ""),
    };
    log::debug!("command '{keyword}' with arguments '{remainder}'");

    if keyword == WHATS {
        let expr = parse_expression(remainder)?;
        return evaluate(&expr, registry).map(Outcome::Value);
    }

    let command =
        commands::lookup(keyword).ok_or_else(|| CommandError::UnknownCommand(keyword.to_string()))?;
    let args = commands::split_arguments(command, remainder, registry);

    if args.len() < command.min_args || args.len() > command.max_args {
        return Err(CommandError::Arity {
            command: command.name.to_string(),
            min: command.min_args,
            max: command.max_args,
            found: args.len(),
        });
    }

    (command.handler)(&args, registry)
}
