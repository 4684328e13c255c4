//! Error types for parsing, geometry and command dispatch.

use thiserror::Error;

/// Malformed equation, expression or coordinate text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A geometric quantity requested for a configuration where it is undefined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("not a line: the x and y coefficients are both zero")]
    NotALine,

    #[error("cannot build a line through two coincident points")]
    CoincidentPoints,

    #[error("the slope of a vertical line is undefined")]
    VerticalSlope,

    #[error("the line has no {0}-intercept")]
    MissingIntercept(char),

    #[error("distance between non-parallel lines is undefined")]
    NonParallelLines,

    #[error("division by zero")]
    DivisionByZero,

    #[error("{0} is not a finite number")]
    NonFinite(f64),

    #[error("arithmetic overflow in exact coefficients")]
    Overflow,
}

/// Everything that can abort one command line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Geometry(#[from] GeometryError),

    #[error("Command {0} not found.")]
    UnknownCommand(String),

    #[error("name '{0}' is not defined")]
    UndefinedName(String),

    #[error("'{command}' expects {} argument(s), got {found}", arity_range(.min, .max))]
    Arity {
        command: String,
        min: usize,
        max: usize,
        found: usize,
    },

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{0}' cannot be used as a name")]
    InvalidName(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{kind} has no attribute or method '{name}'")]
    UnknownMember { kind: &'static str, name: String },
}

fn arity_range(min: &usize, max: &usize) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    }
}

impl CommandError {
    /// True for errors raised by a missing command or name.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            CommandError::UnknownCommand(_)
                | CommandError::UndefinedName(_)
                | CommandError::UnknownFunction(_)
                | CommandError::UnknownMember { .. }
        )
    }
}
