//! Geometry Calculator
//!
//! An interactive calculator for points and lines in the plane.
//!
//! This library provides:
//! - Exact points and lines with integer line coefficients
//! - Equation and expression parsing
//! - A named entity registry
//! - The command interpreter behind the `geocalc` binary

pub mod config;
pub mod error;
pub mod geometry;
pub mod interpreter;
pub mod parser;
pub mod registry;

// Re-exports for clean public API
pub use config::Config;
pub use error::{CommandError, GeometryError, ParseError};
pub use geometry::{Entity, Line, Point, Rational, RationalExt};
pub use interpreter::{Outcome, Value, run_command};
pub use registry::Registry;
