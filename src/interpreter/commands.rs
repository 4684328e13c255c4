//! Command Table
//!
//! Every command keyword with its separator word, arity and handler.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CommandError, GeometryError};
use crate::geometry::{Entity, Line, Point};
use crate::parser::{parse_equation, parse_expression};
use crate::registry::Registry;

use super::eval::evaluate;
use super::value::Value;
use super::{Outcome, Table};

/// Filler word dropped from the front of separator-split arguments.
pub const FILLER_WORD: &str = "between";

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("name pattern is valid"));

/// Words that can never name an entity because they drive argument splitting.
const RESERVED_NAMES: &[&str] = &["is", "and", "through", FILLER_WORD, "Line", "Point"];

/// One positional argument after separator splitting.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    /// Trimmed argument text
    pub text: String,
    /// The registered entity, when the text is exactly one of its names
    pub entity: Option<Entity>,
}

impl Arg {
    pub fn new(text: &str, registry: &Registry) -> Self {
        Self {
            text: text.to_string(),
            entity: registry.get(text),
        }
    }

    /// The named entity, or the argument text evaluated as an expression.
    fn value(&self, registry: &Registry) -> Result<Value, CommandError> {
        match self.entity {
            Some(entity) => Ok(Value::from(entity)),
            None => evaluate(&parse_expression(&self.text)?, registry),
        }
    }

    fn entity(&self, registry: &Registry) -> Result<Entity, CommandError> {
        self.value(registry)?.as_entity()
    }

    fn line(&self, registry: &Registry) -> Result<Line, CommandError> {
        self.value(registry)?.as_line()
    }

    fn point(&self, registry: &Registry) -> Result<Point, CommandError> {
        self.value(registry)?.as_point()
    }
}

pub type Handler = fn(&[Arg], &mut Registry) -> Result<Outcome, CommandError>;

/// Command definition
#[derive(Clone, Copy)]
pub struct CommandDef {
    pub name: &'static str,
    /// Word that splits the argument text into positional arguments
    pub separator: Option<&'static str>,
    pub min_args: usize,
    pub max_args: usize,
    pub usage: &'static str,
    pub description_short: &'static str,
    pub handler: Handler,
}

pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "line",
        separator: Some("is"),
        min_args: 2,
        max_args: 2,
        usage: "line <name> is <equation | .factory(...) | expression>",
        description_short: "Define a named line",
        handler: add_line,
    },
    CommandDef {
        name: "point",
        separator: Some("is"),
        min_args: 2,
        max_args: 2,
        usage: "point <name> is (<x>, <y>)",
        description_short: "Define a named point",
        handler: add_point,
    },
    CommandDef {
        name: "lines",
        separator: None,
        min_args: 0,
        max_args: 0,
        usage: "lines",
        description_short: "Show all lines",
        handler: show_lines,
    },
    CommandDef {
        name: "points",
        separator: None,
        min_args: 0,
        max_args: 0,
        usage: "points",
        description_short: "Show all points",
        handler: show_points,
    },
    CommandDef {
        name: "show",
        separator: None,
        min_args: 0,
        max_args: 0,
        usage: "show",
        description_short: "Show all lines and points",
        handler: show,
    },
    CommandDef {
        name: "slope",
        separator: Some("is"),
        min_args: 1,
        max_args: 1,
        usage: "slope <line>",
        description_short: "Slope of a line",
        handler: slope,
    },
    CommandDef {
        name: "distance",
        separator: Some("and"),
        min_args: 2,
        max_args: 2,
        usage: "distance [between] <point|line> and <point|line>",
        description_short: "Distance between points and/or parallel lines",
        handler: distance,
    },
    CommandDef {
        name: "angle",
        separator: Some("and"),
        min_args: 2,
        max_args: 2,
        usage: "angle [between] <line> and <line>",
        description_short: "Angle between two lines in degrees",
        handler: angle,
    },
    CommandDef {
        name: "perpendicular-on",
        separator: Some("through"),
        min_args: 2,
        max_args: 2,
        usage: "perpendicular-on <line> through <point>",
        description_short: "Perpendicular line through a point",
        handler: perpendicular_on,
    },
    CommandDef {
        name: "clear",
        separator: None,
        min_args: 0,
        max_args: 0,
        usage: "clear",
        description_short: "Forget all lines and points",
        handler: clear,
    },
    CommandDef {
        name: "help",
        separator: None,
        min_args: 0,
        max_args: 1,
        usage: "help [command]",
        description_short: "List commands or show one command's usage",
        handler: help,
    },
    CommandDef {
        name: "exit",
        separator: None,
        min_args: 0,
        max_args: 0,
        usage: "exit",
        description_short: "Leave the calculator",
        handler: exit,
    },
];

/// Find a command by keyword
pub fn lookup(name: &str) -> Option<&'static CommandDef> {
    COMMANDS.iter().find(|cmd| cmd.name == name)
}

/// Split argument text into positional arguments and resolve entity names.
///
/// With a separator the text is cut at every whole-word occurrence of it,
/// after dropping a leading filler word. Without one, arguments are the
/// whitespace-separated words.
pub fn split_arguments(command: &CommandDef, remainder: &str, registry: &Registry) -> Vec<Arg> {
    let mut words: Vec<&str> = remainder.split_whitespace().collect();

    let Some(separator) = command.separator else {
        return words.iter().map(|w| Arg::new(w, registry)).collect();
    };

    if words.first() == Some(&FILLER_WORD) {
        words.remove(0);
    }

    words
        .split(|word| *word == separator)
        .map(|segment| segment.join(" "))
        .filter(|segment| !segment.is_empty())
        .map(|segment| Arg::new(&segment, registry))
        .collect()
}

fn valid_name(text: &str) -> Result<&str, CommandError> {
    if NAME.is_match(text) && !RESERVED_NAMES.contains(&text) {
        Ok(text)
    } else {
        Err(CommandError::InvalidName(text.to_string()))
    }
}

/// Equation, shorthand factory call, existing line or line-valued expression.
fn build_line(spec: &Arg, registry: &Registry) -> Result<Line, CommandError> {
    if let Some(Entity::Line(line)) = spec.entity {
        return Ok(line);
    }
    if spec.text.contains('=') {
        let raw = parse_equation(&spec.text)?;
        return Ok(Line::from_f64(raw.a, raw.b, raw.c)?);
    }
    spec.line(registry)
}

fn add_line(args: &[Arg], registry: &mut Registry) -> Result<Outcome, CommandError> {
    let name = valid_name(&args[0].text)?;
    let line = build_line(&args[1], registry)?;
    registry.add_line(name, line);
    Ok(Outcome::Confirmed)
}

fn add_point(args: &[Arg], registry: &mut Registry) -> Result<Outcome, CommandError> {
    let name = valid_name(&args[0].text)?;
    let point = args[1].point(registry)?;
    registry.add_point(name, point);
    Ok(Outcome::Confirmed)
}

fn lines_table(registry: &Registry) -> Table {
    Table {
        title: "Lines",
        headers: ("Name", "Equation"),
        rows: registry
            .lines()
            .map(|(name, line)| (name.to_string(), line.to_string()))
            .collect(),
    }
}

fn points_table(registry: &Registry) -> Table {
    Table {
        title: "Points",
        headers: ("Name", "Coordinates"),
        rows: registry
            .points()
            .map(|(name, point)| (name.to_string(), point.to_string()))
            .collect(),
    }
}

fn show_lines(_: &[Arg], registry: &mut Registry) -> Result<Outcome, CommandError> {
    Ok(Outcome::Tables(vec![lines_table(registry)]))
}

fn show_points(_: &[Arg], registry: &mut Registry) -> Result<Outcome, CommandError> {
    Ok(Outcome::Tables(vec![points_table(registry)]))
}

fn show(_: &[Arg], registry: &mut Registry) -> Result<Outcome, CommandError> {
    Ok(Outcome::Tables(vec![
        lines_table(registry),
        points_table(registry),
    ]))
}

fn slope(args: &[Arg], registry: &mut Registry) -> Result<Outcome, CommandError> {
    let line = args[0].line(registry)?;
    let slope = line.slope().ok_or(GeometryError::VerticalSlope)?;
    Ok(Outcome::Value(Value::Exact(slope)))
}

fn distance(args: &[Arg], registry: &mut Registry) -> Result<Outcome, CommandError> {
    let from = args[0].entity(registry)?;
    let to = args[1].entity(registry)?;
    Ok(Outcome::Value(Value::Number(from.distance(&to)?)))
}

fn angle(args: &[Arg], registry: &mut Registry) -> Result<Outcome, CommandError> {
    let first = args[0].line(registry)?;
    let second = args[1].line(registry)?;
    Ok(Outcome::Value(Value::Number(first.angle(&second))))
}

fn perpendicular_on(args: &[Arg], registry: &mut Registry) -> Result<Outcome, CommandError> {
    let line = args[0].line(registry)?;
    let point = args[1].point(registry)?;
    Ok(Outcome::Value(Value::Line(line.perpendicular(&point)?)))
}

fn clear(_: &[Arg], registry: &mut Registry) -> Result<Outcome, CommandError> {
    registry.clear();
    Ok(Outcome::Message("Cleared all lines and points.".to_string()))
}

fn help(args: &[Arg], _: &mut Registry) -> Result<Outcome, CommandError> {
    if let Some(arg) = args.first() {
        let command =
            lookup(&arg.text).ok_or_else(|| CommandError::UnknownCommand(arg.text.clone()))?;
        return Ok(Outcome::Message(format!(
            "{}: {}",
            command.usage, command.description_short
        )));
    }

    let mut rows: Vec<(String, String)> = COMMANDS
        .iter()
        .map(|cmd| (cmd.usage.to_string(), cmd.description_short.to_string()))
        .collect();
    rows.push((
        "whats <expression>".to_string(),
        "Evaluate an expression over named points and lines".to_string(),
    ));
    Ok(Outcome::Tables(vec![Table {
        title: "Commands",
        headers: ("Usage", "Description"),
        rows,
    }]))
}

fn exit(_: &[Arg], _: &mut Registry) -> Result<Outcome, CommandError> {
    Ok(Outcome::Exit)
}
