//! Results of evaluating expressions and commands.

use std::fmt;

use crate::error::CommandError;
use crate::geometry::rational::{MAX_DENOMINATOR, RationalExt};
use crate::geometry::{Entity, Line, Point, Rational};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Floating point result of arithmetic or a metric computation
    Number(f64),
    /// Exact fraction such as a slope or a coordinate
    Exact(Rational),
    Bool(bool),
    Point(Point),
    Line(Line),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) | Value::Exact(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Point(_) => "point",
            Value::Line(_) => "line",
            Value::Tuple(_) => "tuple",
        }
    }

    fn mismatch(&self, expected: &'static str) -> CommandError {
        CommandError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_number(&self) -> Result<f64, CommandError> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Exact(r) => Ok(r.as_f64()),
            _ => Err(self.mismatch("a number")),
        }
    }

    /// Exact values pass through; floats are snapped to a nearby fraction.
    pub fn as_rational(&self) -> Result<Rational, CommandError> {
        match self {
            Value::Exact(r) => Ok(*r),
            Value::Number(n) => Ok(Rational::approximate(*n, MAX_DENOMINATOR)?),
            _ => Err(self.mismatch("a number")),
        }
    }

    /// A point, or a pair of numbers read as coordinates.
    pub fn as_point(&self) -> Result<Point, CommandError> {
        match self {
            Value::Point(p) => Ok(*p),
            Value::Tuple(items) if items.len() == 2 => {
                Ok(Point::new(items[0].as_rational()?, items[1].as_rational()?))
            }
            Value::Tuple(_) => Err(self.mismatch("an (x, y) pair")),
            _ => Err(self.mismatch("a point")),
        }
    }

    pub fn as_line(&self) -> Result<Line, CommandError> {
        match self {
            Value::Line(l) => Ok(*l),
            _ => Err(self.mismatch("a line")),
        }
    }

    pub fn as_entity(&self) -> Result<Entity, CommandError> {
        match self {
            Value::Line(l) => Ok(Entity::Line(*l)),
            Value::Point(_) | Value::Tuple(_) => Ok(Entity::Point(self.as_point()?)),
            _ => Err(self.mismatch("a point or a line")),
        }
    }

    /// Text form, rounding floats to `precision` decimals when given.
    pub fn render(&self, precision: Option<usize>) -> String {
        match self {
            Value::Number(n) => format_number(*n, precision),
            Value::Exact(r) => r.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Point(p) => p.to_string(),
            Value::Line(l) => l.to_string(),
            Value::Tuple(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.render(precision)).collect();
                format!("({})", parts.join(", "))
            }
        }
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Point(p) => Value::Point(p),
            Entity::Line(l) => Value::Line(l),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

/// Digits an `f64` can carry after the decimal point.
pub const MAX_PRECISION: usize = 15;

/// Whole numbers print without a fractional part.
pub fn format_number(value: f64, precision: Option<usize>) -> String {
    let precision = precision.map(|digits| digits.min(MAX_PRECISION));
    let value = match precision {
        Some(digits) => {
            let factor = 10f64.powi(digits as i32);
            let scaled = (value * factor).round() / factor;
            if scaled.is_finite() { scaled } else { value }
        }
        None => value,
    };
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    match precision {
        Some(digits) => format!("{value:.digits$}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0, None), "5");
        assert_eq!(format_number(-0.0, None), "0");
        assert_eq!(format_number(2.5, None), "2.5");
        assert_eq!(format_number(1.0 / 3.0, Some(4)), "0.3333");
        assert_eq!(format_number(2.50001, Some(2)), "2.5");
    }

    #[test]
    fn test_format_number_with_large_precision() {
        assert_eq!(format_number(2.5, Some(400)), "2.5");
        assert_eq!(format_number(1.0 / 3.0, Some(400)), "0.333333333333333");
        let huge = format_number(1e300 / 7.0, Some(10));
        assert!(huge.starts_with("142857"), "{huge}");
    }

    #[test]
    fn test_tuple_as_point() {
        let pair = Value::Tuple(vec![Value::Number(0.5), Value::Exact(Rational::from_integer(1))]);
        let point = pair.as_point().unwrap();
        assert_eq!(point.to_string(), "(1/2, 1)");

        let triple = Value::Tuple(vec![Value::Number(1.0); 3]);
        assert!(triple.as_point().is_err());
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = Value::Bool(true).as_line().unwrap_err();
        assert_eq!(err.to_string(), "expected a line, found boolean");
    }
}
