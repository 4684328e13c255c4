//! Line equations of the form `Ax + By + C = 0`.
//!
//! Terms must appear in x, y, constant order. A term following another term
//! starts with its sign, a bare sign before a variable stands for ±1, and a
//! missing variable term has coefficient 0.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

static COEFFICIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)?$").expect("coefficient pattern is valid")
});

/// Coefficients exactly as written, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Parse `Ax + By + C = 0` into raw coefficients.
pub fn parse_equation(text: &str) -> Result<RawCoefficients, ParseError> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    let (lhs, rhs) = compact.split_once('=').ok_or_else(|| {
        ParseError::new(format!(
            "'{text}' is not an equation of the form Ax + By + C = 0"
        ))
    })?;
    match rhs.parse::<f64>() {
        Ok(value) if value == 0.0 => {}
        _ => {
            return Err(ParseError::new(format!(
                "the right-hand side must be 0, found '{rhs}'"
            )));
        }
    }

    let (x_text, rest) = match lhs.split_once('x') {
        Some((before, after)) => (Some(before), after),
        None => (None, lhs),
    };
    let (y_text, constant_text) = match rest.split_once('y') {
        Some((before, after)) => (Some(before), after),
        None => (None, rest),
    };
    if x_text.is_none() && y_text.is_none() {
        return Err(ParseError::new(format!("'{text}' has no x or y term")));
    }

    let a = match x_text {
        Some(t) => variable_coefficient(t, false)?,
        None => 0.0,
    };
    let b = match y_text {
        Some(t) => variable_coefficient(t, x_text.is_some())?,
        None => 0.0,
    };
    let c = constant_term(constant_text)?;

    Ok(RawCoefficients { a, b, c })
}

fn check_coefficient(text: &str, follows_term: bool) -> Result<(), ParseError> {
    if !COEFFICIENT.is_match(text) {
        return Err(ParseError::new(format!("invalid coefficient '{text}'")));
    }
    if follows_term && !text.starts_with(['+', '-']) {
        return Err(ParseError::new(format!(
            "missing sign between terms before '{text}'"
        )));
    }
    Ok(())
}

fn variable_coefficient(text: &str, follows_term: bool) -> Result<f64, ParseError> {
    check_coefficient(text, follows_term)?;
    match text {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        _ => parse_number(text),
    }
}

fn constant_term(text: &str) -> Result<f64, ParseError> {
    if text.is_empty() {
        return Ok(0.0);
    }
    check_coefficient(text, true)?;
    if text.len() == 1 {
        return Err(ParseError::new(format!("dangling '{text}' after last term")));
    }
    parse_number(text)
}

fn parse_number(text: &str) -> Result<f64, ParseError> {
    text.parse::<f64>()
        .map_err(|_| ParseError::new(format!("invalid coefficient '{text}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coefficients(text: &str) -> (f64, f64, f64) {
        let raw = parse_equation(text).unwrap();
        (raw.a, raw.b, raw.c)
    }

    #[test]
    fn test_implicit_coefficients() {
        assert_eq!(coefficients("x+y-1=0"), (1.0, 1.0, -1.0));
        assert_eq!(coefficients("-x - y = 0"), (-1.0, -1.0, 0.0));
    }

    #[test]
    fn test_explicit_coefficients() {
        assert_eq!(coefficients("2x-3y+6=0"), (2.0, -3.0, 6.0));
        assert_eq!(coefficients(" 0.5 x + .25 y - 1.5 = 0 "), (0.5, 0.25, -1.5));
        assert_eq!(coefficients("2X+3Y=0.0"), (2.0, 3.0, 0.0));
    }

    #[test]
    fn test_missing_variable_terms() {
        assert_eq!(coefficients("y-2=0"), (0.0, 1.0, -2.0));
        assert_eq!(coefficients("3x+9=0"), (3.0, 0.0, 9.0));
    }

    #[test]
    fn test_rejects_other_forms() {
        assert!(parse_equation("x+y").is_err());
        assert!(parse_equation("x+y=1").is_err());
        assert!(parse_equation("y+x=0").is_err());
        assert!(parse_equation("2x3y=0").is_err());
        assert!(parse_equation("x+y+=0").is_err());
        assert!(parse_equation("x+y-1+x=0").is_err());
        assert!(parse_equation("5=0").is_err());
        assert!(parse_equation("x^2+y=0").is_err());
        assert!(parse_equation("x=0=0").is_err());
    }
}
