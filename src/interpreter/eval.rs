//! Expression evaluator.
//!
//! Walks an [`Expr`] against the registry. Only arithmetic, the functions
//! in [`call_function`] and the members in [`attribute`] / [`method_call`]
//! are reachable; nothing else in the process can be named.

use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Signed, Zero};

use crate::error::{CommandError, GeometryError};
use crate::geometry::rational::RationalExt;
use crate::geometry::{Line, Rational};
use crate::parser::{BinaryOp, Expr};
use crate::registry::Registry;

use super::value::Value;

/// Namespace used for `Line.from_points(...)` style factory calls.
const LINE_NAMESPACE: &str = "Line";

pub fn evaluate(expr: &Expr, registry: &Registry) -> Result<Value, CommandError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Name(name) => registry
            .get(name)
            .map(Value::from)
            .ok_or_else(|| CommandError::UndefinedName(name.clone())),
        Expr::Tuple(items) => evaluate_all(items, registry).map(Value::Tuple),
        Expr::Neg(inner) => negate(evaluate(inner, registry)?),
        Expr::Binary { op, lhs, rhs } => {
            arithmetic(*op, evaluate(lhs, registry)?, evaluate(rhs, registry)?)
        }
        Expr::Call { function, args } => call_function(function, &evaluate_all(args, registry)?),
        Expr::Attribute { target, name } => attribute(&evaluate(target, registry)?, name),
        Expr::MethodCall {
            target: None,
            method,
            args,
        } => line_factory(method, &evaluate_all(args, registry)?).map(Value::Line),
        Expr::MethodCall {
            target: Some(target),
            method,
            args,
        } => match target.as_ref() {
            Expr::Name(name) if name == LINE_NAMESPACE && !registry.contains(name) => {
                line_factory(method, &evaluate_all(args, registry)?).map(Value::Line)
            }
            _ => method_call(
                &evaluate(target, registry)?,
                method,
                &evaluate_all(args, registry)?,
            ),
        },
    }
}

fn evaluate_all(exprs: &[Expr], registry: &Registry) -> Result<Vec<Value>, CommandError> {
    exprs.iter().map(|e| evaluate(e, registry)).collect()
}

fn expect_arity(name: &str, args: &[Value], expected: usize) -> Result<(), CommandError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CommandError::Arity {
            command: name.to_string(),
            min: expected,
            max: expected,
            found: args.len(),
        })
    }
}

fn finite(value: f64) -> Result<Value, CommandError> {
    if value.is_finite() {
        Ok(Value::Number(value))
    } else {
        Err(GeometryError::NonFinite(value).into())
    }
}

fn negate(value: Value) -> Result<Value, CommandError> {
    match value {
        Value::Exact(r) => match r.checked_neg() {
            Some(negated) => Ok(Value::Exact(negated)),
            None => finite(-r.as_f64()),
        },
        other => finite(-other.as_number()?),
    }
}

/// Exact operands stay exact for `+ - * /`; everything else is computed in floats.
fn arithmetic(op: BinaryOp, lhs: Value, rhs: Value) -> Result<Value, CommandError> {
    if let (Value::Exact(a), Value::Exact(b)) = (&lhs, &rhs) {
        let exact = match op {
            BinaryOp::Add => a.checked_add(b),
            BinaryOp::Sub => a.checked_sub(b),
            BinaryOp::Mul => a.checked_mul(b),
            BinaryOp::Div if b.is_zero() => return Err(GeometryError::DivisionByZero.into()),
            BinaryOp::Div => a.checked_div(b),
            BinaryOp::Pow => None,
        };
        if let Some(result) = exact {
            return Ok(Value::Exact(result));
        }
    }

    let (a, b) = (lhs.as_number()?, rhs.as_number()?);
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div if b == 0.0 => return Err(GeometryError::DivisionByZero.into()),
        BinaryOp::Div => a / b,
        BinaryOp::Pow if a == 0.0 && b < 0.0 => {
            return Err(GeometryError::DivisionByZero.into());
        }
        BinaryOp::Pow => a.powf(b),
    };
    finite(result)
}

fn slope_of(line: &Line) -> Result<Value, CommandError> {
    line.slope()
        .map(Value::Exact)
        .ok_or_else(|| GeometryError::VerticalSlope.into())
}

/// Whitelisted free functions.
fn call_function(function: &str, args: &[Value]) -> Result<Value, CommandError> {
    match function {
        "distance" => {
            expect_arity(function, args, 2)?;
            let distance = args[0].as_entity()?.distance(&args[1].as_entity()?)?;
            Ok(Value::Number(distance))
        }
        "angle" => {
            expect_arity(function, args, 2)?;
            Ok(Value::Number(args[0].as_line()?.angle(&args[1].as_line()?)))
        }
        "slope" => {
            expect_arity(function, args, 1)?;
            slope_of(&args[0].as_line()?)
        }
        "perpendicular" => {
            expect_arity(function, args, 2)?;
            let line = args[0].as_line()?.perpendicular(&args[1].as_point()?)?;
            Ok(Value::Line(line))
        }
        "Point" => {
            expect_arity(function, args, 2)?;
            Ok(Value::Point(Value::Tuple(args.to_vec()).as_point()?))
        }
        "Line" => {
            expect_arity(function, args, 3)?;
            let line = Line::new(
                args[0].as_rational()?,
                args[1].as_rational()?,
                args[2].as_rational()?,
            )?;
            Ok(Value::Line(line))
        }
        "sqrt" => {
            expect_arity(function, args, 1)?;
            finite(args[0].as_number()?.sqrt())
        }
        "abs" => {
            expect_arity(function, args, 1)?;
            match &args[0] {
                Value::Exact(r) => Ok(Value::Exact(r.abs())),
                other => Ok(Value::Number(other.as_number()?.abs())),
            }
        }
        _ => Err(CommandError::UnknownFunction(function.to_string())),
    }
}

/// Alternate line constructors, reachable as `.name(...)` or `Line.name(...)`.
pub fn line_factory(method: &str, args: &[Value]) -> Result<Line, CommandError> {
    let line = match method {
        "from_points" => {
            expect_arity(method, args, 2)?;
            Line::from_points(&args[0].as_point()?, &args[1].as_point()?)?
        }
        "from_slope" => {
            expect_arity(method, args, 2)?;
            Line::from_slope(args[0].as_rational()?, &args[1].as_point()?)?
        }
        "from_y_intercept" => {
            expect_arity(method, args, 2)?;
            Line::from_y_intercept(args[0].as_rational()?, args[1].as_rational()?)?
        }
        "from_x_intercept" => {
            expect_arity(method, args, 2)?;
            Line::from_x_intercept(args[0].as_rational()?, args[1].as_rational()?)?
        }
        "from_intercepts" => {
            expect_arity(method, args, 2)?;
            Line::from_intercepts(args[0].as_rational()?, args[1].as_rational()?)?
        }
        _ => {
            return Err(CommandError::UnknownMember {
                kind: LINE_NAMESPACE,
                name: method.to_string(),
            });
        }
    };
    Ok(line)
}

fn unknown_member(target: &Value, name: &str) -> CommandError {
    CommandError::UnknownMember {
        kind: target.kind(),
        name: name.to_string(),
    }
}

fn exact(n: i128) -> Value {
    Value::Exact(Rational::from_integer(n))
}

/// `point.x`, `line.m` and friends.
pub fn attribute(target: &Value, name: &str) -> Result<Value, CommandError> {
    match (target, name) {
        (Value::Point(p), "x") => Ok(Value::Exact(p.x())),
        (Value::Point(p), "y") => Ok(Value::Exact(p.y())),
        (Value::Line(l), "A" | "a") => Ok(exact(l.a())),
        (Value::Line(l), "B" | "b") => Ok(exact(l.b())),
        (Value::Line(l), "C" | "c") => Ok(exact(l.c())),
        (Value::Line(l), "m" | "slope") => slope_of(l),
        (Value::Line(l), "x_int") => l
            .x_intercept()
            .map(Value::Exact)
            .ok_or_else(|| GeometryError::MissingIntercept('x').into()),
        (Value::Line(l), "y_int") => l
            .y_intercept()
            .map(Value::Exact)
            .ok_or_else(|| GeometryError::MissingIntercept('y').into()),
        _ => Err(unknown_member(target, name)),
    }
}

pub fn method_call(target: &Value, method: &str, args: &[Value]) -> Result<Value, CommandError> {
    let known = matches!(
        (target, method),
        (
            Value::Point(_),
            "distance_from_point" | "distance_from_line" | "is_on_line" | "distance"
        ) | (
            Value::Line(_),
            "perpendicular"
                | "angle"
                | "distance_from_point"
                | "distance_from_line"
                | "distance"
                | "contains"
                | "is_parallel"
                | "is_perpendicular"
        )
    );
    if !known {
        return Err(unknown_member(target, method));
    }
    expect_arity(method, args, 1)?;
    let arg = &args[0];

    let value = match (target, method) {
        (Value::Point(p), "distance_from_point") => Value::Number(p.distance_to_point(&arg.as_point()?)),
        (Value::Point(p), "distance_from_line") => Value::Number(p.distance_to_line(&arg.as_line()?)),
        (Value::Point(p), "is_on_line") => Value::Bool(p.is_on_line(&arg.as_line()?)),
        (Value::Line(l), "perpendicular") => Value::Line(l.perpendicular(&arg.as_point()?)?),
        (Value::Line(l), "angle") => Value::Number(l.angle(&arg.as_line()?)),
        (Value::Line(l), "distance_from_point") => Value::Number(l.distance_to_point(&arg.as_point()?)),
        (Value::Line(l), "distance_from_line") => Value::Number(l.distance_to_line(&arg.as_line()?)?),
        (Value::Line(l), "contains") => Value::Bool(l.contains(&arg.as_point()?)),
        (Value::Line(l), "is_parallel") => Value::Bool(l.is_parallel(&arg.as_line()?)),
        (Value::Line(l), "is_perpendicular") => Value::Bool(l.is_perpendicular(&arg.as_line()?)),
        _ => Value::Number(target.as_entity()?.distance(&arg.as_entity()?)?),
    };
    Ok(value)
}
