use std::fmt;

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Signed, Zero};

use crate::error::GeometryError;
use crate::geometry::normalize;
use crate::geometry::point::Point;
use crate::geometry::rational::{Rational, RationalExt};

/// A line stored as the canonical integer coefficients of `Ax + By + C = 0`.
///
/// Slope and intercepts are derived once at construction. Each is `None`
/// when the line has no such quantity (vertical lines have no slope and no
/// y-intercept, horizontal lines have no x-intercept).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    a: i128,
    b: i128,
    c: i128,
    slope: Option<Rational>,
    x_intercept: Option<Rational>,
    y_intercept: Option<Rational>,
}

fn overflow() -> GeometryError {
    GeometryError::Overflow
}

fn sub(lhs: Rational, rhs: Rational) -> Result<Rational, GeometryError> {
    lhs.checked_sub(&rhs).ok_or_else(overflow)
}

fn mul(lhs: Rational, rhs: Rational) -> Result<Rational, GeometryError> {
    lhs.checked_mul(&rhs).ok_or_else(overflow)
}

fn neg(value: Rational) -> Result<Rational, GeometryError> {
    value.checked_neg().ok_or_else(overflow)
}

/// `a * b == c * d`, falling back to floats if the products overflow.
fn products_equal(a: i128, b: i128, c: i128, d: i128) -> bool {
    match (a.checked_mul(b), c.checked_mul(d)) {
        (Some(lhs), Some(rhs)) => lhs == rhs,
        _ => (a as f64) * (b as f64) == (c as f64) * (d as f64),
    }
}

impl Line {
    /// Build from exact coefficients, normalizing them.
    pub fn new(a: Rational, b: Rational, c: Rational) -> Result<Self, GeometryError> {
        let [a, b, c] = normalize::normalize([a, b, c])?;
        Ok(Self::from_canonical(a, b, c))
    }

    /// Build from floating coefficients, approximating each as a fraction.
    pub fn from_f64(a: f64, b: f64, c: f64) -> Result<Self, GeometryError> {
        let [a, b, c] = normalize::canonicalize(normalize::integerize(a, b, c)?)?;
        Ok(Self::from_canonical(a, b, c))
    }

    pub fn from_integers(a: i128, b: i128, c: i128) -> Result<Self, GeometryError> {
        let [a, b, c] = normalize::canonicalize([a, b, c])?;
        Ok(Self::from_canonical(a, b, c))
    }

    fn from_canonical(a: i128, b: i128, c: i128) -> Self {
        Self {
            a,
            b,
            c,
            slope: Rational::checked_new(-a, b),
            x_intercept: Rational::checked_new(-c, a),
            y_intercept: Rational::checked_new(-c, b),
        }
    }

    /// The line through two distinct points. Vertical lines are allowed.
    pub fn from_points(p1: &Point, p2: &Point) -> Result<Self, GeometryError> {
        if p1 == p2 {
            return Err(GeometryError::CoincidentPoints);
        }
        let a = sub(p2.y(), p1.y())?;
        let b = sub(p1.x(), p2.x())?;
        let c = sub(mul(p2.x(), p1.y())?, mul(p1.x(), p2.y())?)?;
        Self::new(a, b, c)
    }

    /// The line with slope `m` through `point`.
    pub fn from_slope(m: Rational, point: &Point) -> Result<Self, GeometryError> {
        let c = sub(point.y(), mul(m, point.x())?)?;
        Self::new(m, Rational::from_integer(-1), c)
    }

    pub fn from_y_intercept(y_intercept: Rational, m: Rational) -> Result<Self, GeometryError> {
        Self::new(m, Rational::from_integer(-1), y_intercept)
    }

    pub fn from_x_intercept(x_intercept: Rational, m: Rational) -> Result<Self, GeometryError> {
        let c = neg(mul(m, x_intercept)?)?;
        Self::new(m, Rational::from_integer(-1), c)
    }

    /// The line `x / x_int + y / y_int = 1`, cleared of denominators.
    pub fn from_intercepts(x_intercept: Rational, y_intercept: Rational) -> Result<Self, GeometryError> {
        let c = neg(mul(x_intercept, y_intercept)?)?;
        Self::new(y_intercept, x_intercept, c)
    }

    pub fn a(&self) -> i128 {
        self.a
    }

    pub fn b(&self) -> i128 {
        self.b
    }

    pub fn c(&self) -> i128 {
        self.c
    }

    pub fn coefficients(&self) -> (i128, i128, i128) {
        (self.a, self.b, self.c)
    }

    pub fn slope(&self) -> Option<Rational> {
        self.slope
    }

    pub fn x_intercept(&self) -> Option<Rational> {
        self.x_intercept
    }

    pub fn y_intercept(&self) -> Option<Rational> {
        self.y_intercept
    }

    pub fn is_vertical(&self) -> bool {
        self.b == 0
    }

    pub fn is_horizontal(&self) -> bool {
        self.a == 0
    }

    pub fn is_parallel(&self, other: &Line) -> bool {
        products_equal(self.a, other.b, other.a, self.b)
    }

    pub fn is_perpendicular(&self, other: &Line) -> bool {
        products_equal(self.a, other.a, -self.b, other.b)
    }

    /// `A·x + B·y + C` evaluated exactly, `None` on overflow.
    fn residual(&self, point: &Point) -> Option<Rational> {
        let ax = Rational::from_integer(self.a).checked_mul(&point.x())?;
        let by = Rational::from_integer(self.b).checked_mul(&point.y())?;
        ax.checked_add(&by)?
            .checked_add(&Rational::from_integer(self.c))
    }

    fn float_residual(&self, point: &Point) -> f64 {
        self.a as f64 * point.x().as_f64() + self.b as f64 * point.y().as_f64() + self.c as f64
    }

    fn norm(&self) -> f64 {
        (self.a as f64).hypot(self.b as f64)
    }

    pub fn contains(&self, point: &Point) -> bool {
        match self.residual(point) {
            Some(r) => r.is_zero(),
            None => self.float_residual(point) == 0.0,
        }
    }

    /// Perpendicular distance `|A·x + B·y + C| / sqrt(A² + B²)`.
    pub fn distance_to_point(&self, point: &Point) -> f64 {
        let numerator = match self.residual(point) {
            Some(r) => r.abs().as_f64(),
            None => self.float_residual(point).abs(),
        };
        numerator / self.norm()
    }

    /// Distance between parallel lines; an error for intersecting ones.
    pub fn distance_to_line(&self, other: &Line) -> Result<f64, GeometryError> {
        if !self.is_parallel(other) {
            return Err(GeometryError::NonParallelLines);
        }
        // Rescale `other` so both share the normal (A, B) of `self`.
        let (scale_self, scale_other) = if self.a != 0 {
            (self.a as f64, other.a as f64)
        } else {
            (self.b as f64, other.b as f64)
        };
        let gap = (self.c as f64 * scale_other - other.c as f64 * scale_self).abs();
        Ok(gap / (scale_other.abs() * self.norm()))
    }

    /// Angle from `other` to `self` in degrees.
    ///
    /// Parallel lines give 0 and perpendicular lines give 90 regardless of
    /// orientation. Otherwise this is `atan((m1 - m2) / (1 + m1·m2))`, taking
    /// the limit of the formula when one of the lines is vertical.
    pub fn angle(&self, other: &Line) -> f64 {
        if self.is_parallel(other) {
            return 0.0;
        }
        if self.is_perpendicular(other) {
            return 90.0;
        }
        let tangent = match (self.slope, other.slope) {
            (Some(m1), Some(m2)) => {
                let (m1, m2) = (m1.as_f64(), m2.as_f64());
                (m1 - m2) / (1.0 + m1 * m2)
            }
            (None, Some(m2)) => 1.0 / m2.as_f64(),
            (Some(m1), None) => -1.0 / m1.as_f64(),
            (None, None) => 0.0,
        };
        tangent.atan().to_degrees()
    }

    /// The line through `point` perpendicular to this one.
    pub fn perpendicular(&self, point: &Point) -> Result<Line, GeometryError> {
        let a = Rational::from_integer(self.a);
        let b = Rational::from_integer(self.b);
        let c = sub(mul(a, point.y())?, mul(b, point.x())?)?;
        Line::new(b, neg(a)?, c)
    }

    /// `Ax + By + C = 0` with `+ -` collapsed to `- `.
    pub fn equation(&self) -> String {
        format!("{}x + {}y + {} = 0", self.a, self.b, self.c).replace("+ -", "- ")
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.equation())
    }
}
