use std::fmt;

use num_traits::CheckedSub;

use crate::error::GeometryError;
use crate::geometry::line::Line;
use crate::geometry::rational::{MAX_DENOMINATOR, Rational, RationalExt};

/// A point in the plane with exact coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    x: Rational,
    y: Rational,
}

impl Point {
    pub fn new(x: Rational, y: Rational) -> Self {
        Self { x, y }
    }

    /// Snap floating coordinates to their best bounded-denominator fractions.
    pub fn from_f64(x: f64, y: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            x: Rational::approximate(x, MAX_DENOMINATOR)?,
            y: Rational::approximate(y, MAX_DENOMINATOR)?,
        })
    }

    pub fn x(&self) -> Rational {
        self.x
    }

    pub fn y(&self) -> Rational {
        self.y
    }

    pub fn distance_to_point(&self, other: &Point) -> f64 {
        let dx = self
            .x
            .checked_sub(&other.x)
            .map(|d| d.as_f64())
            .unwrap_or_else(|| self.x.as_f64() - other.x.as_f64());
        let dy = self
            .y
            .checked_sub(&other.y)
            .map(|d| d.as_f64())
            .unwrap_or_else(|| self.y.as_f64() - other.y.as_f64());
        dx.hypot(dy)
    }

    pub fn distance_to_line(&self, line: &Line) -> f64 {
        line.distance_to_point(self)
    }

    pub fn is_on_line(&self, line: &Line) -> bool {
        line.contains(self)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
