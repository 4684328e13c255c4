//! Plane geometry primitives.
//!
//! Points and lines are plain values. Lines keep exact integer coefficients,
//! points keep exact fractional coordinates, and every derived quantity that
//! can be undefined is reported as an `Option` or a [`GeometryError`].

pub mod line;
pub mod normalize;
pub mod point;
pub mod rational;

pub use line::Line;
pub use point::Point;
pub use rational::{Rational, RationalExt};

use crate::error::GeometryError;

/// Anything that can be named in the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entity {
    Point(Point),
    Line(Line),
}

impl Entity {
    pub fn kind(&self) -> &'static str {
        match self {
            Entity::Point(_) => "point",
            Entity::Line(_) => "line",
        }
    }

    /// Distance between any mix of points and lines.
    pub fn distance(&self, other: &Entity) -> Result<f64, GeometryError> {
        match (self, other) {
            (Entity::Point(p), Entity::Point(q)) => Ok(p.distance_to_point(q)),
            (Entity::Point(p), Entity::Line(l)) | (Entity::Line(l), Entity::Point(p)) => {
                Ok(l.distance_to_point(p))
            }
            (Entity::Line(l), Entity::Line(m)) => l.distance_to_line(m),
        }
    }
}

impl From<Point> for Entity {
    fn from(point: Point) -> Self {
        Entity::Point(point)
    }
}

impl From<Line> for Entity {
    fn from(line: Line) -> Self {
        Entity::Line(line)
    }
}
