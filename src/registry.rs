//! Entity Registry
//!
//! The session's named points and lines. A name belongs to at most one kind
//! at a time; defining it again replaces the old entry.

use std::collections::HashMap;

use crate::geometry::{Entity, Line, Point};

/// Name lookup that also remembers first-insertion order for display.
#[derive(Debug, Clone)]
struct NamedMap<T> {
    entries: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for NamedMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T> NamedMap<T> {
    /// Overwriting keeps the entry's original position.
    fn insert(&mut self, name: &str, value: T) -> Option<T> {
        let previous = self.entries.insert(name.to_string(), value);
        if previous.is_none() {
            self.order.push(name.to_string());
        }
        previous
    }

    fn remove(&mut self, name: &str) -> Option<T> {
        let removed = self.entries.remove(name);
        if removed.is_some() {
            self.order.retain(|n| n != name);
        }
        removed
    }

    fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|value| (name.as_str(), value)))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Named points and lines for one session
#[derive(Debug, Clone, Default)]
pub struct Registry {
    points: NamedMap<Point>,
    lines: NamedMap<Line>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a point, dropping any line that had the same name
    pub fn add_point(&mut self, name: &str, point: Point) {
        if self.lines.remove(name).is_some() {
            log::debug!("'{name}' now names a point instead of a line");
        }
        if self.points.insert(name, point).is_some() {
            log::debug!("redefined point '{name}' as {point}");
        } else {
            log::debug!("defined point '{name}' as {point}");
        }
    }

    /// Store a line, dropping any point that had the same name
    pub fn add_line(&mut self, name: &str, line: Line) {
        if self.points.remove(name).is_some() {
            log::debug!("'{name}' now names a line instead of a point");
        }
        if self.lines.insert(name, line).is_some() {
            log::debug!("redefined line '{name}' as {line}");
        } else {
            log::debug!("defined line '{name}' as {line}");
        }
    }

    pub fn point(&self, name: &str) -> Option<&Point> {
        self.points.get(name)
    }

    pub fn line(&self, name: &str) -> Option<&Line> {
        self.lines.get(name)
    }

    /// Look a name up in both maps
    pub fn get(&self, name: &str) -> Option<Entity> {
        self.points
            .get(name)
            .map(|p| Entity::Point(*p))
            .or_else(|| self.lines.get(name).map(|l| Entity::Line(*l)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Points in definition order
    pub fn points(&self) -> impl Iterator<Item = (&str, &Point)> {
        self.points.iter()
    }

    /// Lines in definition order
    pub fn lines(&self) -> impl Iterator<Item = (&str, &Line)> {
        self.lines.iter()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0 && self.line_count() == 0
    }

    /// Forget every point and line
    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
        log::debug!("registry cleared");
    }
}
