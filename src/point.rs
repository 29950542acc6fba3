use crate::snake::Direction::{self, *};

/// A position on the playfield, in logical units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Returns this point moved `step` units along `direction`. Up decreases `y`.
    pub fn translated(self, direction: Direction, step: i32) -> Self {
        match direction {
            Up => Point::new(self.x, self.y - step),
            Down => Point::new(self.x, self.y + step),
            Left => Point::new(self.x - step, self.y),
            Right => Point::new(self.x + step, self.y),
        }
    }

    /// True when both axis deltas are within `tolerance`.
    pub fn near(&self, other: &Point, tolerance: i32) -> bool {
        self == other
            || ((self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance)
    }
}
