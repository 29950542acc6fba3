use crate::point::Point;
use Direction::*;

/// Tail segments start here, collapsed outside the playfield.
pub const START_SENTINEL: Point = Point::new(0, 0);
/// Where a freshly grown segment waits until `advance` pulls it onto the path.
pub const GROWTH_SENTINEL: Point = Point::new(-10, -10);
const INITIAL_TAIL_LENGTH: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    head: Point,
    direction: Direction,
    tail: Vec<Point>,
}

impl Snake {
    pub fn new(x: i32, y: i32) -> Self {
        Snake {
            head: Point::new(x, y),
            direction: Right,
            tail: vec![START_SENTINEL; INITIAL_TAIL_LENGTH],
        }
    }

    pub fn head(&self) -> Point {
        self.head
    }

    /// Trailing segments, nearest to the head first.
    pub fn tail(&self) -> &[Point] {
        &self.tail
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Shifts every segment into its predecessor's old cell, then moves the head.
    pub fn advance(&mut self, step: i32) {
        if !self.tail.is_empty() {
            self.tail.pop();
            self.tail.insert(0, self.head);
        }

        self.head = self.head.translated(self.direction, step);
    }

    pub fn grow(&mut self) {
        self.tail.push(GROWTH_SENTINEL);
    }

    /// Changes heading only when it switches axis. Returns whether it did.
    pub fn turn(&mut self, new_direction: Direction) -> bool {
        if new_direction.is_horizontal() == self.direction.is_horizontal() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }

    #[cfg(test)]
    pub fn with_tail(head: Point, direction: Direction, tail: Vec<Point>) -> Self {
        Snake { head, direction, tail }
    }
}
