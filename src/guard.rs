use std::fmt::Display;

use crate::grid::{Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "^"),
            Direction::Right => write!(f, ">"),
            Direction::Down => write!(f, "v"),
            Direction::Left => write!(f, "<"),
        }
    }
}

impl Direction {
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRS: [Direction; 4] = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ];

        &ALL_DIRS
    }

    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            '^' => Some(Direction::Up),
            '>' => Some(Direction::Right),
            'v' => Some(Direction::Down),
            '<' => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn turn_right(&self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// Where the guard stands and which way it faces. This is the unit of loop
/// detection: seeing the same value twice means the patrol never ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuardState {
    pos: Position,
    dir: Direction,
}

impl Display for GuardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.dir, self.pos)
    }
}

impl GuardState {
    pub fn new(pos: Position, dir: Direction) -> Self {
        Self { pos, dir }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    /// Position right in front of the guard.
    pub fn advance(&self) -> Position {
        self.pos.advance(self.dir)
    }

    pub fn turn(&self) -> Self {
        Self::new(self.pos, self.dir.turn_right())
    }

    pub fn moved_to(&self, pos: Position) -> Self {
        Self::new(pos, self.dir)
    }

    pub fn in_bounds(&self, grid: &Grid) -> bool {
        grid.contains(self.pos)
    }
}
