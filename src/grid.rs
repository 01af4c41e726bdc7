use std::fmt::Display;

use crate::{guard::Direction, MapError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    x: isize,
    y: isize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> isize {
        self.x
    }

    pub fn y(&self) -> isize {
        self.y
    }

    /// One unit along `dir`, y grows downwards.
    pub fn advance(&self, dir: Direction) -> Self {
        match dir {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Right => Self::new(self.x + 1, self.y),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Free,
    Obstacle,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Free => write!(f, "."),
            Cell::Obstacle => write!(f, "#"),
        }
    }
}

/// Immutable layout of a laboratory. Variants with an extra obstacle are new
/// values built by [`Grid::with_obstacle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (ind, row) in self.cells.chunks(self.width).enumerate() {
            if ind > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }

        Ok(())
    }
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, MapError> {
        let width = rows.first().map_or(0, |row| row.len());
        if width == 0 {
            return Err(MapError::EmptyMap);
        }

        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (ind, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(MapError::InconsistentRow {
                    row: ind,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self::from_cells(cells, width, height))
    }

    /// Caller guarantees `cells.len() == width * height` and both are non-zero.
    pub(crate) fn from_cells(cells: Vec<Cell>, width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0 && cells.len() == width * height);
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid, callers bounds-check first.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.cell(pos) == Cell::Obstacle
    }

    /// A copy of this grid with `pos` turned into an obstacle.
    pub fn with_obstacle(&self, pos: Position) -> Self {
        let mut cells = self.cells.clone();
        cells[self.index(pos)] = Cell::Obstacle;
        Self::from_cells(cells, self.width, self.height)
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "Position {} is outside of laboratory({}x{}).",
            pos,
            self.width,
            self.height
        );
        pos.y as usize * self.width + pos.x as usize
    }
}
