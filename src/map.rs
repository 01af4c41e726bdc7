use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::{
    grid::{Cell, Grid, Position},
    guard::{Direction, GuardState},
    MapError,
};

/// Builds a laboratory row by row from its text layout.
#[derive(Debug, Default)]
pub struct MapBuilder {
    cells: Vec<Cell>,
    row_n: usize,
    col_n: Option<usize>,
    guard: Option<GuardState>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank rows are skipped, surrounding whitespace is ignored.
    pub fn add_row(&mut self, row_text: &str) -> Result<(), MapError> {
        let row_text = row_text.trim();
        if row_text.is_empty() {
            return Ok(());
        }

        let this_col_n = row_text.chars().count();
        let col_n = *self.col_n.get_or_insert(this_col_n);
        if col_n != this_col_n {
            return Err(MapError::InconsistentRow {
                row: self.row_n,
                expected: col_n,
                found: this_col_n,
            });
        }

        for (ind, c) in row_text.chars().enumerate() {
            let cell = match c {
                '.' => Cell::Free,
                '#' => Cell::Obstacle,
                other => {
                    let dir = Direction::from_marker(other).ok_or(MapError::InvalidChar {
                        c: other,
                        row: self.row_n,
                        col: ind,
                    })?;
                    let guard =
                        GuardState::new(Position::new(ind as isize, self.row_n as isize), dir);
                    if let Some(first) = self.guard {
                        return Err(MapError::MultipleGuards(first, guard));
                    }

                    self.guard = Some(guard);
                    Cell::Free
                }
            };
            self.cells.push(cell);
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<(Grid, GuardState), MapError> {
        let col_n = self.col_n.ok_or(MapError::EmptyMap)?;
        let guard = self.guard.ok_or(MapError::NoGuard)?;

        Ok((Grid::from_cells(self.cells, col_n, self.row_n), guard))
    }
}

pub fn parse_map(text: &str) -> Result<(Grid, GuardState), MapError> {
    let mut builder = MapBuilder::new();
    for line in text.lines() {
        builder.add_row(line)?;
    }

    builder.build()
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<(Grid, GuardState)> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = MapBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} from given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder.add_row(line.as_str()).with_context(|| {
            format!(
                "Invalid line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
    }

    Ok(builder.build()?)
}
