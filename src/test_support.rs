//! Shared fixtures for unit and property tests.

use proptest::prelude::*;

use crate::{
    grid::{Cell, Grid, Position},
    guard::{Direction, GuardState},
    map::parse_map,
};

pub const SAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

pub fn layout(text: &str) -> (Grid, GuardState) {
    parse_map(text).unwrap()
}

/// Random small laboratory with the guard on a free cell.
pub fn arb_layout() -> impl Strategy<Value = (Grid, GuardState)> {
    (1usize..9, 1usize..9)
        .prop_flat_map(|(width, height)| {
            (
                Just(width),
                prop::collection::vec(prop::bool::weighted(0.2), width * height),
                0..width * height,
                0..Direction::all_dirs().len(),
            )
        })
        .prop_map(|(width, obstacles, start, dir)| {
            let rows = obstacles
                .chunks(width)
                .enumerate()
                .map(|(r, row)| {
                    row.iter()
                        .enumerate()
                        .map(|(c, &obstacle)| {
                            if obstacle && r * width + c != start {
                                Cell::Obstacle
                            } else {
                                Cell::Free
                            }
                        })
                        .collect()
                })
                .collect();
            let grid = Grid::from_rows(rows).unwrap();
            let pos = Position::new((start % width) as isize, (start / width) as isize);

            (grid, GuardState::new(pos, Direction::all_dirs()[dir]))
        })
}
