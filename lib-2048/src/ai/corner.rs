use crate::{direction::Direction, logic, Grid};

/// Keeps large tiles packed into the bottom-right corner.
const PRIORITY: [Direction; 4] = [
    Direction::Down,
    Direction::Right,
    Direction::Up,
    Direction::Left,
];

pub fn select_move(grid: &Grid) -> Option<Direction> {
    PRIORITY
        .into_iter()
        .find(|&direction| logic::try_move(grid, direction).is_some())
}
