use rand::Rng;

use crate::{direction::Direction, Grid};

/// Any valid move, chosen uniformly.
pub fn select_move(rng: &mut impl Rng, grid: &Grid) -> Option<Direction> {
    let mut move_array = [Direction::Up; 4];
    let mut count = 0;

    for direction in super::get_valid_moves(grid) {
        move_array[count] = direction;
        count += 1;
    }

    (count > 0).then(|| move_array[rng.gen_range(0..count)])
}
