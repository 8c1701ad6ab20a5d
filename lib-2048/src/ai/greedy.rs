use crate::{direction::Direction, Grid};

/// The valid move with the highest immediate merge score. Ties go to the earliest direction in
/// enumeration order.
pub fn select_move(grid: &Grid) -> Option<Direction> {
    super::get_all_moves(grid)
        .fold(None::<(u32, Direction)>, |best, (_, merge_score, direction)| match best {
            Some((best_score, _)) if merge_score <= best_score => best,
            _ => Some((merge_score, direction)),
        })
        .map(|(_, direction)| direction)
}
