use crate::{direction::Direction, metrics, Grid};

/// The valid move leaving the most empty cells, then the highest merge score, then the earliest
/// direction in enumeration order.
pub fn select_move(grid: &Grid) -> Option<Direction> {
    super::get_all_moves(grid)
        .map(|(new_grid, merge_score, direction)| {
            ((metrics::empty_count(&new_grid), merge_score), direction)
        })
        .fold(None::<((u32, u32), Direction)>, |best, (key, direction)| match best {
            Some((best_key, _)) if key <= best_key => best,
            _ => Some((key, direction)),
        })
        .map(|(_, direction)| direction)
}
