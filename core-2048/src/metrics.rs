use crate::{Grid, SIZE};

pub fn row_empty_count(row: &[u32; SIZE]) -> u32 {
    row.iter().filter(|&&cell| cell == 0).count() as u32
}

pub fn empty_count(grid: &Grid) -> u32 {
    grid.iter().map(row_empty_count).sum()
}

pub fn row_has_merge(row: &[u32; SIZE]) -> bool {
    row.windows(2).any(|pair| pair[0] != 0 && pair[0] == pair[1])
}

/// Whether any horizontally or vertically adjacent cells hold the same nonzero value.
pub fn has_adjacent_pair(grid: &Grid) -> bool {
    grid.iter().any(row_has_merge) || crate::transpose_grid(*grid).iter().any(row_has_merge)
}

pub fn tile_sum(grid: &Grid) -> u64 {
    grid.iter().flatten().map(|&cell| u64::from(cell)).sum()
}

pub fn max_tile(grid: &Grid) -> u32 {
    grid.iter().flatten().copied().max().unwrap_or(0)
}
