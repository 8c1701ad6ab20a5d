pub mod metrics;

pub const SIZE: usize = 4;
pub const WINNING_TILE: u32 = 2048;
/// Largest tile a 4×4 game can build: every cell filled with a distinct power of two from 4 up.
pub const MAX_TILE: u32 = 1 << 17;

/// Row-major 4×4 board. `0` is an empty cell, anything else is a power of two.
pub type Grid = [[u32; SIZE]; SIZE];

pub const EMPTY_GRID: Grid = [[0; SIZE]; SIZE];

/// Reverses every row. Self-inverse.
pub const fn mirror_grid(grid: Grid) -> Grid {
    let mut mirrored = EMPTY_GRID;

    let mut i = 0;
    while i < SIZE {
        let mut j = 0;
        while j < SIZE {
            mirrored[i][j] = grid[i][SIZE - 1 - j];
            j += 1;
        }
        i += 1;
    }

    mirrored
}

/// Reflects about the main diagonal, so columns become rows. Self-inverse.
pub const fn transpose_grid(grid: Grid) -> Grid {
    let mut transposed = EMPTY_GRID;

    let mut i = 0;
    while i < SIZE {
        let mut j = 0;
        while j < SIZE {
            transposed[i][j] = grid[j][i];
            j += 1;
        }
        i += 1;
    }

    transposed
}

/// Reflects about the anti-diagonal: row `i` is column `SIZE - 1 - i` read bottom to top.
/// Self-inverse.
pub const fn transpose_rotate_grid(grid: Grid) -> Grid {
    let mut transposed = EMPTY_GRID;

    let mut i = 0;
    while i < SIZE {
        let mut j = 0;
        while j < SIZE {
            transposed[i][j] = grid[SIZE - 1 - j][SIZE - 1 - i];
            j += 1;
        }
        i += 1;
    }

    transposed
}

pub const fn identity_grid(grid: Grid) -> Grid {
    grid
}
