use rand::Rng;

use crate::{
    direction::Direction,
    error::{Error, Result},
    identity_grid, metrics, mirror_grid, transpose_grid, transpose_rotate_grid, Grid, EMPTY_GRID,
    MAX_TILE, SIZE,
};

type Transform = fn(Grid) -> Grid;

/// Rewrites each direction as a slide to the left: apply the first transform, slide every row
/// left, then apply the second. Indexed by `Direction as usize`.
const ORIENTATIONS: [(Transform, Transform); 4] = [
    (transpose_grid, transpose_grid),
    (transpose_rotate_grid, transpose_rotate_grid),
    (identity_grid, identity_grid),
    (mirror_grid, mirror_grid),
];

/// Compacts a row towards index 0 and merges equal neighbours in a single pass. A merged cell
/// cannot merge again in the same slide.
///
/// Returns the new row and the sum of the merged values.
pub fn slide_row(row: [u32; SIZE]) -> ([u32; SIZE], u32) {
    let mut new_row = [0; SIZE];
    let mut merge_score = 0;

    let mut len = 0;
    let mut mergeable = false;

    for cell in row.into_iter().filter(|&cell| cell != 0) {
        if mergeable && new_row[len - 1] == cell {
            new_row[len - 1] = cell * 2;
            merge_score += cell * 2;
            mergeable = false;
        } else {
            new_row[len] = cell;
            len += 1;
            mergeable = true;
        }
    }

    (new_row, merge_score)
}

pub fn do_move(grid: Grid) -> (Grid, u32) {
    let mut new_grid = EMPTY_GRID;

    let merge_score: u32 = grid
        .into_iter()
        .zip(&mut new_grid)
        .map(|(row, new_row)| {
            let (slid, score) = slide_row(row);
            *new_row = slid;

            score
        })
        .sum();

    (new_grid, merge_score)
}

/// Slides the grid in `direction` without spawning. The result may equal the input.
pub fn simulate(grid: &Grid, direction: Direction) -> (Grid, u32) {
    let (orient, restore) = ORIENTATIONS[direction as usize];

    let (new_grid, merge_score) = do_move(orient(*grid));

    (restore(new_grid), merge_score)
}

/// Like [`simulate`], but `None` when the move changes nothing.
pub fn try_move(grid: &Grid, direction: Direction) -> Option<(Grid, u32)> {
    let (new_grid, merge_score) = simulate(grid, direction);

    (new_grid != *grid).then_some((new_grid, merge_score))
}

pub fn try_all_moves(grid: &Grid) -> [Option<(Grid, u32)>; 4] {
    Direction::ALL.map(|direction| try_move(grid, direction))
}

pub fn get_empty_cells(grid: &Grid) -> impl Iterator<Item = (usize, usize)> + '_ {
    grid.iter().enumerate().flat_map(|(i, row)| {
        row.iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == 0)
            .map(move |(j, _)| (i, j))
    })
}

/// Places a 2 (probability 0.9) or a 4 (probability 0.1) in a uniformly chosen empty cell.
/// A full grid is returned unchanged.
pub fn spawn_tile(rng: &mut impl Rng, grid: Grid) -> Grid {
    let slot_count = metrics::empty_count(&grid);

    if slot_count > 0 {
        let rand = rng.gen_range(0..(slot_count * 10));

        let slot_idx = rand / 10;
        let cell = if rand % 10 == 0 { 4 } else { 2 };

        let mut new_grid = grid;

        if let Some((i, j)) = get_empty_cells(&grid).nth(slot_idx as usize) {
            new_grid[i][j] = cell;
        }

        new_grid
    } else {
        grid
    }
}

/// No empty cell and no equal neighbours, so no direction can change the grid.
pub fn is_stuck(grid: &Grid) -> bool {
    metrics::empty_count(grid) == 0 && !metrics::has_adjacent_pair(grid)
}

/// Empty, or a power of two no larger than [`MAX_TILE`]. Merging two such tiles cannot overflow.
pub const fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

/// Builds a grid from rows supplied by a caller, rejecting anything that is not a 4×4 matrix
/// of valid tiles.
pub fn grid_from_rows(rows: &[Vec<u32>]) -> Result<Grid> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    if rows.len() != SIZE || rows.iter().any(|row| row.len() != SIZE) {
        return Err(Error::InvalidShape {
            rows: rows.len(),
            columns,
        });
    }

    let mut grid = EMPTY_GRID;

    for (i, (row, grid_row)) in rows.iter().zip(&mut grid).enumerate() {
        for (j, (&value, cell)) in row.iter().zip(grid_row).enumerate() {
            if !is_valid_tile(value) {
                return Err(Error::InvalidTile {
                    row: i,
                    column: j,
                    value,
                });
            }

            *cell = value;
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn slide_row_left() {
        assert_eq!(slide_row([0, 0, 0, 0]), ([0, 0, 0, 0], 0));
        assert_eq!(slide_row([2, 4, 2, 4]), ([2, 4, 2, 4], 0));
        assert_eq!(slide_row([0, 0, 2, 2]), ([4, 0, 0, 0], 4));
        assert_eq!(slide_row([2, 0, 0, 2]), ([4, 0, 0, 0], 4));
        assert_eq!(slide_row([4, 0, 8, 0]), ([4, 8, 0, 0], 0));
    }

    #[test]
    fn slide_row_merges_pairs_independently() {
        assert_eq!(slide_row([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
        assert_eq!(slide_row([4, 4, 8, 8]), ([8, 16, 0, 0], 24));
    }

    #[test]
    fn slide_row_does_not_chain_merges() {
        assert_eq!(slide_row([2, 2, 4, 0]), ([4, 4, 0, 0], 4));
        assert_eq!(slide_row([2, 2, 2, 0]), ([4, 2, 0, 0], 4));
        assert_eq!(slide_row([4, 2, 2, 0]), ([4, 4, 0, 0], 4));
    }

    const GRID: Grid = [
        [2, 2, 0, 4],
        [0, 4, 0, 4],
        [2, 0, 8, 0],
        [2, 4, 8, 2],
    ];

    #[test]
    fn simulate_each_direction() {
        assert_eq!(
            simulate(&GRID, Direction::Left),
            ([[4, 4, 0, 0], [8, 0, 0, 0], [2, 8, 0, 0], [2, 4, 8, 2]], 12)
        );
        assert_eq!(
            simulate(&GRID, Direction::Right),
            ([[0, 0, 4, 4], [0, 0, 0, 8], [0, 0, 2, 8], [2, 4, 8, 2]], 12)
        );
        assert_eq!(
            simulate(&GRID, Direction::Up),
            ([[4, 2, 16, 8], [2, 8, 0, 2], [0, 0, 0, 0], [0, 0, 0, 0]], 36)
        );
        assert_eq!(
            simulate(&GRID, Direction::Down),
            ([[0, 0, 0, 0], [0, 0, 0, 0], [2, 2, 0, 8], [4, 8, 16, 2]], 36)
        );
    }

    #[test]
    fn down_merges_from_the_bottom() {
        let grid = [[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0]];

        let (new_grid, merge_score) = simulate(&grid, Direction::Down);

        assert_eq!(
            new_grid,
            [[0, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0]]
        );
        assert_eq!(merge_score, 4);
    }

    #[test]
    fn try_move_reports_no_op() {
        let grid = [[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]];

        assert_eq!(try_move(&grid, Direction::Left), None);
        assert_eq!(try_move(&grid, Direction::Up), None);
        assert!(try_move(&grid, Direction::Right).is_some());
        assert!(try_move(&grid, Direction::Down).is_some());

        let moves = try_all_moves(&grid);

        assert!(moves[Direction::Left as usize].is_none());
        assert!(moves[Direction::Down as usize].is_some());
    }

    #[test]
    fn spawn_fills_one_empty_cell() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = [[2, 4, 8, 16], [32, 64, 128, 256], [2, 4, 8, 16], [32, 0, 128, 256]];

        let new_grid = spawn_tile(&mut rng, grid);

        assert!(matches!(new_grid[3][1], 2 | 4));
        assert_eq!(spawn_tile(&mut rng, new_grid), new_grid);
    }

    #[test]
    fn spawn_mostly_places_twos() {
        let mut rng = ChaCha8Rng::seed_from_u64(2048);

        let fours = (0..10_000)
            .filter(|_| spawn_tile(&mut rng, EMPTY_GRID).iter().flatten().any(|&c| c == 4))
            .count();

        assert!((700..1300).contains(&fours), "{fours} fours in 10000 spawns");
    }

    #[test]
    fn spawn_picks_empty_cells_uniformly() {
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let grid = [[2, 0, 4, 0], [8, 16, 32, 0], [0; 4], [64, 128, 256, 512]];
        let cells: Vec<_> = get_empty_cells(&grid).collect();
        let mut counts = vec![0; cells.len()];

        for _ in 0..12_000 {
            let new_grid = spawn_tile(&mut rng, grid);
            let filled = cells.iter().position(|&(i, j)| new_grid[i][j] != 0).unwrap();

            counts[filled] += 1;
        }

        assert_eq!(cells.len(), 7);
        assert!(
            counts.iter().all(|count| (1400..2000).contains(count)),
            "{counts:?}"
        );
    }

    #[test]
    fn empty_cells_in_row_major_order() {
        let grid = [[2, 0, 2, 2], [2, 2, 2, 2], [2, 2, 2, 0], [0, 2, 2, 2]];

        let cells: Vec<_> = get_empty_cells(&grid).collect();

        assert_eq!(cells, [(0, 1), (2, 3), (3, 0)]);
    }

    #[test]
    fn stuck_only_when_full_without_pairs() {
        let checkerboard = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        let mut with_gap = checkerboard;
        with_gap[1][1] = 0;
        let mut with_pair = checkerboard;
        with_pair[0][0] = 4;

        assert!(is_stuck(&checkerboard));
        assert!(!is_stuck(&with_gap));
        assert!(!is_stuck(&with_pair));
    }

    #[test]
    fn grid_from_rows_validates_input() {
        let rows = vec![vec![0, 2, 4, 8]; 4];

        assert_eq!(grid_from_rows(&rows), Ok([[0, 2, 4, 8]; 4]));

        assert_eq!(
            grid_from_rows(&rows[..3]),
            Err(Error::InvalidShape {
                rows: 3,
                columns: 4
            })
        );

        let mut ragged = rows.clone();
        ragged[2].push(2);
        assert_eq!(
            grid_from_rows(&ragged),
            Err(Error::InvalidShape {
                rows: 4,
                columns: 5
            })
        );

        let mut too_large = rows.clone();
        too_large[0][0] = 1 << 31;
        assert_eq!(
            grid_from_rows(&too_large),
            Err(Error::InvalidTile {
                row: 0,
                column: 0,
                value: 1 << 31
            })
        );

        let mut bad_tile = rows;
        bad_tile[1][3] = 6;
        assert_eq!(
            grid_from_rows(&bad_tile),
            Err(Error::InvalidTile {
                row: 1,
                column: 3,
                value: 6
            })
        );
    }

    #[test]
    fn tiles_are_bounded_powers_of_two() {
        assert!(!is_valid_tile(1));
        assert!(!is_valid_tile(12));
        assert!(is_valid_tile(0));
        assert!(is_valid_tile(2048));
        assert!(is_valid_tile(MAX_TILE));
        assert!(!is_valid_tile(MAX_TILE * 2));
        assert!(!is_valid_tile(1 << 31));
    }
}
