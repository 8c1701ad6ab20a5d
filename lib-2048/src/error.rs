#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("grid must be 4x4, got {rows} rows with up to {columns} columns")]
    InvalidShape { rows: usize, columns: usize },
    #[error("cell ({row}, {column}) holds {value}, which is neither empty nor a power of two")]
    InvalidTile { row: usize, column: usize, value: u32 },
    #[error("unknown strategy {0:?}, expected one of random, corner, greedy, lookahead")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, Error>;
