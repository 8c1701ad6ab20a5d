use std::{fmt, str::FromStr};

use rand::Rng;

use crate::{direction::Direction, error::Error, logic, Grid};

pub mod corner;
pub mod greedy;
pub mod lookahead;
pub mod random;

pub trait Ai {
    fn get_next_move(&mut self, grid: &Grid) -> Option<Direction>;
}

/// Directions that change the grid, in the order up, down, left, right.
pub fn get_valid_moves(grid: &Grid) -> impl Iterator<Item = Direction> + '_ {
    get_all_moves(grid).map(|(_, _, direction)| direction)
}

/// The simulated grid and merge score of every valid move, in the order up, down, left, right.
fn get_all_moves(grid: &Grid) -> impl Iterator<Item = (Grid, u32, Direction)> {
    logic::try_all_moves(grid)
        .into_iter()
        .zip(Direction::ALL)
        .filter_map(|(result, direction)| {
            result.map(|(new_grid, merge_score)| (new_grid, merge_score, direction))
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Random,
    Corner,
    Greedy,
    Lookahead,
}

impl Strategy {
    pub const ALL: [Self; 4] = [Self::Random, Self::Corner, Self::Greedy, Self::Lookahead];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Corner => "corner",
            Self::Greedy => "greedy",
            Self::Lookahead => "lookahead",
        }
    }

    /// Proposes a move for `grid` without touching any live game. `rng` is only consulted by
    /// [`Strategy::Random`].
    pub fn select_move(self, rng: &mut impl Rng, grid: &Grid) -> Option<Direction> {
        match self {
            Self::Random => random::select_move(rng, grid),
            Self::Corner => corner::select_move(grid),
            Self::Greedy => greedy::select_move(grid),
            Self::Lookahead => lookahead::select_move(grid),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownStrategy(s.to_owned()))
    }
}

/// A strategy paired with the randomness it may need.
pub struct StrategyAi<R> {
    strategy: Strategy,
    rng: R,
}

impl<R> StrategyAi<R>
where
    R: Rng,
{
    pub const fn new(strategy: Strategy, rng: R) -> Self {
        Self { strategy, rng }
    }

    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl<R> Ai for StrategyAi<R>
where
    R: Rng,
{
    fn get_next_move(&mut self, grid: &Grid) -> Option<Direction> {
        self.strategy.select_move(&mut self.rng, grid)
    }
}
