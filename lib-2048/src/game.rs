use log::{debug, info};
use rand::Rng;

use crate::{
    direction::Direction, high_score::HighScoreStore, logic, metrics, Grid, EMPTY_GRID,
    WINNING_TILE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    /// A winning tile exists. Play may continue.
    Won,
    /// No direction can change the grid.
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub changed: bool,
    pub score_delta: u32,
    pub status: GameStatus,
}

/// A single game: the live grid, its score and status, and the high score it feeds.
pub struct Game<R, S> {
    rng: R,
    high_score_store: S,
    grid: Grid,
    score: u32,
    high_score: u32,
    status: GameStatus,
    won: bool,
}

impl<R, S> Game<R, S>
where
    R: Rng,
    S: HighScoreStore,
{
    /// Starts a fresh game seeded with two tiles.
    pub fn new(rng: R, high_score_store: S) -> Self {
        let mut game = Self::with_grid(rng, high_score_store, EMPTY_GRID);
        game.reset();

        game
    }

    /// Resumes from an arbitrary grid with a score of zero. The status is evaluated immediately.
    pub fn with_grid(rng: R, mut high_score_store: S, grid: Grid) -> Self {
        let high_score = high_score_store.load();

        let mut game = Self {
            rng,
            high_score_store,
            grid,
            score: 0,
            high_score,
            status: GameStatus::InProgress,
            won: false,
        };
        game.check_terminal();

        game
    }

    /// Replaces the grid wholesale with two fresh tiles and zeroes the score.
    pub fn reset(&mut self) -> Grid {
        self.grid = EMPTY_GRID;
        self.score = 0;
        self.status = GameStatus::InProgress;
        self.won = false;

        for _ in 0..2 {
            self.grid = logic::spawn_tile(&mut self.rng, self.grid);
        }

        info!("New game, high score {}", self.high_score);

        self.grid
    }

    /// Slides the grid in `direction`. A move that changes nothing leaves every piece of state
    /// untouched; otherwise the merge score is added, one tile is spawned and the status is
    /// re-evaluated.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let Some((new_grid, score_delta)) = logic::try_move(&self.grid, direction) else {
            return MoveOutcome {
                changed: false,
                score_delta: 0,
                status: self.status,
            };
        };

        self.grid = logic::spawn_tile(&mut self.rng, new_grid);
        self.score += score_delta;

        debug!("Moved {direction} for {score_delta}, score {}", self.score);

        if self.score > self.high_score {
            self.high_score = self.score;
            self.high_score_store.save(self.high_score);
        }

        MoveOutcome {
            changed: true,
            score_delta,
            status: self.check_terminal(),
        }
    }

    /// Win check, then loss check. Reaching the winning tile is remembered for the rest of the
    /// game; a stuck grid reports `Lost` even after a win.
    pub fn check_terminal(&mut self) -> GameStatus {
        if !self.won && metrics::max_tile(&self.grid) >= WINNING_TILE {
            self.won = true;
            info!("Reached {WINNING_TILE} with score {}", self.score);
        }

        let status = if logic::is_stuck(&self.grid) {
            GameStatus::Lost
        } else if self.won {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        };

        if status == GameStatus::Lost && self.status != GameStatus::Lost {
            info!(
                "Game over with score {}, max tile {}",
                self.score,
                metrics::max_tile(&self.grid)
            );
        }

        self.status = status;

        status
    }

    pub const fn grid(&self) -> Grid {
        self.grid
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn high_score(&self) -> u32 {
        self.high_score
    }

    pub const fn status(&self) -> GameStatus {
        self.status
    }

    pub const fn has_won(&self) -> bool {
        self.won
    }
}
