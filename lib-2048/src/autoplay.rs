use std::time::Duration;

use log::info;
use rand::Rng;

use crate::{
    ai::{Ai, Strategy},
    direction::Direction,
    game::{Game, GameStatus, MoveOutcome},
    high_score::HighScoreStore,
    metrics,
};

/// Period between automated moves.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Automation is not running.
    Idle,
    Moved(Direction, MoveOutcome),
    /// Automation stopped itself because the game cannot continue.
    Stopped,
}

/// Drives a game with a strategy, one move per timer tick.
pub struct Autoplay<R> {
    rng: R,
    strategy: Option<Strategy>,
}

impl<R> Autoplay<R>
where
    R: Rng,
{
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            strategy: None,
        }
    }

    /// Replaces whatever strategy was running.
    pub fn start(&mut self, strategy: Strategy) {
        self.stop();

        info!("Starting {strategy} automation");
        self.strategy = Some(strategy);
    }

    /// Returns whether anything was running. Stopping twice is harmless.
    pub fn stop(&mut self) -> bool {
        match self.strategy.take() {
            Some(strategy) => {
                info!("Stopped {strategy} automation");
                true
            }
            None => false,
        }
    }

    pub const fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    pub const fn is_active(&self) -> bool {
        self.strategy.is_some()
    }

    /// One timer callback: ask the strategy for a move and apply it. A lost game has no valid
    /// move, so the strategy proposing nothing is what ends automation.
    pub fn tick<G, S>(&mut self, game: &mut Game<G, S>) -> Tick
    where
        G: Rng,
        S: HighScoreStore,
    {
        let Some(strategy) = self.strategy else {
            return Tick::Idle;
        };

        match strategy.select_move(&mut self.rng, &game.grid()) {
            Some(direction) => Tick::Moved(direction, game.apply_move(direction)),
            None => {
                self.stop();

                Tick::Stopped
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub max_tile: u32,
    pub moves: u32,
    pub won: bool,
}

/// Plays `game` with `ai` until no move is proposed or a proposed move changes nothing.
pub fn run_to_completion<R, S>(game: &mut Game<R, S>, ai: &mut impl Ai) -> GameSummary
where
    R: Rng,
    S: HighScoreStore,
{
    let mut moves = 0;

    while game.status() != GameStatus::Lost {
        let Some(direction) = ai.get_next_move(&game.grid()) else {
            break;
        };

        if !game.apply_move(direction).changed {
            break;
        }

        moves += 1;
    }

    GameSummary {
        score: game.score(),
        max_tile: metrics::max_tile(&game.grid()),
        moves,
        won: game.has_won(),
    }
}
