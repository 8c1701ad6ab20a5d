use rand::Rng;

use crate::{
    ai::Strategy,
    autoplay::{Autoplay, Tick},
    direction::Direction,
    game::{Game, MoveOutcome},
    high_score::HighScoreStore,
    Grid,
};

/// Everything a front end drives: one game plus its automation. Human moves and automated
/// moves never interleave.
pub struct Session<R, S> {
    game: Game<R, S>,
    autoplay: Autoplay<R>,
}

impl<R, S> Session<R, S>
where
    R: Rng,
    S: HighScoreStore,
{
    pub const fn new(game: Game<R, S>, strategy_rng: R) -> Self {
        Self {
            game,
            autoplay: Autoplay::new(strategy_rng),
        }
    }

    /// Stops automation before resetting.
    pub fn new_game(&mut self) -> Grid {
        self.autoplay.stop();

        self.game.reset()
    }

    /// A move requested by a person. Ignored while automation is running.
    pub fn request_move(&mut self, direction: Direction) -> Option<MoveOutcome> {
        (!self.autoplay.is_active()).then(|| self.game.apply_move(direction))
    }

    /// Starts a fresh game played by `strategy`.
    pub fn start_automation(&mut self, strategy: Strategy) {
        self.new_game();
        self.autoplay.start(strategy);
    }

    pub fn stop_automation(&mut self) -> bool {
        self.autoplay.stop()
    }

    pub fn tick(&mut self) -> Tick {
        self.autoplay.tick(&mut self.game)
    }

    pub const fn game(&self) -> &Game<R, S> {
        &self.game
    }

    pub const fn automation(&self) -> Option<Strategy> {
        self.autoplay.strategy()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{game::GameStatus, high_score::MemoryHighScore, metrics};

    fn session() -> Session<ChaCha8Rng, MemoryHighScore> {
        let game = Game::new(ChaCha8Rng::seed_from_u64(21), MemoryHighScore(0));

        Session::new(game, ChaCha8Rng::seed_from_u64(22))
    }

    #[test]
    fn human_moves_blocked_during_automation() {
        let mut session = session();

        session.start_automation(Strategy::Corner);
        let grid = session.game().grid();

        assert_eq!(session.request_move(Direction::Up), None);
        assert_eq!(session.game().grid(), grid);

        session.stop_automation();

        assert!(session
            .request_move(Direction::Up)
            .into_iter()
            .chain(session.request_move(Direction::Down))
            .any(|outcome| outcome.changed));
    }

    #[test]
    fn new_game_stops_automation() {
        let mut session = session();

        session.start_automation(Strategy::Greedy);
        for _ in 0..5 {
            session.tick();
        }

        let grid = session.new_game();

        assert_eq!(session.automation(), None);
        assert_eq!(session.tick(), Tick::Idle);
        assert_eq!(metrics::empty_count(&grid), 14);
        assert_eq!(session.game().score(), 0);
    }

    #[test]
    fn automation_plays_until_lost() {
        let mut session = session();

        session.start_automation(Strategy::Lookahead);

        let mut ticks = 0;
        while session.tick() != Tick::Stopped {
            ticks += 1;
        }

        assert!(ticks > 0);
        assert_eq!(session.game().status(), GameStatus::Lost);
        assert_eq!(session.automation(), None);
        assert!(session.game().high_score() >= session.game().score());
    }
}
