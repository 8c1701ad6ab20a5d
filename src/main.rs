use std::{
    io::{self, Read, Write},
    os::fd::AsRawFd,
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::Parser;
use env_logger::Env;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use lib_2048::{
    ai::{Strategy, StrategyAi},
    autoplay::{self, GameSummary},
    game::{Game, GameStatus},
    high_score::{FileHighScore, HighScoreStore},
    session::Session,
};

use crate::{
    input::{Key, KeyReader},
    render::{RawTerminal, View},
};

mod input;
mod render;

#[derive(Parser, Debug)]
#[command(
    name = "play-2048",
    version,
    about = "Play 2048 in the terminal, or watch a strategy play it"
)]
struct Cli {
    /// Start with a strategy playing: random, corner, greedy or lookahead
    #[arg(short, long, value_name = "STRATEGY")]
    strategy: Option<Strategy>,
    /// Play this many games with the strategy, without a display, and log the results
    #[arg(short = 'n', long, value_name = "N", requires = "strategy")]
    games: Option<u32>,
    /// Seed for tile spawns and the random strategy
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds between automated moves
    #[arg(long, value_name = "MS", default_value_t = autoplay::DEFAULT_TICK.as_millis() as u64)]
    tick_ms: u64,
    /// File keeping the high score between sessions
    #[arg(long, value_name = "PATH", default_value = ".2048-high-score")]
    high_score_file: PathBuf,
}

fn view_of<R, S>(session: &Session<R, S>) -> View
where
    R: Rng,
    S: HighScoreStore,
{
    let game = session.game();

    let message = match (session.automation(), game.status()) {
        (Some(strategy), _) => format!("Autoplay: {strategy}    s stop  n new game  q quit"),
        (None, GameStatus::Lost) => "Game over!    n new game  r/c/g/l autoplay  q quit".to_owned(),
        (None, GameStatus::Won) => "You win! Keep going, or n for a new game".to_owned(),
        (None, GameStatus::InProgress) => {
            "Arrows move  n new game  r/c/g/l autoplay  s stop  q quit".to_owned()
        }
    };

    View {
        grid: game.grid(),
        score: game.score(),
        high_score: game.high_score(),
        message,
    }
}

fn run_interactive<R, S>(
    out: &mut impl Write,
    input: &mut impl Read,
    session: &mut Session<R, S>,
    tick: Duration,
) -> io::Result<()>
where
    R: Rng,
    S: HighScoreStore,
{
    let mut key_reader = KeyReader::new()?;

    let mut view = view_of(session);
    render::draw_frame(out, &view)?;

    let mut next_tick = Instant::now() + tick;

    loop {
        for key in key_reader.read_keys(input)? {
            match key {
                Key::Move(direction) => {
                    session.request_move(direction);
                }
                Key::NewGame => {
                    session.new_game();
                }
                Key::Automate(strategy) => {
                    session.start_automation(strategy);
                    next_tick = Instant::now() + tick;
                }
                Key::StopAutomation => {
                    session.stop_automation();
                }
                Key::Quit => return Ok(()),
            }
        }

        let now = Instant::now();

        if session.automation().is_some() && now >= next_tick {
            session.tick();
            next_tick = (next_tick + tick).max(now);
        }

        let new_view = view_of(session);

        if new_view != view {
            render::redraw_frame(out, &view, &new_view)?;
            view = new_view;
        }
    }
}

fn play_interactive<R, S>(
    out: &mut impl Write,
    input: &mut (impl Read + AsRawFd),
    session: &mut Session<R, S>,
    tick: Duration,
) -> io::Result<()>
where
    R: Rng,
    S: HighScoreStore,
{
    let _raw_terminal = RawTerminal::enable(&*input)?;

    out.write_all(b"\x1b[?25l")?;
    let result = run_interactive(out, input, session, tick);
    out.write_all(b"\x1b[?25h")?;
    out.flush()?;

    result
}

fn play_batch<R, S>(mut game: Game<R, S>, mut ai: StrategyAi<R>, games: u32)
where
    R: Rng,
    S: HighScoreStore,
{
    let strategy = ai.strategy();

    let mut total_score = 0u64;
    let mut wins = 0;
    let mut best: Option<GameSummary> = None;

    for i in 0..games {
        if i != 0 {
            game.reset();
        }

        let summary = autoplay::run_to_completion(&mut game, &mut ai);

        info!(
            "Game {}: score {}, max tile {}, {} moves{}",
            i + 1,
            summary.score,
            summary.max_tile,
            summary.moves,
            if summary.won { ", won" } else { "" }
        );

        total_score += u64::from(summary.score);
        wins += u32::from(summary.won);

        if best.map_or(true, |best| summary.score > best.score) {
            best = Some(summary);
        }
    }

    if let Some(best) = best {
        info!(
            "{strategy}: {games} games, mean score {:.1}, best {} with max tile {}, {wins} won",
            total_score as f64 / f64::from(games),
            best.score,
            best.max_tile
        );
    }

    info!("High score {}", game.high_score());
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.games.is_some() { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let (game_rng, strategy_rng) = match cli.seed {
        Some(seed) => (
            ChaCha8Rng::seed_from_u64(seed),
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (ChaCha8Rng::from_entropy(), ChaCha8Rng::from_entropy()),
    };

    let high_score_store = FileHighScore::new(cli.high_score_file);
    let game = Game::new(game_rng, high_score_store);

    match (cli.games, cli.strategy) {
        (Some(games), Some(strategy)) => {
            play_batch(game, StrategyAi::new(strategy, strategy_rng), games);

            Ok(())
        }
        (_, strategy) => {
            let mut session = Session::new(game, strategy_rng);

            if let Some(strategy) = strategy {
                session.start_automation(strategy);
            }

            let mut stdout = io::stdout().lock();
            let mut stdin = io::stdin().lock();

            play_interactive(
                &mut stdout,
                &mut stdin,
                &mut session,
                Duration::from_millis(cli.tick_ms),
            )
        }
    }
}
