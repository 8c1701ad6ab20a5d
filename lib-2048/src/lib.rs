pub use core_2048::*;

pub mod ai;
pub mod autoplay;
pub mod direction;
pub mod error;
pub mod game;
pub mod high_score;
pub mod logic;
pub mod session;

pub use direction::Direction;
pub use error::{Error, Result};
