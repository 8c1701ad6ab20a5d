use std::{
    fs, io,
    path::PathBuf,
};

use log::warn;

/// Where the best score survives between games. Loaded once when a game is created, saved every
/// time the running score passes it.
pub trait HighScoreStore {
    fn load(&mut self) -> u32;

    fn save(&mut self, high_score: u32);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryHighScore(pub u32);

impl HighScoreStore for MemoryHighScore {
    fn load(&mut self) -> u32 {
        self.0
    }

    fn save(&mut self, high_score: u32) {
        self.0 = high_score;
    }
}

/// Keeps the high score as a decimal number in a text file.
#[derive(Clone, Debug)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&mut self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse().unwrap_or_else(|err| {
                warn!("Ignoring high score in {}: {err}", self.path.display());
                0
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => 0,
            Err(err) => {
                warn!("Could not read {}: {err}", self.path.display());
                0
            }
        }
    }

    fn save(&mut self, high_score: u32) {
        if let Err(err) = fs::write(&self.path, format!("{high_score}\n")) {
            warn!("Could not write {}: {err}", self.path.display());
        }
    }
}
