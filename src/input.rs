use std::io::{self, Read};

use aho_corasick::AhoCorasick;
use lib_2048::{ai::Strategy, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    NewGame,
    Automate(Strategy),
    StopAutomation,
    Quit,
}

const KEY_PATTERNS: [&str; 11] = [
    "\x1b[A", "\x1b[B", "\x1b[C", "\x1b[D", "n", "r", "c", "g", "l", "s", "q",
];
const KEYS: [Key; 11] = [
    Key::Move(Direction::Up),
    Key::Move(Direction::Down),
    Key::Move(Direction::Right),
    Key::Move(Direction::Left),
    Key::NewGame,
    Key::Automate(Strategy::Random),
    Key::Automate(Strategy::Corner),
    Key::Automate(Strategy::Greedy),
    Key::Automate(Strategy::Lookahead),
    Key::StopAutomation,
    Key::Quit,
];

/// Turns raw terminal bytes into keys, carrying an incomplete escape sequence over to the next
/// read.
pub struct KeyReader {
    searcher: AhoCorasick,
    buf: [u8; 128],
    buf_len: usize,
}

impl KeyReader {
    pub fn new() -> io::Result<Self> {
        let searcher = AhoCorasick::new(KEY_PATTERNS)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

        Ok(Self {
            searcher,
            buf: [0; 128],
            buf_len: 0,
        })
    }

    /// Reads whatever is available. Returns no keys when the read timed out.
    pub fn read_keys(&mut self, input: &mut impl Read) -> io::Result<Vec<Key>> {
        self.buf_len += input.read(&mut self.buf[self.buf_len..])?;

        let keys: Vec<_> = self
            .searcher
            .find_iter(&self.buf[..self.buf_len])
            .map(|m| KEYS[m.pattern().as_usize()])
            .collect();

        self.buf_len = match &self.buf[..self.buf_len] {
            [.., 0x1b, b'['] => {
                self.buf[..2].copy_from_slice(b"\x1b[");
                2
            }
            [.., 0x1b] => {
                self.buf[0] = 0x1b;
                1
            }
            _ => 0,
        };

        Ok(keys)
    }
}
