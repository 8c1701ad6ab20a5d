use std::{
    io::{self, Write},
    mem::MaybeUninit,
    os::fd::{AsRawFd, RawFd},
};

use lib_2048::{Grid, SIZE};

const SQUARE_HEIGHT: usize = 3;
// Score line, top and bottom borders, separators, status line.
const FRAME_HEIGHT: usize = SQUARE_HEIGHT * SIZE + (SIZE - 1) + 4;
const STATUS_LINE: usize = FRAME_HEIGHT - 1;
const TOP_ROW: &[u8] = "┏━━━━━━━┳━━━━━━━┳━━━━━━━┳━━━━━━━┓\n".as_bytes();
const SEPERATOR_ROW: &[u8] = "┣━━━━━━━╋━━━━━━━╋━━━━━━━╋━━━━━━━┫\n".as_bytes();
const BOTTOM_ROW: &[u8] = "┗━━━━━━━┻━━━━━━━┻━━━━━━━┻━━━━━━━┛\n".as_bytes();
const EMPTY_ROW: &[u8] = "┃       ┃       ┃       ┃       ┃\n".as_bytes();
const EMPTY_CELL: &[u8] = "┃       ".as_bytes();
const COLOUR_TABLE: [u8; 7] = [90, 33, 31, 32, 33, 36, 35];

/// Everything shown on screen for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
    pub grid: Grid,
    pub score: u32,
    pub high_score: u32,
    pub message: String,
}

fn cell_colour(cell: u32) -> Option<u8> {
    (cell != 0).then(|| {
        let exponent = cell.trailing_zeros() as usize;

        COLOUR_TABLE[(exponent - 1) % COLOUR_TABLE.len()]
    })
}

fn draw_padding_line(out: &mut impl Write, row: &[u32; SIZE]) -> io::Result<()> {
    for &cell in row {
        if let Some(colour) = cell_colour(cell) {
            write!(out, "┃\x1b[{}m       \x1b[m", colour + 10)?;
        } else {
            out.write_all(EMPTY_CELL)?;
        }
    }

    Ok(())
}

/// Draws the `SQUARE_HEIGHT` lines of one board row, leaving the cursor on the last of them.
fn draw_board_row(out: &mut impl Write, row: &[u32; SIZE]) -> io::Result<()> {
    for _ in 0..((SQUARE_HEIGHT - 1) / 2) {
        draw_padding_line(out, row)?;
        out.write_all(b"\x1b[E")?;
    }

    for &cell in row {
        if let Some(colour) = cell_colour(cell) {
            write!(out, "┃\x1b[7m\x1b[{colour}m{cell:^7}\x1b[m")?;
        } else {
            out.write_all(EMPTY_CELL)?;
        }
    }

    for _ in 0..((SQUARE_HEIGHT - 1).div_ceil(2)) {
        out.write_all(b"\x1b[E")?;
        draw_padding_line(out, row)?;
    }

    Ok(())
}

const fn row_line(row: usize) -> usize {
    2 + row * (SQUARE_HEIGHT + 1)
}

fn move_down(out: &mut impl Write, from: usize, to: usize) -> io::Result<()> {
    if to > from {
        write!(out, "\x1b[{}E", to - from)?;
    }

    Ok(())
}

fn write_header(out: &mut impl Write, view: &View) -> io::Result<()> {
    write!(out, "\x1b[2KScore: {}    Best: {}", view.score, view.high_score)
}

/// Draws a whole frame below the cursor, leaving the cursor on the line after it.
pub fn draw_frame(out: &mut impl Write, view: &View) -> io::Result<()> {
    write_header(out, view)?;
    out.write_all(b"\n")?;
    out.write_all(TOP_ROW)?;

    for i in 0..SIZE {
        if i != 0 {
            out.write_all(SEPERATOR_ROW)?;
        }

        for _ in 0..SQUARE_HEIGHT {
            out.write_all(EMPTY_ROW)?;
        }
    }

    out.write_all(BOTTOM_ROW)?;
    writeln!(out, "\x1b[2K{}", view.message)?;

    let blank = View {
        grid: [[0; SIZE]; SIZE],
        ..view.clone()
    };

    redraw_frame(out, &blank, view)
}

/// Redraws the header, the board rows that differ between `old` and `new`, and the status line.
pub fn redraw_frame(out: &mut impl Write, old: &View, new: &View) -> io::Result<()> {
    write!(out, "\x1b[{FRAME_HEIGHT}F")?;
    write_header(out, new)?;

    let mut current_line = 0;

    let changed_rows = (0..SIZE).filter(|&i| old.grid[i] != new.grid[i]);

    for row in changed_rows {
        let target_line = row_line(row);

        move_down(out, current_line, target_line)?;
        draw_board_row(out, &new.grid[row])?;

        current_line = target_line + SQUARE_HEIGHT - 1;
    }

    move_down(out, current_line, STATUS_LINE)?;
    write!(out, "\x1b[2K{}", new.message)?;
    write!(out, "\x1b[E")?;

    out.flush()
}

/// Puts the terminal into non-canonical, no-echo mode until dropped. Reads return after at
/// most a tenth of a second even when no key was pressed.
pub struct RawTerminal {
    fd: RawFd,
    original: libc::termios,
}

impl RawTerminal {
    pub fn enable(fd: &impl AsRawFd) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let mut termios = MaybeUninit::uninit();

        let original = unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
                Err(io::Error::new(
                    io::ErrorKind::Other,
                    "Error calling tcgetattr, is stdin a terminal?",
                ))?;
            }

            termios.assume_init()
        };

        let mut termios = original;
        termios.c_lflag &= !(libc::ECHO | libc::ICANON);
        termios.c_cc[libc::VMIN] = 0;
        termios.c_cc[libc::VTIME] = 1;

        unsafe {
            if libc::tcsetattr(fd, libc::TCSADRAIN, &termios) != 0 {
                Err(io::Error::new(
                    io::ErrorKind::Other,
                    "Error calling tcsetattr",
                ))?;
            }
        }

        Ok(Self { fd, original })
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        unsafe {
            libc::tcsetattr(self.fd, libc::TCSADRAIN, &self.original);
        }
    }
}
