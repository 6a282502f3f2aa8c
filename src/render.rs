use std::io::{self, Write};

use clabirint::{Pos, Session, Tile};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    SynchronizedUpdate,
};

use crate::{logging::AppLogger, settings::ColorScheme};

const CELL_WIDTH: u16 = 2;
const MAZE_TOP: u16 = 2;
const MARKER: &str = "()";

pub const HELP: &str = "[n] new maze  [s] start  [d] debug log  [q] quit";

/// Terminal coordinate, pinned to the last column or row when it does not fit.
fn clamp_u16<T: TryInto<u16>>(value: T) -> u16 {
    value.try_into().unwrap_or(u16::MAX)
}

/// Top-left terminal `(x, y)` of a maze cell.
fn cell_origin(pos: Pos) -> (u16, u16) {
    (
        clamp_u16(pos.col()).saturating_mul(CELL_WIDTH),
        MAZE_TOP.saturating_add(clamp_u16(pos.row())),
    )
}

/// Terminal row of the status line, one below the maze.
fn status_row(size: usize) -> u16 {
    MAZE_TOP.saturating_add(clamp_u16(size)).saturating_add(1)
}

pub fn cell_color(session: &Session, scheme: &ColorScheme, pos: Pos) -> Color {
    if pos == session.start() {
        scheme.start
    } else if session.exits().contains(&pos) {
        scheme.exit
    } else if session.is_explored(pos) {
        scheme.explored
    } else {
        match session.grid().get(pos) {
            Some(Tile::Open) => scheme.open,
            _ => scheme.wall,
        }
    }
}

fn level_color(level: log::Level) -> Color {
    match level {
        log::Level::Error => Color::Red,
        log::Level::Warn => Color::Yellow,
        log::Level::Info => Color::White,
        log::Level::Debug => Color::Blue,
        log::Level::Trace => Color::Grey,
    }
}

/// Draws the whole screen in one synchronized update.
pub fn draw<W: Write>(
    out: &mut W,
    session: &Session,
    scheme: &ColorScheme,
    logger: &AppLogger,
) -> io::Result<()> {
    out.sync_update(|out| draw_frame(out, session, scheme, logger))?
}

fn draw_frame<W: Write>(
    out: &mut W,
    session: &Session,
    scheme: &ColorScheme,
    logger: &AppLogger,
) -> io::Result<()> {
    queue!(
        out,
        ResetColor,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetForegroundColor(scheme.text),
        Print(HELP),
    )?;

    let grid = session.grid();
    let marker = session.searcher().current();
    for pos in grid.iter_pos() {
        let (x, y) = cell_origin(pos);
        queue!(
            out,
            MoveTo(x, y),
            SetBackgroundColor(cell_color(session, scheme, pos))
        )?;
        if marker == Some(pos) {
            queue!(out, SetForegroundColor(scheme.marker), Print(MARKER))?;
        } else {
            queue!(out, Print("  "))?;
        }
    }

    let status_y = status_row(grid.size());
    queue!(
        out,
        ResetColor,
        MoveTo(0, status_y),
        SetForegroundColor(scheme.text),
        Print(session.status()),
    )?;

    for (i, log) in logger.recent().iter().enumerate() {
        queue!(
            out,
            MoveTo(0, status_y.saturating_add(2).saturating_add(clamp_u16(i))),
            SetForegroundColor(level_color(log.level)),
            Print("| "),
            SetForegroundColor(scheme.text),
            Print(format!("{} -> {}", log.source, log.message)),
        )?;
    }

    queue!(out, ResetColor)?;
    out.flush()
}

/// Plain text picture of the session: `S` start, `E` exits, `+` explored, `#` and `.` tiles.
pub fn to_text(session: &Session) -> String {
    let grid = session.grid();
    let size = grid.size() as i32;
    let mut text = String::with_capacity((grid.size() + 1) * grid.size());

    for row in 0..size {
        for col in 0..size {
            let pos = Pos(row, col);
            let c = if pos == session.start() {
                'S'
            } else if session.exits().contains(&pos) {
                'E'
            } else if session.is_explored(pos) {
                '+'
            } else {
                grid[pos].to_char()
            };
            text.push(c);
        }
        text.push('\n');
    }

    text
}
