//! Terminal writer abstraction.
//!
//! A `Writer` collects primitive terminal operations for one render cycle
//! and emits them in a single flush. The prompt is inline, so positioning is
//! relative to wherever the cursor is; the only absolute move is used to
//! return to a recorded row after a command handler drew below the prompt.
//!
//! Design invariants:
//! * Commands preserve ordering; no flushing mid-cycle.
//! * Zero-length relative moves are never recorded. ANSI `CSI 0 D` moves one
//!   column, so emitting one would shift the caret.
//! * Writer owns no global state; it is a short-lived object per cycle.

use anyhow::Result;
use crossterm::{
    QueueableCommand,
    cursor::{MoveLeft, MoveRight, MoveTo},
    style::{ContentStyle, Print, PrintStyledContent, StyledContent},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveLeft(u16),
    MoveRight(u16),
    /// Absolute (column, row).
    MoveTo(u16, u16),
    /// Clear the whole current line; the cursor does not move.
    ClearLine,
    /// Clear from the cursor to the end of the line.
    ClearToEndOfLine,
    /// Clear from the cursor to the end of the screen.
    ClearBelow,
    Print(String),
    Styled(String, ContentStyle),
}

#[derive(Default, Debug)]
pub struct Writer {
    cmds: Vec<Command>,
}

/// Column counts beyond the terminal protocol range saturate; a prompt that wide
/// is already outside the single-line contract.
fn columns(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_left(&mut self, n: usize) {
        if n > 0 {
            self.cmds.push(Command::MoveLeft(columns(n)));
        }
    }
    pub fn move_right(&mut self, n: usize) {
        if n > 0 {
            self.cmds.push(Command::MoveRight(columns(n)));
        }
    }
    pub fn move_to(&mut self, col: u16, row: u16) {
        self.cmds.push(Command::MoveTo(col, row));
    }
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }
    pub fn clear_to_end_of_line(&mut self) {
        self.cmds.push(Command::ClearToEndOfLine);
    }
    pub fn clear_below(&mut self) {
        self.cmds.push(Command::ClearBelow);
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn styled<S: Into<String>>(&mut self, s: S, style: ContentStyle) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Styled(s, style));
        }
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
    pub fn flush_to(self, out: &mut (dyn Write + Send)) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveLeft(n) => out.queue(MoveLeft(n))?,
                Command::MoveRight(n) => out.queue(MoveRight(n))?,
                Command::MoveTo(x, y) => out.queue(MoveTo(x, y))?,
                Command::ClearLine => out.queue(Clear(ClearType::CurrentLine))?,
                Command::ClearToEndOfLine => out.queue(Clear(ClearType::UntilNewLine))?,
                Command::ClearBelow => out.queue(Clear(ClearType::FromCursorDown))?,
                Command::Print(s) => out.queue(Print(s))?,
                Command::Styled(s, style) => {
                    out.queue(PrintStyledContent(StyledContent::new(style, s)))?
                }
            };
        }
        out.flush()?;
        Ok(())
    }
}
