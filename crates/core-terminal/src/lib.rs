//! Terminal backend abstraction and crossterm implementation.
//!
//! The prompt is drawn inline at the current cursor position, so unlike a
//! full-screen application the backend never enters the alternate screen and
//! keeps the cursor visible. Raw mode is the only terminal state it owns.

use anyhow::Result;
use crossterm::{
    cursor,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing::debug;

pub mod capabilities;
pub mod io;
pub mod memory;
pub use capabilities::TerminalCapabilities;
pub use io::PromptIo;
pub use memory::{HeadlessBackend, MemorySink};

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    /// Zero-based row the cursor currently sits on.
    fn cursor_row(&mut self) -> Result<u16>;
}

pub struct CrosstermBackend {
    entered: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            self.entered = true;
            debug!(target: "terminal", "raw_mode_enabled");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            disable_raw_mode()?;
            self.entered = false;
            debug!(target: "terminal", "raw_mode_disabled");
        }
        Ok(())
    }

    fn cursor_row(&mut self) -> Result<u16> {
        let (_col, row) = cursor::position()?;
        Ok(row)
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}
