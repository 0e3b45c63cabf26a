//! In-memory terminal stand-ins for headless runs.
//!
//! `MemorySink` records everything written to it; `HeadlessBackend` answers
//! cursor queries with a fixed row and tracks raw-mode transitions without
//! touching the real terminal.

use crate::TerminalBackend;
use anyhow::Result;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Shared byte buffer implementing `Write`. Clones observe the same buffer.
#[derive(Clone, Default, Debug)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn bytes(&self) -> Vec<u8> {
        self.buf.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// Buffer contents decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    pub fn clear(&self) {
        if let Ok(mut b) = self.buf.lock() {
            b.clear();
        }
    }
}

impl Write for MemorySink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut b = self
            .buf
            .lock()
            .map_err(|_| io::Error::other("memory sink poisoned"))?;
        b.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    row: u16,
    entered: bool,
}

impl HeadlessBackend {
    pub fn new(row: u16) -> Self {
        Self {
            row,
            entered: false,
        }
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }
}

impl TerminalBackend for HeadlessBackend {
    fn enter(&mut self) -> Result<()> {
        self.entered = true;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        self.entered = false;
        Ok(())
    }

    fn cursor_row(&mut self) -> Result<u16> {
        Ok(self.row)
    }
}
