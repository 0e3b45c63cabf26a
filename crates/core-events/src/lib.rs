//! Core event types and channel helpers for stencil.
//!
//! The prompt has exactly one consumer of input: the editing session (or, while
//! a command handler runs, the handler it lends its I/O context to). Producers
//! push [`Event`]s into a bounded `tokio::sync::mpsc` channel sized by
//! [`EVENT_CHANNEL_CAP`]; events are consumed strictly in arrival order.

use std::fmt;
use std::sync::atomic::AtomicU64;

// -------------------------------------------------------------------------------------------------
// Channel Policy
// -------------------------------------------------------------------------------------------------
// One producer (the input task) and one consumer (the session). The producer awaits on a full
// channel instead of dropping keys: losing a keystroke would desynchronise the rendered prompt from
// what the user typed. A prompt is typed by hand so the capacity is never a practical limit.
// -------------------------------------------------------------------------------------------------
pub const EVENT_CHANNEL_CAP: usize = 1024;

// -------------------------------------------------------------------------------------------------
// Telemetry
// -------------------------------------------------------------------------------------------------
// Relaxed atomic counters. Inspected by tests and logged once by the binary on shutdown.
// -------------------------------------------------------------------------------------------------
pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0);
pub static CHANNEL_SENDS: AtomicU64 = AtomicU64::new(0);
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0);
pub static PASTE_EVENTS: AtomicU64 = AtomicU64::new(0);
pub static PASTE_BYTES: AtomicU64 = AtomicU64::new(0);
// Async input task lifecycle telemetry
pub static ASYNC_INPUT_STARTS: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_SIGNAL: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_CHANNEL: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_STREAM: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_ERROR: AtomicU64 = AtomicU64::new(0);

/// Top-level event enum consumed by the editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(InputEvent),
    /// The input source ended (stream closed or errored). No further input will arrive.
    Shutdown,
}

/// Normalized input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Interrupt (Ctrl-C) surfaced distinctly so it can be checked before any other
    /// interpretation of the key.
    CtrlC,
    /// Bracketed paste payload. Never logged verbatim; callers log only its length.
    Paste(String),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Key without modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    /// The printable character carried by this key, if any.
    ///
    /// Control or alt chords never carry a character: `Ctrl-a` is a command to the
    /// terminal, not text. Shift is allowed since the terminal already folded it into
    /// the reported character.
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !c.is_control()
                    && !self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    pub fn is_ctrl_c(&self) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
            && matches!(self.code, KeyCode::Char('c') | KeyCode::Char('C'))
    }
}

/// Normalized logical key representations consumed by higher layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

impl InputEvent {
    /// Stable label for logging; never includes key or paste contents.
    pub fn kind_label(&self) -> &'static str {
        match self {
            InputEvent::Key(k) if k.printable().is_some() => "char",
            InputEvent::Key(_) => "named",
            InputEvent::CtrlC => "ctrl_c",
            InputEvent::Paste(_) => "paste",
            InputEvent::Resize(..) => "resize",
        }
    }
}
