//! Terminal capability probing.
//!
//! Detection runs once at startup and only answers whether styled output
//! should be emitted. Honors the `NO_COLOR` convention (any non-empty value
//! disables color) and disables styling when stdout is not a terminal.

use std::ffi::OsString;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    pub supports_color: bool,
    pub interactive: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        Self::from_parts(
            std::env::var_os("NO_COLOR"),
            std::io::stdout().is_terminal(),
        )
    }

    pub fn from_parts(no_color: Option<OsString>, stdout_is_tty: bool) -> Self {
        let color_opt_out = no_color.is_some_and(|v| !v.is_empty());
        Self {
            supports_color: stdout_is_tty && !color_opt_out,
            interactive: stdout_is_tty,
        }
    }
}
