//! Reply contract between the session and a command handler.
//!
//! A reply becomes the placeholder value verbatim and is drawn on the prompt
//! line, so it must be a single line of printable text. Handler failures are
//! breaches too: there is no sensible value to fall back to.

use crate::HookError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractBreach {
    #[error("handler failed: {0}")]
    Handler(#[from] HookError),
    #[error("reply contains a line break")]
    LineBreak,
    #[error("reply contains a control character")]
    ControlChar,
}

pub fn accept_reply(reply: Result<String, HookError>) -> Result<String, ContractBreach> {
    let value = reply?;
    if value.contains(['\n', '\r']) {
        return Err(ContractBreach::LineBreak);
    }
    if value.chars().any(char::is_control) {
        return Err(ContractBreach::ControlChar);
    }
    Ok(value)
}
