//! Key to action translation and action dispatch onto the template.
//!
//! Translation is stateless: every prompt key maps to exactly one `Action`
//! with no pending or count state. Dispatch mutates the `Template` and reports
//! what the session has to do next (redraw, run the hook check, finish).

pub mod dispatcher;
pub mod key_translator;

pub use dispatcher::{DispatchResult, Finish, dispatch};
pub use key_translator::{translate_input, translate_key};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ctrl-C. Always wins over any other reading of the key.
    Interrupt,
    Confirm,
    Cycle,
    Delete,
    Insert(char),
    /// Bracketed paste with line breaks and control characters removed.
    InsertText(String),
    Ignore,
}

impl Action {
    /// Stable label for logging; never includes inserted text.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Interrupt => "interrupt",
            Action::Confirm => "confirm",
            Action::Cycle => "cycle",
            Action::Delete => "delete",
            Action::Insert(_) => "insert",
            Action::InsertText(_) => "insert_text",
            Action::Ignore => "ignore",
        }
    }
}
