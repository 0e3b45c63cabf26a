//! Dispatcher applying `Action` to the template.
//!
//! The returned `DispatchResult` tells the session whether to redraw, whether
//! the selected value must be checked against command triggers, and whether
//! the session ends.

use crate::Action;
use core_template::Template;

mod edit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Confirmed,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub render: bool,
    pub hook_check: bool,
    pub finish: Option<Finish>,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self {
            render: false,
            hook_check: false,
            finish: None,
        }
    }
    pub fn dirty() -> Self {
        Self {
            render: true,
            ..Self::clean()
        }
    }
    /// Redraw, then compare the selected value against command triggers.
    pub fn edited() -> Self {
        Self {
            render: true,
            hook_check: true,
            finish: None,
        }
    }
    pub fn finish(kind: Finish) -> Self {
        Self {
            finish: Some(kind),
            ..Self::clean()
        }
    }
}

pub fn dispatch(template: &mut Template, action: &Action) -> DispatchResult {
    let result = match action {
        Action::Interrupt => DispatchResult::finish(Finish::Interrupted),
        Action::Confirm => DispatchResult::finish(Finish::Confirmed),
        Action::Cycle => match template.select_next() {
            Some(_) => DispatchResult::dirty(),
            None => DispatchResult::clean(),
        },
        Action::Delete => edit::delete(template),
        Action::Insert(c) => edit::insert_char(template, *c),
        Action::InsertText(s) => edit::insert_text(template, s),
        Action::Ignore => DispatchResult::clean(),
    };
    tracing::trace!(
        target: "actions.dispatch",
        action = action.label(),
        selected = ?template.selected_index(),
        render = result.render,
        "dispatch"
    );
    result
}
