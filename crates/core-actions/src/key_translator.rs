//! Stateless key -> `Action` mapping.

use crate::Action;
use core_events::{InputEvent, KeyCode, KeyEvent};

pub fn translate_key(key: &KeyEvent) -> Action {
    if key.is_ctrl_c() {
        return Action::Interrupt;
    }
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Tab => Action::Cycle,
        KeyCode::Backspace => Action::Delete,
        _ => match key.printable() {
            Some(c) => Action::Insert(c),
            None => Action::Ignore,
        },
    }
}

pub fn translate_input(event: &InputEvent) -> Action {
    match event {
        InputEvent::CtrlC => Action::Interrupt,
        InputEvent::Key(k) => translate_key(k),
        InputEvent::Paste(text) => {
            let kept: String = text.chars().filter(|c| !c.is_control()).collect();
            if kept.is_empty() {
                Action::Ignore
            } else {
                Action::InsertText(kept)
            }
        }
        InputEvent::Resize(..) => Action::Ignore,
    }
}
