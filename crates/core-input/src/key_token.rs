use core_events::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyModifiers as CKeyModifiers,
};

/// Map a crossterm key event into a normalized key event.
///
/// Returns `None` for key codes the prompt has no use for (function keys, media keys).
pub(crate) fn map_key_event(event: &CKeyEvent) -> Option<KeyEvent> {
    let code = map_key_code(&event.code)?;
    Some(KeyEvent::new(code, map_mods(event.modifiers)))
}

/// Convert a crossterm key code into a normalized key code.
pub(crate) fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let code = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab | CKeyCode::BackTab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::PageUp
        | CKeyCode::PageDown
        | CKeyCode::Insert
        | CKeyCode::F(_)
        | CKeyCode::Null
        | CKeyCode::CapsLock
        | CKeyCode::ScrollLock
        | CKeyCode::NumLock
        | CKeyCode::PrintScreen
        | CKeyCode::Pause
        | CKeyCode::Menu
        | CKeyCode::KeypadBegin
        | CKeyCode::Media(_)
        | CKeyCode::Modifier(_) => return None,
    };
    Some(code)
}

/// Convert crossterm modifier flags into the normalized modifier bits.
pub(crate) fn map_mods(m: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}
