//! Value edits on the selected placeholder. Deletion works on grapheme
//! clusters through `Placeholder::pop`, never on bytes.

use super::DispatchResult;
use core_template::Template;

pub(crate) fn insert_char(template: &mut Template, c: char) -> DispatchResult {
    match template.selected_mut() {
        Some(p) => {
            p.push(c);
            DispatchResult::edited()
        }
        None => DispatchResult::clean(),
    }
}

pub(crate) fn insert_text(template: &mut Template, text: &str) -> DispatchResult {
    match template.selected_mut() {
        Some(p) if !text.is_empty() => {
            p.push_str(text);
            tracing::trace!(target: "actions.dispatch", op = "insert_text", size_bytes = text.len(), "edit");
            DispatchResult::edited()
        }
        _ => DispatchResult::clean(),
    }
}

/// Truncates by one trailing cluster; an empty value stays empty but the
/// prompt is still redrawn.
pub(crate) fn delete(template: &mut Template) -> DispatchResult {
    match template.selected_mut() {
        Some(p) => {
            let removed = p.pop();
            tracing::trace!(target: "actions.dispatch", op = "delete", removed, "edit");
            DispatchResult::dirty()
        }
        None => DispatchResult::clean(),
    }
}
