//! Display width in terminal columns.
//!
//! Every cursor movement the renderer emits is derived from these numbers, so
//! all width decisions flow through `display_width`. Widths are summed per
//! grapheme cluster: a cluster never spans a cursor boundary.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal columns occupied by `s` when printed on one line.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(UnicodeWidthStr::width).sum()
}

/// Remove the trailing grapheme cluster of `s`, returning it.
///
/// A combining sequence such as `e` + U+0301 is removed as a unit so the
/// caret never lands inside a cluster.
pub fn pop_grapheme(s: &mut String) -> Option<String> {
    let (idx, last) = s.grapheme_indices(true).next_back()?;
    let removed = last.to_string();
    s.truncate(idx);
    Some(removed)
}
