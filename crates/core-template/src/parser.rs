//! Template scanning.
//!
//! One left-to-right pass over the input with the non-greedy pattern
//! `\{(.*?)\}`: the first `}` after a `{` closes the token, matches never
//! overlap and come out in document order. Braces do not nest.

use crate::segment::{Literal, Placeholder, Segment};
use regex::Regex;
use std::sync::LazyLock;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.*?)\}").expect("placeholder pattern compiles"));

/// Split `template` into literal and placeholder segments.
pub(crate) fn parse_segments(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0usize;
    for caps in TOKEN.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if let Some(prefix) = Literal::new(&template[start..whole.start()]) {
            segments.push(Segment::Literal(prefix));
        }
        segments.push(Segment::Placeholder(Placeholder::new(name.as_str())));
        start = whole.end();
    }
    if let Some(rest) = Literal::new(&template[start..]) {
        segments.push(Segment::Literal(rest));
    }
    segments
}
