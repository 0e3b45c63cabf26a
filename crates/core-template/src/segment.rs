//! Renderable template segments.
//!
//! A template is an ordered list of `Segment`s. Literals are fixed text; a
//! placeholder is an editable slot that displays its name until it holds a
//! value. Both kinds answer the same three questions for the renderer:
//! what to print (`display_text`), how wide it is (`display_len`) and where
//! the caret rests inside it (`caret_offset`).

use crate::width::{display_width, pop_grapheme};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(Literal),
    Placeholder(Placeholder),
}

/// Fixed template text. Never empty, never selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    text: String,
}

impl Literal {
    /// Returns `None` for empty text; the parser never emits empty literals.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    name: String,
    value: String,
    selected: bool,
}

impl Placeholder {
    /// `name` is the token with its braces already stripped.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            selected: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        self.value.push_str(s);
    }

    /// Drop the trailing character cluster. Returns `false` when the value was
    /// already empty (not an error).
    pub fn pop(&mut self) -> bool {
        pop_grapheme(&mut self.value).is_some()
    }

    /// Value if non-empty, otherwise the name.
    pub fn display_text(&self) -> &str {
        if self.value.is_empty() {
            &self.name
        } else {
            &self.value
        }
    }

    pub fn display_len(&self) -> usize {
        display_width(self.display_text())
    }

    /// An empty placeholder puts the caret at the start of its rendered name, an
    /// edited one right after the value.
    pub fn caret_offset(&self) -> usize {
        if self.value.is_empty() {
            0
        } else {
            display_width(&self.value)
        }
    }
}

impl Segment {
    pub fn display_text(&self) -> &str {
        match self {
            Segment::Literal(l) => l.text(),
            Segment::Placeholder(p) => p.display_text(),
        }
    }

    pub fn display_len(&self) -> usize {
        match self {
            Segment::Literal(l) => display_width(l.text()),
            Segment::Placeholder(p) => p.display_len(),
        }
    }

    /// Literals place the caret after themselves.
    pub fn caret_offset(&self) -> usize {
        match self {
            Segment::Literal(_) => self.display_len(),
            Segment::Placeholder(p) => p.caret_offset(),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Segment::Placeholder(p) if p.is_selected())
    }

    /// The text this segment was parsed from.
    pub fn source(&self) -> Cow<'_, str> {
        match self {
            Segment::Literal(l) => Cow::Borrowed(l.text()),
            Segment::Placeholder(p) => Cow::Owned(format!("{{{}}}", p.name())),
        }
    }

    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        }
    }

    pub fn as_placeholder_mut(&mut self) -> Option<&mut Placeholder> {
        match self {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        }
    }
}
