//! Placeholder styling.
//!
//! Literals are always drawn unstyled. A placeholder is drawn in one of three
//! styles depending on what it currently shows:
//! * `Name`: no value yet, the name is shown dim in the placeholder color.
//! * `Value`: an edited value in the value color.
//! * `Pending`: a value beginning with the command sentinel, i.e. a trigger
//!   still being typed.
//!
//! When color is disabled (`NO_COLOR`, non-tty output) every segment prints
//! bare so the byte stream carries only text and cursor movement.

use core_template::Placeholder;
use crossterm::style::{Attribute, Color, ContentStyle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentStyle {
    Name,
    Value,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleSheet {
    pub placeholder: Color,
    pub value: Color,
    pub pending: Color,
    pub sentinel: char,
    pub enabled: bool,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            placeholder: Color::Cyan,
            value: Color::Cyan,
            pending: Color::Yellow,
            sentinel: ':',
            enabled: true,
        }
    }
}

/// Parse a color name, falling back to `default` with a warning.
fn color_or(name: Option<&str>, default: Color, field: &'static str) -> Color {
    match name {
        None => default,
        Some(n) => match Color::try_from(n) {
            Ok(c) => c,
            Err(()) => {
                tracing::warn!(target: "config", field, "unknown_color_fallback");
                default
            }
        },
    }
}

impl StyleSheet {
    /// Same classification, no escape sequences.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn from_names(
        placeholder: Option<&str>,
        value: Option<&str>,
        pending: Option<&str>,
        sentinel: char,
    ) -> Self {
        let d = Self::default();
        Self {
            placeholder: color_or(placeholder, d.placeholder, "placeholder"),
            value: color_or(value, d.value, "value"),
            pending: color_or(pending, d.pending, "pending"),
            sentinel,
            enabled: true,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn classify(&self, p: &Placeholder) -> SegmentStyle {
        if p.value().is_empty() {
            SegmentStyle::Name
        } else if p.value().starts_with(self.sentinel) {
            SegmentStyle::Pending
        } else {
            SegmentStyle::Value
        }
    }

    pub fn content_style(&self, kind: SegmentStyle) -> ContentStyle {
        let mut style = ContentStyle::new();
        if !self.enabled {
            return style;
        }
        match kind {
            SegmentStyle::Name => {
                style.foreground_color = Some(self.placeholder);
                style.attributes.set(Attribute::Dim);
            }
            SegmentStyle::Value => style.foreground_color = Some(self.value),
            SegmentStyle::Pending => style.foreground_color = Some(self.pending),
        }
        style
    }
}
