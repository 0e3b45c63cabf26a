use crate::parser::parse_segments;
use crate::segment::{Placeholder, Segment};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Final outcome of a confirmed prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptResult {
    /// The template exactly as supplied.
    pub template: String,
    /// Rendered text with every placeholder's display text substituted.
    pub text: String,
    /// Placeholder name to entered value; empty string if never edited.
    pub results: BTreeMap<String, String>,
}

/// Parsed template plus the placeholder selection.
///
/// Invariants (hold after every public call):
/// * `placeholders[i]` indexes a `Segment::Placeholder` in `segments`, in template order.
/// * `selected` is `Some(i)` with `i < placeholders.len()` iff placeholders exist.
/// * Exactly the placeholder at `placeholders[selected]` reports `is_selected()`.
/// * Segment order and kinds never change after construction.
#[derive(Debug, Clone)]
pub struct Template {
    raw: String,
    segments: Vec<Segment>,
    placeholders: Vec<usize>,
    selected: Option<usize>,
}

impl Template {
    pub fn parse(raw: &str) -> Self {
        let mut segments = parse_segments(raw);
        let placeholders: Vec<usize> = segments
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Segment::Placeholder(_)))
            .map(|(i, _)| i)
            .collect();

        let selected = placeholders.first().map(|&first| {
            if let Some(p) = segments[first].as_placeholder_mut() {
                p.set_selected(true);
            }
            0
        });

        debug!(
            target: "template",
            segments = segments.len(),
            placeholders = placeholders.len(),
            "template_parsed"
        );

        Self {
            raw: raw.to_string(),
            segments,
            placeholders,
            selected,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    pub fn has_placeholders(&self) -> bool {
        !self.placeholders.is_empty()
    }

    /// Placeholders in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> + '_ {
        self.placeholders
            .iter()
            .filter_map(|&i| self.segments[i].as_placeholder())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Placeholder> {
        let seg = self.placeholders[self.selected?];
        self.segments[seg].as_placeholder()
    }

    pub fn selected_mut(&mut self) -> Option<&mut Placeholder> {
        let seg = self.placeholders[self.selected?];
        self.segments[seg].as_placeholder_mut()
    }

    /// Move the selection to the next placeholder, wrapping past the end.
    /// Returns the new index, or `None` when there is nothing to select.
    pub fn select_next(&mut self) -> Option<usize> {
        let current = self.selected?;
        let next = (current + 1) % self.placeholders.len();
        if let Some(p) = self.selected_mut() {
            p.set_selected(false);
        }
        self.selected = Some(next);
        if let Some(p) = self.selected_mut() {
            p.set_selected(true);
        }
        Some(next)
    }

    /// Sum of segment display widths.
    pub fn display_len(&self) -> usize {
        self.segments.iter().map(Segment::display_len).sum()
    }

    /// Column (relative to the start of the prompt) where the caret belongs: the
    /// width of everything before the selected placeholder plus its own caret
    /// offset. With nothing selected the caret sits at the end.
    pub fn caret_offset(&self) -> usize {
        let Some(selected) = self.selected else {
            return self.display_len();
        };
        let seg = self.placeholders[selected];
        let before: usize = self.segments[..seg].iter().map(Segment::display_len).sum();
        before + self.segments[seg].caret_offset()
    }

    /// Currently rendered text.
    pub fn text(&self) -> String {
        self.segments.iter().map(Segment::display_text).collect()
    }

    /// Reassemble the template from segment source forms.
    pub fn source(&self) -> String {
        self.segments.iter().map(|s| s.source()).collect()
    }

    /// Name to value mapping. Duplicate names keep the last placeholder's value.
    pub fn results(&self) -> BTreeMap<String, String> {
        self.placeholders()
            .map(|p| (p.name().to_string(), p.value().to_string()))
            .collect()
    }

    pub fn finish(&self) -> PromptResult {
        PromptResult {
            template: self.raw.clone(),
            text: self.text(),
            results: self.results(),
        }
    }
}
