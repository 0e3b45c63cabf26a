//! Inline prompt renderer.
//!
//! The prompt occupies one line starting wherever the cursor was when the
//! session began. Nothing is ever positioned absolutely during editing: each
//! cycle walks back to the start of the previous draw, clears to the end of
//! the line, prints every segment, then walks back by the full width and
//! forward to the caret target.
//!
//! The engine remembers where it left the caret (`DrawnFrame`), which is the
//! exact distance back to the prompt start for the next cycle.

use crate::metrics::{RenderMetrics, RenderMetricsSnapshot};
use crate::style::StyleSheet;
use crate::writer::Writer;
use anyhow::Result;
use core_template::{Segment, Template};
use std::io::Write;
use std::sync::atomic::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnFrame {
    /// Caret column relative to the prompt start.
    pub caret: usize,
    /// Total display width drawn.
    pub width: usize,
}

#[derive(Debug, Default)]
pub struct RenderEngine {
    style: StyleSheet,
    drawn: Option<DrawnFrame>,
    metrics: RenderMetrics,
}

impl RenderEngine {
    pub fn new(style: StyleSheet) -> Self {
        Self {
            style,
            drawn: None,
            metrics: RenderMetrics::default(),
        }
    }

    pub fn drawn(&self) -> Option<DrawnFrame> {
        self.drawn
    }

    /// Build the commands for one redraw without touching the terminal.
    pub fn plan(&self, template: &Template) -> Writer {
        let mut w = Writer::new();
        if let Some(prev) = self.drawn {
            w.move_left(prev.caret);
            w.clear_to_end_of_line();
        }
        for seg in template.segments() {
            match seg {
                Segment::Literal(l) => w.print(l.text()),
                Segment::Placeholder(p) => {
                    let kind = self.style.classify(p);
                    w.styled(p.display_text(), self.style.content_style(kind));
                }
            }
        }
        w.move_left(template.display_len());
        w.move_right(template.caret_offset());
        w
    }

    pub fn render(&mut self, template: &Template, out: &mut (dyn Write + Send)) -> Result<()> {
        let w = self.plan(template);
        let width = template.display_len();
        let caret = template.caret_offset();
        self.metrics.record_commands(w.commands().len());
        w.flush_to(out)?;
        self.drawn = Some(DrawnFrame { caret, width });
        self.metrics.frames.fetch_add(1, Ordering::Relaxed);
        self.metrics
            .last_frame_width
            .store(width as u64, Ordering::Relaxed);
        tracing::trace!(target: "render.engine", width, caret, "frame");
        Ok(())
    }

    /// Remove the prompt line entirely. A no-op when nothing is drawn.
    pub fn erase(&mut self, out: &mut (dyn Write + Send)) -> Result<()> {
        let Some(prev) = self.drawn.take() else {
            return Ok(());
        };
        let mut w = Writer::new();
        w.move_left(prev.caret);
        w.clear_line();
        self.metrics.record_commands(w.commands().len());
        w.flush_to(out)?;
        self.metrics.erases.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(target: "render.engine", width = prev.width, "erase");
        Ok(())
    }

    /// Return to column 0 of `row`, clear everything below, and forget the
    /// previous frame so the next render draws fresh from there.
    pub fn reset_at_row(&mut self, row: u16, out: &mut (dyn Write + Send)) -> Result<()> {
        let mut w = Writer::new();
        w.move_to(0, row);
        w.clear_below();
        self.metrics.record_commands(w.commands().len());
        w.flush_to(out)?;
        self.drawn = None;
        self.metrics.row_resets.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(target: "render.engine", row, "row_reset");
        Ok(())
    }

    pub fn metrics_snapshot(&self) -> RenderMetricsSnapshot {
        self.metrics.snapshot()
    }
}
