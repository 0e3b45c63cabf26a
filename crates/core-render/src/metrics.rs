//! Render counters.
//!
//! Counts what the engine actually emitted, so tests and the shutdown log can
//! tell full redraws from erases and row resets.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RenderMetrics {
    /// Prompt redraws (first draw included).
    pub frames: AtomicU64,
    /// Final erases on confirm or interrupt.
    pub erases: AtomicU64,
    /// Absolute returns to a recorded row after a command handler ran.
    pub row_resets: AtomicU64,
    /// Terminal commands queued across all cycles.
    pub commands: AtomicU64,
    /// Display width of the most recent frame.
    pub last_frame_width: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderMetricsSnapshot {
    pub frames: u64,
    pub erases: u64,
    pub row_resets: u64,
    pub commands: u64,
    pub last_frame_width: u64,
}

impl RenderMetrics {
    pub(crate) fn record_commands(&self, n: usize) {
        self.commands.fetch_add(n as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RenderMetricsSnapshot {
        RenderMetricsSnapshot {
            frames: self.frames.load(Ordering::Relaxed),
            erases: self.erases.load(Ordering::Relaxed),
            row_resets: self.row_resets.load(Ordering::Relaxed),
            commands: self.commands.load(Ordering::Relaxed),
            last_frame_width: self.last_frame_width.load(Ordering::Relaxed),
        }
    }
}
