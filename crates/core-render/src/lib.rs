//! Inline prompt rendering: command buffer, placeholder styles, and the
//! relative-cursor render engine.
//!
//! Invariants:
//! - Every redraw starts by walking back to the prompt start from the caret
//!   the previous redraw left behind, so the line never drifts.
//! - Widths are display columns (grapheme widths), never bytes or chars.
//! - Zero-length moves are never emitted.
//! - Placeholder values are never logged; only widths and offsets.

pub mod metrics;
pub mod render_engine;
pub mod style;
pub mod writer;

pub use metrics::RenderMetricsSnapshot;
pub use render_engine::{DrawnFrame, RenderEngine};
pub use style::{SegmentStyle, StyleSheet};
pub use writer::{Command, Writer};
