//! In-memory template model: ordered segments plus the placeholder selection.
//!
//! `Template::parse` turns `"hello {name}"` into a literal and a placeholder;
//! the editing layer mutates placeholder values and the selection, and the
//! renderer reads widths and the caret offset back out.

mod parser;
pub mod segment;
mod template;
pub mod width;

pub use segment::{Literal, Placeholder, Segment};
pub use template::{PromptResult, Template};
pub use width::display_width;
