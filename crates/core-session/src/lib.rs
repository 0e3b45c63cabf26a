//! The editing session: one template, one I/O context, one loop.
//!
//! `Session::run` draws the prompt, then consumes input events strictly in
//! arrival order until the user confirms or interrupts. The only reentrant
//! point is the command hook, where the session suspends its listener and
//! lends `&mut PromptIo` to the matched handler.

mod error;
mod listener;
mod session;

pub use error::SessionError;
pub use listener::ListenerState;
pub use session::Session;
