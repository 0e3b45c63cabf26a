//! Explicit I/O context for a prompt session.
//!
//! `PromptIo` bundles the three process-wide resources a prompt touches: the
//! input event queue, the output stream, and the terminal backend. It is
//! constructed once and passed by `&mut` to whoever currently owns the
//! terminal. A command handler receives the same `&mut PromptIo` for the
//! duration of its run, so exclusive ownership is a borrow, not a convention.
//!
//! The prompt row is queried once and cached. The cursor query reads its
//! reply from the same input reader the event stream holds, so it has to run
//! before the input task starts; call [`PromptIo::anchor_row`] at that point.

use crate::TerminalBackend;
use anyhow::Result;
use core_events::Event;
use std::io::Write;
use tokio::sync::mpsc::Receiver;
use tracing::debug;

pub struct PromptIo {
    events: Receiver<Event>,
    out: Box<dyn Write + Send>,
    terminal: Box<dyn TerminalBackend + Send>,
    anchor: Option<u16>,
}

impl PromptIo {
    pub fn new(
        events: Receiver<Event>,
        out: Box<dyn Write + Send>,
        terminal: Box<dyn TerminalBackend + Send>,
    ) -> Self {
        Self {
            events,
            out,
            terminal,
            anchor: None,
        }
    }

    /// Next event in arrival order, or `None` once the input source is gone.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    pub fn out(&mut self) -> &mut (dyn Write + Send) {
        self.out.as_mut()
    }

    /// Row the prompt line is drawn on. The terminal is asked only the first
    /// time; the prompt is a single line and every redraw returns to this row.
    pub fn anchor_row(&mut self) -> Result<u16> {
        if let Some(row) = self.anchor {
            return Ok(row);
        }
        let row = self.terminal.cursor_row()?;
        debug!(target: "terminal", row, "prompt_row_anchored");
        self.anchor = Some(row);
        Ok(row)
    }

    pub fn terminal(&mut self) -> &mut (dyn TerminalBackend + Send) {
        self.terminal.as_mut()
    }

    /// Release the input source. Producers observe the closed channel and stop; events
    /// already queued are discarded.
    pub fn close_input(&mut self) {
        self.events.close();
    }
}

impl std::fmt::Debug for PromptIo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptIo").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeadlessBackend, MemorySink};
    use core_events::{InputEvent, KeyCode, KeyEvent};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn events_arrive_in_order() {
        let (tx, rx) = mpsc::channel(4);
        let mut io = PromptIo::new(
            rx,
            Box::new(MemorySink::default()),
            Box::new(HeadlessBackend::new(0)),
        );
        for c in ['a', 'b'] {
            tx.send(Event::Input(InputEvent::Key(KeyEvent::plain(KeyCode::Char(c)))))
                .await
                .unwrap();
        }
        drop(tx);

        let first = io.next_event().await;
        let second = io.next_event().await;
        assert_eq!(
            first,
            Some(Event::Input(InputEvent::Key(KeyEvent::plain(KeyCode::Char('a')))))
        );
        assert_eq!(
            second,
            Some(Event::Input(InputEvent::Key(KeyEvent::plain(KeyCode::Char('b')))))
        );
        assert_eq!(io.next_event().await, None);
    }

    #[tokio::test]
    async fn close_input_rejects_further_sends() {
        let (tx, rx) = mpsc::channel(4);
        let mut io = PromptIo::new(
            rx,
            Box::new(MemorySink::default()),
            Box::new(HeadlessBackend::new(0)),
        );
        io.close_input();
        assert!(tx.send(Event::Shutdown).await.is_err());
    }

    #[test]
    fn writes_reach_the_sink() {
        let (_tx, rx) = mpsc::channel(1);
        let sink = MemorySink::default();
        let mut io = PromptIo::new(
            rx,
            Box::new(sink.clone()),
            Box::new(HeadlessBackend::new(7)),
        );
        write!(io.out(), "hi").unwrap();
        io.out().flush().unwrap();
        assert_eq!(sink.contents(), "hi");
        assert_eq!(io.anchor_row().unwrap(), 7);
    }

    /// Answers the first cursor query, then fails like a reader that is busy.
    struct OneShotBackend {
        queries: usize,
    }

    impl TerminalBackend for OneShotBackend {
        fn enter(&mut self) -> Result<()> {
            Ok(())
        }
        fn leave(&mut self) -> Result<()> {
            Ok(())
        }
        fn cursor_row(&mut self) -> Result<u16> {
            self.queries += 1;
            if self.queries > 1 {
                anyhow::bail!("cursor position could not be read");
            }
            Ok(4)
        }
    }

    #[test]
    fn anchor_row_queries_the_terminal_once() {
        let (_tx, rx) = mpsc::channel(1);
        let mut io = PromptIo::new(
            rx,
            Box::new(MemorySink::default()),
            Box::new(OneShotBackend { queries: 0 }),
        );
        assert_eq!(io.anchor_row().unwrap(), 4);
        assert_eq!(io.anchor_row().unwrap(), 4);
        assert_eq!(io.anchor_row().unwrap(), 4);
    }
}
