#![allow(dead_code)]

use anyhow::Result;
use core_events::{EVENT_CHANNEL_CAP, Event, InputEvent, KeyCode, KeyEvent};
use core_hooks::CommandRegistry;
use core_render::StyleSheet;
use core_session::Session;
use core_template::Template;
use core_terminal::{MemorySink, PromptIo, TerminalBackend};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Backend recording raw-mode transitions so tests can check restoration.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    pub row: u16,
    pub log: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingBackend {
    pub fn transitions(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().clone()
    }
}

impl TerminalBackend for RecordingBackend {
    fn enter(&mut self) -> Result<()> {
        self.log.lock().unwrap().push("enter");
        Ok(())
    }
    fn leave(&mut self) -> Result<()> {
        self.log.lock().unwrap().push("leave");
        Ok(())
    }
    fn cursor_row(&mut self) -> Result<u16> {
        Ok(self.row)
    }
}

/// Terminal whose cursor query fails while an input task holds the reader,
/// the way a live event stream swallows the position reply.
#[derive(Clone, Default)]
pub struct SharedReaderBackend {
    pub row: u16,
    pub held: Arc<AtomicBool>,
}

impl TerminalBackend for SharedReaderBackend {
    fn enter(&mut self) -> Result<()> {
        Ok(())
    }
    fn leave(&mut self) -> Result<()> {
        Ok(())
    }
    fn cursor_row(&mut self) -> Result<u16> {
        if self.held.load(Ordering::SeqCst) {
            anyhow::bail!("The cursor position could not be read within a normal duration");
        }
        Ok(self.row)
    }
}

impl SharedReaderBackend {
    /// Start an input task that takes the reader, then sends `events`. The
    /// reader is released once the session drops its receiver.
    pub fn spawn_input(
        &self,
        tx: mpsc::Sender<Event>,
        events: Vec<Event>,
    ) -> tokio::task::JoinHandle<()> {
        let held = self.held.clone();
        held.store(true, Ordering::SeqCst);
        tokio::spawn(async move {
            for e in events {
                if tx.send(e).await.is_err() {
                    break;
                }
            }
            tx.closed().await;
            held.store(false, Ordering::SeqCst);
        })
    }
}

pub struct Harness {
    pub tx: mpsc::Sender<Event>,
    pub sink: MemorySink,
    pub backend: RecordingBackend,
    pub session: Session,
}

pub fn harness(template: &str, registry: CommandRegistry) -> Harness {
    harness_at_row(template, registry, 0)
}

pub fn harness_at_row(template: &str, registry: CommandRegistry, row: u16) -> Harness {
    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAP);
    let sink = MemorySink::default();
    let backend = RecordingBackend {
        row,
        ..Default::default()
    };
    let io = PromptIo::new(rx, Box::new(sink.clone()), Box::new(backend.clone()));
    let session = Session::new(Template::parse(template), registry, StyleSheet::plain(), io);
    Harness {
        tx,
        sink,
        backend,
        session,
    }
}

pub fn key(c: char) -> Event {
    Event::Input(InputEvent::Key(KeyEvent::plain(KeyCode::Char(c))))
}

pub fn named(code: KeyCode) -> Event {
    Event::Input(InputEvent::Key(KeyEvent::plain(code)))
}

pub fn ctrl_c() -> Event {
    Event::Input(InputEvent::CtrlC)
}

pub fn typed(s: &str) -> Vec<Event> {
    s.chars().map(key).collect()
}

pub async fn feed(tx: &mpsc::Sender<Event>, events: impl IntoIterator<Item = Event>) {
    for e in events {
        tx.send(e).await.unwrap();
    }
}
