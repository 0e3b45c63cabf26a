use crate::key_token::map_key_event;
use crate::log_paste;
use core_events::{
    ASYNC_INPUT_STARTS, ASYNC_INPUT_STOP_CHANNEL, ASYNC_INPUT_STOP_ERROR, ASYNC_INPUT_STOP_SIGNAL,
    ASYNC_INPUT_STOP_STREAM, CHANNEL_SEND_FAILURES, CHANNEL_SENDS, Event, InputEvent,
    KEYPRESS_TOTAL, PASTE_BYTES, PASTE_EVENTS,
};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event as CEvent, EventStream,
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKind,
    KeyModifiers as CKeyModifiers,
};
use crossterm::execute;
use std::io;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::{Notify, mpsc::Sender};
use tokio::task;
use tokio_stream::StreamExt;
use tracing::{debug, info, trace, warn};

#[derive(Clone, Debug)]
pub struct AsyncInputShutdown {
    notify: Arc<Notify>,
}

impl AsyncInputShutdown {
    pub fn signal(&self) {
        self.notify.notify_one();
    }
}

#[derive(Clone, Debug)]
struct ShutdownListener {
    notify: Arc<Notify>,
}

impl ShutdownListener {
    fn new_pair() -> (AsyncInputShutdown, Self) {
        let notify = Arc::new(Notify::new());
        (
            AsyncInputShutdown {
                notify: notify.clone(),
            },
            ShutdownListener { notify },
        )
    }

    async fn wait(&self) {
        self.notify.notified().await;
    }
}

/// Spawn a Tokio task forwarding terminal events from `EventStream` into `sender`.
pub(crate) fn spawn_async_event_task(
    sender: Sender<Event>,
) -> (task::JoinHandle<()>, AsyncInputShutdown) {
    let (shutdown, listener) = ShutdownListener::new_pair();
    let handle = task::spawn(async move {
        let span = tracing::debug_span!(target: "input.thread", "input_async_task");
        let _enter = span.enter();

        if let Err(join_err) = task::spawn_blocking(enable_bracketed_paste).await {
            debug!(target: "input.paste", ?join_err, "enable_failed_join");
        }

        let stream = EventStream::new();
        AsyncEventStreamTask::new(sender, stream, listener)
            .run()
            .await;

        if let Err(join_err) = task::spawn_blocking(disable_bracketed_paste).await {
            debug!(target: "input.paste", ?join_err, "disable_failed_join");
        }
    });

    (handle, shutdown)
}

fn enable_bracketed_paste() {
    if let Err(e) = execute!(io::stdout(), EnableBracketedPaste) {
        debug!(target: "input.paste", ?e, "enable_failed");
    }
}

fn disable_bracketed_paste() {
    if let Err(e) = execute!(io::stdout(), DisableBracketedPaste) {
        debug!(target: "input.paste", ?e, "disable_failed");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExitReason {
    Running,
    ShutdownSignal,
    ChannelClosed,
    StreamEnded,
    StreamError,
}

impl ExitReason {
    fn as_str(&self) -> &'static str {
        match self {
            ExitReason::Running => "running",
            ExitReason::ShutdownSignal => "shutdown_signal",
            ExitReason::ChannelClosed => "channel_closed",
            ExitReason::StreamEnded => "stream_ended",
            ExitReason::StreamError => "stream_error",
        }
    }
}

struct AsyncEventStreamTask<S>
where
    S: tokio_stream::Stream<Item = io::Result<CEvent>> + Send + Unpin + 'static,
{
    sender: Sender<Event>,
    stream: S,
    shutdown: ShutdownListener,
    exit_reason: ExitReason,
    stream_error: Option<io::ErrorKind>,
}

impl<S> AsyncEventStreamTask<S>
where
    S: tokio_stream::Stream<Item = io::Result<CEvent>> + Send + Unpin + 'static,
{
    fn new(sender: Sender<Event>, stream: S, shutdown: ShutdownListener) -> Self {
        Self {
            sender,
            stream,
            shutdown,
            exit_reason: ExitReason::Running,
            stream_error: None,
        }
    }

    pub async fn run(mut self) {
        info!(target: "input.thread", "async_input_task_started");
        ASYNC_INPUT_STARTS.fetch_add(1, Ordering::Relaxed);
        self.exit_reason = ExitReason::StreamEnded;
        loop {
            let maybe_result = tokio::select! {
                biased;
                _ = self.shutdown.wait() => {
                    self.exit_reason = ExitReason::ShutdownSignal;
                    break;
                }
                result = self.stream.next() => result,
            };

            let Some(result) = maybe_result else {
                break;
            };

            let keep_going = match result {
                Ok(CEvent::Key(key)) => self.handle_key_event(key).await,
                Ok(CEvent::Resize(w, h)) => {
                    trace!(target: "input.event", w, h, "resize");
                    self.send_event(Event::Input(InputEvent::Resize(w, h)))
                        .await
                }
                Ok(CEvent::Paste(data)) => self.handle_paste(data).await,
                Ok(_) => true,
                Err(err) => {
                    self.exit_reason = ExitReason::StreamError;
                    self.stream_error = Some(err.kind());
                    false
                }
            };
            if !keep_going {
                break;
            }
        }

        let reason = match self.exit_reason {
            ExitReason::Running => ExitReason::StreamEnded,
            other => other,
        };

        match reason {
            ExitReason::ShutdownSignal => {
                ASYNC_INPUT_STOP_SIGNAL.fetch_add(1, Ordering::Relaxed);
            }
            ExitReason::ChannelClosed => {
                ASYNC_INPUT_STOP_CHANNEL.fetch_add(1, Ordering::Relaxed);
            }
            ExitReason::StreamEnded => {
                ASYNC_INPUT_STOP_STREAM.fetch_add(1, Ordering::Relaxed);
            }
            ExitReason::StreamError => {
                ASYNC_INPUT_STOP_ERROR.fetch_add(1, Ordering::Relaxed);
            }
            ExitReason::Running => {}
        }

        // The consumer must learn that no more input is coming, unless it is the one that left.
        if matches!(reason, ExitReason::StreamEnded | ExitReason::StreamError) {
            let _ = self.sender.send(Event::Shutdown).await;
        }

        if matches!(reason, ExitReason::StreamError) {
            if let Some(kind) = self.stream_error {
                warn!(target: "input.thread", error_kind = ?kind, "async_input_task_stream_error");
            } else {
                warn!(target: "input.thread", "async_input_task_stream_error");
            }
        }

        info!(target: "input.thread", reason = reason.as_str(), "async_input_task_stopped");
    }

    async fn handle_key_event(&mut self, key: CKeyEvent) -> bool {
        if !matches!(key.kind, CKind::Press | CKind::Repeat) {
            return true;
        }

        if matches!(key.code, CKeyCode::Char('c') | CKeyCode::Char('C'))
            && key.modifiers.contains(CKeyModifiers::CONTROL)
        {
            return self.send_event(Event::Input(InputEvent::CtrlC)).await;
        }

        let Some(mapped) = map_key_event(&key) else {
            return true;
        };

        trace!(
            target: "input.event",
            kind = "keypress",
            mods = ?mapped.mods,
            printable = mapped.printable().is_some()
        );

        let sent = self.send_event(Event::Input(InputEvent::Key(mapped))).await;
        if sent {
            KEYPRESS_TOTAL.fetch_add(1, Ordering::Relaxed);
        }
        sent
    }

    async fn handle_paste(&mut self, data: String) -> bool {
        log_paste(&data);
        let size = data.len() as u64;
        let sent = self.send_event(Event::Input(InputEvent::Paste(data))).await;
        if sent {
            PASTE_EVENTS.fetch_add(1, Ordering::Relaxed);
            PASTE_BYTES.fetch_add(size, Ordering::Relaxed);
        }
        sent
    }

    async fn send_event(&mut self, event: Event) -> bool {
        match self.sender.send(event).await {
            Ok(_) => {
                CHANNEL_SENDS.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(_) => {
                CHANNEL_SEND_FAILURES.fetch_add(1, Ordering::Relaxed);
                if !matches!(self.exit_reason, ExitReason::ShutdownSignal) {
                    self.exit_reason = ExitReason::ChannelClosed;
                }
                false
            }
        }
    }
}
