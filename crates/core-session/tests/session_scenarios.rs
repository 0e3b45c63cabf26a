mod common;

use common::{SharedReaderBackend, ctrl_c, feed, harness, harness_at_row, key, named, typed};
use core_events::{EVENT_CHANNEL_CAP, Event, InputEvent, KeyCode};
use core_hooks::{CommandHandler, CommandRegistry, HookError, HookFuture, handler_fn};
use core_render::StyleSheet;
use core_session::{Session, SessionError};
use core_template::Template;
use core_terminal::{MemorySink, PromptIo};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::io::Write;
use tokio::sync::mpsc;

fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn clock() -> CommandRegistry {
    let mut reg = CommandRegistry::new();
    reg.register(":now", handler_fn("clock", || async { Ok("12:00".to_string()) }));
    reg
}

#[tokio::test]
async fn two_placeholders_typed_and_cycled() {
    let h = harness("POST /devices/{deviceId}/roles/{roleId}/sd", CommandRegistry::new());
    let mut events = typed("42");
    events.push(named(KeyCode::Tab));
    events.extend(typed("7"));
    events.push(named(KeyCode::Enter));
    feed(&h.tx, events).await;

    let result = h.session.run().await.unwrap();
    assert_eq!(result.text, "POST /devices/42/roles/7/sd");
    assert_eq!(result.results, map(&[("deviceId", "42"), ("roleId", "7")]));
    assert_eq!(result.template, "POST /devices/{deviceId}/roles/{roleId}/sd");
}

#[tokio::test]
async fn untouched_placeholder_keeps_its_name() {
    let h = harness("hello {name}", CommandRegistry::new());
    feed(&h.tx, [named(KeyCode::Enter)]).await;
    let result = h.session.run().await.unwrap();
    assert_eq!(result.text, "hello name");
    assert_eq!(result.results, map(&[("name", "")]));
}

#[tokio::test]
async fn no_placeholders_finishes_without_input() {
    let h = harness("ls -la", CommandRegistry::new());
    let result = h.session.run().await.unwrap();
    assert_eq!(result.text, "ls -la");
    assert!(result.results.is_empty());
    // The channel is released once the session finishes.
    assert!(h.tx.send(key('x')).await.is_err());
    assert!(h.sink.contents().ends_with("\x1b[2K"));
}

#[tokio::test]
async fn trigger_replaces_value_and_editing_continues() {
    let h = harness("at {time}", clock());
    let mut events = typed(":now");
    events.extend(typed("!"));
    events.push(named(KeyCode::Enter));
    feed(&h.tx, events).await;

    let result = h.session.run().await.unwrap();
    assert_eq!(result.results, map(&[("time", "12:00!")]));
    assert_eq!(result.text, "at 12:00!");
}

#[tokio::test]
async fn partial_trigger_does_not_fire() {
    let h = harness("{time}", clock());
    let mut events = typed(":no");
    events.push(named(KeyCode::Enter));
    feed(&h.tx, events).await;
    let result = h.session.run().await.unwrap();
    assert_eq!(result.results, map(&[("time", ":no")]));
}

#[tokio::test]
async fn hook_returns_to_recorded_row() {
    let h = harness_at_row("{time}", clock(), 5);
    let mut events = typed(":now");
    events.push(named(KeyCode::Enter));
    feed(&h.tx, events).await;
    h.session.run().await.unwrap();
    // Column 0 of zero-based row 5, then clear below, then the fresh draw.
    assert!(h.sink.contents().contains("\x1b[6;1H\x1b[J12:00"));
}

fn clock_session(backend: &SharedReaderBackend) -> (mpsc::Sender<Event>, MemorySink, PromptIo) {
    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAP);
    let sink = MemorySink::default();
    let io = PromptIo::new(rx, Box::new(sink.clone()), Box::new(backend.clone()));
    (tx, sink, io)
}

#[tokio::test]
async fn hook_uses_row_anchored_before_input_starts() {
    let backend = SharedReaderBackend {
        row: 5,
        ..Default::default()
    };
    let (tx, sink, mut io) = clock_session(&backend);
    assert_eq!(io.anchor_row().unwrap(), 5);

    let mut events = typed(":now");
    events.push(named(KeyCode::Enter));
    let input = backend.spawn_input(tx, events);
    let session = Session::new(Template::parse("{time}"), clock(), StyleSheet::plain(), io);
    let result = session.run().await.unwrap();
    input.await.unwrap();

    assert_eq!(result.results, map(&[("time", "12:00")]));
    assert!(sink.contents().contains("\x1b[6;1H\x1b[J12:00"));
}

#[tokio::test]
async fn unanchored_hook_fails_while_input_holds_reader() {
    let backend = SharedReaderBackend::default();
    let (tx, _sink, io) = clock_session(&backend);
    let input = backend.spawn_input(tx, typed(":now"));
    let session = Session::new(Template::parse("{time}"), clock(), StyleSheet::plain(), io);
    let err = session.run().await.unwrap_err();
    input.await.unwrap();
    assert!(matches!(err, SessionError::Io(_)));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn paste_is_one_edit_with_one_hook_check() {
    let h = harness("{time}", clock());
    feed(
        &h.tx,
        [
            Event::Input(InputEvent::Paste(":now\n".into())),
            named(KeyCode::Enter),
        ],
    )
    .await;
    let result = h.session.run().await.unwrap();
    assert_eq!(result.results, map(&[("time", "12:00")]));
}

#[tokio::test]
async fn delete_on_empty_still_renders() {
    let h = harness("{x}", CommandRegistry::new());
    feed(
        &h.tx,
        [
            named(KeyCode::Backspace),
            named(KeyCode::Backspace),
            named(KeyCode::Enter),
        ],
    )
    .await;
    let result = h.session.run().await.unwrap();
    assert_eq!(result.results, map(&[("x", "")]));
    // Initial draw plus one per backspace.
    assert_eq!(h.sink.contents().matches('x').count(), 3);
}

#[tokio::test]
async fn backspace_removes_one_character() {
    let h = harness("{word}", CommandRegistry::new());
    let mut events = typed("héé");
    events.push(named(KeyCode::Backspace));
    events.push(named(KeyCode::Enter));
    feed(&h.tx, events).await;
    let result = h.session.run().await.unwrap();
    assert_eq!(result.results, map(&[("word", "hé")]));
}

#[tokio::test]
async fn unhandled_keys_are_ignored() {
    let h = harness("{a}", CommandRegistry::new());
    feed(
        &h.tx,
        [
            named(KeyCode::Left),
            named(KeyCode::Esc),
            Event::Input(InputEvent::Resize(100, 40)),
            key('z'),
            named(KeyCode::Enter),
        ],
    )
    .await;
    let result = h.session.run().await.unwrap();
    assert_eq!(result.results, map(&[("a", "z")]));
}

#[tokio::test]
async fn interrupt_erases_and_reports() {
    let h = harness("{a}", CommandRegistry::new());
    let mut events = typed("abc");
    events.push(ctrl_c());
    feed(&h.tx, events).await;
    let err = h.session.run().await.unwrap_err();
    assert!(matches!(err, SessionError::Interrupted));
    assert_eq!(err.exit_code(), 130);
    assert!(h.sink.contents().ends_with("\x1b[3D\x1b[2K"));
    assert_eq!(h.backend.transitions(), vec!["enter", "leave"]);
}

#[tokio::test]
async fn input_closed_is_an_error() {
    let h = harness("{a}", CommandRegistry::new());
    feed(&h.tx, typed("a")).await;
    drop(h.tx);
    let err = h.session.run().await.unwrap_err();
    assert!(matches!(err, SessionError::InputClosed));
}

#[tokio::test]
async fn shutdown_event_ends_session() {
    let h = harness("{a}", CommandRegistry::new());
    feed(&h.tx, [Event::Shutdown]).await;
    let err = h.session.run().await.unwrap_err();
    assert!(matches!(err, SessionError::InputClosed));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn multi_line_reply_is_contract_violation() {
    let mut reg = CommandRegistry::new();
    reg.register(":ls", handler_fn("ls", || async { Ok("a\nb".to_string()) }));
    let h = harness("{files}", reg);
    feed(&h.tx, typed(":ls")).await;
    let err = h.session.run().await.unwrap_err();
    match &err {
        SessionError::ContractViolation { trigger, .. } => assert_eq!(trigger, ":ls"),
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(err.exit_code(), 70);
    assert_eq!(h.backend.transitions(), vec!["enter", "leave"]);
}

#[tokio::test]
async fn failing_handler_is_contract_violation() {
    let mut reg = CommandRegistry::new();
    reg.register(
        ":x",
        handler_fn("boom", || async { Err(HookError::Failed("boom".into())) }),
    );
    let h = harness("{v}", reg);
    feed(&h.tx, typed(":x")).await;
    let err = h.session.run().await.unwrap_err();
    assert_eq!(err.exit_code(), 70);
}

/// Reads one key from the lent I/O context and replies with a color name.
struct Picker;

impl CommandHandler for Picker {
    fn name(&self) -> &str {
        "picker"
    }

    fn invoke<'a>(&'a self, io: &'a mut PromptIo) -> HookFuture<'a> {
        Box::pin(async move {
            write!(io.out(), "\r\n[r]ed [b]lue").map_err(|e| HookError::Failed(e.to_string()))?;
            loop {
                match io.next_event().await {
                    Some(Event::Input(InputEvent::Key(k))) => match k.printable() {
                        Some('r') => return Ok("red".to_string()),
                        Some('b') => return Ok("blue".to_string()),
                        _ => continue,
                    },
                    Some(_) => continue,
                    None => return Err(HookError::Failed("input closed".into())),
                }
            }
        })
    }
}

#[tokio::test]
async fn handler_owns_input_while_running() {
    let mut reg = CommandRegistry::new();
    reg.register(":c", Picker);
    let h = harness("color={color}", reg);
    let mut events = typed(":c");
    // Consumed by the handler, not inserted into the value.
    events.extend(typed("xb"));
    events.extend(typed("!"));
    events.push(named(KeyCode::Enter));
    feed(&h.tx, events).await;

    let result = h.session.run().await.unwrap();
    assert_eq!(result.results, map(&[("color", "blue!")]));
    assert!(h.sink.contents().contains("[r]ed [b]lue"));
}

#[tokio::test]
async fn interrupt_during_handler_is_handled_after_resume() {
    let mut reg = CommandRegistry::new();
    reg.register(":c", Picker);
    let h = harness("{color}", reg);
    let mut events = typed(":c");
    events.push(key('r'));
    // Queued behind the handler's key; the session sees it after resuming.
    events.push(ctrl_c());
    events.push(named(KeyCode::Enter));
    feed(&h.tx, events).await;
    let err = h.session.run().await.unwrap_err();
    assert!(matches!(err, SessionError::Interrupted));
}
