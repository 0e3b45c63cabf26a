//! Command hooks: handlers bound to trigger strings.
//!
//! When the selected placeholder's value equals a registered trigger exactly,
//! the session lends its `PromptIo` to the handler and waits for the reply.
//! The handler may read events from the queue and write to the terminal for
//! as long as it runs; the borrow ends when its future resolves.
//!
//! Design Notes:
//! - Handlers are trait objects behind `Arc` so one handler can serve several
//!   triggers and the session can hold it across the lend of `&mut PromptIo`.
//! - The future is boxed by hand (`HookFuture`) to keep the trait object safe.
//! - A reply is only accepted after `contract::accept_reply`; anything that
//!   would break single-line caret accounting is rejected there.

pub mod contract;
mod handlers;

pub use contract::{ContractBreach, accept_reply};
pub use handlers::{FnHandler, ShellCommandHandler, handler_fn};

use core_terminal::PromptIo;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

pub type HookFuture<'a> = Pin<Box<dyn Future<Output = Result<String, HookError>> + Send + 'a>>;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}")]
    Status {
        command: String,
        status: std::process::ExitStatus,
    },
    #[error("reply is not valid UTF-8")]
    NonUtf8,
    #[error("{0}")]
    Failed(String),
}

/// Handler invoked when a placeholder value matches its trigger.
pub trait CommandHandler: Send + Sync {
    /// Stable identifier for logs.
    fn name(&self) -> &str;
    /// Run the command. `io` is exclusively the handler's until the returned
    /// future resolves.
    fn invoke<'a>(&'a self, io: &'a mut PromptIo) -> HookFuture<'a>;
}

impl<T: CommandHandler + ?Sized> CommandHandler for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn invoke<'a>(&'a self, io: &'a mut PromptIo) -> HookFuture<'a> {
        (**self).invoke(io)
    }
}

/// Trigger -> handler lookup. Triggers match whole values only.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `trigger` to `handler`, replacing any previous binding.
    pub fn register<H>(&mut self, trigger: impl Into<String>, handler: H)
    where
        H: CommandHandler + 'static,
    {
        self.register_arc(trigger, Arc::new(handler));
    }

    pub fn register_arc(&mut self, trigger: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        let trigger = trigger.into();
        tracing::debug!(target: "session.hook", handler = handler.name(), trigger_len = trigger.len(), "register");
        self.handlers.insert(trigger, handler);
    }

    pub fn get(&self, value: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(value).cloned()
    }

    /// Registered triggers, sorted.
    pub fn triggers(&self) -> Vec<&str> {
        let mut t: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        t.sort_unstable();
        t
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("triggers", &self.triggers())
            .finish()
    }
}
