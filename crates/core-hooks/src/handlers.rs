//! Built-in handlers: closures and shell lines.

use crate::{CommandHandler, HookError, HookFuture};
use core_terminal::PromptIo;
use std::future::Future;
use std::process::Stdio;
use tokio::process::Command;

/// Handler backed by a closure producing the reply. The closure never sees
/// the I/O context; implement `CommandHandler` directly for handlers that
/// read keys or draw.
pub struct FnHandler<F> {
    name: String,
    f: F,
}

pub fn handler_fn<F, Fut>(name: impl Into<String>, f: F) -> FnHandler<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, HookError>> + Send + 'static,
{
    FnHandler {
        name: name.into(),
        f,
    }
}

impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, HookError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke<'a>(&'a self, _io: &'a mut PromptIo) -> HookFuture<'a> {
        Box::pin((self.f)())
    }
}

/// Runs `sh -c <line>` and replies with its stdout minus trailing line breaks.
/// Stdin is closed and stderr captured so the child never touches the prompt
/// line. A non-zero exit status is a handler error.
#[derive(Debug, Clone)]
pub struct ShellCommandHandler {
    shell: String,
    line: String,
}

impl ShellCommandHandler {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            shell: "sh".to_string(),
            line: line.into(),
        }
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    async fn run(&self) -> Result<String, HookError> {
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(&self.line)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| HookError::Spawn {
                command: self.shell.clone(),
                source,
            })?;
        tracing::debug!(
            target: "session.hook",
            status = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "shell_exit"
        );
        if !output.status.success() {
            return Err(HookError::Status {
                command: self.line.clone(),
                status: output.status,
            });
        }
        let text = String::from_utf8(output.stdout).map_err(|_| HookError::NonUtf8)?;
        Ok(text.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl CommandHandler for ShellCommandHandler {
    fn name(&self) -> &str {
        "shell"
    }

    fn invoke<'a>(&'a self, _io: &'a mut PromptIo) -> HookFuture<'a> {
        Box::pin(self.run())
    }
}
