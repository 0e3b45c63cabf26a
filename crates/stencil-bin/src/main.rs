//! stencil entrypoint.
mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Args, OutputFormat};
use core_config::{Config, load_from};
use core_events::{EVENT_CHANNEL_CAP, Event};
use core_hooks::{CommandRegistry, ShellCommandHandler};
use core_render::StyleSheet;
use core_session::{Session, SessionError};
use core_template::{PromptResult, Template};
use core_terminal::{CrosstermBackend, PromptIo, TerminalBackend, TerminalCapabilities};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tokio::sync::mpsc;
use tracing::{error, info, trace, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "stencil.log";

struct AppStartup {
    args: Args,
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new(args: Args) -> Self {
        Self {
            args,
            log_guard: None,
        }
    }

    async fn run(&mut self) -> Result<ExitCode> {
        let config = load_from(self.args.config.clone())?;
        self.configure_logging(&config);
        config.log_status();
        Self::install_panic_hook();

        info!(
            target: "runtime.startup",
            config = ?config.path,
            config_override = self.args.config.is_some(),
            cli_commands = self.args.commands.len(),
            "startup"
        );

        let caps = TerminalCapabilities::detect();
        if !caps.interactive {
            bail!("stdout is not a terminal; stencil needs an interactive terminal");
        }

        let registry = build_registry(&config, &self.args.commands);
        let style = build_style(&config).with_enabled(caps.supports_color);
        let template = Template::parse(&self.args.template);

        let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
        // Raw mode before the input task starts so no keystroke is echoed.
        let mut backend = CrosstermBackend::new();
        backend.enter()?;
        let mut io = PromptIo::new(rx, Box::new(std::io::stdout()), Box::new(backend));
        // The cursor query cannot be answered once the event stream owns the reader.
        if !registry.is_empty() {
            io.anchor_row()?;
        }
        let (input_task, input_shutdown) = core_input::spawn_async_input(tx);

        let outcome = Session::new(template, registry, style, io).run().await;

        input_shutdown.signal();
        match input_task.await {
            Ok(()) => trace!(target: "runtime.shutdown", "input_task_joined"),
            Err(err) => error!(target: "runtime.shutdown", ?err, "input_task_join_failed"),
        }
        log_input_telemetry();

        match outcome {
            Ok(result) => {
                println!("{}", format_result(&result, self.args.format)?);
                info!(target: "runtime", "exit_confirmed");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                info!(target: "runtime", kind = e.kind_label(), code = e.exit_code(), "exit_error");
                if !matches!(e, SessionError::Interrupted) {
                    eprintln!("stencil: {e:#}");
                }
                Ok(ExitCode::from(e.exit_code()))
            }
        }
    }

    fn configure_logging(&mut self, config: &Config) {
        let path = resolve_log_path(self.args.log_file.as_deref(), config.log_file());
        let dir = match path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| LOG_FILE_NAME.into());

        let file_appender = tracing_appender::rolling::never(dir, file_name);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_ansi(false)
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                // The prompt may be mid-draw in raw mode; restore before printing.
                let _ = crossterm::terminal::disable_raw_mode();
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn log_input_telemetry() {
    use core_events::{CHANNEL_SEND_FAILURES, CHANNEL_SENDS, KEYPRESS_TOTAL, PASTE_EVENTS};
    use std::sync::atomic::Ordering::Relaxed;
    info!(
        target: "runtime.shutdown",
        keypresses = KEYPRESS_TOTAL.load(Relaxed),
        pastes = PASTE_EVENTS.load(Relaxed),
        sends = CHANNEL_SENDS.load(Relaxed),
        send_failures = CHANNEL_SEND_FAILURES.load(Relaxed),
        "input_telemetry"
    );
}

/// `--log-file`, then `[log] file`, then `stencil.log` in the temp directory.
fn resolve_log_path(cli: Option<&Path>, config: Option<&Path>) -> PathBuf {
    cli.or(config)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME))
}

/// Shell triggers from the config, then from the command line (which wins).
fn build_registry(config: &Config, cli_commands: &[(String, String)]) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    let from_config = config.shell_commands();
    let from_cli = cli_commands.iter().map(|(t, l)| (t.as_str(), l.as_str()));
    for (trigger, line) in from_config.chain(from_cli) {
        if !trigger.starts_with(config.sentinel()) {
            warn!(target: "config", trigger_len = trigger.len(), "trigger_without_sentinel");
        }
        registry.register(trigger, ShellCommandHandler::new(line));
    }
    registry
}

fn build_style(config: &Config) -> StyleSheet {
    let style = &config.file.style;
    StyleSheet::from_names(
        style.placeholder.as_deref(),
        style.value.as_deref(),
        style.pending.as_deref(),
        config.sentinel(),
    )
}

fn format_result(result: &PromptResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Text => result.text.clone(),
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut startup = AppStartup::new(Args::parse());
    match startup.run().await {
        Ok(code) => code,
        Err(e) => {
            error!(target: "runtime", error = %e, "fatal");
            eprintln!("stencil: {e:#}");
            ExitCode::FAILURE
        }
    }
}
