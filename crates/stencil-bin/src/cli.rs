use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name = "stencil",
    version,
    about = "Fill the {placeholders} of a command template interactively"
)]
pub struct Args {
    /// Template text; each `{name}` becomes an editable placeholder.
    pub template: String,
    /// Configuration file path (overrides discovery of `stencil.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Bind a trigger to a shell line, e.g. `--command ':now=date +%H:%M'`. Repeatable;
    /// overrides triggers of the same name from the config file.
    #[arg(long = "command", value_name = "TRIGGER=SHELL", value_parser = parse_command)]
    pub commands: Vec<(String, String)>,
    /// How the confirmed result is printed.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
    /// Log file path (overrides `[log] file` from the config).
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{ template, text, results }` pretty printed.
    Json,
    /// The filled text only.
    Text,
}

pub fn parse_command(s: &str) -> Result<(String, String), String> {
    let (trigger, line) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TRIGGER=SHELL, got `{s}`"))?;
    if trigger.is_empty() {
        return Err("trigger must not be empty".to_string());
    }
    if line.trim().is_empty() {
        return Err(format!("shell line for `{trigger}` is empty"));
    }
    Ok((trigger.to_string(), line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn command_splits_on_first_equals() {
        assert_eq!(
            parse_command(":env=printenv A=B").unwrap(),
            (":env".to_string(), "printenv A=B".to_string())
        );
    }

    #[test]
    fn command_rejects_malformed() {
        assert!(parse_command(":now").is_err());
        assert!(parse_command("=date").is_err());
        assert!(parse_command(":now=  ").is_err());
    }

    #[test]
    fn args_defaults_and_repeats() {
        let args = Args::try_parse_from([
            "stencil",
            "GET /users/{id}",
            "--command",
            ":a=echo a",
            "--command",
            ":b=echo b",
        ])
        .unwrap();
        assert_eq!(args.template, "GET /users/{id}");
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.commands.len(), 2);
        assert!(args.config.is_none());
    }

    #[test]
    fn text_format_flag() {
        let args = Args::try_parse_from(["stencil", "x", "--format", "text"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn template_is_required() {
        assert!(Args::try_parse_from(["stencil"]).is_err());
    }
}
