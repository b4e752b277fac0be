use std::io;

use anyhow::Result;
use bon::Builder;
use tracing::instrument;

use crate::cli::ui::Painter;
use crate::cli::{Command, LogLevel, OutputFormat};
use crate::telemetry;
use crate::terminal::{SystemTerminalClient, TerminalClient};

/// Options shared by every CLI command.
///
/// ```
/// use atem_codec::{LogLevel, OutputFormat, RunOptions};
///
/// let options = RunOptions::builder()
///     .log_level(LogLevel::Debug)
///     .output_format(OutputFormat::Json)
///     .build();
/// assert_eq!(OutputFormat::Json, options.output_format());
/// ```
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct RunOptions {
    log_level: Option<LogLevel>,
    #[builder(default)]
    output_format: OutputFormat,
}

impl RunOptions {
    #[must_use]
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level
    }

    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

/// Runs a CLI command against the real process streams.
///
/// ```
/// use atem_codec::{Command, OutputFormat, RunOptions};
///
/// let mut out = Vec::new();
/// let options = RunOptions::builder().output_format(OutputFormat::Json).build();
/// atem_codec::run(Command::Tags, &mut out, options)?;
/// assert!(String::from_utf8(out)?.contains(r#""tag":"PrgI""#));
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if tracing initialisation fails, a frame cannot be
/// decoded, or output writing fails.
pub fn run<W>(command: Command, out: &mut W, options: RunOptions) -> Result<()>
where
    W: io::Write,
{
    run_with_terminal(command, out, &SystemTerminalClient, options)
}

/// Runs a CLI command with an injected terminal client.
///
/// # Errors
///
/// Returns an error if tracing initialisation fails, a frame cannot be
/// decoded, or output writing fails.
#[instrument(
    skip(out, terminal_client),
    level = "info",
    fields(command = %command_name(&command))
)]
pub fn run_with_terminal<W>(
    command: Command,
    out: &mut W,
    terminal_client: &dyn TerminalClient,
    options: RunOptions,
) -> Result<()>
where
    W: io::Write,
{
    telemetry::initialise_tracing(
        terminal_client.stderr_is_terminal(),
        options.log_level.map(LogLevel::as_level_filter),
    )?;

    let painter = Painter::new(terminal_client.stdout_is_terminal());
    match command {
        Command::Decode(args) => {
            crate::cli::decode::run(&args, out, &painter, options.output_format)
        }
        Command::Tags => crate::cli::tags::run(out, &painter, options.output_format),
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Decode(_args) => "decode",
        Command::Tags => "tags",
    }
}
