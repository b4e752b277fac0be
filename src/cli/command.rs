use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

/// Command-line options for the ATEM protocol codec.
#[derive(Debug, Parser)]
#[command(name = "atem-codec", about = "Decode and inspect ATEM switcher protocol frames.")]
pub struct Args {
    /// Log verbosity; overrides `RUST_LOG`.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,
    /// Output format. Defaults to `pretty` on a terminal and `json` otherwise.
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,
    #[command(subcommand)]
    command: Command,
}

impl Args {
    /// Creates argument values directly without CLI parsing.
    ///
    /// ```
    /// use atem_codec::{Args, Command};
    ///
    /// let args = Args::new(Command::Tags);
    /// assert_eq!(None, args.log_level());
    /// ```
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self {
            log_level: None,
            output: None,
            command,
        }
    }

    #[must_use]
    pub fn log_level(&self) -> Option<LogLevel> {
        self.log_level
    }

    #[must_use]
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output
    }

    #[must_use]
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Supported CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Split a hex buffer into frames and decode every field in it.
    Decode(DecodeArgs),
    /// List every known command, field and local tag.
    Tags,
}

/// Arguments for the `decode` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DecodeArgs {
    /// One or more concatenated frames as hex; spaces and colons are ignored.
    frames: HexBuffer,
}

impl DecodeArgs {
    #[must_use]
    pub fn new(frames: HexBuffer) -> Self {
        Self { frames }
    }

    pub(crate) fn frames(&self) -> &[u8] {
        self.frames.as_bytes()
    }
}

/// Bytes parsed from a hex string.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HexBuffer(Vec<u8>);

impl HexBuffer {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Errors returned when parsing hex input.
#[derive(Debug, Error)]
pub enum HexInputError {
    #[error("hex input is empty")]
    Empty,
    #[error("invalid hex input: {0}")]
    Invalid(#[from] hex::FromHexError),
}

impl FromStr for HexBuffer {
    type Err = HexInputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits: String = value
            .chars()
            .filter(|character| !character.is_whitespace() && *character != ':')
            .collect();
        if digits.is_empty() {
            return Err(HexInputError::Empty);
        }
        Ok(Self(hex::decode(digits)?))
    }
}

/// Log verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub(crate) fn as_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// Rendering of command output.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Coloured tables for people.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn decode_parses_spaced_hex() {
        let args = Args::try_parse_from(["atem-codec", "decode", "00 0C 00:00"])
            .expect("valid arguments");
        let Command::Decode(decode) = args.into_command() else {
            panic!("expected decode");
        };
        assert_eq!(vec![0x00, 0x0C, 0x00, 0x00], decode.frames().to_vec());
    }

    #[test]
    fn decode_rejects_odd_digits() {
        let result = Args::try_parse_from(["atem-codec", "decode", "ABC"]);
        let error = result.expect_err("odd length hex should fail");
        assert_eq!(ErrorKind::ValueValidation, error.kind());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let args = Args::try_parse_from(["atem-codec", "tags", "--output", "json", "--log-level", "debug"])
            .expect("valid arguments");
        assert_eq!(Some(OutputFormat::Json), args.output_format());
        assert_eq!(Some(LogLevel::Debug), args.log_level());
        assert_matches!(args.into_command(), Command::Tags);
    }

    #[test]
    fn empty_hex_is_rejected() {
        assert_matches!("  ".parse::<HexBuffer>(), Err(HexInputError::Empty));
    }
}
