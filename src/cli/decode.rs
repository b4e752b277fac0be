use std::io;

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::cli::{DecodeArgs, OutputFormat};
use crate::codec::{Envelope, EnvelopeError, RawFrame};
use crate::error::FormatError;
use crate::fields::Field;
use crate::tag::Tag;
use crate::utils::format_hex;

use super::ui::{FieldView, Painter};

/// One output line of `decode --output json`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum DecodeRecord<'a> {
    Field {
        tag: Tag,
        #[serde(flatten)]
        field: &'a Field,
    },
    Error {
        #[serde(skip_serializing_if = "Option::is_none")]
        tag: Option<Tag>,
        error: String,
    },
}

enum Outcome<'a> {
    Decoded(Field),
    Malformed(RawFrame<'a>, FormatError),
    Unsplittable(EnvelopeError),
}

/// Executes the `decode` command.
///
/// Every frame is reported; the command fails afterwards if any frame did.
#[instrument(skip(args, out, painter), level = "info", fields(?output_format, len = args.frames().len()))]
pub(crate) fn run<W>(
    args: &DecodeArgs,
    out: &mut W,
    painter: &Painter,
    output_format: OutputFormat,
) -> Result<()>
where
    W: io::Write,
{
    let outcomes: Vec<Outcome<'_>> = Envelope::split(args.frames())
        .map(|frame| match frame {
            Ok(frame) => match frame.decode() {
                Ok(field) => Outcome::Decoded(field),
                Err(error) => Outcome::Malformed(frame, error),
            },
            Err(error) => Outcome::Unsplittable(error),
        })
        .collect();

    let failures = outcomes
        .iter()
        .filter(|outcome| !matches!(outcome, Outcome::Decoded(_)))
        .count();
    debug!(frames = outcomes.len(), failures, "split buffer");

    for outcome in &outcomes {
        match output_format {
            OutputFormat::Pretty => write_pretty(out, painter, outcome)?,
            OutputFormat::Json => write_json(out, outcome)?,
        }
    }

    if output_format == OutputFormat::Pretty {
        let decoded = outcomes.len() - failures;
        writeln!(
            out,
            "{}",
            painter.muted(format!("{decoded} decoded, {failures} failed"))
        )?;
    }

    if failures > 0 {
        warn!(failures, "buffer contained undecodable frames");
        bail!("{failures} of {} frames could not be decoded", outcomes.len());
    }
    Ok(())
}

fn write_pretty<W: io::Write>(out: &mut W, painter: &Painter, outcome: &Outcome<'_>) -> Result<()> {
    match outcome {
        Outcome::Decoded(field) => write!(out, "{}", FieldView::new(painter, field))?,
        Outcome::Malformed(frame, error) => {
            writeln!(
                out,
                "{} {}",
                painter.tag(frame.tag().to_string()),
                painter.warning(error.to_string())
            )?;
            writeln!(out, "{}", painter.muted(format_hex(frame.payload())))?;
        }
        Outcome::Unsplittable(error) => writeln!(out, "{}", painter.warning(error.to_string()))?,
    }
    Ok(())
}

fn write_json<W: io::Write>(out: &mut W, outcome: &Outcome<'_>) -> Result<()> {
    let record = match outcome {
        Outcome::Decoded(field) => DecodeRecord::Field {
            tag: field.tag(),
            field,
        },
        Outcome::Malformed(frame, error) => DecodeRecord::Error {
            tag: Some(frame.tag()),
            error: error.to_string(),
        },
        Outcome::Unsplittable(error) => DecodeRecord::Error {
            tag: None,
            error: error.to_string(),
        },
    };
    serde_json::to_writer(&mut *out, &record)?;
    writeln!(out)?;
    Ok(())
}
