use std::io;

use anyhow::Result;
use strum::IntoEnumIterator;
use tracing::instrument;

use crate::cli::OutputFormat;
use crate::protocol::{CATALOG, Direction};

use super::ui::{Painter, Table};

/// Executes the `tags` command.
#[instrument(skip(out, painter), level = "info", fields(?output_format))]
pub(crate) fn run<W>(out: &mut W, painter: &Painter, output_format: OutputFormat) -> Result<()>
where
    W: io::Write,
{
    match output_format {
        OutputFormat::Pretty => {
            for direction in Direction::iter() {
                let table = Table::catalog(
                    painter,
                    CATALOG.iter().filter(|info| info.direction == direction),
                );
                writeln!(
                    out,
                    "{} {}",
                    painter.direction(direction),
                    painter.muted(format!("({})", table.len()))
                )?;
                writeln!(out, "{table}")?;
            }
        }
        OutputFormat::Json => {
            for info in CATALOG.iter() {
                serde_json::to_writer(&mut *out, info)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn json_emits_one_line_per_catalog_entry() {
        let mut out = Vec::new();
        run(&mut out, &Painter::new(false), OutputFormat::Json).expect("writes to a vec");
        let output = String::from_utf8(out).expect("utf-8 output");

        assert_eq!(CATALOG.len(), output.lines().count());
        assert!(output.contains(r#"{"tag":"DCut","direction":"command","name":"Cut"}"#));
        assert!(output.contains(r#"{"tag":"*XFC","direction":"local","name":"TransferCompleteNotice"}"#));
    }

    #[test]
    fn pretty_groups_by_direction() {
        let mut out = Vec::new();
        run(&mut out, &Painter::new(false), OutputFormat::Pretty).expect("writes to a vec");
        let output = String::from_utf8(out).expect("utf-8 output");

        let command = output.find("command (").expect("command heading");
        let field = output.find("field (").expect("field heading");
        let local = output.find("local (1)").expect("local heading");
        assert!(command < field && field < local);
    }
}
