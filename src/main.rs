use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;

use atem_codec::{Args, OutputFormat, RunOptions, run};

fn main() -> ExitCode {
    let args = Args::parse();
    let mut stdout = std::io::stdout();

    let output_format = args.output_format().unwrap_or(if stdout.is_terminal() {
        OutputFormat::Pretty
    } else {
        OutputFormat::Json
    });
    let options = RunOptions::builder()
        .maybe_log_level(args.log_level())
        .output_format(output_format)
        .build();

    match run(args.into_command(), &mut stdout, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
