use std::io::IsTerminal;

/// Reports whether the process streams are attached to a terminal.
pub trait TerminalClient {
    fn stdout_is_terminal(&self) -> bool;
    fn stderr_is_terminal(&self) -> bool;
}

/// Terminal detection for the real process streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTerminalClient;

impl TerminalClient for SystemTerminalClient {
    fn stdout_is_terminal(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    fn stderr_is_terminal(&self) -> bool {
        std::io::stderr().is_terminal()
    }
}
