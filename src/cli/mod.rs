pub(crate) mod command;
pub(crate) mod decode;
pub(crate) mod tags;
pub(crate) mod ui;

pub use self::command::{
    Args, Command, DecodeArgs, HexBuffer, HexInputError, LogLevel, OutputFormat,
};
