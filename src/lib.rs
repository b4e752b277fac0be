mod app;
mod cli;
mod codec;
pub mod commands;
mod error;
pub mod fields;
mod local;
mod protocol;
mod tag;
mod telemetry;
mod terminal;
mod transcode;
mod transfer;
mod types;
mod utils;

pub use app::{RunOptions, run, run_with_terminal};
pub use cli::{Args, Command, DecodeArgs, HexBuffer, HexInputError, LogLevel, OutputFormat};
pub use codec::{Envelope, EnvelopeError, FixedText, Frames, HEADER_LEN, MAX_PAYLOAD_LEN, RawFrame};
pub use error::{CodecError, ConfigurationError, FormatError};
pub use fields::Field;
pub use local::{TRANSFER_COMPLETE_TAG, TransferCompleteNotice};
pub use protocol::{CATALOG, Direction, TagInfo, lookup_tag};
pub use tag::Tag;
pub use terminal::{SystemTerminalClient, TerminalClient};
pub use transcode::{
    FIXED16_MAX, FIXED16_MIN, FIXED16_SCALE, Hls, HslColor, Hue, LEGACY_FULL_SCALE,
    METER_FLOOR_DB, Permille, Rgb, YCbCr, fairlight_level_db, fixed16_from_f64, fixed16_to_f64,
    hls_to_rgb, legacy_level_db, rgb_to_hls,
};
pub use transfer::{
    LockKind, TransferCommand, TransferDirection, TransferError, TransferRequest, TransferSession,
    TransferState,
};
pub use types::{
    AudioMixOption, FrameRate, KeyType, Keyframe, MediaSourceType, PortType, RunTo,
    TransferErrorCode, TransitionLayers, TransitionStyle, VideoFormat, VideoMode,
};
