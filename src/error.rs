use derive_more::From;
use thiserror::Error;

use crate::codec::EnvelopeError;
use crate::tag::Tag;
use crate::transfer::TransferError;

/// Errors returned when constructor arguments are contradictory, missing, or
/// outside their documented range.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A media player source must name exactly one of a still or a clip.
    #[error("media player source needs exactly one of still or clip (still given: {still}, clip given: {clip})")]
    MediaSourceNotExclusive { still: bool, clip: bool },
    /// Streaming bitrates must be given as a pair.
    #[error("streaming bitrate needs both minimum and maximum, or neither")]
    IncompleteBitrateRange,
    /// A numeric parameter crossed its documented range.
    #[error("{name} {value} is out of range ({min}..={max})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// A string does not fit its fixed-width slot.
    #[error("{name} is {len} bytes but its slot holds at most {max}")]
    TextTooLong {
        name: &'static str,
        len: usize,
        max: usize,
    },
    /// The camera control table has no entry for this parameter.
    #[error("camera parameter {category}.{parameter} is not in the control table")]
    UnknownCameraParameter { category: u8, parameter: u8 },
    /// Camera data was given in a different type than the table declares.
    #[error("camera parameter {category}.{parameter} takes {expected} data, got {actual}")]
    CameraDataTypeMismatch {
        category: u8,
        parameter: u8,
        expected: &'static str,
        actual: &'static str,
    },
    /// Camera data has a different element count than the table declares.
    #[error("camera parameter {category}.{parameter} takes {expected} elements, got {actual}")]
    CameraElementCount {
        category: u8,
        parameter: u8,
        expected: usize,
        actual: usize,
    },
}

/// Errors returned when a payload does not match the layout of its tag.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum FormatError {
    /// The payload ended before the layout did.
    #[error("`{tag}` payload is too short: expected at least {needed} bytes, got {available}")]
    Truncated {
        tag: Tag,
        needed: usize,
        available: usize,
    },
    /// A count read from the payload does not describe a valid region.
    #[error("`{tag}` declares {count} entries, which do not fit in the {available}-byte payload")]
    CountOverrun {
        tag: Tag,
        count: usize,
        available: usize,
    },
}

/// Errors returned by telemetry initialisation.
#[derive(Debug, Error)]
pub(crate) enum TelemetryError {
    #[error("failed to install tracing subscriber")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Top-level codec errors wrapping module-specific error types.
#[derive(Debug, Error, From)]
pub enum CodecError {
    #[error(transparent)]
    #[from(EnvelopeError, Box<EnvelopeError>)]
    Envelope(Box<EnvelopeError>),
    #[error(transparent)]
    #[from(ConfigurationError, Box<ConfigurationError>)]
    Configuration(Box<ConfigurationError>),
    #[error(transparent)]
    #[from(FormatError, Box<FormatError>)]
    Format(Box<FormatError>),
    #[error(transparent)]
    #[from(TransferError, Box<TransferError>)]
    Transfer(Box<TransferError>),
}
