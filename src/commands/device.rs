//! Device-level commands: video standard, input labels and clock.

use bon::bon;
use bytes::BufMut;

use super::command;
use crate::codec::{FieldSet, FixedText, MaskWidth};
use crate::error::ConfigurationError;
use crate::types::{PortType, VideoMode};

/// `CVdM`: switches the video standard.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct VideoModeSet {
    pub mode: VideoMode,
}

impl VideoModeSet {
    #[must_use]
    pub const fn new(mode: VideoMode) -> Self {
        Self { mode }
    }
}

command!(VideoModeSet, b"CVdM", |this, out| {
    out.put_u8(this.mode.number());
    out.put_bytes(0, 3);
});

/// `AiVM`: lets the switcher follow the video standard of its inputs.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AutoInputVideoMode {
    pub enabled: bool,
}

impl AutoInputVideoMode {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

command!(AutoInputVideoMode, b"AiVM", |this, out| {
    out.put_u8(u8::from(this.enabled));
    out.put_bytes(0, 3);
});

/// `CInL`: input labels and external port selection.
///
/// ```
/// use atem_codec::commands::{Command, InputProperties};
///
/// let command = InputProperties::builder().source(1).short_name("CAM1").build()?;
/// assert_eq!(32, command.payload().len());
/// # Ok::<(), atem_codec::ConfigurationError>(())
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InputProperties {
    source: u16,
    long_name: Option<FixedText<20>>,
    short_name: Option<FixedText<4>>,
    external_port: Option<PortType>,
}

#[bon]
impl InputProperties {
    /// Validates label lengths.
    ///
    /// # Errors
    ///
    /// Returns an error when the long name exceeds 20 bytes or the short
    /// name exceeds 4.
    #[builder]
    pub fn new(
        source: u16,
        #[builder(into)] long_name: Option<String>,
        #[builder(into)] short_name: Option<String>,
        external_port: Option<PortType>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            source,
            long_name: long_name
                .map(|name| FixedText::new("long name", name))
                .transpose()?,
            short_name: short_name
                .map(|name| FixedText::new("short name", name))
                .transpose()?,
            external_port,
        })
    }
}

command!(InputProperties, b"CInL", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .pad(1)
        .fixed(this.source)
        .optional(0, this.long_name.clone())
        .optional(1, this.short_name.clone())
        .optional(2, this.external_port.map(|port| u16::from(port.as_raw())))
        .pad(2)
        .write_to(out);
});

/// `TiRq`: asks the switcher for its current timecode.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct TimeRequest;

command!(TimeRequest, b"TiRq", |_this, _out| {});
