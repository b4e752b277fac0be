//! Fairlight audio mixer commands.
//!
//! Gains and volumes are hundredths of a dB: master volume `-10000..=1000`,
//! EQ gain `-2000..=2000`, make-up gain `0..=2000`.

use bon::Builder;
use bytes::{BufMut, BytesMut};
use serde::Serialize;

use super::command;
use crate::codec::{FieldSet, MaskWidth, Pack};

/// Marker the device uses for a channel split into dual mono.
pub(crate) const SPLIT_MARKER: u8 = 0xFF;
/// Marker for a source that is not split.
pub(crate) const WHOLE_MARKER: u8 = 0x01;

/// Which part of a Fairlight source a strip addresses.
///
/// The split/subchannel bytes are inferred from captures and have not been
/// confirmed on sources with more than two embedded channels.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize)]
pub enum FairlightChannel {
    /// The source as one strip.
    #[default]
    Whole,
    /// One half of a source split into dual mono.
    Subchannel(u8),
}

impl FairlightChannel {
    /// Decodes the split marker and subchannel bytes.
    #[must_use]
    pub const fn from_wire(split: u8, subchannel: u8) -> Self {
        if split == SPLIT_MARKER {
            Self::Subchannel(subchannel)
        } else {
            Self::Whole
        }
    }

    /// Strip identifier in `source.subchannel` form.
    #[must_use]
    pub fn strip_id(self, source: u16) -> String {
        match self {
            Self::Whole => format!("{source}.0"),
            Self::Subchannel(channel) => format!("{source}.{channel}"),
        }
    }
}

impl Pack for FairlightChannel {
    fn pack(&self, out: &mut BytesMut) {
        match self {
            Self::Whole => {
                out.put_u8(WHOLE_MARKER);
                out.put_u8(0);
            }
            Self::Subchannel(channel) => {
                out.put_u8(SPLIT_MARKER);
                out.put_u8(*channel);
            }
        }
    }
}

/// `CFMP`: Fairlight master bus settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Builder)]
pub struct FairlightMasterProperties {
    pub eq_enabled: Option<bool>,
    pub eq_gain: Option<i16>,
    pub dynamics_gain: Option<u16>,
    pub volume: Option<i32>,
    pub follow_fade_to_black: Option<bool>,
}

command!(FairlightMasterProperties, b"CFMP", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .pad(5)
        .optional(1, this.eq_gain)
        .pad(2)
        .optional(2, this.dynamics_gain)
        .optional(3, this.volume)
        .optional(4, this.follow_fade_to_black)
        .optional(0, this.eq_enabled)
        .pad(2)
        .write_to(out);
});

/// `CFSP`: Fairlight channel strip settings.
///
/// Bit 2 of the mask has no parameter. The layout is reverse-engineered and
/// still awaits confirmation on hardware.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct FairlightStripProperties {
    pub source: u16,
    #[builder(default)]
    pub channel: FairlightChannel,
    pub delay: Option<u8>,
    pub gain: Option<i32>,
    pub eq_enabled: Option<bool>,
    pub eq_gain: Option<i16>,
    pub dynamics_gain: Option<u16>,
    pub balance: Option<i16>,
    pub volume: Option<i32>,
    pub state: Option<u8>,
}

command!(FairlightStripProperties, b"CFSP", |this, out| {
    FieldSet::new(MaskWidth::U16)
        .fixed(this.source)
        .pad(4)
        .fill(0xFF, 6)
        .fixed(this.channel)
        .optional(0, this.delay)
        .pad(3)
        .optional(1, this.gain)
        .optional(3, this.eq_enabled)
        .pad(5)
        .optional(4, this.eq_gain)
        .pad(2)
        .optional(5, this.dynamics_gain)
        .optional(6, this.balance)
        .pad(2)
        .optional(7, this.volume)
        .optional(8, this.state)
        .pad(3)
        .write_to(out);
});

/// `SFLN`: subscribes to or stops Fairlight meter levels.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SendFairlightLevels {
    pub enabled: bool,
}

impl SendFairlightLevels {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

command!(SendFairlightLevels, b"SFLN", |this, out| {
    out.put_u8(u8::from(this.enabled));
    out.put_bytes(0, 3);
});
