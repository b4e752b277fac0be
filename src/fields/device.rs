//! Device identity, topology and video standard fields.

use serde::Serialize;

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::error::FormatError;
use crate::types::{MediaSourceType, PortType, VideoMode};

/// `_ver`: protocol version.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
}

impl DecodeField for Version {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            major: reader.u16()?,
            minor: reader.u16()?,
        })
    }
}

/// `Time`: current timecode.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub frame: u8,
    pub drop_frame: bool,
}

impl DecodeField for Time {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        Ok(Self {
            hour: reader.u8()?,
            minute: reader.u8()?,
            second: reader.u8()?,
            frame: reader.u8()?,
            drop_frame: reader.bool()?,
        })
    }
}

/// `TCCc`: timecode source, free run or time of day.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TimecodeConfig {
    pub mode: u8,
}

impl DecodeField for TimecodeConfig {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self { mode: reader.u8()? })
    }
}

const PRODUCT_NAME_LEN: usize = 44;

/// `_pin`: product name.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ProductName {
    pub name: String,
}

impl DecodeField for ProductName {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        Ok(Self {
            name: reader.text(PRODUCT_NAME_LEN)?,
        })
    }
}

/// `_MeC`: keyer count of one M/E unit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct MixEffectConfig {
    pub me: u8,
    pub keyers: u8,
}

impl DecodeField for MixEffectConfig {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            me: reader.u8()?,
            keyers: reader.u8()?,
        })
    }
}

/// `_mpl`: media pool slot counts.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct MediaPoolConfig {
    pub stills: u8,
    pub clips: u8,
}

impl DecodeField for MediaPoolConfig {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            stills: reader.u8()?,
            clips: reader.u8()?,
        })
    }
}

/// `MPCE`: what a media player is playing.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct MediaPlayerSource {
    pub player: u8,
    pub source_type: MediaSourceType,
    pub still: u8,
    pub clip: u8,
}

impl MediaPlayerSource {
    /// Slot index of whichever source type is active.
    #[must_use]
    pub const fn active_slot(&self) -> Option<u8> {
        match self.source_type {
            MediaSourceType::Still => Some(self.still),
            MediaSourceType::Clip => Some(self.clip),
            MediaSourceType::Other(_) => None,
        }
    }
}

impl DecodeField for MediaPlayerSource {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            player: reader.u8()?,
            source_type: reader.u8()?.into(),
            still: reader.u8()?,
            clip: reader.u8()?,
        })
    }
}

/// `_top`: counts of every switcher resource.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Topology {
    pub me_units: u8,
    pub sources: u8,
    pub downstream_keyers: u8,
    pub aux_outputs: u8,
    pub mix_minus_outputs: u8,
    pub media_players: u8,
    pub multiviewers: u8,
    pub serial_ports: u8,
    pub hyperdecks: u8,
    pub dve: u8,
    pub stingers: u8,
    pub supersources: u8,
    pub multiviewer_routable: bool,
    pub talkback_channels: u8,
}

impl DecodeField for Topology {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(28)?;
        Ok(Self {
            me_units: reader.u8()?,
            sources: reader.u8()?,
            downstream_keyers: reader.u8()?,
            aux_outputs: reader.u8()?,
            mix_minus_outputs: reader.u8()?,
            media_players: reader.u8()?,
            multiviewers: reader.u8()?,
            serial_ports: reader.u8()?,
            hyperdecks: reader.u8()?,
            dve: reader.u8()?,
            stingers: reader.u8()?,
            supersources: reader.u8()?,
            multiviewer_routable: reader.u8()? == 1,
            talkback_channels: reader.u8()?,
        })
    }
}

/// `InCm`: the initial state dump is complete.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct InitComplete;

impl DecodeField for InitComplete {
    fn decode(_reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        Ok(Self)
    }
}

/// `VidM`: current video standard.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct VideoModeStatus {
    pub mode: VideoMode,
}

impl DecodeField for VideoModeStatus {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            mode: VideoMode::new(reader.u8()?),
        })
    }
}

/// One entry of `_VMC`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct SupportedVideoMode {
    pub mode: VideoMode,
    pub multiview_modes: Vec<VideoMode>,
    pub downconvert_modes: Vec<VideoMode>,
    pub requires_reconfiguration: bool,
}

/// `_VMC`: every video standard the device supports.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct VideoModeCapabilities {
    pub modes: Vec<SupportedVideoMode>,
}

const VIDEO_MODE_ENTRY_LEN: usize = 13;

impl DecodeField for VideoModeCapabilities {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        let count = usize::from(reader.u16()?);
        reader.skip(2)?;
        reader.expect_entries(count, VIDEO_MODE_ENTRY_LEN)?;

        let mut modes = Vec::with_capacity(count);
        for _ in 0..count {
            let mode = VideoMode::new(reader.u8()?);
            reader.skip(3)?;
            modes.push(SupportedVideoMode {
                mode,
                multiview_modes: VideoMode::from_bitfield(reader.u32()?),
                downconvert_modes: VideoMode::from_bitfield(reader.u32()?),
                requires_reconfiguration: reader.bool()?,
            });
        }
        Ok(Self { modes })
    }
}

/// Where an input may be routed, from the two availability bytes of `InPr`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize)]
pub struct InputAvailability {
    pub aux: bool,
    pub multiview: bool,
    pub supersource_art: bool,
    pub supersource_box: bool,
    pub key_source: bool,
    pub aux1: bool,
    pub aux2: bool,
    pub me1: bool,
    pub me2: bool,
}

impl InputAvailability {
    const fn from_bits(outputs: u8, mix_effects: u8) -> Self {
        Self {
            aux: outputs & (1 << 0) != 0,
            multiview: outputs & (1 << 1) != 0,
            supersource_art: outputs & (1 << 2) != 0,
            supersource_box: outputs & (1 << 3) != 0,
            key_source: outputs & (1 << 4) != 0,
            aux1: outputs & (1 << 5) != 0,
            aux2: outputs & (1 << 6) != 0,
            me1: mix_effects & (1 << 0) != 0,
            me2: mix_effects & (1 << 1) != 0,
        }
    }
}

/// `InPr`: labels and capabilities of one input.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct InputProperties {
    pub source: u16,
    pub long_name: String,
    pub short_name: String,
    pub source_category: u8,
    pub source_ports: u8,
    pub port_type: PortType,
    pub availability: InputAvailability,
}

impl DecodeField for InputProperties {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(36)?;
        let source = reader.u16()?;
        let long_name = reader.text(20)?;
        let short_name = reader.text(4)?;
        let source_category = reader.u8()?;
        reader.seek(29)?;
        let source_ports = reader.u8()?;
        reader.seek(32)?;
        let port_type = reader.u8()?.into();
        reader.seek(34)?;
        let availability = InputAvailability::from_bits(reader.u8()?, reader.u8()?);
        Ok(Self {
            source,
            long_name,
            short_name,
            source_category,
            source_ports,
            port_type,
            availability,
        })
    }
}

/// `AiVM`: automatic video standard detection.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct AutoInputVideoMode {
    pub enabled: bool,
    pub detected: bool,
}

impl DecodeField for AutoInputVideoMode {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            enabled: reader.bool()?,
            detected: reader.bool()?,
        })
    }
}
