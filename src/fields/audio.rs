//! Legacy (non-Fairlight) audio mixer fields.

use serde::Serialize;

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::error::FormatError;
use crate::transcode::legacy_level_db;
use crate::types::AudioMixOption;

/// `AMMO`: master bus.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct AudioMaster {
    pub volume: u16,
    pub follow_fade_to_black: bool,
}

impl DecodeField for AudioMaster {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        let volume = reader.u16()?;
        reader.skip(2)?;
        Ok(Self {
            volume,
            follow_fade_to_black: reader.bool()?,
        })
    }
}

/// `AMmO`: monitor bus.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct AudioMonitor {
    pub enabled: bool,
    pub volume: u16,
    pub mute: bool,
    pub solo: bool,
    pub solo_source: u16,
    pub dim: bool,
    pub dim_volume: u16,
}

impl DecodeField for AudioMonitor {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(12)?;
        let enabled = reader.bool()?;
        reader.skip(1)?;
        let volume = reader.u16()?;
        let mute = reader.bool()?;
        let solo = reader.bool()?;
        let solo_source = reader.u16()?;
        let dim = reader.bool()?;
        reader.skip(1)?;
        Ok(Self {
            enabled,
            volume,
            mute,
            solo,
            solo_source,
            dim,
            dim_volume: reader.u16()?,
        })
    }
}

/// `AMIP`: one channel strip.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct AudioInput {
    pub source: u16,
    pub source_type: u8,
    pub index_in_group: u8,
    pub plug: u8,
    pub mix_option: AudioMixOption,
    pub volume: u16,
    pub balance: i16,
}

impl AudioInput {
    /// Physical connector name for `plug`.
    #[must_use]
    pub const fn plug_name(&self) -> &'static str {
        match self.plug {
            0 => "Internal",
            1 => "SDI",
            2 => "HDMI",
            3 => "Component",
            4 => "Composite",
            5 => "SVideo",
            32 => "XLR",
            64 => "AES",
            128 => "RCA",
            _ => "Analog",
        }
    }

    /// Strip identifier; legacy strips are never split.
    #[must_use]
    pub fn strip_id(&self) -> String {
        format!("{}.0", self.source)
    }
}

impl DecodeField for AudioInput {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(16)?;
        let source = reader.u16()?;
        let source_type = reader.u8()?;
        reader.skip(2)?;
        let index_in_group = reader.u8()?;
        reader.skip(1)?;
        let plug = reader.u8()?;
        let mix_option = reader.u8()?.into();
        reader.skip(1)?;
        Ok(Self {
            source,
            source_type,
            index_in_group,
            plug,
            mix_option,
            volume: reader.u16()?,
            balance: reader.i16()?,
        })
    }
}

/// `AMTl`: which sources are mixed in.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct AudioTally {
    pub sources: Vec<(u16, bool)>,
}

impl DecodeField for AudioTally {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        let count = usize::from(reader.u16()?);
        reader.expect_entries(count, 3)?;
        let mut sources = Vec::with_capacity(count);
        for _ in 0..count {
            sources.push((reader.u16()?, reader.bool()?));
        }
        Ok(Self { sources })
    }
}

/// Left/right level and peak in dB.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StereoLevels {
    pub left: f64,
    pub right: f64,
    pub left_peak: f64,
    pub right_peak: f64,
}

impl StereoLevels {
    fn read_legacy(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        Ok(Self {
            left: legacy_level_db(reader.u32()?),
            right: legacy_level_db(reader.u32()?),
            left_peak: legacy_level_db(reader.u32()?),
            right_peak: legacy_level_db(reader.u32()?),
        })
    }
}

/// `AMLv`: meter levels for master, monitor and every input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioLevels {
    pub master: StereoLevels,
    pub monitor: StereoLevels,
    pub inputs: Vec<(u16, StereoLevels)>,
}

const LEVELS_HEADER_LEN: usize = 36;
const LEVEL_ENTRY_LEN: usize = 16;

impl DecodeField for AudioLevels {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(LEVELS_HEADER_LEN)?;
        let count = usize::from(reader.u16()?);
        reader.skip(2)?;
        let master = StereoLevels::read_legacy(reader)?;
        let monitor = StereoLevels::read_legacy(reader)?;

        reader.expect_entries(count, 2)?;
        let mut sources = Vec::with_capacity(count);
        for _ in 0..count {
            sources.push(reader.u16()?);
        }
        // Level blocks start on the next 4-byte boundary.
        reader.seek(reader.position().next_multiple_of(4))?;
        reader.expect_entries(count, LEVEL_ENTRY_LEN)?;
        let inputs = sources
            .into_iter()
            .map(|source| Ok((source, StereoLevels::read_legacy(reader)?)))
            .collect::<Result<_, FormatError>>()?;

        Ok(Self {
            master,
            monitor,
            inputs,
        })
    }
}
