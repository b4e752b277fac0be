//! Fairlight audio mixer fields.
//!
//! Strip-addressed fields carry the source index at offset 0 and the
//! split/subchannel pair at offsets 14 and 15.

use serde::Serialize;
use serde_with::{hex::Hex, serde_as};

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::commands::FairlightChannel;
use crate::error::FormatError;
use crate::transcode::fairlight_level_db;

/// `FAMP`: master bus.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FairlightMasterProperties {
    pub eq_enabled: bool,
    pub eq_gain: i16,
    pub dynamics_gain: u16,
    pub volume: i32,
    pub follow_fade_to_black: bool,
}

impl DecodeField for FairlightMasterProperties {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(20)?;
        reader.skip(1)?;
        let eq_enabled = reader.bool()?;
        reader.skip(4)?;
        let eq_gain = reader.i16()?;
        reader.skip(2)?;
        Ok(Self {
            eq_enabled,
            eq_gain,
            dynamics_gain: reader.u16()?,
            volume: reader.i32()?,
            follow_fade_to_black: reader.bool()?,
        })
    }
}

fn read_strip(reader: &mut PayloadReader<'_>) -> Result<(u16, FairlightChannel), FormatError> {
    let source = reader.u16()?;
    reader.seek(14)?;
    let split = reader.u8()?;
    let subchannel = reader.u8()?;
    Ok((source, FairlightChannel::from_wire(split, subchannel)))
}

/// `FASP`: one channel strip.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FairlightStripProperties {
    pub source: u16,
    pub channel: FairlightChannel,
    pub delay: u8,
    pub gain: i16,
    pub eq_enabled: bool,
    pub eq_gain: i16,
    pub dynamics_gain: u16,
    pub balance: i16,
    pub volume: i16,
    /// Mix state bits: 1 off, 2 on, 4 audio follow video.
    pub state: u8,
}

impl FairlightStripProperties {
    #[must_use]
    pub fn strip_id(&self) -> String {
        self.channel.strip_id(self.source)
    }
}

impl DecodeField for FairlightStripProperties {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(52)?;
        let (source, channel) = read_strip(reader)?;
        reader.skip(1)?;
        let delay = reader.u8()?;
        reader.seek(22)?;
        let gain = reader.i16()?;
        reader.seek(29)?;
        let eq_enabled = reader.bool()?;
        reader.seek(34)?;
        let eq_gain = reader.i16()?;
        reader.seek(38)?;
        let dynamics_gain = reader.u16()?;
        let balance = reader.i16()?;
        reader.seek(46)?;
        let volume = reader.i16()?;
        reader.skip(1)?;
        Ok(Self {
            source,
            channel,
            delay,
            gain,
            eq_enabled,
            eq_gain,
            dynamics_gain,
            balance,
            volume,
            state: reader.u8()?,
        })
    }
}

/// `FASD`: a strip was removed after a routing change. Layout unknown.
#[serde_as]
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct FairlightStripDelete {
    #[serde_as(as = "Hex")]
    pub raw: Vec<u8>,
}

impl DecodeField for FairlightStripDelete {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        Ok(Self {
            raw: reader.rest().to_vec(),
        })
    }
}

/// `FAIP`: an input of the Fairlight mixer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FairlightAudioInput {
    pub source: u16,
    /// 0 external video, 1 media player, 2 external audio.
    pub input_type: u8,
    pub index_in_group: u8,
    /// Changes when a stereo pair is split into dual mono.
    pub split: u8,
    /// 1 mic, 2 line.
    pub analog_level: u8,
}

impl DecodeField for FairlightAudioInput {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(16)?;
        let source = reader.u16()?;
        let input_type = reader.u8()?;
        reader.skip(2)?;
        let index_in_group = reader.u8()?;
        reader.skip(4)?;
        let split = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            source,
            input_type,
            index_in_group,
            split,
            analog_level: reader.u8()?,
        })
    }
}

/// One strip in [`FairlightTally`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FairlightTallyEntry {
    pub source: u16,
    pub subchannel: u8,
    pub tally: bool,
}

impl FairlightTallyEntry {
    #[must_use]
    pub fn strip_id(&self) -> String {
        format!("{}.{}", self.source, self.subchannel)
    }
}

/// `FMTl`: which strips are mixed in.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct FairlightTally {
    pub entries: Vec<FairlightTallyEntry>,
}

const TALLY_FIRST_ENTRY: usize = 15;
const TALLY_STRIDE: usize = 11;
const TALLY_ENTRY_LEN: usize = 4;

impl DecodeField for FairlightTally {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        let count = usize::from(reader.u16()?);
        if count == 0 {
            return Ok(Self {
                entries: Vec::new(),
            });
        }
        // The last entry is only read up to its tally byte.
        let needed = TALLY_FIRST_ENTRY + (count - 1) * TALLY_STRIDE + TALLY_ENTRY_LEN;
        if needed > reader.len() {
            return Err(FormatError::CountOverrun {
                tag: reader.tag(),
                count,
                available: reader.len(),
            });
        }
        let mut entries = Vec::with_capacity(count);
        for index in 0..count {
            reader.seek(TALLY_FIRST_ENTRY + index * TALLY_STRIDE)?;
            let subchannel = reader.u8()?;
            let source = reader.u16()?;
            entries.push(FairlightTallyEntry {
                source,
                subchannel,
                tally: reader.bool()?,
            });
        }
        Ok(Self { entries })
    }
}

/// `FMHP`: headphone output.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FairlightHeadphones {
    /// Hundredths of a dB.
    pub volume: i32,
    pub unmuted: bool,
}

impl DecodeField for FairlightHeadphones {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(32)?;
        let volume = reader.i32()?;
        reader.skip(4)?;
        Ok(Self {
            volume,
            unmuted: reader.bool()?,
        })
    }
}

/// `FAMS`: solo to headphones.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FairlightSolo {
    pub active: bool,
    pub source: u8,
    pub channel: FairlightChannel,
}

impl DecodeField for FairlightSolo {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(24)?;
        let active = reader.bool()?;
        reader.seek(9)?;
        let source = reader.u8()?;
        reader.seek(22)?;
        let split = reader.u8()?;
        Ok(Self {
            active,
            source,
            channel: FairlightChannel::from_wire(split, reader.u8()?),
        })
    }
}

/// `AEBP`: one equalizer band of one strip. Six arrive per strip.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct EqBandProperties {
    pub source: u16,
    pub channel: FairlightChannel,
    pub band: u8,
    pub enabled: bool,
    pub possible_filters: u8,
    pub filter: u8,
    pub frequency_range: u8,
    pub frequency: u16,
    pub gain: i32,
    pub q: u16,
}

impl EqBandProperties {
    /// Display name of the selected filter shape.
    #[must_use]
    pub const fn filter_name(&self) -> Option<&'static str> {
        match self.filter {
            0x01 => Some("low-shelf"),
            0x02 => Some("low-pass"),
            0x04 => Some("bell"),
            0x08 => Some("notch"),
            0x10 => Some("high-pass"),
            0x20 => Some("high-shelf"),
            _ => None,
        }
    }

    #[must_use]
    pub fn strip_id(&self) -> String {
        self.channel.strip_id(self.source)
    }
}

impl DecodeField for EqBandProperties {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(36)?;
        let (source, channel) = read_strip(reader)?;
        let band = reader.u8()?;
        let enabled = reader.bool()?;
        let possible_filters = reader.u8()?;
        let filter = reader.u8()?;
        reader.skip(1)?;
        let frequency_range = reader.u8()?;
        reader.seek(26)?;
        Ok(Self {
            source,
            channel,
            band,
            enabled,
            possible_filters,
            filter,
            frequency_range,
            frequency: reader.u16()?,
            gain: reader.i32()?,
            q: reader.u16()?,
        })
    }
}

/// Level and peak pair for a stereo signal, in dB.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FairlightMeter {
    pub left: f64,
    pub right: f64,
    pub left_peak: f64,
    pub right_peak: f64,
}

impl FairlightMeter {
    fn read(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        Ok(Self {
            left: fairlight_level_db(reader.i16()?),
            right: fairlight_level_db(reader.i16()?),
            left_peak: fairlight_level_db(reader.i16()?),
            right_peak: fairlight_level_db(reader.i16()?),
        })
    }
}

/// `FMLv`: meters of one strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairlightLevels {
    pub source: u16,
    pub channel: FairlightChannel,
    pub input: FairlightMeter,
    pub expander_reduction: f64,
    pub compressor_reduction: f64,
    pub limiter_reduction: f64,
    pub output: FairlightMeter,
    pub fader: FairlightMeter,
}

impl FairlightLevels {
    #[must_use]
    pub fn strip_id(&self) -> String {
        self.channel.strip_id(self.source)
    }
}

impl DecodeField for FairlightLevels {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(40)?;
        reader.skip(6)?;
        let split = reader.u8()?;
        let subchannel = reader.u8()?;
        let source = reader.u16()?;
        Ok(Self {
            source,
            channel: FairlightChannel::from_wire(split, subchannel),
            input: FairlightMeter::read(reader)?,
            expander_reduction: fairlight_level_db(reader.i16()?),
            compressor_reduction: fairlight_level_db(reader.i16()?),
            limiter_reduction: fairlight_level_db(reader.i16()?),
            output: FairlightMeter::read(reader)?,
            fader: FairlightMeter::read(reader)?,
        })
    }
}

/// `FDLv`: meters of the master bus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairlightMasterLevels {
    pub input: FairlightMeter,
    pub compressor_reduction: f64,
    pub limiter_reduction: f64,
    pub output: FairlightMeter,
    pub fader: FairlightMeter,
}

impl DecodeField for FairlightMasterLevels {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(28)?;
        Ok(Self {
            input: FairlightMeter::read(reader)?,
            compressor_reduction: fairlight_level_db(reader.i16()?),
            limiter_reduction: fairlight_level_db(reader.i16()?),
            output: FairlightMeter::read(reader)?,
            fader: FairlightMeter::read(reader)?,
        })
    }
}
