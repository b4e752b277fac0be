//! Per-style transition settings fields.

use serde::Serialize;

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::error::FormatError;

/// `TMxP`: mix rate in frames.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct MixTransition {
    pub me: u8,
    pub rate: u8,
}

impl DecodeField for MixTransition {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            me: reader.u8()?,
            rate: reader.u8()?,
        })
    }
}

/// `FtbP`: fade-to-black rate in frames.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FadeToBlackRate {
    pub me: u8,
    pub rate: u8,
}

impl DecodeField for FadeToBlackRate {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            me: reader.u8()?,
            rate: reader.u8()?,
        })
    }
}

/// `TDpP`: dip rate and source.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct DipTransition {
    pub me: u8,
    pub rate: u8,
    pub source: u16,
}

impl DecodeField for DipTransition {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            me: reader.u8()?,
            rate: reader.u8()?,
            source: reader.u16()?,
        })
    }
}

/// `TWpP`: wipe settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct WipeTransition {
    pub me: u8,
    pub rate: u8,
    pub pattern: u8,
    pub border_width: u16,
    pub border_source: u16,
    pub symmetry: u16,
    pub softness: u16,
    pub position_x: u16,
    pub position_y: u16,
    pub reverse: bool,
    pub flip_flop: bool,
}

impl DecodeField for WipeTransition {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(20)?;
        let me = reader.u8()?;
        let rate = reader.u8()?;
        let pattern = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            me,
            rate,
            pattern,
            border_width: reader.u16()?,
            border_source: reader.u16()?,
            symmetry: reader.u16()?,
            softness: reader.u16()?,
            position_x: reader.u16()?,
            position_y: reader.u16()?,
            reverse: reader.bool()?,
            flip_flop: reader.bool()?,
        })
    }
}

/// `TDvP`: DVE transition settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct DveTransition {
    pub me: u8,
    pub rate: u8,
    pub style: u8,
    pub fill_source: u16,
    pub key_source: u16,
    pub key_enabled: bool,
    pub key_premultiplied: bool,
    pub key_clip: u16,
    pub key_gain: u16,
    pub key_invert: bool,
    pub reverse: bool,
    pub flip_flop: bool,
}

impl DecodeField for DveTransition {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(20)?;
        let me = reader.u8()?;
        let rate = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            me,
            rate,
            style: reader.u8()?,
            fill_source: reader.u16()?,
            key_source: reader.u16()?,
            key_enabled: reader.bool()?,
            key_premultiplied: reader.bool()?,
            key_clip: reader.u16()?,
            key_gain: reader.u16()?,
            key_invert: reader.bool()?,
            reverse: reader.bool()?,
            flip_flop: reader.bool()?,
        })
    }
}
