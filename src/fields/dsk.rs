//! Downstream keyer fields.

use serde::Serialize;

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::error::FormatError;

/// `DskB`: fill and key sources.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct DownstreamKeySources {
    pub keyer: u8,
    pub fill_source: u16,
    pub key_source: u16,
}

impl DecodeField for DownstreamKeySources {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        let keyer = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            keyer,
            fill_source: reader.u16()?,
            key_source: reader.u16()?,
        })
    }
}

/// `DskP`: keyer settings. Clip and gain are `0..=1000`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct DownstreamKeyProperties {
    pub keyer: u8,
    pub tie: bool,
    pub rate: u8,
    pub premultiplied: bool,
    pub clip: u16,
    pub gain: u16,
    pub invert: bool,
    pub mask_enabled: bool,
    pub mask_top: i16,
    pub mask_bottom: i16,
    pub mask_left: i16,
    pub mask_right: i16,
}

impl DecodeField for DownstreamKeyProperties {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(20)?;
        Ok(Self {
            keyer: reader.u8()?,
            tie: reader.bool()?,
            rate: reader.u8()?,
            premultiplied: reader.bool()?,
            clip: reader.u16()?,
            gain: reader.u16()?,
            invert: reader.bool()?,
            mask_enabled: reader.bool()?,
            mask_top: reader.i16()?,
            mask_bottom: reader.i16()?,
            mask_left: reader.i16()?,
            mask_right: reader.i16()?,
        })
    }
}

/// `DskS`: on-air and transition state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct DownstreamKeyState {
    pub keyer: u8,
    pub on_air: bool,
    pub in_transition: bool,
    pub auto_transitioning: bool,
    pub frames_remaining: u8,
}

impl DecodeField for DownstreamKeyState {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        Ok(Self {
            keyer: reader.u8()?,
            on_air: reader.bool()?,
            in_transition: reader.bool()?,
            auto_transitioning: reader.bool()?,
            frames_remaining: reader.u8()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fields::Field;
    use crate::tag::Tag;

    #[test]
    fn properties_layout() {
        let payload = [
            1, 1, 25, 0, 0x01, 0xF4, 0x03, 0xE8, 1, 1, 0x23, 0x28, 0xDC, 0xD8, 0, 0, 0, 0, 0, 0,
        ];
        let field = Field::decode(Tag::new(*b"DskP"), &payload).expect("twenty bytes");
        assert_eq!(
            Field::DownstreamKeyProperties(DownstreamKeyProperties {
                keyer: 1,
                tie: true,
                rate: 25,
                premultiplied: false,
                clip: 500,
                gain: 1000,
                invert: true,
                mask_enabled: true,
                mask_top: 9000,
                mask_bottom: -9000,
                mask_left: 0,
                mask_right: 0,
            }),
            field
        );
    }

    #[test]
    fn state_flags() {
        let field = Field::decode(Tag::new(*b"DskS"), &[0, 1, 1, 0, 10, 0, 0, 0]).expect("valid");
        assert_eq!(
            Field::DownstreamKeyState(DownstreamKeyState {
                keyer: 0,
                on_air: true,
                in_transition: true,
                auto_transitioning: false,
                frames_remaining: 10,
            }),
            field
        );
    }
}
