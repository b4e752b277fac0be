//! Upstream keyer fields.

use serde::Serialize;

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::error::FormatError;
use crate::transcode::{HslColor, Hue, Permille, Rgb, YCbCr};
use crate::types::KeyType;

/// `KeBP`: keyer type, sources and mask.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct KeyBase {
    pub me: u8,
    pub keyer: u8,
    pub key_type: KeyType,
    pub enabled: bool,
    pub fly_enabled: bool,
    pub fill_source: u16,
    pub key_source: u16,
    pub mask_enabled: bool,
    pub mask_top: i16,
    pub mask_bottom: i16,
    pub mask_left: i16,
    pub mask_right: i16,
}

impl DecodeField for KeyBase {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(20)?;
        let me = reader.u8()?;
        let keyer = reader.u8()?;
        let key_type = reader.u8()?.into();
        let enabled = reader.bool()?;
        reader.skip(1)?;
        let fly_enabled = reader.bool()?;
        let fill_source = reader.u16()?;
        let key_source = reader.u16()?;
        let mask_enabled = reader.bool()?;
        reader.skip(1)?;
        Ok(Self {
            me,
            keyer,
            key_type,
            enabled,
            fly_enabled,
            fill_source,
            key_source,
            mask_enabled,
            mask_top: reader.i16()?,
            mask_bottom: reader.i16()?,
            mask_left: reader.i16()?,
            mask_right: reader.i16()?,
        })
    }
}

/// `KeDV`: DVE keyer geometry, border and lighting.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct KeyDve {
    pub me: u8,
    pub keyer: u8,
    pub size_x: i32,
    pub size_y: i32,
    pub position_x: i32,
    pub position_y: i32,
    pub rotation: i32,
    pub border_enabled: bool,
    pub shadow_enabled: bool,
    pub border_bevel: u8,
    pub border_outer_width: u16,
    pub border_inner_width: u16,
    pub border_outer_softness: u8,
    pub border_inner_softness: u8,
    pub border_bevel_softness: u8,
    pub border_bevel_position: u8,
    pub border_opacity: u8,
    pub border_hue: Hue,
    pub border_saturation: Permille,
    pub border_luma: Permille,
    pub light_angle: u16,
    pub light_altitude: u8,
    pub mask_enabled: bool,
    pub mask_top: i16,
    pub mask_bottom: i16,
    pub mask_left: i16,
    pub mask_right: i16,
    pub rate: u8,
}

impl KeyDve {
    /// Border color in the units `CKDV` takes.
    #[must_use]
    pub const fn border_color(&self) -> HslColor {
        HslColor {
            hue: self.border_hue,
            saturation: self.border_saturation,
            luma: self.border_luma,
        }
    }

    /// Border color as floating RGB.
    #[must_use]
    pub fn border_rgb(&self) -> Rgb {
        self.border_color().to_rgb()
    }
}

impl DecodeField for KeyDve {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(60)?;
        let me = reader.u8()?;
        let keyer = reader.u8()?;
        reader.skip(2)?;
        let size_x = reader.i32()?;
        let size_y = reader.i32()?;
        let position_x = reader.i32()?;
        let position_y = reader.i32()?;
        let rotation = reader.i32()?;
        let border_enabled = reader.bool()?;
        let shadow_enabled = reader.bool()?;
        let border_bevel = reader.u8()?;
        reader.skip(1)?;
        let border_outer_width = reader.u16()?;
        let border_inner_width = reader.u16()?;
        let border_outer_softness = reader.u8()?;
        let border_inner_softness = reader.u8()?;
        let border_bevel_softness = reader.u8()?;
        let border_bevel_position = reader.u8()?;
        let border_opacity = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            me,
            keyer,
            size_x,
            size_y,
            position_x,
            position_y,
            rotation,
            border_enabled,
            shadow_enabled,
            border_bevel,
            border_outer_width,
            border_inner_width,
            border_outer_softness,
            border_inner_softness,
            border_bevel_softness,
            border_bevel_position,
            border_opacity,
            border_hue: Hue::from_wire(reader.u16()?),
            border_saturation: Permille::from_wire(reader.u16()?),
            border_luma: Permille::from_wire(reader.u16()?),
            light_angle: reader.u16()?,
            light_altitude: reader.u8()?,
            mask_enabled: reader.bool()?,
            mask_top: reader.i16()?,
            mask_bottom: reader.i16()?,
            mask_left: reader.i16()?,
            mask_right: reader.i16()?,
            rate: reader.u8()?,
        })
    }
}

/// `KeLm`: luma keyer. Clip and gain are `0..=1000`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct KeyLuma {
    pub me: u8,
    pub keyer: u8,
    pub premultiplied: bool,
    pub clip: u16,
    pub gain: u16,
    pub invert: bool,
}

impl DecodeField for KeyLuma {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(12)?;
        let me = reader.u8()?;
        let keyer = reader.u8()?;
        let premultiplied = reader.bool()?;
        reader.skip(1)?;
        Ok(Self {
            me,
            keyer,
            premultiplied,
            clip: reader.u16()?,
            gain: reader.u16()?,
            invert: reader.bool()?,
        })
    }
}

/// `KACk`: advanced chroma keyer settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct AdvancedChroma {
    pub me: u8,
    pub keyer: u8,
    pub foreground_level: u16,
    pub background_level: u16,
    pub key_edge: u16,
    pub spill_suppression: u16,
    pub flare_suppression: u16,
    pub brightness: i16,
    pub contrast: i16,
    pub saturation: u16,
    pub red: i16,
    pub green: i16,
    pub blue: i16,
}

impl DecodeField for AdvancedChroma {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(24)?;
        Ok(Self {
            me: reader.u8()?,
            keyer: reader.u8()?,
            foreground_level: reader.u16()?,
            background_level: reader.u16()?,
            key_edge: reader.u16()?,
            spill_suppression: reader.u16()?,
            flare_suppression: reader.u16()?,
            brightness: reader.i16()?,
            contrast: reader.i16()?,
            saturation: reader.u16()?,
            red: reader.i16()?,
            green: reader.i16()?,
            blue: reader.i16()?,
        })
    }
}

/// `KACC`: advanced chroma color picker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct AdvancedChromaColorPicker {
    pub me: u8,
    pub keyer: u8,
    pub cursor: bool,
    pub preview: bool,
    pub x: i16,
    pub y: i16,
    pub size: u16,
    pub color: YCbCr,
}

impl AdvancedChromaColorPicker {
    /// Picked color as clamped RGB.
    #[must_use]
    pub fn rgb(&self) -> Rgb {
        self.color.to_rgb()
    }
}

impl DecodeField for AdvancedChromaColorPicker {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(16)?;
        Ok(Self {
            me: reader.u8()?,
            keyer: reader.u8()?,
            cursor: reader.bool()?,
            preview: reader.bool()?,
            x: reader.i16()?,
            y: reader.i16()?,
            size: reader.u16()?,
            color: YCbCr {
                y: reader.u16()?,
                cb: reader.u16()?,
                cr: reader.u16()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fields::Field;
    use crate::tag::Tag;

    #[test]
    fn base_skips_reserved_bytes() {
        let payload = [
            0, 1, 3, 1, 0xEE, 1, 0, 5, 0, 6, 1, 0xEE, 0, 1, 0, 2, 0xFF, 0xFD, 0, 4,
        ];
        let Field::KeyBase(base) = Field::decode(Tag::new(*b"KeBP"), &payload).expect("valid")
        else {
            panic!("wrong field");
        };
        assert_eq!(KeyType::Dve, base.key_type);
        assert!(base.enabled && base.fly_enabled && base.mask_enabled);
        assert_eq!((5, 6), (base.fill_source, base.key_source));
        assert_eq!((1, 2, -3, 4), (base.mask_top, base.mask_bottom, base.mask_left, base.mask_right));
    }

    #[test]
    fn dve_rate_is_last_field() {
        let mut payload = vec![0u8; 60];
        payload[1] = 2;
        payload[4..8].copy_from_slice(&500i32.to_be_bytes());
        payload[38..40].copy_from_slice(&1800u16.to_be_bytes());
        payload[46] = 25;
        payload[47] = 1;
        payload[56] = 30;
        let Field::KeyDve(dve) = Field::decode(Tag::new(*b"KeDV"), &payload).expect("valid") else {
            panic!("wrong field");
        };
        assert_eq!(2, dve.keyer);
        assert_eq!(500, dve.size_x);
        assert_eq!(1800, dve.border_hue.tenths());
        assert_eq!(25, dve.light_altitude);
        assert!(dve.mask_enabled);
        assert_eq!(30, dve.rate);
    }

    #[test]
    fn color_picker_rgb() {
        let payload = [0, 0, 1, 0, 0, 0, 0, 0, 0, 100, 0x02, 0x71, 0x13, 0x88, 0x27, 0x10];
        let Field::AdvancedChromaColorPicker(picker) =
            Field::decode(Tag::new(*b"KACC"), &payload).expect("valid")
        else {
            panic!("wrong field");
        };
        assert_eq!(YCbCr { y: 625, cb: 5000, cr: 10000 }, picker.color);
        let rgb = picker.rgb();
        assert_eq!((1.0, 0.0, 0.0), (rgb.red, rgb.green, rgb.blue));
    }

    #[test]
    fn luma_truncated() {
        assert_matches!(
            Field::decode(Tag::new(*b"KeLm"), &[0; 8]),
            Err(FormatError::Truncated { needed: 12, available: 8, .. })
        );
    }
}
