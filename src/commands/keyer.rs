//! Upstream keyer commands.

use bon::Builder;
use bytes::BufMut;

use super::command;
use crate::codec::{FieldSet, MaskWidth};
use crate::transcode::{HslColor, Hue, Permille};
use crate::types::{KeyType, Keyframe, RunTo};

/// `CKOn`: puts an upstream keyer on or off air.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct KeyOnAir {
    pub me: u8,
    pub keyer: u8,
    pub on_air: bool,
}

impl KeyOnAir {
    #[must_use]
    pub const fn new(me: u8, keyer: u8, on_air: bool) -> Self {
        Self { me, keyer, on_air }
    }
}

command!(KeyOnAir, b"CKOn", |this, out| {
    out.put_u8(this.me);
    out.put_u8(this.keyer);
    out.put_u8(u8::from(this.on_air));
    out.put_u8(0);
});

/// `CKeF`: sets the upstream keyer fill source.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct KeyFill {
    pub me: u8,
    pub keyer: u8,
    pub source: u16,
}

impl KeyFill {
    #[must_use]
    pub const fn new(me: u8, keyer: u8, source: u16) -> Self {
        Self { me, keyer, source }
    }
}

command!(KeyFill, b"CKeF", |this, out| {
    out.put_u8(this.me);
    out.put_u8(this.keyer);
    out.put_u16(this.source);
});

/// `CKeC`: sets the upstream keyer key (cut) source.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct KeyCut {
    pub me: u8,
    pub keyer: u8,
    pub source: u16,
}

impl KeyCut {
    #[must_use]
    pub const fn new(me: u8, keyer: u8, source: u16) -> Self {
        Self { me, keyer, source }
    }
}

command!(KeyCut, b"CKeC", |this, out| {
    out.put_u8(this.me);
    out.put_u8(this.keyer);
    out.put_u16(this.source);
});

/// `CKTp`: keyer type and flying key toggle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct KeyTypeSet {
    pub me: u8,
    pub keyer: u8,
    pub key_type: Option<KeyType>,
    pub fly_enabled: Option<bool>,
}

command!(KeyTypeSet, b"CKTp", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .fixed(this.me)
        .fixed(this.keyer)
        .optional(0, this.key_type)
        .optional(1, this.fly_enabled)
        .pad(3)
        .write_to(out);
});

/// `CKDV`: DVE keyer geometry, border, shadow and mask.
///
/// Sizes are thousandths (`0..=9900`), positions `-16000..=16000` horizontally
/// and `-9000..=9000` vertically.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct KeyDveProperties {
    pub me: u8,
    pub keyer: u8,
    pub size_x: Option<i32>,
    pub size_y: Option<i32>,
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
    pub rotation: Option<i32>,
    pub border_enabled: Option<bool>,
    pub shadow_enabled: Option<bool>,
    pub border_bevel: Option<u8>,
    pub outer_width: Option<u16>,
    pub inner_width: Option<u16>,
    pub outer_softness: Option<u8>,
    pub inner_softness: Option<u8>,
    pub bevel_softness: Option<u8>,
    pub bevel_position: Option<u8>,
    pub border_opacity: Option<u8>,
    pub border_hue: Option<Hue>,
    pub border_saturation: Option<Permille>,
    pub border_luma: Option<Permille>,
    pub light_angle: Option<u16>,
    pub light_altitude: Option<u8>,
    pub mask_enabled: Option<bool>,
    pub mask_top: Option<i16>,
    pub mask_bottom: Option<i16>,
    pub mask_left: Option<i16>,
    pub mask_right: Option<i16>,
    pub rate: Option<u8>,
}

impl KeyDveProperties {
    /// Sets all three border color components.
    #[must_use]
    pub fn with_border_color(mut self, color: HslColor) -> Self {
        self.border_hue = Some(color.hue);
        self.border_saturation = Some(color.saturation);
        self.border_luma = Some(color.luma);
        self
    }
}

command!(KeyDveProperties, b"CKDV", |this, out| {
    FieldSet::new(MaskWidth::U32)
        .fixed(this.me)
        .fixed(this.keyer)
        .pad(2)
        .optional(0, this.size_x)
        .optional(1, this.size_y)
        .optional(2, this.position_x)
        .optional(3, this.position_y)
        .optional(4, this.rotation)
        .optional(5, this.border_enabled)
        .optional(6, this.shadow_enabled)
        .optional(7, this.border_bevel)
        .pad(1)
        .optional(8, this.outer_width)
        .optional(9, this.inner_width)
        .optional(10, this.outer_softness)
        .optional(11, this.inner_softness)
        .optional(12, this.bevel_softness)
        .optional(13, this.bevel_position)
        .optional(14, this.border_opacity)
        .pad(1)
        .optional(15, this.border_hue)
        .optional(16, this.border_saturation)
        .optional(17, this.border_luma)
        .optional(18, this.light_angle)
        .optional(19, this.light_altitude)
        .optional(20, this.mask_enabled)
        .optional(21, this.mask_top)
        .optional(22, this.mask_bottom)
        .optional(23, this.mask_left)
        .optional(24, this.mask_right)
        .optional(25, this.rate)
        .pad(3)
        .write_to(out);
});

/// `CACC`: advanced chroma key color picker.
///
/// The color is in the picker's offset YCbCr units, see [`crate::YCbCr`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct AdvancedChromaColorPicker {
    pub me: u8,
    pub keyer: u8,
    pub cursor: Option<bool>,
    pub preview: Option<bool>,
    pub x: Option<i16>,
    pub y: Option<i16>,
    pub size: Option<u16>,
    pub luma: Option<u16>,
    pub cb: Option<i16>,
    pub cr: Option<i16>,
}

command!(AdvancedChromaColorPicker, b"CACC", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .fixed(this.me)
        .fixed(this.keyer)
        .optional(0, this.cursor)
        .optional(1, this.preview)
        .pad(1)
        .optional(2, this.x)
        .optional(3, this.y)
        .optional(4, this.size)
        .optional(5, this.luma)
        .optional(6, this.cb)
        .optional(7, this.cr)
        .pad(2)
        .write_to(out);
});

/// `CACK`: advanced chroma keyer settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct AdvancedChromaProperties {
    pub me: u8,
    pub keyer: u8,
    pub foreground: Option<u16>,
    pub background: Option<u16>,
    pub key_edge: Option<u16>,
    pub spill: Option<u16>,
    pub flare: Option<u16>,
    pub brightness: Option<i16>,
    pub contrast: Option<i16>,
    pub saturation: Option<u16>,
    pub red: Option<i16>,
    pub green: Option<i16>,
    pub blue: Option<i16>,
}

command!(AdvancedChromaProperties, b"CACK", |this, out| {
    FieldSet::new(MaskWidth::U16)
        .fixed(this.me)
        .fixed(this.keyer)
        .optional(0, this.foreground)
        .optional(1, this.background)
        .optional(2, this.key_edge)
        .optional(3, this.spill)
        .optional(4, this.flare)
        .optional(5, this.brightness)
        .optional(6, this.contrast)
        .optional(7, this.saturation)
        .optional(8, this.red)
        .optional(9, this.green)
        .optional(10, this.blue)
        .pad(2)
        .write_to(out);
});

/// `CKLm`: luma keyer settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct KeyLumaProperties {
    pub me: u8,
    pub keyer: u8,
    pub premultiplied: Option<bool>,
    pub clip: Option<Permille>,
    pub gain: Option<Permille>,
    pub invert: Option<bool>,
}

command!(KeyLumaProperties, b"CKLm", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .fixed(this.me)
        .fixed(this.keyer)
        .optional(0, this.premultiplied)
        .optional(1, this.clip)
        .optional(2, this.gain)
        .optional(3, this.invert)
        .pad(3)
        .write_to(out);
});

/// `SFKF`: stores the current flying key position as keyframe A or B.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct KeyframeStore {
    pub me: u8,
    pub keyer: u8,
    pub keyframe: Keyframe,
}

impl KeyframeStore {
    #[must_use]
    pub const fn new(me: u8, keyer: u8, keyframe: Keyframe) -> Self {
        Self { me, keyer, keyframe }
    }
}

command!(KeyframeStore, b"SFKF", |this, out| {
    out.put_u8(this.me);
    out.put_u8(this.keyer);
    out.put_u8(this.keyframe.as_raw());
    out.put_u8(0);
});

/// `RFlK`: runs the flying key to a keyframe.
///
/// Only the infinite run index is mask-controlled, on bit 1.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct KeyframeRun {
    pub me: u8,
    pub keyer: u8,
    pub run_to: RunTo,
    pub infinite_index: Option<u8>,
}

command!(KeyframeRun, b"RFlK", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .fixed(this.me)
        .fixed(this.keyer)
        .pad(1)
        .fixed(this.run_to)
        .optional(1, this.infinite_index)
        .pad(2)
        .write_to(out);
});
