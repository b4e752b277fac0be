//! Per-style transition settings.

use bon::Builder;
use bytes::BufMut;

use super::command;
use crate::codec::{FieldSet, MaskWidth};
use crate::transcode::Permille;

/// `CTMx`: mix transition rate in frames.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MixSettings {
    pub me: u8,
    pub rate: u8,
}

impl MixSettings {
    #[must_use]
    pub const fn new(me: u8, rate: u8) -> Self {
        Self { me, rate }
    }
}

command!(MixSettings, b"CTMx", |this, out| {
    out.put_u8(this.me);
    out.put_u8(this.rate);
    out.put_bytes(0, 2);
});

/// `CTDp`: dip transition settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct DipSettings {
    pub me: u8,
    pub rate: Option<u8>,
    pub source: Option<u16>,
}

command!(DipSettings, b"CTDp", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .fixed(this.me)
        .optional(0, this.rate)
        .pad(1)
        .optional(1, this.source)
        .pad(2)
        .write_to(out);
});

/// `CTWp`: wipe transition settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct WipeSettings {
    pub me: u8,
    pub rate: Option<u8>,
    pub pattern: Option<u8>,
    pub width: Option<u16>,
    pub source: Option<u16>,
    pub symmetry: Option<u16>,
    pub softness: Option<u16>,
    pub position_x: Option<u16>,
    pub position_y: Option<u16>,
    pub reverse: Option<bool>,
    pub flip_flop: Option<bool>,
}

command!(WipeSettings, b"CTWp", |this, out| {
    FieldSet::new(MaskWidth::U16)
        .fixed(this.me)
        .optional(0, this.rate)
        .optional(1, this.pattern)
        .pad(1)
        .optional(2, this.width)
        .optional(3, this.source)
        .optional(4, this.symmetry)
        .optional(5, this.softness)
        .optional(6, this.position_x)
        .optional(7, this.position_y)
        .optional(8, this.reverse)
        .optional(9, this.flip_flop)
        .write_to(out);
});

/// `CTDv`: DVE transition settings.
///
/// Bit 1 of the mask has no parameter.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct DveSettings {
    pub me: u8,
    pub rate: Option<u8>,
    pub style: Option<u8>,
    pub fill_source: Option<u16>,
    pub key_source: Option<u16>,
    pub key_enabled: Option<bool>,
    pub key_premultiplied: Option<bool>,
    pub key_clip: Option<Permille>,
    pub key_gain: Option<Permille>,
    pub key_invert: Option<bool>,
    pub reverse: Option<bool>,
    pub flip_flop: Option<bool>,
}

command!(DveSettings, b"CTDv", |this, out| {
    FieldSet::new(MaskWidth::U16)
        .fixed(this.me)
        .optional(0, this.rate)
        .pad(1)
        .optional(2, this.style)
        .optional(3, this.fill_source)
        .optional(4, this.key_source)
        .optional(5, this.key_enabled)
        .optional(6, this.key_premultiplied)
        .optional(7, this.key_clip)
        .optional(8, this.key_gain)
        .optional(9, this.key_invert)
        .optional(10, this.reverse)
        .optional(11, this.flip_flop)
        .pad(1)
        .write_to(out);
});
