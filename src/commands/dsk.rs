//! Downstream keyer commands.

use bon::Builder;
use bytes::BufMut;

use super::command;
use crate::codec::{FieldSet, MaskWidth};
use crate::transcode::Permille;

/// `CDsL`: puts a downstream keyer on or off air.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DownstreamKeyOnAir {
    pub keyer: u8,
    pub on_air: bool,
}

impl DownstreamKeyOnAir {
    #[must_use]
    pub const fn new(keyer: u8, on_air: bool) -> Self {
        Self { keyer, on_air }
    }
}

command!(DownstreamKeyOnAir, b"CDsL", |this, out| {
    out.put_u8(this.keyer);
    out.put_u8(u8::from(this.on_air));
    out.put_bytes(0, 2);
});

/// `CDsT`: ties a downstream keyer to the next transition.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DownstreamKeyTie {
    pub keyer: u8,
    pub tie: bool,
}

impl DownstreamKeyTie {
    #[must_use]
    pub const fn new(keyer: u8, tie: bool) -> Self {
        Self { keyer, tie }
    }
}

command!(DownstreamKeyTie, b"CDsT", |this, out| {
    out.put_u8(this.keyer);
    out.put_u8(u8::from(this.tie));
    out.put_bytes(0, 2);
});

/// `DDsA`: runs a downstream keyer auto transition.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DownstreamKeyAuto {
    pub keyer: u8,
}

impl DownstreamKeyAuto {
    #[must_use]
    pub const fn new(keyer: u8) -> Self {
        Self { keyer }
    }
}

command!(DownstreamKeyAuto, b"DDsA", |this, out| {
    out.put_u8(this.keyer);
    out.put_bytes(0, 3);
});

/// `CDsR`: sets the downstream keyer auto rate in frames.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DownstreamKeyRate {
    pub keyer: u8,
    pub rate: u8,
}

impl DownstreamKeyRate {
    #[must_use]
    pub const fn new(keyer: u8, rate: u8) -> Self {
        Self { keyer, rate }
    }
}

command!(DownstreamKeyRate, b"CDsR", |this, out| {
    out.put_u8(this.keyer);
    out.put_u8(this.rate);
    out.put_bytes(0, 2);
});

/// `CDsF`: sets the downstream keyer fill source.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DownstreamKeyFill {
    pub keyer: u8,
    pub source: u16,
}

impl DownstreamKeyFill {
    #[must_use]
    pub const fn new(keyer: u8, source: u16) -> Self {
        Self { keyer, source }
    }
}

command!(DownstreamKeyFill, b"CDsF", |this, out| {
    out.put_u8(this.keyer);
    out.put_u8(0);
    out.put_u16(this.source);
});

/// `CDsC`: sets the downstream keyer key (cut) source.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DownstreamKeyCut {
    pub keyer: u8,
    pub source: u16,
}

impl DownstreamKeyCut {
    #[must_use]
    pub const fn new(keyer: u8, source: u16) -> Self {
        Self { keyer, source }
    }
}

command!(DownstreamKeyCut, b"CDsC", |this, out| {
    out.put_u8(this.keyer);
    out.put_u8(0);
    out.put_u16(this.source);
});

/// `CDsG`: downstream keyer clip, gain and alpha settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct DownstreamKeyGain {
    pub keyer: u8,
    pub premultiplied: Option<bool>,
    pub clip: Option<Permille>,
    pub gain: Option<Permille>,
    pub invert: Option<bool>,
}

command!(DownstreamKeyGain, b"CDsG", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .fixed(this.keyer)
        .optional(0, this.premultiplied)
        .pad(1)
        .optional(1, this.clip)
        .optional(2, this.gain)
        .optional(3, this.invert)
        .pad(3)
        .write_to(out);
});

/// `CDsM`: downstream keyer mask.
///
/// Edges are in thousandths of the half-picture, `-9000..=9000`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct DownstreamKeyMask {
    pub keyer: u8,
    pub enabled: Option<bool>,
    pub top: Option<i16>,
    pub bottom: Option<i16>,
    pub left: Option<i16>,
    pub right: Option<i16>,
}

command!(DownstreamKeyMask, b"CDsM", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .fixed(this.keyer)
        .optional(0, this.enabled)
        .pad(1)
        .optional(1, this.top)
        .optional(2, this.bottom)
        .optional(3, this.left)
        .optional(4, this.right)
        .write_to(out);
});
