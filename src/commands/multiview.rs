//! Multiviewer commands.

use bon::Builder;
use bytes::BufMut;

use super::command;
use crate::codec::{FieldSet, MaskWidth};

/// `CMvP`: multiviewer layout and program/preview swap.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct MultiviewProperties {
    pub multiviewer: u8,
    pub layout: Option<u8>,
    pub swap_program_preview: Option<bool>,
}

command!(MultiviewProperties, b"CMvP", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .fixed(this.multiviewer)
        .optional(0, this.layout)
        .optional(1, this.swap_program_preview)
        .write_to(out);
});

/// `CMvI`: routes a source to one multiviewer window.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MultiviewInput {
    pub multiviewer: u8,
    pub window: u8,
    pub source: u16,
}

impl MultiviewInput {
    #[must_use]
    pub const fn new(multiviewer: u8, window: u8, source: u16) -> Self {
        Self {
            multiviewer,
            window,
            source,
        }
    }
}

command!(MultiviewInput, b"CMvI", |this, out| {
    out.put_u8(this.multiviewer);
    out.put_u8(this.window);
    out.put_u16(this.source);
});
