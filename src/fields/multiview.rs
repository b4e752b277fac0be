//! Multiviewer fields.

use serde::Serialize;

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::error::FormatError;

/// `MvPr`: layout preset of one multiviewer.
///
/// Each layout bit marks a quadrant that is split into four small windows.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct MultiviewProperties {
    pub multiviewer: u8,
    pub layout: u8,
    pub swap_program_preview: bool,
}

impl MultiviewProperties {
    #[must_use]
    pub const fn top_left_small(&self) -> bool {
        self.layout & 0x01 != 0
    }

    #[must_use]
    pub const fn top_right_small(&self) -> bool {
        self.layout & 0x02 != 0
    }

    #[must_use]
    pub const fn bottom_left_small(&self) -> bool {
        self.layout & 0x04 != 0
    }

    #[must_use]
    pub const fn bottom_right_small(&self) -> bool {
        self.layout & 0x08 != 0
    }
}

impl DecodeField for MultiviewProperties {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            multiviewer: reader.u8()?,
            layout: reader.u8()?,
            swap_program_preview: reader.bool()?,
        })
    }
}

/// `MvIn`: source routed to a window, and which overlays it supports.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct MultiviewInput {
    pub multiviewer: u8,
    pub window: u8,
    pub source: u16,
    pub supports_vu: bool,
    pub supports_safe_area: bool,
}

impl DecodeField for MultiviewInput {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        Ok(Self {
            multiviewer: reader.u8()?,
            window: reader.u8()?,
            source: reader.u16()?,
            supports_vu: reader.bool()?,
            supports_safe_area: reader.bool()?,
        })
    }
}

fn read_overlay(reader: &mut PayloadReader<'_>) -> Result<(u8, u8, bool), FormatError> {
    reader.expect_len(4)?;
    Ok((reader.u8()?, reader.u8()?, reader.bool()?))
}

/// `VuMC`: VU meter overlay on one window.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct MultiviewVu {
    pub multiviewer: u8,
    pub window: u8,
    pub enabled: bool,
}

impl DecodeField for MultiviewVu {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        let (multiviewer, window, enabled) = read_overlay(reader)?;
        Ok(Self {
            multiviewer,
            window,
            enabled,
        })
    }
}

/// `SaMw`: safe area overlay on one window.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct MultiviewSafeArea {
    pub multiviewer: u8,
    pub window: u8,
    pub enabled: bool,
}

impl DecodeField for MultiviewSafeArea {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        let (multiviewer, window, enabled) = read_overlay(reader)?;
        Ok(Self {
            multiviewer,
            window,
            enabled,
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
    fn layout_bits() {
        let Field::MultiviewProperties(properties) =
            Field::decode(Tag::new(*b"MvPr"), &[0, 0b1100, 1, 0]).expect("valid")
        else {
            panic!("wrong field");
        };
        assert!(properties.bottom_left_small() && properties.bottom_right_small());
        assert!(!properties.top_left_small());
        assert!(properties.swap_program_preview);
    }

    #[test]
    fn window_routing() {
        assert_eq!(
            Field::MultiviewInput(MultiviewInput {
                multiviewer: 0,
                window: 5,
                source: 3010,
                supports_vu: true,
                supports_safe_area: false,
            }),
            Field::decode(Tag::new(*b"MvIn"), &[0, 5, 0x0B, 0xC2, 1, 0, 0, 0]).expect("valid")
        );
    }

    #[test]
    fn overlays_share_layout() {
        assert_eq!(
            Field::MultiviewSafeArea(MultiviewSafeArea {
                multiviewer: 1,
                window: 1,
                enabled: true,
            }),
            Field::decode(Tag::new(*b"SaMw"), &[1, 1, 1, 0]).expect("valid")
        );
    }
}
