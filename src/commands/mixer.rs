//! M/E bus, transition and media player commands.

use bon::{Builder, bon};
use bytes::BufMut;

use super::command;
use crate::codec::{FieldSet, MaskWidth};
use crate::error::ConfigurationError;
use crate::transcode::{HslColor, Hue, Permille, Rgb};
use crate::types::{MediaSourceType, TransitionLayers, TransitionStyle};

/// Largest transition handle position.
pub const TRANSITION_POSITION_MAX: u16 = 10_000;

/// `DCut`: hard cut on an M/E unit.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Cut {
    pub me: u8,
}

impl Cut {
    #[must_use]
    pub const fn new(me: u8) -> Self {
        Self { me }
    }
}

command!(Cut, b"DCut", |this, out| {
    out.put_u8(this.me);
    out.put_bytes(0, 3);
});

/// `DAut`: runs the configured auto transition.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AutoTransition {
    pub me: u8,
}

impl AutoTransition {
    #[must_use]
    pub const fn new(me: u8) -> Self {
        Self { me }
    }
}

command!(AutoTransition, b"DAut", |this, out| {
    out.put_u8(this.me);
    out.put_bytes(0, 3);
});

/// `CPgI`: selects the program bus source.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ProgramInput {
    pub me: u8,
    pub source: u16,
}

impl ProgramInput {
    #[must_use]
    pub const fn new(me: u8, source: u16) -> Self {
        Self { me, source }
    }
}

command!(ProgramInput, b"CPgI", |this, out| {
    out.put_u8(this.me);
    out.put_u8(0);
    out.put_u16(this.source);
});

/// `CPvI`: selects the preview bus source.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PreviewInput {
    pub me: u8,
    pub source: u16,
}

impl PreviewInput {
    #[must_use]
    pub const fn new(me: u8, source: u16) -> Self {
        Self { me, source }
    }
}

command!(PreviewInput, b"CPvI", |this, out| {
    out.put_u8(this.me);
    out.put_u8(0);
    out.put_u16(this.source);
});

/// `CAuS`: routes a source to an aux output.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct AuxSource {
    pub aux: u8,
    pub source: u16,
}

impl AuxSource {
    #[must_use]
    pub const fn new(aux: u8, source: u16) -> Self {
        Self { aux, source }
    }
}

command!(AuxSource, b"CAuS", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .flag(0, true)
        .fixed(this.aux)
        .fixed(this.source)
        .write_to(out);
});

/// `CTPs`: moves the transition handle.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TransitionPosition {
    me: u8,
    position: u16,
}

impl TransitionPosition {
    /// Creates the command for a position in `0..=10000`.
    ///
    /// # Errors
    ///
    /// Returns an error when `position` is above 10000.
    pub fn new(me: u8, position: u16) -> Result<Self, ConfigurationError> {
        if position > TRANSITION_POSITION_MAX {
            return Err(ConfigurationError::OutOfRange {
                name: "transition position",
                value: f64::from(position),
                min: 0.0,
                max: f64::from(TRANSITION_POSITION_MAX),
            });
        }
        Ok(Self { me, position })
    }

    #[must_use]
    pub const fn me(&self) -> u8 {
        self.me
    }

    #[must_use]
    pub const fn position(&self) -> u16 {
        self.position
    }
}

command!(TransitionPosition, b"CTPs", |this, out| {
    out.put_u8(this.me);
    out.put_u8(0);
    out.put_u16(this.position);
});

/// `CTPr`: toggles transition preview.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TransitionPreview {
    pub me: u8,
    pub enabled: bool,
}

impl TransitionPreview {
    #[must_use]
    pub const fn new(me: u8, enabled: bool) -> Self {
        Self { me, enabled }
    }
}

command!(TransitionPreview, b"CTPr", |this, out| {
    out.put_u8(this.me);
    out.put_u8(u8::from(this.enabled));
    out.put_bytes(0, 2);
});

/// `CTTp`: sets the transition style and next-transition layers.
///
/// ```
/// use atem_codec::commands::{Command, TransitionSettings};
/// use atem_codec::{TransitionLayers, TransitionStyle};
///
/// let command = TransitionSettings::builder()
///     .me(0)
///     .next_layers(TransitionLayers::BACKGROUND | TransitionLayers::KEY1)
///     .build();
/// assert_eq!(vec![0b10, 0, 0, 0b11], command.payload());
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct TransitionSettings {
    pub me: u8,
    pub style: Option<TransitionStyle>,
    pub next_layers: Option<TransitionLayers>,
}

command!(TransitionSettings, b"CTTp", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .fixed(this.me)
        .optional(0, this.style)
        .optional(1, this.next_layers)
        .write_to(out);
});

/// `CClV`: sets a color generator.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct ColorGenerator {
    pub index: u8,
    pub hue: Option<Hue>,
    pub saturation: Option<Permille>,
    pub luma: Option<Permille>,
}

impl ColorGenerator {
    /// Sets every component from floating RGB.
    ///
    /// # Errors
    ///
    /// Returns an error when a channel lies outside `0.0..=1.0`.
    pub fn from_rgb(index: u8, rgb: Rgb) -> Result<Self, ConfigurationError> {
        Ok(Self::from_hsl(index, HslColor::from_rgb(rgb)?))
    }

    /// Sets every component from device units.
    #[must_use]
    pub const fn from_hsl(index: u8, color: HslColor) -> Self {
        Self {
            index,
            hue: Some(color.hue),
            saturation: Some(color.saturation),
            luma: Some(color.luma),
        }
    }
}

command!(ColorGenerator, b"CClV", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .fixed(this.index)
        .optional(0, this.hue)
        .optional(1, this.saturation)
        .optional(2, this.luma)
        .write_to(out);
});

/// `FtbA`: toggles fade to black.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FadeToBlack {
    pub me: u8,
}

impl FadeToBlack {
    #[must_use]
    pub const fn new(me: u8) -> Self {
        Self { me }
    }
}

command!(FadeToBlack, b"FtbA", |this, out| {
    out.put_u8(this.me);
    out.put_bytes(0, 3);
});

/// `FtbC`: sets the fade to black rate in frames.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FadeToBlackRate {
    pub me: u8,
    pub frames: u8,
}

impl FadeToBlackRate {
    #[must_use]
    pub const fn new(me: u8, frames: u8) -> Self {
        Self { me, frames }
    }
}

command!(FadeToBlackRate, b"FtbC", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .flag(0, true)
        .fixed(this.me)
        .fixed(this.frames)
        .pad(1)
        .write_to(out);
});

/// `Capt`: stores the program output as a still.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct CaptureStill;

command!(CaptureStill, b"Capt", |_this, _out| {});

/// `MPSS`: loads a still or a clip into a media player.
///
/// ```
/// use atem_codec::ConfigurationError;
/// use atem_codec::commands::{Command, MediaPlayerSource};
///
/// let command = MediaPlayerSource::builder().player(0).still(4).build()?;
/// assert_eq!(vec![0b011, 0, 1, 4, 0, 0, 0, 0], command.payload());
///
/// let both = MediaPlayerSource::builder().player(0).still(4).clip(1).build();
/// assert!(matches!(both, Err(ConfigurationError::MediaSourceNotExclusive { .. })));
/// # Ok::<(), ConfigurationError>(())
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MediaPlayerSource {
    player: u8,
    source: MediaSlot,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum MediaSlot {
    Still(u8),
    Clip(u8),
}

#[bon]
impl MediaPlayerSource {
    /// Validates that exactly one of `still` or `clip` is given.
    ///
    /// # Errors
    ///
    /// Returns an error when both or neither are given.
    #[builder]
    pub fn new(player: u8, still: Option<u8>, clip: Option<u8>) -> Result<Self, ConfigurationError> {
        let source = match (still, clip) {
            (Some(still), None) => MediaSlot::Still(still),
            (None, Some(clip)) => MediaSlot::Clip(clip),
            (still, clip) => {
                return Err(ConfigurationError::MediaSourceNotExclusive {
                    still: still.is_some(),
                    clip: clip.is_some(),
                });
            }
        };
        Ok(Self { player, source })
    }

    #[must_use]
    pub const fn player(&self) -> u8 {
        self.player
    }

    #[must_use]
    pub const fn source_type(&self) -> MediaSourceType {
        match self.source {
            MediaSlot::Still(_) => MediaSourceType::Still,
            MediaSlot::Clip(_) => MediaSourceType::Clip,
        }
    }
}

command!(MediaPlayerSource, b"MPSS", |this, out| {
    let (still, clip) = match this.source {
        MediaSlot::Still(still) => (Some(still), None),
        MediaSlot::Clip(clip) => (None, Some(clip)),
    };
    FieldSet::new(MaskWidth::U8)
        .flag(0, true)
        .fixed(this.player)
        .fixed(this.source_type())
        .optional(1, still)
        .optional(2, clip)
        .pad(3)
        .write_to(out);
});

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::commands::Command;

    #[rstest]
    #[case(&Cut::new(1), b"DCut", vec![1, 0, 0, 0])]
    #[case(&AutoTransition::new(0), b"DAut", vec![0, 0, 0, 0])]
    #[case(&ProgramInput::new(0, 1000), b"CPgI", vec![0, 0, 0x03, 0xE8])]
    #[case(&PreviewInput::new(1, 2), b"CPvI", vec![1, 0, 0, 2])]
    #[case(&AuxSource::new(2, 10010), b"CAuS", vec![1, 2, 0x27, 0x1A])]
    #[case(&TransitionPreview::new(0, true), b"CTPr", vec![0, 1, 0, 0])]
    #[case(&FadeToBlack::new(0), b"FtbA", vec![0, 0, 0, 0])]
    #[case(&FadeToBlackRate::new(0, 25), b"FtbC", vec![1, 0, 25, 0])]
    #[case(&CaptureStill, b"Capt", vec![])]
    fn fixed_layouts(#[case] command: &dyn Command, #[case] tag: &[u8; 4], #[case] payload: Vec<u8>) {
        assert_eq!(tag, command.tag().as_bytes());
        assert_eq!(payload, command.payload());
    }

    #[test]
    fn transition_position_is_range_checked() {
        let command = TransitionPosition::new(0, 10_000).expect("upper bound is valid");
        assert_eq!(vec![0, 0, 0x27, 0x10], command.payload());
        assert_matches!(
            TransitionPosition::new(0, 10_001),
            Err(ConfigurationError::OutOfRange { name: "transition position", .. })
        );
    }

    #[test]
    fn transition_style_only_sets_bit_zero() {
        let command = TransitionSettings::builder()
            .me(1)
            .style(TransitionStyle::Wipe)
            .build();
        assert_eq!(vec![0b01, 1, 2, 0], command.payload());
    }

    #[rstest]
    #[case(Some(0), 0)]
    #[case(Some(3599), 3599)]
    fn color_generator_hue_bounds(#[case] tenths: Option<u16>, #[case] wire: u16) {
        let hue = tenths.map(Hue::from_tenths).transpose().expect("valid hue");
        let command = ColorGenerator::builder().index(0).maybe_hue(hue).build();
        let [high, low] = wire.to_be_bytes();
        assert_eq!(vec![0b001, 0, high, low, 0, 0, 0, 0], command.payload());
    }

    #[test]
    fn color_generator_from_rgb_sets_every_bit() {
        let command = ColorGenerator::from_rgb(1, Rgb::new(1.0, 0.0, 0.0)).expect("valid rgb");
        // Pure red: hue 0, saturation 1000, luma 500.
        assert_eq!(vec![0b111, 1, 0, 0, 0x03, 0xE8, 0x01, 0xF4], command.payload());
    }

    #[test]
    fn color_generator_rejects_out_of_range_rgb() {
        assert_matches!(
            ColorGenerator::from_rgb(0, Rgb::new(1.2, 0.0, 0.0)),
            Err(ConfigurationError::OutOfRange { name: "red", .. })
        );
    }

    #[rstest]
    #[case(Some(2), None, vec![0b011, 1, 1, 2, 0, 0, 0, 0])]
    #[case(None, Some(1), vec![0b101, 1, 2, 0, 1, 0, 0, 0])]
    fn media_player_source_sets_one_slot(
        #[case] still: Option<u8>,
        #[case] clip: Option<u8>,
        #[case] expected: Vec<u8>,
    ) {
        let command = MediaPlayerSource::builder()
            .player(1)
            .maybe_still(still)
            .maybe_clip(clip)
            .build()
            .expect("exactly one slot");
        assert_eq!(expected, command.payload());
    }

    #[rstest]
    #[case(Some(1), Some(2))]
    #[case(None, None)]
    fn media_player_source_requires_exactly_one(#[case] still: Option<u8>, #[case] clip: Option<u8>) {
        let result = MediaPlayerSource::builder()
            .player(0)
            .maybe_still(still)
            .maybe_clip(clip)
            .build();
        assert_matches!(result, Err(ConfigurationError::MediaSourceNotExclusive { .. }));
    }
}
