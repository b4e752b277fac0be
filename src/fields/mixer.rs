//! M/E bus, tally, color generator and media pool fields.

use serde::Serialize;
use serde_with::hex::Hex;
use serde_with::serde_as;

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::error::FormatError;
use crate::transcode::{HslColor, Hue, Permille, Rgb};
use crate::types::{MediaSourceType, TransitionLayers, TransitionStyle};

/// `PrgI`: program bus source.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct ProgramInput {
    pub me: u8,
    pub source: u16,
}

impl DecodeField for ProgramInput {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        let me = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            me,
            source: reader.u16()?,
        })
    }
}

/// `PrvI`: preview bus source.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct PreviewInput {
    pub me: u8,
    pub source: u16,
    /// Preview is visible on program during a transition.
    pub in_program: bool,
}

impl DecodeField for PreviewInput {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        let me = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            me,
            source: reader.u16()?,
            in_program: reader.u8()? == 1,
        })
    }
}

/// `TrSS`: current and next transition style and layers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TransitionSettings {
    pub me: u8,
    pub style: TransitionStyle,
    pub layers: TransitionLayers,
    pub next_style: TransitionStyle,
    pub next_layers: TransitionLayers,
}

impl DecodeField for TransitionSettings {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        Ok(Self {
            me: reader.u8()?,
            style: reader.u8()?.into(),
            layers: TransitionLayers::from_bits(reader.u8()?),
            next_style: reader.u8()?.into(),
            next_layers: TransitionLayers::from_bits(reader.u8()?),
        })
    }
}

/// `TsPr`: state of the preview-transition button.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TransitionPreview {
    pub me: u8,
    pub enabled: bool,
}

impl DecodeField for TransitionPreview {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            me: reader.u8()?,
            enabled: reader.bool()?,
        })
    }
}

/// `TrPs`: T-bar position, `0..=10000`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TransitionPosition {
    pub me: u8,
    pub in_transition: bool,
    pub frames_remaining: u8,
    pub position: u16,
}

impl DecodeField for TransitionPosition {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        let me = reader.u8()?;
        let in_transition = reader.bool()?;
        let frames_remaining = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            me,
            in_transition,
            frames_remaining,
            position: reader.u16()?,
        })
    }
}

/// Tally light state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize)]
pub struct Tally {
    pub program: bool,
    pub preview: bool,
}

impl Tally {
    const fn from_bits(bits: u8) -> Self {
        Self {
            program: bits & 0b01 != 0,
            preview: bits & 0b10 != 0,
        }
    }
}

/// `TlIn`: tally of every input in index order.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TallyByIndex {
    pub tally: Vec<Tally>,
}

impl DecodeField for TallyByIndex {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        let count = usize::from(reader.u16()?);
        reader.expect_entries(count, 1)?;
        let tally = (0..count)
            .map(|_| reader.u8().map(Tally::from_bits))
            .collect::<Result<_, _>>()?;
        Ok(Self { tally })
    }
}

/// `TlSr`: tally keyed by source index.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TallyBySource {
    pub sources: Vec<(u16, Tally)>,
}

impl TallyBySource {
    /// Tally of `source`, if the device reported it.
    #[must_use]
    pub fn get(&self, source: u16) -> Option<Tally> {
        self.sources
            .iter()
            .find(|(index, _)| *index == source)
            .map(|(_, tally)| *tally)
    }
}

impl DecodeField for TallyBySource {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        let count = usize::from(reader.u16()?);
        reader.expect_entries(count, 3)?;
        let mut sources = Vec::with_capacity(count);
        for _ in 0..count {
            sources.push((reader.u16()?, Tally::from_bits(reader.u8()?)));
        }
        Ok(Self { sources })
    }
}

/// `KeOn`: upstream keyer on air.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct KeyOnAir {
    pub me: u8,
    pub keyer: u8,
    pub on_air: bool,
}

impl DecodeField for KeyOnAir {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            me: reader.u8()?,
            keyer: reader.u8()?,
            on_air: reader.bool()?,
        })
    }
}

/// `ColV`: color generator in device units (hue ×10, saturation and luma ×1000).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct ColorGenerator {
    pub index: u8,
    pub hue: Hue,
    pub saturation: Permille,
    pub luma: Permille,
}

impl ColorGenerator {
    /// The generator color in the units `CClV` takes.
    #[must_use]
    pub const fn color(&self) -> HslColor {
        HslColor {
            hue: self.hue,
            saturation: self.saturation,
            luma: self.luma,
        }
    }

    /// Converts the generator color to floating RGB.
    ///
    /// ```
    /// use atem_codec::{Field, Tag};
    ///
    /// let field = Field::decode(Tag::new(*b"ColV"), &[0, 0, 0, 0, 0x03, 0xE8, 0x01, 0xF4])?;
    /// let Field::ColorGenerator(color) = field else { unreachable!() };
    /// let rgb = color.rgb();
    /// assert_eq!((1.0, 0.0, 0.0), (rgb.red, rgb.green, rgb.blue));
    /// # Ok::<(), atem_codec::FormatError>(())
    /// ```
    #[must_use]
    pub fn rgb(&self) -> Rgb {
        self.color().to_rgb()
    }
}

impl DecodeField for ColorGenerator {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        let index = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            index,
            hue: Hue::from_wire(reader.u16()?),
            saturation: Permille::from_wire(reader.u16()?),
            luma: Permille::from_wire(reader.u16()?),
        })
    }
}

/// `AuxS`: aux output routing.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct AuxSource {
    pub aux: u8,
    pub source: u16,
}

impl DecodeField for AuxSource {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        let aux = reader.u8()?;
        reader.skip(1)?;
        Ok(Self {
            aux,
            source: reader.u16()?,
        })
    }
}

/// `FtbS`: fade-to-black progress.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct FadeToBlackState {
    pub me: u8,
    pub done: bool,
    pub transitioning: bool,
    pub frames_remaining: u8,
}

impl DecodeField for FadeToBlackState {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            me: reader.u8()?,
            done: reader.bool()?,
            transitioning: reader.bool()?,
            frames_remaining: reader.u8()?,
        })
    }
}

/// `MPfe`: one media pool slot.
#[serde_as]
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MediaFileInfo {
    pub source_type: MediaSourceType,
    pub index: u16,
    pub used: bool,
    #[serde_as(as = "Hex")]
    pub hash: [u8; 16],
    pub name: String,
}

const MEDIA_NAME_OFFSET: usize = 23;

impl DecodeField for MediaFileInfo {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(MEDIA_NAME_OFFSET)?;
        let source_type = reader.u8()?.into();
        reader.skip(1)?;
        let index = reader.u16()?;
        let used = reader.bool()?;
        let mut hash = [0; 16];
        hash.copy_from_slice(reader.take(16)?);
        reader.skip(2)?;

        // Length-prefixed name; an empty slot may omit the length byte.
        let name = if reader.position() < reader.len() {
            let len = usize::from(reader.u8()?);
            String::from_utf8_lossy(reader.take(len)?).into_owned()
        } else {
            String::new()
        };
        Ok(Self {
            source_type,
            index,
            used,
            hash,
            name,
        })
    }
}

/// `MPrp`: macro slot metadata.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MacroProperties {
    pub index: u16,
    pub used: bool,
    pub has_invalid_commands: bool,
    pub name: String,
    pub description: String,
}

impl DecodeField for MacroProperties {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        let index = reader.u16()?;
        let used = reader.bool()?;
        let has_invalid_commands = reader.bool()?;
        let name_len = usize::from(reader.u16()?);
        let description_len = usize::from(reader.u16()?);
        reader.expect_entries(name_len.saturating_add(description_len), 1)?;
        let name = String::from_utf8_lossy(reader.take(name_len)?).into_owned();
        let description = String::from_utf8_lossy(reader.take(description_len)?).into_owned();
        Ok(Self {
            index,
            used,
            has_invalid_commands,
            name,
            description,
        })
    }
}
