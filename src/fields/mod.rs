//! Inbound field catalog.
//!
//! Every field is an immutable snapshot decoded from one payload. Decoding is
//! pure: a short payload fails with [`FormatError`], an unrecognised tag comes
//! back as [`Field::Unknown`] so the rest of a buffer can still be decoded.

mod audio;
mod camera;
mod device;
mod dsk;
mod fairlight;
mod keyer;
mod mixer;
mod multiview;
mod recording;
mod transfer;
mod transition;

use serde::Serialize;
use serde_with::hex::Hex;
use serde_with::serde_as;
use strum_macros::IntoStaticStr;
use tracing::{instrument, warn};

use crate::codec::PayloadReader;
use crate::error::FormatError;
use crate::tag::Tag;

pub use self::audio::{AudioInput, AudioLevels, AudioMaster, AudioMonitor, AudioTally, StereoLevels};
pub use self::camera::CameraControlData;
pub use self::device::{
    AutoInputVideoMode, InitComplete, InputAvailability, InputProperties, MediaPlayerSource,
    MediaPoolConfig, MixEffectConfig, ProductName, SupportedVideoMode, TimecodeConfig, Time,
    Topology, Version, VideoModeCapabilities, VideoModeStatus,
};
pub use self::dsk::{DownstreamKeyProperties, DownstreamKeySources, DownstreamKeyState};
pub use self::fairlight::{
    EqBandProperties, FairlightAudioInput, FairlightHeadphones, FairlightLevels,
    FairlightMasterLevels, FairlightMasterProperties, FairlightMeter, FairlightSolo,
    FairlightStripDelete, FairlightStripProperties, FairlightTally, FairlightTallyEntry,
};
pub use self::keyer::{AdvancedChroma, AdvancedChromaColorPicker, KeyBase, KeyDve, KeyLuma};
pub use self::mixer::{
    AuxSource, ColorGenerator, FadeToBlackState, KeyOnAir, MacroProperties, MediaFileInfo,
    PreviewInput, ProgramInput, Tally, TallyByIndex, TallyBySource, TransitionPosition,
    TransitionPreview, TransitionSettings,
};
pub use self::multiview::{MultiviewInput, MultiviewProperties, MultiviewSafeArea, MultiviewVu};
pub use self::recording::{
    AudioBitrate, RecordingDisk, RecordingDuration, RecordingSettings, RecordingStatus,
    StreamingService, StreamingStats, StreamingStatus,
};
pub use self::transfer::{
    LockObtained, LockState, TransferChunk, TransferContinue, TransferDataComplete,
    TransferError,
};
pub use self::transition::{
    DipTransition, DveTransition, FadeToBlackRate, MixTransition, WipeTransition,
};

/// Decodes one field payload.
pub(crate) trait DecodeField: Sized {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError>;
}

/// Builds [`Field`] and its tag dispatch from one table.
macro_rules! field_catalog {
    ($( $(#[$meta:meta])* $variant:ident($ty:ty) = $tag:literal $(| $alias:literal)*; )+) => {
        /// A decoded inbound field.
        #[serde_as]
        #[derive(Debug, Clone, PartialEq, Serialize, IntoStaticStr)]
        #[serde(tag = "field", content = "data")]
        pub enum Field {
            $( $(#[$meta])* $variant($ty), )+
            /// A tag this catalog does not decode, with its payload untouched.
            Unknown {
                tag: Tag,
                #[serde_as(as = "Hex")]
                payload: Vec<u8>,
            },
        }

        impl Field {
            /// Tags this catalog decodes.
            pub const TAGS: &'static [Tag] = &[$( Tag::new(*$tag), $( Tag::new(*$alias), )* )+];

            /// Every decoded tag with the name of the variant it produces.
            pub const CATALOG: &'static [(Tag, &'static str)] = &[
                $( (Tag::new(*$tag), stringify!($variant)), $( (Tag::new(*$alias), stringify!($variant)), )* )+
            ];

            /// Decodes `payload` according to `tag`.
            ///
            /// # Errors
            ///
            /// Returns an error when the payload is too short for the layout of a
            /// known tag or declares more entries than it carries.
            #[instrument(level = "trace", skip(payload), fields(tag = %tag, payload_len = payload.len()))]
            pub fn decode(tag: Tag, payload: &[u8]) -> Result<Self, FormatError> {
                let mut reader = PayloadReader::new(tag, payload);
                match tag.as_bytes() {
                    $( $tag $(| $alias)* => <$ty as DecodeField>::decode(&mut reader).map(Self::$variant), )+
                    _ => {
                        warn!(tag = %tag, payload_len = payload.len(), "unknown field tag");
                        Ok(Self::Unknown {
                            tag,
                            payload: payload.to_vec(),
                        })
                    }
                }
            }

            /// Canonical tag of this field.
            #[must_use]
            pub fn tag(&self) -> Tag {
                match self {
                    $( Self::$variant(_) => Tag::new(*$tag), )+
                    Self::Unknown { tag, .. } => *tag,
                }
            }
        }
    };
}

field_catalog! {
    Version(Version) = b"_ver";
    Time(Time) = b"Time";
    TimecodeConfig(TimecodeConfig) = b"TCCc";
    ProductName(ProductName) = b"_pin";
    MixEffectConfig(MixEffectConfig) = b"_MeC";
    MediaPoolConfig(MediaPoolConfig) = b"_mpl";
    MediaPlayerSource(MediaPlayerSource) = b"MPCE";
    Topology(Topology) = b"_top";
    InitComplete(InitComplete) = b"InCm";
    VideoMode(VideoModeStatus) = b"VidM";
    VideoModeCapabilities(VideoModeCapabilities) = b"_VMC";
    InputProperties(InputProperties) = b"InPr";
    AutoInputVideoMode(AutoInputVideoMode) = b"AiVM";

    ProgramInput(ProgramInput) = b"PrgI";
    PreviewInput(PreviewInput) = b"PrvI";
    TransitionSettings(TransitionSettings) = b"TrSS";
    /// Devices in the field send `TsPr`; `TrPr` is accepted as well.
    TransitionPreview(TransitionPreview) = b"TsPr" | b"TrPr";
    TransitionPosition(TransitionPosition) = b"TrPs";
    TallyByIndex(TallyByIndex) = b"TlIn";
    TallyBySource(TallyBySource) = b"TlSr";
    KeyOnAir(KeyOnAir) = b"KeOn";
    ColorGenerator(ColorGenerator) = b"ColV";
    AuxSource(AuxSource) = b"AuxS";
    FadeToBlackState(FadeToBlackState) = b"FtbS";
    MediaFileInfo(MediaFileInfo) = b"MPfe";
    MacroProperties(MacroProperties) = b"MPrp";

    DownstreamKeySources(DownstreamKeySources) = b"DskB";
    DownstreamKeyProperties(DownstreamKeyProperties) = b"DskP";
    DownstreamKeyState(DownstreamKeyState) = b"DskS";

    MixTransition(MixTransition) = b"TMxP";
    FadeToBlackRate(FadeToBlackRate) = b"FtbP";
    DipTransition(DipTransition) = b"TDpP";
    WipeTransition(WipeTransition) = b"TWpP";
    DveTransition(DveTransition) = b"TDvP";

    KeyBase(KeyBase) = b"KeBP";
    KeyDve(KeyDve) = b"KeDV";
    KeyLuma(KeyLuma) = b"KeLm";
    AdvancedChroma(AdvancedChroma) = b"KACk";
    AdvancedChromaColorPicker(AdvancedChromaColorPicker) = b"KACC";

    AudioMaster(AudioMaster) = b"AMMO";
    AudioMonitor(AudioMonitor) = b"AMmO";
    AudioInput(AudioInput) = b"AMIP";
    AudioTally(AudioTally) = b"AMTl";
    AudioLevels(AudioLevels) = b"AMLv";

    FairlightMasterProperties(FairlightMasterProperties) = b"FAMP";
    FairlightStripProperties(FairlightStripProperties) = b"FASP";
    FairlightStripDelete(FairlightStripDelete) = b"FASD";
    FairlightAudioInput(FairlightAudioInput) = b"FAIP";
    FairlightTally(FairlightTally) = b"FMTl";
    FairlightHeadphones(FairlightHeadphones) = b"FMHP";
    FairlightSolo(FairlightSolo) = b"FAMS";
    EqBandProperties(EqBandProperties) = b"AEBP";
    FairlightLevels(FairlightLevels) = b"FMLv";
    FairlightMasterLevels(FairlightMasterLevels) = b"FDLv";

    RecordingDisk(RecordingDisk) = b"RTMD";
    RecordingSettings(RecordingSettings) = b"RMSu";
    /// Firmware sends `RTMS`; some captures show `RMTS`.
    RecordingStatus(RecordingStatus) = b"RTMS" | b"RMTS";
    RecordingDuration(RecordingDuration) = b"RTMR";
    AudioBitrate(AudioBitrate) = b"STAB";
    StreamingService(StreamingService) = b"SRSU";
    StreamingStatus(StreamingStatus) = b"StRS";
    StreamingStats(StreamingStats) = b"SRSS";

    MultiviewProperties(MultiviewProperties) = b"MvPr";
    MultiviewInput(MultiviewInput) = b"MvIn";
    MultiviewVu(MultiviewVu) = b"VuMC";
    MultiviewSafeArea(MultiviewSafeArea) = b"SaMw";

    LockObtained(LockObtained) = b"LKOB";
    LockState(LockState) = b"LKST";
    TransferChunk(TransferChunk) = b"FTDa";
    TransferError(TransferError) = b"FTDE";
    TransferDataComplete(TransferDataComplete) = b"FTDC";
    TransferContinue(TransferContinue) = b"FTCD";

    CameraControlData(CameraControlData) = b"CCdP";
}

impl Field {
    /// Variant name, e.g. `ProgramInput`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Decodes one field; see [`Field::decode`].
///
/// ```
/// use atem_codec::{Field, Tag, fields};
///
/// let field = fields::decode(Tag::new(*b"PrgI"), &[0, 0, 0x03, 0xE8])?;
/// assert_eq!("ProgramInput", field.name());
///
/// let unknown = fields::decode(Tag::new(*b"Zzzz"), &[1, 2])?;
/// assert!(matches!(unknown, Field::Unknown { .. }));
/// # Ok::<(), atem_codec::FormatError>(())
/// ```
///
/// # Errors
///
/// Returns an error when a known tag carries a malformed payload.
pub fn decode(tag: Tag, payload: &[u8]) -> Result<Field, FormatError> {
    Field::decode(tag, payload)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unknown_tag_keeps_payload() {
        let tag = Tag::new(*b"Zzzz");
        let field = Field::decode(tag, &[9, 8, 7]).expect("unknown tags are not errors");
        assert_eq!(
            Field::Unknown {
                tag,
                payload: vec![9, 8, 7]
            },
            field
        );
        assert_eq!(tag, field.tag());
    }

    #[test]
    fn local_notice_is_not_a_device_field() {
        let field = Field::decode(Tag::new(*b"*XFC"), &[0, 0, 0, 1, 1, 0, 0, 0]).expect("unknown");
        assert_matches!(field, Field::Unknown { .. });
    }

    #[test]
    fn aliases_report_canonical_tag() {
        let field = Field::decode(Tag::new(*b"TrPr"), &[0, 1, 0, 0]).expect("four bytes");
        assert_eq!(Tag::new(*b"TsPr"), field.tag());
        assert_eq!("TransitionPreview", field.name());
    }

    #[test]
    fn short_payload_is_a_format_error() {
        let result = Field::decode(Tag::new(*b"PrgI"), &[0, 0]);
        assert_matches!(result, Err(FormatError::Truncated { needed: 4, available: 2, .. }));
    }

    #[test]
    fn tag_table_has_no_duplicates() {
        let mut tags = Field::TAGS.to_vec();
        tags.sort_by_key(|tag| *tag.as_bytes());
        tags.dedup();
        assert_eq!(Field::TAGS.len(), tags.len());
    }

    #[test]
    fn unknown_serializes_payload_as_hex() {
        let field = Field::Unknown {
            tag: Tag::new(*b"Zzzz"),
            payload: vec![0xAB, 0x01],
        };
        let json = serde_json::to_string(&field).expect("serializable");
        assert_eq!(
            r#"{"field":"Unknown","data":{"tag":"Zzzz","payload":"ab01"}}"#,
            json
        );
    }
}
