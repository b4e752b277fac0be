//! Metadata about every tag the crate knows.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::fields::Field;
use crate::local::TRANSFER_COMPLETE_TAG;
use crate::tag::Tag;

/// Which way a tag travels.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Client to switcher.
    Command,
    /// Switcher to client.
    Field,
    /// Between local components, never on the device link.
    Local,
}

/// Descriptive metadata for one tag in one direction.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TagInfo {
    pub tag: Tag,
    pub direction: Direction,
    pub name: &'static str,
}

const COMMANDS: &[(&[u8; 4], &str)] = &[
    (b"CPgI", "ProgramInput"),
    (b"CPvI", "PreviewInput"),
    (b"DCut", "Cut"),
    (b"DAut", "AutoTransition"),
    (b"CTTp", "TransitionSettings"),
    (b"CTPr", "TransitionPreview"),
    (b"CTPs", "TransitionPosition"),
    (b"FtbA", "FadeToBlack"),
    (b"FtbC", "FadeToBlackRate"),
    (b"CAuS", "AuxSource"),
    (b"CClV", "ColorGenerator"),
    (b"MPSS", "MediaPlayerSource"),
    (b"Capt", "CaptureStill"),
    (b"CTMx", "MixSettings"),
    (b"CTDp", "DipSettings"),
    (b"CTWp", "WipeSettings"),
    (b"CTDv", "DveSettings"),
    (b"CDsL", "DownstreamKeyOnAir"),
    (b"CDsT", "DownstreamKeyTie"),
    (b"CDsR", "DownstreamKeyRate"),
    (b"DDsA", "DownstreamKeyAuto"),
    (b"CDsF", "DownstreamKeyFill"),
    (b"CDsC", "DownstreamKeyCut"),
    (b"CDsG", "DownstreamKeyGain"),
    (b"CDsM", "DownstreamKeyMask"),
    (b"CKOn", "KeyOnAir"),
    (b"CKTp", "KeyTypeSet"),
    (b"CKeF", "KeyFill"),
    (b"CKeC", "KeyCut"),
    (b"CKLm", "KeyLumaProperties"),
    (b"CKDV", "KeyDveProperties"),
    (b"CACK", "AdvancedChromaProperties"),
    (b"CACC", "AdvancedChromaColorPicker"),
    (b"SFKF", "KeyframeStore"),
    (b"RFlK", "KeyframeRun"),
    (b"CAMM", "AudioMasterProperties"),
    (b"CAMm", "AudioMonitorProperties"),
    (b"CAMI", "AudioInput"),
    (b"SALN", "SendAudioLevels"),
    (b"CFMP", "FairlightMasterProperties"),
    (b"CFSP", "FairlightStripProperties"),
    (b"SFLN", "SendFairlightLevels"),
    (b"CVdM", "VideoModeSet"),
    (b"AiVM", "AutoInputVideoMode"),
    (b"CInL", "InputProperties"),
    (b"TiRq", "TimeRequest"),
    (b"CMvP", "MultiviewProperties"),
    (b"CMvI", "MultiviewInput"),
    (b"RcTM", "RecorderStatus"),
    (b"CRMS", "RecordingSettings"),
    (b"CRSS", "StreamingService"),
    (b"StrR", "StreamingStatus"),
    (b"LOCK", "Lock"),
    (b"PLCK", "PartialLock"),
    (b"FTSU", "TransferDownloadRequest"),
    (b"FTSD", "TransferUploadRequest"),
    (b"FTDa", "TransferData"),
    (b"FTFD", "TransferFileData"),
    (b"FTUA", "TransferAck"),
    (b"CCmd", "CameraControl"),
];

/// Every known tag, commands first, then fields, then local notices.
pub static CATALOG: LazyLock<Vec<TagInfo>> = LazyLock::new(|| {
    let commands = COMMANDS.iter().map(|(tag, name)| TagInfo {
        tag: Tag::new(**tag),
        direction: Direction::Command,
        name: *name,
    });
    let fields = Field::CATALOG.iter().map(|(tag, name)| TagInfo {
        tag: *tag,
        direction: Direction::Field,
        name: *name,
    });
    let local = std::iter::once(TagInfo {
        tag: TRANSFER_COMPLETE_TAG,
        direction: Direction::Local,
        name: "TransferCompleteNotice",
    });
    commands.chain(fields).chain(local).collect()
});

static BY_TAG: LazyLock<HashMap<Tag, Vec<TagInfo>>> = LazyLock::new(|| {
    let mut by_tag: HashMap<Tag, Vec<TagInfo>> = HashMap::new();
    for info in CATALOG.iter() {
        by_tag.entry(info.tag).or_default().push(*info);
    }
    by_tag
});

/// Returns the metadata of `tag` in every direction it is used.
///
/// ```
/// use atem_codec::{Direction, Tag, lookup_tag};
///
/// let directions: Vec<Direction> = lookup_tag(Tag::new(*b"FTDa"))
///     .iter()
///     .map(|info| info.direction)
///     .collect();
/// assert_eq!(vec![Direction::Command, Direction::Field], directions);
/// ```
#[must_use]
pub fn lookup_tag(tag: Tag) -> &'static [TagInfo] {
    BY_TAG.get(&tag).map_or(&[], Vec::as_slice)
}
