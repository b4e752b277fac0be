//! Outbound command catalog.
//!
//! Every command is a plain value: construct it, encode it, hand the bytes to
//! the transport. Fixed commands take all of their parameters in `new`.
//! Partial-update commands are built with a `bon` builder where every unset
//! optional parameter leaves the device property unchanged.

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

use bytes::BytesMut;

use crate::codec::{Envelope, EnvelopeError};
use crate::tag::Tag;
use crate::utils::format_hex;

pub use self::audio::{AudioInput, AudioMasterProperties, AudioMonitorProperties, SendAudioLevels};
pub use self::camera::{
    CameraControl, CameraData, CameraDataType, CameraParameter, camera_parameter,
};
pub use self::device::{AutoInputVideoMode, InputProperties, TimeRequest, VideoModeSet};
pub use self::dsk::{
    DownstreamKeyAuto, DownstreamKeyCut, DownstreamKeyFill, DownstreamKeyGain,
    DownstreamKeyMask, DownstreamKeyOnAir, DownstreamKeyRate, DownstreamKeyTie,
};
pub use self::fairlight::{
    FairlightChannel, FairlightMasterProperties, FairlightStripProperties, SendFairlightLevels,
};
pub use self::keyer::{
    AdvancedChromaColorPicker, AdvancedChromaProperties, KeyCut, KeyDveProperties, KeyFill,
    KeyLumaProperties, KeyOnAir, KeyTypeSet, KeyframeRun, KeyframeStore,
};
pub use self::mixer::{
    AutoTransition, AuxSource, CaptureStill, ColorGenerator, Cut, FadeToBlack, FadeToBlackRate,
    MediaPlayerSource, PreviewInput, ProgramInput, TransitionPosition, TransitionPreview,
    TransitionSettings,
};
pub use self::multiview::{MultiviewInput, MultiviewProperties};
pub use self::recording::{RecorderStatus, RecordingSettings, StreamingService, StreamingStatus};
pub use self::transfer::{
    Lock, MACRO_STORE, PartialLock, TransferAck, TransferData, TransferDownloadRequest, TransferFileData,
    TransferUploadRequest, UploadMode,
};
pub use self::transition::{DipSettings, DveSettings, MixSettings, WipeSettings};

/// An outbound device operation.
pub trait Command {
    /// Wire tag of this command.
    fn tag(&self) -> Tag;

    /// Appends the payload (without envelope) to `out`.
    fn write_payload(&self, out: &mut BytesMut);

    /// Returns the payload bytes.
    fn payload(&self) -> Vec<u8> {
        let mut out = BytesMut::new();
        self.write_payload(&mut out);
        out.to_vec()
    }

    /// Encodes the complete frame, envelope included.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload does not fit the 16-bit length field.
    fn encode(&self) -> Result<Vec<u8>, EnvelopeError> {
        let payload = self.payload();
        tracing::trace!(tag = %self.tag(), payload = %format_hex(&payload), "encoding command");
        Envelope::encode(self.tag(), &payload)
    }
}

/// Encodes `command` into a complete frame.
///
/// ```
/// use atem_codec::commands::{Cut, encode};
///
/// assert_eq!(
///     vec![0x00, 0x0C, 0x00, 0x00, b'D', b'C', b'u', b't', 1, 0, 0, 0],
///     encode(&Cut::new(1))?
/// );
/// # Ok::<(), atem_codec::EnvelopeError>(())
/// ```
///
/// # Errors
///
/// Returns an error when the payload does not fit the 16-bit length field.
pub fn encode(command: &dyn Command) -> Result<Vec<u8>, EnvelopeError> {
    command.encode()
}

/// Implements [`Command`] for a type with a fixed tag.
macro_rules! command {
    ($ty:ty, $tag:literal, |$this:ident, $out:ident| $body:block) => {
        impl $crate::commands::Command for $ty {
            fn tag(&self) -> $crate::tag::Tag {
                $crate::tag::Tag::new(*$tag)
            }

            fn write_payload(&self, $out: &mut ::bytes::BytesMut) {
                let $this = self;
                $body
            }
        }
    };
}

pub(crate) use command;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn encoded_length_counts_header_and_payload() {
        let frame = encode(&TransferData::new(7, vec![0xAB; 10])).expect("small payload");
        assert_eq!(14 + 8, usize::from(u16::from_be_bytes([frame[0], frame[1]])));
        assert_eq!(frame.len(), 22);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let command = TransferData::new(1, vec![0; u16::MAX as usize]);
        assert!(encode(&command).is_err());
    }
}
