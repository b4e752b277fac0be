//! Recorder and streaming commands.

use bon::bon;
use bytes::BufMut;

use super::command;
use crate::codec::{FieldSet, FixedText, MaskWidth};
use crate::error::ConfigurationError;

/// `RcTM`: starts or stops the recorder.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RecorderStatus {
    pub recording: bool,
}

impl RecorderStatus {
    #[must_use]
    pub const fn new(recording: bool) -> Self {
        Self { recording }
    }
}

command!(RecorderStatus, b"RcTM", |this, out| {
    out.put_u8(u8::from(this.recording));
    out.put_bytes(0, 3);
});

/// `CRMS`: recorder file name, target disks and in-camera recording.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RecordingSettings {
    filename: Option<FixedText<128>>,
    disk1: Option<u32>,
    disk2: Option<u32>,
    record_in_cameras: Option<bool>,
}

#[bon]
impl RecordingSettings {
    /// Validates the file name length.
    ///
    /// # Errors
    ///
    /// Returns an error when `filename` is longer than 128 bytes.
    #[builder]
    pub fn new(
        #[builder(into)] filename: Option<String>,
        disk1: Option<u32>,
        disk2: Option<u32>,
        record_in_cameras: Option<bool>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            filename: filename
                .map(|filename| FixedText::new("filename", filename))
                .transpose()?,
            disk1,
            disk2,
            record_in_cameras,
        })
    }
}

command!(RecordingSettings, b"CRMS", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .optional(0, this.filename.clone())
        .pad(3)
        .optional(1, this.disk1)
        .optional(2, this.disk2)
        .optional(3, this.record_in_cameras)
        .pad(3)
        .write_to(out);
});

/// `CRSS`: streaming service name, URL, key and bitrate range.
///
/// ```
/// use atem_codec::ConfigurationError;
/// use atem_codec::commands::StreamingService;
///
/// let half = StreamingService::builder().bitrate_min(4_000_000).build();
/// assert_eq!(Err(ConfigurationError::IncompleteBitrateRange), half);
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StreamingService {
    name: Option<FixedText<64>>,
    url: Option<FixedText<512>>,
    key: Option<FixedText<512>>,
    bitrates: Option<(u32, u32)>,
}

#[bon]
impl StreamingService {
    /// Validates text lengths and that bitrates come as a pair.
    ///
    /// # Errors
    ///
    /// Returns an error when only one bitrate is given or a string does not
    /// fit its slot.
    #[builder]
    pub fn new(
        #[builder(into)] name: Option<String>,
        #[builder(into)] url: Option<String>,
        #[builder(into)] key: Option<String>,
        bitrate_min: Option<u32>,
        bitrate_max: Option<u32>,
    ) -> Result<Self, ConfigurationError> {
        let bitrates = match (bitrate_min, bitrate_max) {
            (Some(min), Some(max)) => Some((min, max)),
            (None, None) => None,
            _ => return Err(ConfigurationError::IncompleteBitrateRange),
        };
        Ok(Self {
            name: name.map(|name| FixedText::new("service name", name)).transpose()?,
            url: url.map(|url| FixedText::new("url", url)).transpose()?,
            key: key.map(|key| FixedText::new("stream key", key)).transpose()?,
            bitrates,
        })
    }
}

command!(StreamingService, b"CRSS", |this, out| {
    let (min, max) = this.bitrates.unwrap_or_default();
    FieldSet::new(MaskWidth::U8)
        .optional(0, this.name.clone())
        .optional(1, this.url.clone())
        .optional(2, this.key.clone())
        .pad(3)
        .flag(3, this.bitrates.is_some())
        .fixed(min)
        .fixed(max)
        .write_to(out);
});

/// `StrR`: starts or stops streaming.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StreamingStatus {
    pub streaming: bool,
}

impl StreamingStatus {
    #[must_use]
    pub const fn new(streaming: bool) -> Self {
        Self { streaming }
    }
}

command!(StreamingStatus, b"StrR", |this, out| {
    out.put_u8(u8::from(this.streaming));
    out.put_bytes(0, 3);
});

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::Command;

    #[test]
    fn recorder_and_stream_toggles() {
        assert_eq!(vec![1, 0, 0, 0], RecorderStatus::new(true).payload());
        assert_eq!(vec![0, 0, 0, 0], StreamingStatus::new(false).payload());
    }

    #[test]
    fn recording_filename_is_nul_padded() {
        let command = RecordingSettings::builder()
            .filename("show")
            .record_in_cameras(true)
            .build()
            .expect("short name");
        let payload = command.payload();

        assert_eq!(144, payload.len());
        assert_eq!(0b1001, payload[0]);
        assert_eq!(b"show".to_vec(), payload[1..5].to_vec());
        assert!(payload[5..140].iter().all(|byte| *byte == 0));
        assert_eq!(1, payload[140]);
    }

    #[test]
    fn recording_filename_too_long() {
        let result = RecordingSettings::builder().filename("x".repeat(129)).build();
        assert_matches!(
            result,
            Err(ConfigurationError::TextTooLong { name: "filename", len: 129, max: 128 })
        );
    }

    #[test]
    fn streaming_bitrates_share_bit_three() {
        let command = StreamingService::builder()
            .bitrate_min(1_000_000)
            .bitrate_max(2_000_000)
            .build()
            .expect("paired bitrates");
        let payload = command.payload();

        assert_eq!(1100, payload.len());
        assert_eq!(0b1000, payload[0]);
        assert_eq!(1_000_000u32.to_be_bytes().to_vec(), payload[1092..1096].to_vec());
        assert_eq!(2_000_000u32.to_be_bytes().to_vec(), payload[1096..1100].to_vec());
    }

    #[test]
    fn streaming_url_slot_offset() {
        let command = StreamingService::builder()
            .url("rtmp://example")
            .build()
            .expect("short url");
        let payload = command.payload();
        assert_eq!(0b0010, payload[0]);
        assert_eq!(b"rtmp".to_vec(), payload[65..69].to_vec());
    }

    #[test]
    fn streaming_max_without_min_is_rejected() {
        let result = StreamingService::builder().bitrate_max(1).build();
        assert_matches!(result, Err(ConfigurationError::IncompleteBitrateRange));
    }
}
