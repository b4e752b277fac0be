//! Recorder and live streaming fields.

use serde::Serialize;

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::error::FormatError;

const fn bit(bits: u16, index: u16) -> bool {
    bits & (1 << index) != 0
}

fn disk_slot(raw: i32) -> Option<u32> {
    u32::try_from(raw).ok()
}

/// `RTMD`: an attached recording disk.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RecordingDisk {
    pub index: u32,
    /// Seconds of recording time left.
    pub time_available: u32,
    pub status: u16,
    pub volume_name: String,
}

impl RecordingDisk {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        bit(self.status, 0)
    }

    #[must_use]
    pub const fn is_unformatted(&self) -> bool {
        bit(self.status, 1)
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        bit(self.status, 2)
    }

    #[must_use]
    pub const fn is_recording(&self) -> bool {
        bit(self.status, 3)
    }

    /// The disk was detached; forget its index.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        bit(self.status, 5)
    }
}

impl DecodeField for RecordingDisk {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(76)?;
        Ok(Self {
            index: reader.u32()?,
            time_available: reader.u32()?,
            status: reader.u16()?,
            volume_name: reader.text(64)?,
        })
    }
}

/// `RMSu`: recorder settings. Disk slots refer to [`RecordingDisk::index`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RecordingSettings {
    pub filename: String,
    pub disk1: Option<u32>,
    pub disk2: Option<u32>,
    pub record_in_cameras: bool,
}

impl DecodeField for RecordingSettings {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(140)?;
        Ok(Self {
            filename: reader.text(128)?,
            disk1: disk_slot(reader.i32()?),
            disk2: disk_slot(reader.i32()?),
            record_in_cameras: reader.bool()?,
        })
    }
}

/// `RTMS`: recorder state and total time left.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct RecordingStatus {
    pub status: u16,
    pub time_available: Option<u32>,
}

impl RecordingStatus {
    #[must_use]
    pub const fn is_recording(&self) -> bool {
        bit(self.status, 0)
    }

    #[must_use]
    pub const fn disk_full(&self) -> bool {
        bit(self.status, 2)
    }

    #[must_use]
    pub const fn disk_error(&self) -> bool {
        bit(self.status, 3)
    }

    #[must_use]
    pub const fn disk_unformatted(&self) -> bool {
        bit(self.status, 4)
    }

    #[must_use]
    pub const fn has_dropped_frames(&self) -> bool {
        bit(self.status, 5)
    }

    #[must_use]
    pub const fn is_stopping(&self) -> bool {
        bit(self.status, 7)
    }
}

impl DecodeField for RecordingStatus {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        let status = reader.u16()?;
        reader.skip(2)?;
        Ok(Self {
            status,
            time_available: disk_slot(reader.i32()?),
        })
    }
}

/// `RTMR`: running duration of the current recording.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct RecordingDuration {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
    /// The disk cannot keep up.
    pub dropped_frames: bool,
}

impl DecodeField for RecordingDuration {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        Ok(Self {
            hours: reader.u8()?,
            minutes: reader.u8()?,
            seconds: reader.u8()?,
            frames: reader.u8()?,
            dropped_frames: reader.bool()?,
        })
    }
}

/// `STAB`: encoder audio bitrate range.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct AudioBitrate {
    pub min: u32,
    pub max: u32,
}

impl DecodeField for AudioBitrate {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        Ok(Self {
            min: reader.u32()?,
            max: reader.u32()?,
        })
    }
}

/// `SRSU`: live stream target. The bitrate also drives recording quality.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct StreamingService {
    pub name: String,
    pub url: String,
    pub key: String,
    pub bitrate_min: u32,
    pub bitrate_max: u32,
}

impl DecodeField for StreamingService {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(1096)?;
        Ok(Self {
            name: reader.text(64)?,
            url: reader.text(512)?,
            key: reader.text(512)?,
            bitrate_min: reader.u32()?,
            bitrate_max: reader.u32()?,
        })
    }
}

/// `StRS`: displayed stream state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct StreamingStatus {
    pub status: i16,
}

impl StreamingStatus {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.status {
            1 => "idle",
            2 => "connecting",
            4 => "on-air",
            22 | 36 => "stopping",
            _ => "unknown",
        }
    }
}

impl DecodeField for StreamingStatus {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            status: reader.i16()?,
        })
    }
}

/// `SRSS`: stream bitrate and cache usage.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct StreamingStats {
    pub bitrate: u32,
    pub cache_used: u16,
}

impl DecodeField for StreamingStats {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(8)?;
        Ok(Self {
            bitrate: reader.u32()?,
            cache_used: reader.u16()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::fields::Field;
    use crate::tag::Tag;

    #[test]
    fn disk_name_and_flags() {
        let mut payload = vec![0u8; 76];
        payload[3] = 2;
        payload[4..8].copy_from_slice(&3600u32.to_be_bytes());
        payload[9] = 0b1100;
        payload[10..14].copy_from_slice(b"SSD1");

        let Field::RecordingDisk(disk) = Field::decode(Tag::new(*b"RTMD"), &payload).expect("valid")
        else {
            panic!("wrong field");
        };
        assert_eq!("SSD1", disk.volume_name);
        assert!(disk.is_ready() && disk.is_recording());
        assert!(!disk.is_deleted());
    }

    #[test]
    fn unset_disk_slots_are_none() {
        let mut payload = vec![0u8; 140];
        payload[..4].copy_from_slice(b"take");
        payload[128..132].copy_from_slice(&(-1i32).to_be_bytes());
        payload[132..136].copy_from_slice(&7i32.to_be_bytes());

        assert_eq!(
            Field::RecordingSettings(RecordingSettings {
                filename: "take".to_owned(),
                disk1: None,
                disk2: Some(7),
                record_in_cameras: false,
            }),
            Field::decode(Tag::new(*b"RMSu"), &payload).expect("valid")
        );
    }

    #[rstest]
    #[case(*b"RTMS")]
    #[case(*b"RMTS")]
    fn status_accepts_both_tags(#[case] tag: [u8; 4]) {
        let payload = [0x00, 0x81, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
        let Field::RecordingStatus(status) = Field::decode(Tag::new(tag), &payload).expect("valid")
        else {
            panic!("wrong field");
        };
        assert!(status.is_recording());
        assert!(status.is_stopping());
        assert_eq!(None, status.time_available);
    }

    #[test]
    fn streaming_service_offsets() {
        let mut payload = vec![0u8; 1096];
        payload[..7].copy_from_slice(b"YouTube");
        payload[64..71].copy_from_slice(b"rtmp://");
        payload[576..579].copy_from_slice(b"key");
        payload[1088..1092].copy_from_slice(&4_000_000u32.to_be_bytes());
        payload[1092..1096].copy_from_slice(&6_000_000u32.to_be_bytes());

        assert_eq!(
            Field::StreamingService(StreamingService {
                name: "YouTube".to_owned(),
                url: "rtmp://".to_owned(),
                key: "key".to_owned(),
                bitrate_min: 4_000_000,
                bitrate_max: 6_000_000,
            }),
            Field::decode(Tag::new(*b"SRSU"), &payload).expect("valid")
        );
    }

    #[rstest]
    #[case(4, "on-air")]
    #[case(36, "stopping")]
    #[case(-1, "unknown")]
    fn stream_state_labels(#[case] status: i16, #[case] expected: &str) {
        assert_eq!(expected, StreamingStatus { status }.label());
    }
}
