//! Frame envelope shared by every command and field.
//!
//! ```text
//! +-----------+----------+--------+-------------+
//! | Length    | Reserved | Tag    | Payload     |
//! | u16 BE    | 2 x 0x00 | ASCII  | (variable)  |
//! +-----------+----------+--------+-------------+
//! ```
//!
//! The length counts the whole frame, header included.

use bytes::{BufMut, BytesMut};
use thiserror::Error;
use tracing::instrument;

use crate::error::FormatError;
use crate::fields::Field;
use crate::tag::Tag;

/// Envelope header size: length, reserved bytes and tag.
pub const HEADER_LEN: usize = 8;
/// Largest payload the 16-bit length field can describe.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize - HEADER_LEN;

/// Errors returned by envelope encoding and frame splitting.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum EnvelopeError {
    /// A tag must be exactly four bytes.
    #[error("tag must be exactly 4 bytes, got {len}")]
    InvalidTagLength { len: usize },
    /// A tag must be printable ASCII.
    #[error("tag bytes {bytes:02X?} are not ASCII")]
    NonAsciiTag { bytes: [u8; 4] },
    /// The payload does not fit in the 16-bit length field.
    #[error("payload is too large: {payload_len} bytes exceeds max {max_payload_len}")]
    PayloadTooLarge {
        payload_len: usize,
        max_payload_len: usize,
    },
    /// Fewer than eight bytes remain where a frame header was expected.
    #[error("frame header is too short: expected at least 8 bytes, got {actual}")]
    HeaderTooShort { actual: usize },
    /// The declared length cannot even cover the header.
    #[error("frame declares length {declared}, which is shorter than its 8-byte header")]
    DeclaredLengthTooSmall { declared: usize },
    /// The declared length runs past the end of the buffer.
    #[error("frame declares {declared} bytes but only {available} remain")]
    FrameOverrun { declared: usize, available: usize },
}

/// One tag and payload slice split out of a buffer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RawFrame<'a> {
    tag: Tag,
    payload: &'a [u8],
}

impl<'a> RawFrame<'a> {
    /// Creates a frame view from an already separated tag and payload.
    #[must_use]
    pub const fn new(tag: Tag, payload: &'a [u8]) -> Self {
        Self { tag, payload }
    }

    /// Frame tag.
    #[must_use]
    pub const fn tag(&self) -> Tag {
        self.tag
    }

    /// Frame payload without the header.
    #[must_use]
    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Decodes the payload into a typed field.
    ///
    /// # Errors
    ///
    /// Returns an error when a known tag carries a malformed payload.
    pub fn decode(&self) -> Result<Field, FormatError> {
        Field::decode(self.tag, self.payload)
    }
}

/// Envelope encoder and splitter.
pub struct Envelope;

impl Envelope {
    /// Wraps `payload` in a frame header for `tag`.
    ///
    /// ```
    /// use atem_codec::{Envelope, Tag};
    ///
    /// let frame = Envelope::encode(Tag::new(*b"DCut"), &[0, 0, 0, 0])?;
    /// assert_eq!(vec![0x00, 0x0C, 0x00, 0x00, b'D', b'C', b'u', b't', 0, 0, 0, 0], frame);
    /// # Ok::<(), atem_codec::EnvelopeError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the payload exceeds [`MAX_PAYLOAD_LEN`].
    #[instrument(skip(payload), level = "trace", fields(%tag, payload_len = payload.len()))]
    pub fn encode(tag: Tag, payload: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        let declared = u16::try_from(payload.len() + HEADER_LEN).map_err(|_| {
            EnvelopeError::PayloadTooLarge {
                payload_len: payload.len(),
                max_payload_len: MAX_PAYLOAD_LEN,
            }
        })?;

        let mut frame = BytesMut::with_capacity(HEADER_LEN + payload.len());
        frame.put_u16(declared);
        frame.put_u16(0);
        frame.put_slice(tag.as_bytes());
        frame.put_slice(payload);
        Ok(frame.to_vec())
    }

    /// Wraps `payload` for a tag given as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error when `tag` is not four ASCII bytes or the payload is
    /// too large.
    pub fn encode_raw(tag: &[u8], payload: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        Self::encode(Tag::try_from(tag)?, payload)
    }

    /// Iterates over the frames packed back to back in `buffer`.
    ///
    /// ```
    /// use atem_codec::{Envelope, Tag};
    ///
    /// let mut buffer = Envelope::encode(Tag::new(*b"TiRq"), &[])?;
    /// buffer.extend(Envelope::encode(Tag::new(*b"DCut"), &[1, 0, 0, 0])?);
    ///
    /// let tags = Envelope::split(&buffer)
    ///     .map(|frame| frame.map(|frame| frame.tag()))
    ///     .collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(vec![Tag::new(*b"TiRq"), Tag::new(*b"DCut")], tags);
    /// # Ok::<(), atem_codec::EnvelopeError>(())
    /// ```
    #[must_use]
    pub fn split(buffer: &[u8]) -> Frames<'_> {
        Frames {
            remaining: buffer,
            failed: false,
        }
    }
}

/// Iterator returned by [`Envelope::split`].
///
/// Stops after the first malformed header.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> Frames<'a> {
    fn next_frame(&mut self) -> Result<RawFrame<'a>, EnvelopeError> {
        let buffer = self.remaining;
        if buffer.len() < HEADER_LEN {
            return Err(EnvelopeError::HeaderTooShort {
                actual: buffer.len(),
            });
        }

        let declared = usize::from(u16::from_be_bytes([buffer[0], buffer[1]]));
        if declared < HEADER_LEN {
            return Err(EnvelopeError::DeclaredLengthTooSmall { declared });
        }
        if declared > buffer.len() {
            return Err(EnvelopeError::FrameOverrun {
                declared,
                available: buffer.len(),
            });
        }

        let tag = Tag::new([buffer[4], buffer[5], buffer[6], buffer[7]]);
        let (frame, rest) = buffer.split_at(declared);
        self.remaining = rest;
        Ok(RawFrame::new(tag, &frame[HEADER_LEN..]))
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = Result<RawFrame<'a>, EnvelopeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }

        let frame = self.next_frame();
        if let Err(error) = &frame {
            tracing::warn!(%error, "stopping frame split on malformed header");
            self.failed = true;
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(1024)]
    fn encode_declares_payload_length_plus_header(#[case] payload_len: usize) {
        let payload = vec![0xAB; payload_len];
        let frame = Envelope::encode(Tag::new(*b"FTDa"), &payload).expect("payload should fit");

        let declared = usize::from(u16::from_be_bytes([frame[0], frame[1]]));
        assert_eq!(payload_len + 8, declared);
        assert_eq!(declared, frame.len());
        assert_eq!([0, 0], frame[2..4]);
        assert_eq!(b"FTDa", &frame[4..8]);
    }

    #[test]
    fn encode_rejects_oversized_payload() {
        let payload = vec![0; MAX_PAYLOAD_LEN + 1];
        let encoded = Envelope::encode(Tag::new(*b"FTDa"), &payload);
        assert_matches!(
            encoded,
            Err(EnvelopeError::PayloadTooLarge { payload_len, max_payload_len })
                if payload_len == 65528 && max_payload_len == 65527
        );
    }

    #[rstest]
    #[case(b"DCu".as_slice())]
    #[case(b"DCutt".as_slice())]
    fn encode_raw_fails_fast_on_tag_length(#[case] tag: &[u8]) {
        let encoded = Envelope::encode_raw(tag, &[]);
        assert_matches!(encoded, Err(EnvelopeError::InvalidTagLength { .. }));
    }

    #[test]
    fn split_yields_each_frame_payload() {
        let mut buffer = Envelope::encode(Tag::new(*b"PrgI"), &[0, 0, 0, 5]).expect("fits");
        buffer.extend(Envelope::encode(Tag::new(*b"InCm"), &[]).expect("fits"));

        let frames = Envelope::split(&buffer)
            .collect::<Result<Vec<_>, _>>()
            .expect("frames should split");

        assert_eq!(2, frames.len());
        assert_eq!(Tag::new(*b"PrgI"), frames[0].tag());
        assert_eq!(&[0, 0, 0, 5], frames[0].payload());
        assert_eq!(Tag::new(*b"InCm"), frames[1].tag());
        assert_eq!(0, frames[1].payload().len());
    }

    #[test]
    fn split_stops_after_overrun() {
        let mut buffer = Envelope::encode(Tag::new(*b"PrgI"), &[0, 0, 0, 5]).expect("fits");
        buffer.extend([0x00, 0x40, 0x00, 0x00, b'X', b'X', b'X', b'X']);
        buffer.extend(Envelope::encode(Tag::new(*b"InCm"), &[]).expect("fits"));

        let frames: Vec<_> = Envelope::split(&buffer).collect();

        assert_eq!(2, frames.len());
        assert_matches!(frames[0], Ok(_));
        assert_matches!(
            frames[1],
            Err(EnvelopeError::FrameOverrun { declared: 64, available: 16 })
        );
    }

    #[rstest]
    #[case(&[0x00, 0x04, 0, 0, b'A', b'B', b'C', b'D'], EnvelopeError::DeclaredLengthTooSmall { declared: 4 })]
    #[case(&[0x00, 0x08, 0, 0], EnvelopeError::HeaderTooShort { actual: 4 })]
    fn split_reports_malformed_headers(#[case] buffer: &[u8], #[case] expected: EnvelopeError) {
        let first = Envelope::split(buffer).next().expect("one item expected");
        assert_eq!(Err(expected), first);
    }
}
