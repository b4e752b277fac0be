//! Notices exchanged between local components only.
//!
//! `*XFC` tells listeners in the same process that a file transfer finished.
//! It never goes to the switcher, so it does not implement
//! [`Command`](crate::commands::Command) and [`Field::decode`](crate::Field::decode)
//! treats it as unknown.

use bytes::{BufMut, BytesMut};
use serde::Serialize;

use crate::codec::{Envelope, EnvelopeError, PayloadReader};
use crate::error::FormatError;
use crate::tag::Tag;

/// Tag of [`TransferCompleteNotice`].
pub const TRANSFER_COMPLETE_TAG: Tag = Tag::new(*b"*XFC");

/// A transfer into or out of a store slot finished.
///
/// ```
/// use atem_codec::TransferCompleteNotice;
///
/// let notice = TransferCompleteNotice::new(0, 3, true);
/// let frame = notice.encode()?;
/// assert_eq!(b"*XFC", &frame[4..8]);
/// assert_eq!(Ok(notice), TransferCompleteNotice::decode(&frame[8..]));
/// # Ok::<(), atem_codec::EnvelopeError>(())
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TransferCompleteNotice {
    pub store: u16,
    pub slot: u16,
    pub upload: bool,
}

impl TransferCompleteNotice {
    #[must_use]
    pub const fn new(store: u16, slot: u16, upload: bool) -> Self {
        Self {
            store,
            slot,
            upload,
        }
    }

    #[must_use]
    pub fn payload(&self) -> Vec<u8> {
        let mut out = BytesMut::with_capacity(8);
        out.put_u16(self.store);
        out.put_u16(self.slot);
        out.put_u8(u8::from(self.upload));
        out.put_bytes(0, 3);
        out.to_vec()
    }

    /// Encodes the complete local frame.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the payload is eight bytes.
    pub fn encode(&self) -> Result<Vec<u8>, EnvelopeError> {
        Envelope::encode(TRANSFER_COMPLETE_TAG, &self.payload())
    }

    /// Decodes a payload carried under [`TRANSFER_COMPLETE_TAG`].
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is shorter than eight bytes.
    pub fn decode(payload: &[u8]) -> Result<Self, FormatError> {
        let mut reader = PayloadReader::new(TRANSFER_COMPLETE_TAG, payload);
        reader.expect_len(8)?;
        Ok(Self {
            store: reader.u16()?,
            slot: reader.u16()?,
            upload: reader.bool()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn payload_layout() {
        assert_eq!(
            vec![0xFF, 0xFF, 0, 2, 0, 0, 0, 0],
            TransferCompleteNotice::new(0xFFFF, 2, false).payload()
        );
    }

    #[test]
    fn short_payload_is_truncated() {
        assert_matches!(
            TransferCompleteNotice::decode(&[0, 1, 0]),
            Err(FormatError::Truncated { needed: 8, available: 3, .. })
        );
    }
}
