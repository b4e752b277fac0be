//! Data store lock and file transfer fields.

use serde::Serialize;
use serde_with::{hex::Hex, serde_as};

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::error::FormatError;
use crate::types::TransferErrorCode;

/// `LKOB`: a store lock was granted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct LockObtained {
    pub store: u16,
}

impl DecodeField for LockObtained {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            store: reader.u16()?,
        })
    }
}

/// `LKST`: lock state of a store changed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct LockState {
    pub store: u16,
    pub locked: bool,
}

impl DecodeField for LockState {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            store: reader.u16()?,
            locked: reader.bool()?,
        })
    }
}

/// `FTDa`: one chunk of a download.
#[serde_as]
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TransferChunk {
    pub transfer: u16,
    #[serde_as(as = "Hex")]
    pub data: Vec<u8>,
}

impl DecodeField for TransferChunk {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        let transfer = reader.u16()?;
        let size = usize::from(reader.u16()?);
        Ok(Self {
            transfer,
            data: reader.take(size)?.to_vec(),
        })
    }
}

/// `FTDE`: the device aborted a transfer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TransferError {
    pub transfer: u16,
    pub code: TransferErrorCode,
}

impl DecodeField for TransferError {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            transfer: reader.u16()?,
            code: reader.u8()?.into(),
        })
    }
}

/// `FTDC`: the device finished its side of a transfer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TransferDataComplete {
    pub transfer: u16,
    pub unknown1: u8,
    pub unknown2: u8,
}

impl DecodeField for TransferDataComplete {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(4)?;
        Ok(Self {
            transfer: reader.u16()?,
            unknown1: reader.u8()?,
            unknown2: reader.u8()?,
        })
    }
}

/// `FTCD`: upload credit. The client may send `chunk_count` chunks of at
/// most `chunk_size` bytes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct TransferContinue {
    pub transfer: u16,
    pub chunk_size: u16,
    pub chunk_count: u16,
}

impl DecodeField for TransferContinue {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(12)?;
        let transfer = reader.u16()?;
        reader.skip(4)?;
        Ok(Self {
            transfer,
            chunk_size: reader.u16()?,
            chunk_count: reader.u16()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fields::Field;
    use crate::tag::Tag;

    #[test]
    fn chunk_takes_declared_size() {
        let payload = [0, 9, 0, 3, 0xAA, 0xBB, 0xCC, 0xDD];
        assert_eq!(
            Field::TransferChunk(TransferChunk {
                transfer: 9,
                data: vec![0xAA, 0xBB, 0xCC],
            }),
            Field::decode(Tag::new(*b"FTDa"), &payload).expect("valid")
        );
    }

    #[test]
    fn short_chunk_is_truncated() {
        let payload = [0, 9, 0, 8, 0xAA];
        assert_matches!(
            Field::decode(Tag::new(*b"FTDa"), &payload),
            Err(FormatError::Truncated { needed: 12, available: 5, .. })
        );
    }

    #[test]
    fn error_codes() {
        assert_eq!(
            Field::TransferError(TransferError {
                transfer: 2,
                code: TransferErrorCode::NoLock,
            }),
            Field::decode(Tag::new(*b"FTDE"), &[0, 2, 5, 0]).expect("valid")
        );
    }

    #[test]
    fn continue_credit() {
        let payload = [0, 4, 0, 0, 0, 0, 0x05, 0xDC, 0, 2, 0, 0];
        assert_eq!(
            Field::TransferContinue(TransferContinue {
                transfer: 4,
                chunk_size: 1500,
                chunk_count: 2,
            }),
            Field::decode(Tag::new(*b"FTCD"), &payload).expect("valid")
        );
    }
}
