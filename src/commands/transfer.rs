//! File-transfer commands.
//!
//! These are the raw frames; [`crate::transfer::TransferSession`] sequences
//! them.

use bon::bon;
use bytes::BufMut;
use derive_more::{From, Into};
use serde::Serialize;

use super::command;
use crate::codec::{FixedText, Pack};
use crate::error::ConfigurationError;

/// Store index addressing the macro pool.
pub const MACRO_STORE: u16 = 0xFFFF;

/// `LOCK`: requests or releases the lock on a whole store.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Lock {
    pub store: u16,
    pub locked: bool,
}

impl Lock {
    #[must_use]
    pub const fn new(store: u16, locked: bool) -> Self {
        Self { store, locked }
    }
}

command!(Lock, b"LOCK", |this, out| {
    out.put_u16(this.store);
    out.put_u8(u8::from(this.locked));
    out.put_u8(0);
});

/// `PLCK`: requests the lock on a single slot.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PartialLock {
    pub store: u16,
    pub slot: u16,
}

impl PartialLock {
    #[must_use]
    pub const fn new(store: u16, slot: u16) -> Self {
        Self { store, slot }
    }
}

command!(PartialLock, b"PLCK", |this, out| {
    out.put_u16(this.store);
    out.put_u16(this.slot);
    out.put_u8(0xFF);
    out.put_u8(0x01);
    out.put_bytes(0, 2);
});

/// `FTSU`: asks the switcher to send a slot to the client.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TransferDownloadRequest {
    pub transfer: u16,
    pub store: u16,
    pub slot: u32,
}

impl TransferDownloadRequest {
    #[must_use]
    pub const fn new(transfer: u16, store: u16, slot: u32) -> Self {
        Self {
            transfer,
            store,
            slot,
        }
    }
}

command!(TransferDownloadRequest, b"FTSU", |this, out| {
    out.put_u16(this.transfer);
    out.put_u16(this.store);
    out.put_u32(this.slot);
    out.put_u8(if this.store == MACRO_STORE { 0x03 } else { 0x00 });
    out.put_slice(&[0xD0, 0x9B, 0x8C]);
});

/// Write mode bitfield of an upload request.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, From, Into, Serialize)]
pub struct UploadMode(u16);

impl UploadMode {
    pub const WRITE_RLE: Self = Self(1);
    pub const WRITE: Self = Self(256);
    pub const ERASE: Self = Self(512);

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }
}

impl std::ops::BitOr for UploadMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// `FTSD`: announces an upload of `length` bytes into a slot.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TransferUploadRequest {
    pub transfer: u16,
    pub store: u16,
    pub slot: u16,
    pub length: u32,
    pub mode: UploadMode,
}

impl TransferUploadRequest {
    #[must_use]
    pub const fn new(transfer: u16, store: u16, slot: u16, length: u32, mode: UploadMode) -> Self {
        Self {
            transfer,
            store,
            slot,
            length,
            mode,
        }
    }
}

command!(TransferUploadRequest, b"FTSD", |this, out| {
    out.put_u16(this.transfer);
    out.put_u16(this.store);
    out.put_bytes(0, 2);
    out.put_u16(this.slot);
    out.put_u32(this.length);
    out.put_u16(this.mode.bits());
    out.put_bytes(0, 2);
});

/// `FTDa`: one chunk of transfer data.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransferData {
    pub transfer: u16,
    pub data: Vec<u8>,
}

impl TransferData {
    #[must_use]
    pub const fn new(transfer: u16, data: Vec<u8>) -> Self {
        Self { transfer, data }
    }
}

command!(TransferData, b"FTDa", |this, out| {
    out.put_u16(this.transfer);
    // Oversized chunks are caught by the envelope length check.
    out.put_u16(u16::try_from(this.data.len()).unwrap_or(u16::MAX));
    out.put_slice(&this.data);
});

/// `FTFD`: name, description and MD5 of a finished upload.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransferFileData {
    transfer: u16,
    name: FixedText<64>,
    description: FixedText<128>,
    md5: [u8; 16],
}

#[bon]
impl TransferFileData {
    /// # Errors
    ///
    /// Returns an error when the name or description does not fit its slot.
    #[builder]
    pub fn new(
        transfer: u16,
        md5: [u8; 16],
        #[builder(into, default)] name: String,
        #[builder(into, default)] description: String,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            transfer,
            name: FixedText::new("file name", name)?,
            description: FixedText::new("file description", description)?,
            md5,
        })
    }
}

command!(TransferFileData, b"FTFD", |this, out| {
    out.put_u16(this.transfer);
    this.name.pack(out);
    this.description.pack(out);
    out.put_slice(&this.md5);
    out.put_bytes(0, 2);
});

/// `FTUA`: acknowledges a received `FTDa` chunk.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TransferAck {
    pub transfer: u16,
    pub slot: u16,
}

impl TransferAck {
    #[must_use]
    pub const fn new(transfer: u16, slot: u16) -> Self {
        Self { transfer, slot }
    }
}

command!(TransferAck, b"FTUA", |this, out| {
    out.put_u16(this.transfer);
    out.put_u16(this.slot);
});
