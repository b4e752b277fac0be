//! File transfers between the client and the switcher's media and macro
//! stores.
//!
//! A [`TransferSession`] owns the state of one transfer id. Feed it every
//! decoded [`Field`] and send the [`TransferCommand`]s it returns, in order.
//! It performs no I/O and never times out on its own; the caller drops the
//! session to cancel.
//!
//! ```
//! use atem_codec::fields::{LockObtained, TransferChunk, TransferDataComplete};
//! use atem_codec::{Field, TransferCommand, TransferDirection, TransferRequest, TransferSession, TransferState};
//!
//! let request = TransferRequest::builder()
//!     .transfer(1)
//!     .store(0)
//!     .slot(2)
//!     .direction(TransferDirection::Download)
//!     .build()?;
//! let mut session = TransferSession::new(request);
//!
//! session.start()?;
//! session.handle(&Field::LockObtained(LockObtained { store: 0 }))?;
//! let acks = session.handle(&Field::TransferChunk(TransferChunk { transfer: 1, data: vec![7; 4] }))?;
//! assert!(matches!(acks.as_slice(), [TransferCommand::Ack(_)]));
//! session.handle(&Field::TransferDataComplete(TransferDataComplete { transfer: 1, unknown1: 1, unknown2: 2 }))?;
//!
//! assert_eq!(TransferState::Complete, session.state());
//! assert_eq!(&[7; 4], session.received());
//! # Ok::<(), atem_codec::TransferError>(())
//! ```

use bon::bon;
use serde::Serialize;
use strum_macros::Display;
use thiserror::Error;
use tracing::instrument;

use crate::codec::EnvelopeError;
use crate::commands::{
    Command, Lock, PartialLock, TransferAck, TransferData, TransferDownloadRequest,
    TransferFileData, TransferUploadRequest, UploadMode,
};
use crate::error::ConfigurationError;
use crate::fields::{self, Field};
use crate::tag::Tag;
use crate::types::TransferErrorCode;

/// Progress of one transfer session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TransferState {
    Idle,
    LockRequested,
    LockGranted,
    TransferRequested,
    Transferring,
    /// Upload only: all chunks and the file metadata are sent.
    Finalizing,
    Complete,
    Error(TransferErrorCode),
}

impl TransferState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error(_))
    }
}

/// Errors returned when a transfer session is misused by its owner.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransferError {
    /// An operation was attempted in a state that does not allow it.
    #[error("cannot {operation} transfer {transfer} while it is {state}")]
    InvalidState {
        transfer: u16,
        operation: &'static str,
        state: TransferState,
    },
    /// Uploads need a non-empty body.
    #[error("upload to store {store} slot {slot} has no data")]
    MissingUploadData { store: u16, slot: u16 },
    /// The body does not fit the 32-bit length of the upload request.
    #[error("upload of {len} bytes does not fit the 32-bit length field")]
    UploadTooLarge { len: usize },
    /// The device granted a credit with zero-byte chunks.
    #[error("transfer {transfer} was granted a chunk size of zero")]
    ZeroChunkSize { transfer: u16 },
    /// The upload metadata does not fit its slots.
    #[error(transparent)]
    Metadata(#[from] ConfigurationError),
}

/// Direction of a transfer, seen from the client.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum TransferDirection {
    Download,
    Upload,
}

/// Which lock guards the transfer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize)]
pub enum LockKind {
    /// `LOCK` on the whole store.
    #[default]
    Full,
    /// `PLCK` on one slot.
    Partial,
}

/// Parameters of one transfer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransferRequest {
    transfer: u16,
    store: u16,
    slot: u16,
    direction: TransferDirection,
    lock: LockKind,
    mode: UploadMode,
    data: Vec<u8>,
    metadata: Option<TransferFileData>,
}

#[bon]
impl TransferRequest {
    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns an error when an upload has no data, its data does not fit a
    /// 32-bit length, or its name or description is too long.
    #[builder]
    pub fn new(
        transfer: u16,
        store: u16,
        slot: u16,
        direction: TransferDirection,
        #[builder(default)] lock: LockKind,
        #[builder(default = UploadMode::WRITE)] mode: UploadMode,
        #[builder(default)] data: Vec<u8>,
        #[builder(into, default)] name: String,
        #[builder(into, default)] description: String,
        #[builder(default)] md5: [u8; 16],
    ) -> Result<Self, TransferError> {
        let metadata = match direction {
            TransferDirection::Download => None,
            TransferDirection::Upload => {
                if data.is_empty() {
                    return Err(TransferError::MissingUploadData { store, slot });
                }
                if u32::try_from(data.len()).is_err() {
                    return Err(TransferError::UploadTooLarge { len: data.len() });
                }
                Some(
                    TransferFileData::builder()
                        .transfer(transfer)
                        .md5(md5)
                        .name(name)
                        .description(description)
                        .build()?,
                )
            }
        };
        Ok(Self {
            transfer,
            store,
            slot,
            direction,
            lock,
            mode,
            data,
            metadata,
        })
    }

    #[must_use]
    pub const fn transfer(&self) -> u16 {
        self.transfer
    }

    #[must_use]
    pub const fn store(&self) -> u16 {
        self.store
    }

    #[must_use]
    pub const fn slot(&self) -> u16 {
        self.slot
    }

    #[must_use]
    pub const fn direction(&self) -> TransferDirection {
        self.direction
    }
}

/// A command the session owner must send to the device.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TransferCommand {
    Lock(Lock),
    PartialLock(PartialLock),
    DownloadRequest(TransferDownloadRequest),
    UploadRequest(TransferUploadRequest),
    Data(TransferData),
    FileData(TransferFileData),
    Ack(TransferAck),
}

impl TransferCommand {
    /// The wrapped device command.
    #[must_use]
    pub fn as_command(&self) -> &dyn Command {
        match self {
            Self::Lock(command) => command,
            Self::PartialLock(command) => command,
            Self::DownloadRequest(command) => command,
            Self::UploadRequest(command) => command,
            Self::Data(command) => command,
            Self::FileData(command) => command,
            Self::Ack(command) => command,
        }
    }

    #[must_use]
    pub fn tag(&self) -> Tag {
        self.as_command().tag()
    }

    /// Encodes the complete frame.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload does not fit the 16-bit length field.
    pub fn encode(&self) -> Result<Vec<u8>, EnvelopeError> {
        self.as_command().encode()
    }
}

/// State machine for one transfer id.
#[derive(Debug)]
pub struct TransferSession {
    request: TransferRequest,
    state: TransferState,
    retried: bool,
    sent: usize,
    received: Vec<u8>,
}

impl TransferSession {
    #[must_use]
    pub const fn new(request: TransferRequest) -> Self {
        Self {
            request,
            state: TransferState::Idle,
            retried: false,
            sent: 0,
            received: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> TransferState {
        self.state
    }

    #[must_use]
    pub const fn request(&self) -> &TransferRequest {
        &self.request
    }

    /// Bytes downloaded so far.
    #[must_use]
    pub fn received(&self) -> &[u8] {
        &self.received
    }

    #[must_use]
    pub fn into_received(self) -> Vec<u8> {
        self.received
    }

    /// Requests the lock that guards the transfer.
    ///
    /// # Errors
    ///
    /// Returns an error when the session has already started.
    pub fn start(&mut self) -> Result<Vec<TransferCommand>, TransferError> {
        if self.state != TransferState::Idle {
            return Err(self.invalid_state("start"));
        }
        self.transition(TransferState::LockRequested);
        Ok(vec![self.lock_command()])
    }

    /// Advances the session with one decoded field and returns what to send.
    ///
    /// Fields that do not belong to this transfer return nothing.
    ///
    /// # Errors
    ///
    /// Returns an error when the session has not been started, or when the
    /// device grants an unusable upload credit.
    #[instrument(
        level = "trace",
        skip(self, field),
        fields(transfer = self.request.transfer, field = field.name(), state = %self.state)
    )]
    pub fn handle(&mut self, field: &Field) -> Result<Vec<TransferCommand>, TransferError> {
        if self.state == TransferState::Idle {
            return Err(self.invalid_state("handle a field for"));
        }
        match field {
            Field::LockObtained(lock) => Ok(self.on_lock(lock.store, true)),
            Field::LockState(lock) => Ok(self.on_lock(lock.store, lock.locked)),
            Field::TransferChunk(chunk) => Ok(self.on_chunk(chunk)),
            Field::TransferContinue(credit) => self.on_continue(credit),
            Field::TransferDataComplete(done) => Ok(self.on_complete(done.transfer)),
            Field::TransferError(error) => Ok(self.on_error(error)),
            _ => Ok(Vec::new()),
        }
    }

    fn on_lock(&mut self, store: u16, locked: bool) -> Vec<TransferCommand> {
        if store != self.request.store {
            return Vec::new();
        }
        match (self.state, locked) {
            (TransferState::LockRequested, true) => {
                self.transition(TransferState::LockGranted);
                self.transition(TransferState::TransferRequested);
                vec![self.request_command()]
            }
            (
                TransferState::TransferRequested
                | TransferState::Transferring
                | TransferState::Finalizing,
                false,
            ) => {
                tracing::warn!(
                    transfer = self.request.transfer,
                    store,
                    "store lock released during transfer"
                );
                self.transition(TransferState::Error(TransferErrorCode::NoLock));
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn on_chunk(&mut self, chunk: &fields::TransferChunk) -> Vec<TransferCommand> {
        if !self.accepts(chunk.transfer, "FTDa") {
            return Vec::new();
        }
        let receiving = matches!(
            self.state,
            TransferState::TransferRequested | TransferState::Transferring
        );
        if self.request.direction != TransferDirection::Download || !receiving {
            self.ignore("FTDa");
            return Vec::new();
        }
        self.transition(TransferState::Transferring);
        self.received.extend_from_slice(&chunk.data);
        vec![TransferCommand::Ack(TransferAck::new(
            self.request.transfer,
            self.request.slot,
        ))]
    }

    fn on_continue(
        &mut self,
        credit: &fields::TransferContinue,
    ) -> Result<Vec<TransferCommand>, TransferError> {
        if !self.accepts(credit.transfer, "FTCD") {
            return Ok(Vec::new());
        }
        let sending = matches!(
            self.state,
            TransferState::TransferRequested | TransferState::Transferring
        );
        if self.request.direction != TransferDirection::Upload || !sending {
            self.ignore("FTCD");
            return Ok(Vec::new());
        }
        if credit.chunk_size == 0 {
            return Err(TransferError::ZeroChunkSize {
                transfer: credit.transfer,
            });
        }

        self.transition(TransferState::Transferring);
        let chunk_size = usize::from(credit.chunk_size);
        let mut commands = Vec::new();
        for _ in 0..credit.chunk_count {
            if self.sent >= self.request.data.len() {
                break;
            }
            let end = (self.sent + chunk_size).min(self.request.data.len());
            commands.push(TransferCommand::Data(TransferData::new(
                self.request.transfer,
                self.request.data[self.sent..end].to_vec(),
            )));
            self.sent = end;
        }
        tracing::trace!(
            transfer = self.request.transfer,
            chunks = commands.len(),
            sent = self.sent,
            total = self.request.data.len(),
            "sending upload chunks"
        );

        if self.sent >= self.request.data.len()
            && let Some(metadata) = &self.request.metadata
        {
            commands.push(TransferCommand::FileData(metadata.clone()));
            self.transition(TransferState::Finalizing);
        }
        Ok(commands)
    }

    fn on_complete(&mut self, transfer: u16) -> Vec<TransferCommand> {
        if !self.accepts(transfer, "FTDC") {
            return Vec::new();
        }
        let terminal = match self.request.direction {
            TransferDirection::Upload => self.state == TransferState::Finalizing,
            TransferDirection::Download => matches!(
                self.state,
                TransferState::TransferRequested | TransferState::Transferring
            ),
        };
        if !terminal {
            self.ignore("FTDC");
            return Vec::new();
        }
        self.transition(TransferState::Complete);
        vec![TransferCommand::Lock(Lock::new(self.request.store, false))]
    }

    fn on_error(&mut self, error: &fields::TransferError) -> Vec<TransferCommand> {
        if !self.accepts(error.transfer, "FTDE") {
            return Vec::new();
        }
        if error.code == TransferErrorCode::TryAgain && !self.retried {
            tracing::warn!(
                transfer = self.request.transfer,
                state = %self.state,
                "device asked to retry transfer"
            );
            self.retried = true;
            // The lock has not been granted yet, so ask for it again.
            if self.state == TransferState::LockRequested {
                return vec![self.lock_command()];
            }
            self.sent = 0;
            self.received.clear();
            self.transition(TransferState::TransferRequested);
            return vec![self.request_command()];
        }
        tracing::warn!(
            transfer = self.request.transfer,
            code = ?error.code,
            "transfer failed"
        );
        self.transition(TransferState::Error(error.code));
        Vec::new()
    }

    fn lock_command(&self) -> TransferCommand {
        match self.request.lock {
            LockKind::Full => TransferCommand::Lock(Lock::new(self.request.store, true)),
            LockKind::Partial => {
                TransferCommand::PartialLock(PartialLock::new(self.request.store, self.request.slot))
            }
        }
    }

    fn request_command(&self) -> TransferCommand {
        let request = &self.request;
        match request.direction {
            TransferDirection::Download => {
                TransferCommand::DownloadRequest(TransferDownloadRequest::new(
                    request.transfer,
                    request.store,
                    u32::from(request.slot),
                ))
            }
            TransferDirection::Upload => {
                // Length checked when the request was built.
                let length = u32::try_from(request.data.len()).unwrap_or(u32::MAX);
                TransferCommand::UploadRequest(TransferUploadRequest::new(
                    request.transfer,
                    request.store,
                    request.slot,
                    length,
                    request.mode,
                ))
            }
        }
    }

    /// Whether a transfer-scoped field is for this still-running session.
    fn accepts(&self, transfer: u16, tag: &'static str) -> bool {
        if transfer != self.request.transfer {
            tracing::warn!(
                expected = self.request.transfer,
                transfer,
                tag,
                "ignoring field for another transfer"
            );
            return false;
        }
        if self.state.is_terminal() {
            self.ignore(tag);
            return false;
        }
        true
    }

    fn ignore(&self, tag: &'static str) {
        tracing::warn!(
            transfer = self.request.transfer,
            state = %self.state,
            tag,
            "ignoring out-of-order transfer field"
        );
    }

    fn transition(&mut self, next: TransferState) {
        if self.state != next {
            tracing::debug!(
                transfer = self.request.transfer,
                from = %self.state,
                to = %next,
                "transfer state changed"
            );
            self.state = next;
        }
    }

    fn invalid_state(&self, operation: &'static str) -> TransferError {
        TransferError::InvalidState {
            transfer: self.request.transfer,
            operation,
            state: self.state,
        }
    }
}
