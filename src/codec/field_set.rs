//! Partial-update payload builder.
//!
//! Partial-update commands carry a mask word at payload offset 0. Bit `k` of
//! the mask is set exactly when the `k`-th optional parameter was supplied,
//! and every parameter slot is written either way: supplied values as given,
//! missing ones as the type's neutral default.

use bytes::{BufMut, BytesMut};

use crate::error::ConfigurationError;

/// Fixed-width big-endian packing for one payload slot.
pub(crate) trait Pack: Default {
    fn pack(&self, out: &mut BytesMut);
}

impl Pack for u8 {
    fn pack(&self, out: &mut BytesMut) {
        out.put_u8(*self);
    }
}

impl Pack for i8 {
    fn pack(&self, out: &mut BytesMut) {
        out.put_i8(*self);
    }
}

impl Pack for bool {
    fn pack(&self, out: &mut BytesMut) {
        out.put_u8(u8::from(*self));
    }
}

impl Pack for u16 {
    fn pack(&self, out: &mut BytesMut) {
        out.put_u16(*self);
    }
}

impl Pack for i16 {
    fn pack(&self, out: &mut BytesMut) {
        out.put_i16(*self);
    }
}

impl Pack for u32 {
    fn pack(&self, out: &mut BytesMut) {
        out.put_u32(*self);
    }
}

impl Pack for i32 {
    fn pack(&self, out: &mut BytesMut) {
        out.put_i32(*self);
    }
}

/// UTF-8 text for a NUL-padded slot of `N` bytes.
///
/// ```
/// use atem_codec::FixedText;
///
/// let label = FixedText::<4>::new("label", "CAM1")?;
/// assert_eq!("CAM1", label.as_str());
/// assert!(FixedText::<4>::new("label", "CAMERA").is_err());
/// # Ok::<(), atem_codec::ConfigurationError>(())
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct FixedText<const N: usize>(String);

impl<const N: usize> FixedText<N> {
    /// Validates that `value` fits in `N` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error naming `name` when the text is longer than the slot.
    pub fn new(name: &'static str, value: impl Into<String>) -> Result<Self, ConfigurationError> {
        let value = value.into();
        if value.len() > N {
            return Err(ConfigurationError::TextTooLong {
                name,
                len: value.len(),
                max: N,
            });
        }
        Ok(Self(value))
    }

    /// Returns the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> Pack for FixedText<N> {
    fn pack(&self, out: &mut BytesMut) {
        out.put_slice(self.0.as_bytes());
        out.put_bytes(0, N - self.0.len());
    }
}

/// Width of the mask word at payload offset 0.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum MaskWidth {
    U8,
    U16,
    U32,
}

/// Accumulates mask bits and slot bytes for one partial-update payload.
#[derive(Debug)]
pub(crate) struct FieldSet {
    width: MaskWidth,
    mask: u32,
    body: BytesMut,
}

impl FieldSet {
    pub(crate) fn new(width: MaskWidth) -> Self {
        Self {
            width,
            mask: 0,
            body: BytesMut::new(),
        }
    }

    /// Writes a slot that is always transmitted, such as a unit index.
    pub(crate) fn fixed<T: Pack>(mut self, value: T) -> Self {
        value.pack(&mut self.body);
        self
    }

    /// Writes an optional slot: sets `bit` when supplied, packs the default otherwise.
    pub(crate) fn optional<T: Pack>(mut self, bit: u8, value: Option<T>) -> Self {
        match value {
            Some(value) => {
                self.mask |= 1 << bit;
                value.pack(&mut self.body);
            }
            None => T::default().pack(&mut self.body),
        }
        self
    }

    /// Sets `bit` without writing a slot.
    pub(crate) fn flag(mut self, bit: u8, present: bool) -> Self {
        if present {
            self.mask |= 1 << bit;
        }
        self
    }

    /// Writes `count` zero bytes.
    pub(crate) fn pad(mut self, count: usize) -> Self {
        self.body.put_bytes(0, count);
        self
    }

    /// Writes `count` copies of a constant filler byte.
    pub(crate) fn fill(mut self, byte: u8, count: usize) -> Self {
        self.body.put_bytes(byte, count);
        self
    }

    /// Writes the mask word followed by every slot.
    pub(crate) fn write_to(self, out: &mut BytesMut) {
        // Bit positions never exceed the declared width.
        match self.width {
            MaskWidth::U8 => out.put_u8((self.mask & 0xFF) as u8),
            MaskWidth::U16 => out.put_u16((self.mask & 0xFFFF) as u16),
            MaskWidth::U32 => out.put_u32(self.mask),
        }
        out.put_slice(&self.body);
    }
}
