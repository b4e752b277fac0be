use bytes::Buf;

use crate::error::FormatError;
use crate::tag::Tag;

/// Bounds-checked big-endian cursor over one field payload.
///
/// Every read fails with [`FormatError::Truncated`] instead of panicking when
/// the payload is shorter than the layout being decoded.
#[derive(Debug)]
pub(crate) struct PayloadReader<'a> {
    tag: Tag,
    payload: &'a [u8],
    position: usize,
}

impl<'a> PayloadReader<'a> {
    pub(crate) const fn new(tag: Tag, payload: &'a [u8]) -> Self {
        Self {
            tag,
            payload,
            position: 0,
        }
    }

    /// Checks up front that the whole fixed layout is present.
    pub(crate) fn expect_len(&self, needed: usize) -> Result<(), FormatError> {
        if self.payload.len() < needed {
            return Err(self.truncated(needed));
        }
        Ok(())
    }

    pub(crate) const fn tag(&self) -> Tag {
        self.tag
    }

    pub(crate) const fn position(&self) -> usize {
        self.position
    }

    pub(crate) const fn len(&self) -> usize {
        self.payload.len()
    }

    pub(crate) fn seek(&mut self, position: usize) -> Result<(), FormatError> {
        if position > self.payload.len() {
            return Err(self.truncated(position));
        }
        self.position = position;
        Ok(())
    }

    pub(crate) fn skip(&mut self, count: usize) -> Result<(), FormatError> {
        self.take(count).map(|_| ())
    }

    pub(crate) fn take(&mut self, count: usize) -> Result<&'a [u8], FormatError> {
        let end = self.position.saturating_add(count);
        if end > self.payload.len() {
            return Err(self.truncated(end));
        }
        let slice = &self.payload[self.position..end];
        self.position = end;
        Ok(slice)
    }

    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let slice = &self.payload[self.position..];
        self.position = self.payload.len();
        slice
    }

    pub(crate) fn u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take(1)?.get_u8())
    }

    pub(crate) fn i8(&mut self) -> Result<i8, FormatError> {
        Ok(self.take(1)?.get_i8())
    }

    pub(crate) fn bool(&mut self) -> Result<bool, FormatError> {
        Ok(self.u8()? != 0)
    }

    pub(crate) fn u16(&mut self) -> Result<u16, FormatError> {
        Ok(self.take(2)?.get_u16())
    }

    pub(crate) fn i16(&mut self) -> Result<i16, FormatError> {
        Ok(self.take(2)?.get_i16())
    }

    pub(crate) fn u32(&mut self) -> Result<u32, FormatError> {
        Ok(self.take(4)?.get_u32())
    }

    pub(crate) fn i32(&mut self) -> Result<i32, FormatError> {
        Ok(self.take(4)?.get_i32())
    }

    pub(crate) fn i64(&mut self) -> Result<i64, FormatError> {
        Ok(self.take(8)?.get_i64())
    }

    /// Reads a fixed-width, NUL-padded text slot.
    pub(crate) fn text(&mut self, width: usize) -> Result<String, FormatError> {
        let raw = self.take(width)?;
        let end = raw.iter().position(|byte| *byte == 0).unwrap_or(raw.len());
        Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
    }

    /// Fails when `count` entries of `entry_len` bytes do not fit after the cursor.
    pub(crate) fn expect_entries(&self, count: usize, entry_len: usize) -> Result<(), FormatError> {
        let needed = count
            .checked_mul(entry_len)
            .and_then(|size| size.checked_add(self.position));
        match needed {
            Some(needed) if needed <= self.payload.len() => Ok(()),
            _ => Err(FormatError::CountOverrun {
                tag: self.tag,
                count,
                available: self.payload.len(),
            }),
        }
    }

    fn truncated(&self, needed: usize) -> FormatError {
        FormatError::Truncated {
            tag: self.tag,
            needed,
            available: self.payload.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    const TAG: Tag = Tag::new(*b"Test");

    #[test]
    fn reads_big_endian_values_in_order() {
        let payload = [0x01, 0xFF, 0xFE, 0x00, 0x00, 0x01, 0x00];
        let mut reader = PayloadReader::new(TAG, &payload);

        assert_eq!(1, reader.u8().expect("u8"));
        assert_eq!(-2, reader.i16().expect("i16"));
        assert_eq!(256, reader.u32().expect("u32"));
        assert_eq!(7, reader.position());
    }

    #[test]
    fn read_past_end_reports_needed_length() {
        let payload = [0x00, 0x01, 0x02];
        let mut reader = PayloadReader::new(TAG, &payload);
        reader.u16().expect("first two bytes are present");

        let read = reader.u16();
        assert_matches!(
            read,
            Err(FormatError::Truncated { needed: 4, available: 3, .. })
        );
    }

    #[test]
    fn text_stops_at_first_nul() {
        let payload = *b"Cam1\0\0junk";
        let mut reader = PayloadReader::new(TAG, &payload);
        assert_eq!("Cam1", reader.text(10).expect("text slot is present"));
    }

    #[test]
    fn expect_entries_rejects_overflowing_counts() {
        let payload = [0u8; 6];
        let mut reader = PayloadReader::new(TAG, &payload);
        reader.skip(2).expect("count bytes");
        assert_eq!(Ok(()), reader.expect_entries(2, 2));
        assert_matches!(
            reader.expect_entries(3, 2),
            Err(FormatError::CountOverrun { count: 3, available: 6, .. })
        );
    }
}
