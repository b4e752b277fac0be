use std::fmt;
use std::str::FromStr;

use serde_with::SerializeDisplay;

use crate::codec::EnvelopeError;

/// Four-byte ASCII identifier naming a command or field type.
///
/// ```
/// use atem_codec::Tag;
///
/// let tag: Tag = "DCut".parse()?;
/// assert_eq!(b"DCut", tag.as_bytes());
/// assert_eq!("DCut", tag.to_string());
/// # Ok::<(), atem_codec::EnvelopeError>(())
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, SerializeDisplay)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Creates a tag from its four wire bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Returns the four wire bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", char::from(byte))?;
            } else {
                write!(f, "\\x{byte:02X}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}

impl TryFrom<&[u8]> for Tag {
    type Error = EnvelopeError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; 4] = value
            .try_into()
            .map_err(|_| EnvelopeError::InvalidTagLength { len: value.len() })?;
        if !bytes.is_ascii() {
            return Err(EnvelopeError::NonAsciiTag { bytes });
        }
        Ok(Self(bytes))
    }
}

impl FromStr for Tag {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.as_bytes())
    }
}

impl From<[u8; 4]> for Tag {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("DCu")]
    #[case("DCutX")]
    fn parse_rejects_wrong_length(#[case] input: &str) {
        let parsed = input.parse::<Tag>();
        assert_matches!(parsed, Err(EnvelopeError::InvalidTagLength { len }) if len == input.len());
    }

    #[test]
    fn parse_rejects_non_ascii() {
        let parsed = Tag::try_from([b'A', 0xC3, 0xA9, b'B'].as_slice());
        assert_matches!(parsed, Err(EnvelopeError::NonAsciiTag { .. }));
    }

    #[test]
    fn display_escapes_unprintable_bytes() {
        assert_eq!("*XFC", Tag::new(*b"*XFC").to_string());
        assert_eq!("AB\\x00C", Tag::new([b'A', b'B', 0, b'C']).to_string());
    }

    #[test]
    fn serializes_as_display_string() {
        let json = serde_json::to_string(&Tag::new(*b"PrgI")).expect("tag should serialize");
        assert_eq!("\"PrgI\"", json);
    }
}
