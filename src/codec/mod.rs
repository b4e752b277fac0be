mod envelope;
mod field_set;
mod reader;

pub use self::envelope::{Envelope, EnvelopeError, Frames, HEADER_LEN, MAX_PAYLOAD_LEN, RawFrame};
pub use self::field_set::FixedText;
pub(crate) use self::field_set::{FieldSet, MaskWidth, Pack};
pub(crate) use self::reader::PayloadReader;
