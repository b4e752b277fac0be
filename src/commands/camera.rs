//! Camera control (`CCmd`) and the parameter table shared with `CCdP`.
//!
//! Cameras do not describe their own parameters, so every
//! `(category, parameter)` pair maps to a fixed data type and element count.

use bytes::BufMut;
use serde::Serialize;
use strum_macros::IntoStaticStr;

use super::command;
use crate::error::ConfigurationError;
use crate::transcode::fixed16_from_f64;

const COUNT_BYTES: usize = 11;
const MIN_DATA_LEN: usize = 8;

/// Element type of a camera parameter.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CameraDataType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Utf8,
    Fixed16,
}

impl CameraDataType {
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        Some(match raw {
            0 => Self::Bool,
            1 => Self::I8,
            2 => Self::I16,
            3 => Self::I32,
            4 => Self::I64,
            5 => Self::Utf8,
            128 => Self::Fixed16,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Bool => 0,
            Self::I8 => 1,
            Self::I16 => 2,
            Self::I32 => 3,
            Self::I64 => 4,
            Self::Utf8 => 5,
            Self::Fixed16 => 128,
        }
    }

    /// Index of the element count within the 11 count bytes.
    const fn count_index(self) -> usize {
        match self {
            Self::I32 | Self::Fixed16 => 4,
            _ => 2,
        }
    }
}

/// Data type and element count of one camera parameter.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CameraParameter {
    pub data_type: CameraDataType,
    pub elements: usize,
}

const fn entry(data_type: CameraDataType, elements: usize) -> Option<CameraParameter> {
    Some(CameraParameter {
        data_type,
        elements,
    })
}

/// Looks up a camera parameter.
///
/// Trigger parameters carry no data and are listed as zero booleans. The two
/// undocumented unsigned bitfields (3.0 and 4.1) travel as `i16`.
///
/// ```
/// use atem_codec::commands::{CameraDataType, camera_parameter};
///
/// let white_balance = camera_parameter(1, 2).expect("known parameter");
/// assert_eq!(CameraDataType::I16, white_balance.data_type);
/// assert_eq!(2, white_balance.elements);
/// assert!(camera_parameter(9, 0).is_none());
/// ```
#[must_use]
pub const fn camera_parameter(category: u8, parameter: u8) -> Option<CameraParameter> {
    use CameraDataType::{Bool, Fixed16, I8, I16, I32, I64, Utf8};

    match (category, parameter) {
        // Lens
        (0, 0 | 2 | 3 | 4 | 8 | 9) => entry(Fixed16, 1),
        (0, 1 | 5) => entry(Bool, 0),
        (0, 6) => entry(Bool, 1),
        (0, 7) => entry(I16, 1),
        // Video
        (1, 0) => entry(I8, 5),
        (1, 1 | 7 | 8 | 10 | 13) => entry(I8, 1),
        (1, 2) => entry(I16, 2),
        (1, 3 | 4) => entry(Bool, 0),
        (1, 5 | 11 | 12 | 14) => entry(I32, 1),
        (1, 6 | 9) => entry(I16, 1),
        // Audio
        (2, 0 | 1 | 2 | 3) => entry(Fixed16, 1),
        (2, 4) => entry(I8, 1),
        (2, 5) => entry(Fixed16, 2),
        (2, 6) => entry(Bool, 1),
        // Output
        (3, 0) => entry(I16, 1),
        (3, 1) => entry(I8, 1),
        (3, 2) => entry(Fixed16, 1),
        (3, 3) => entry(I8, 4),
        // Display
        (4, 0 | 2 | 3) => entry(Fixed16, 1),
        (4, 1) => entry(I16, 1),
        (4, 4) => entry(I8, 1),
        (4, 5) => entry(I8, 2),
        // Tally
        (5, 0 | 1 | 2) => entry(Fixed16, 1),
        // Reference
        (6, 0) => entry(I8, 1),
        (6, 1) => entry(I32, 1),
        // Configuration
        (7, 0) => entry(I32, 2),
        (7, 1) => entry(Utf8, 1),
        (7, 2) => entry(I32, 1),
        (7, 3) => entry(I64, 2),
        // Color correction
        (8, 0 | 1 | 2 | 3) => entry(Fixed16, 4),
        (8, 4 | 6) => entry(Fixed16, 2),
        (8, 5) => entry(Fixed16, 1),
        (8, 7) => entry(Bool, 0),
        // Media
        (10, 0) => entry(I8, 2),
        (10, 1) => entry(I8, 4),
        // PTZ
        (11, 0) => entry(Fixed16, 2),
        (11, 1) => entry(I8, 2),
        _ => None,
    }
}

/// Typed camera parameter values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum CameraData {
    Bool(Vec<bool>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    Utf8(String),
    Fixed16(Vec<f64>),
}

impl CameraData {
    #[must_use]
    pub const fn data_type(&self) -> CameraDataType {
        match self {
            Self::Bool(_) => CameraDataType::Bool,
            Self::I8(_) => CameraDataType::I8,
            Self::I16(_) => CameraDataType::I16,
            Self::I32(_) => CameraDataType::I32,
            Self::I64(_) => CameraDataType::I64,
            Self::Utf8(_) => CameraDataType::Utf8,
            Self::Fixed16(_) => CameraDataType::Fixed16,
        }
    }

    /// Number of elements; a string counts as one.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(values) => values.len(),
            Self::I8(values) => values.len(),
            Self::I16(values) => values.len(),
            Self::I32(values) => values.len(),
            Self::I64(values) => values.len(),
            Self::Utf8(_) => 1,
            Self::Fixed16(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wire bytes of the values, before padding.
    fn encode(&self) -> Result<Vec<u8>, ConfigurationError> {
        let mut out = Vec::with_capacity(MIN_DATA_LEN);
        match self {
            Self::Bool(values) => out.extend(values.iter().map(|value| u8::from(*value))),
            Self::I8(values) => out.extend(values.iter().flat_map(|value| value.to_be_bytes())),
            Self::I16(values) => out.extend(values.iter().flat_map(|value| value.to_be_bytes())),
            Self::I32(values) => out.extend(values.iter().flat_map(|value| value.to_be_bytes())),
            Self::I64(values) => out.extend(values.iter().flat_map(|value| value.to_be_bytes())),
            Self::Utf8(text) => out.extend_from_slice(text.as_bytes()),
            Self::Fixed16(values) => {
                for value in values {
                    out.extend(fixed16_from_f64(*value)?.to_be_bytes());
                }
            }
        }
        Ok(out)
    }
}

/// `CCmd`: sends one parameter to an attached camera.
///
/// ```
/// use atem_codec::commands::{CameraControl, CameraData, Command};
///
/// // Focus on camera 1, absolute.
/// let focus = CameraControl::new(1, 0, 0, false, CameraData::Fixed16(vec![0.5]))?;
/// let payload = focus.payload();
/// assert_eq!(24, payload.len());
/// assert_eq!(vec![0x04, 0x00], payload[16..18].to_vec());
/// # Ok::<(), atem_codec::ConfigurationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CameraControl {
    destination: u8,
    category: u8,
    parameter: u8,
    relative: bool,
    data: CameraData,
    encoded: Vec<u8>,
}

impl CameraControl {
    /// Checks `data` against the parameter table.
    ///
    /// # Errors
    ///
    /// Returns an error when the parameter is unknown, `data` has the wrong
    /// type or element count for it, or a fixed16 value is out of range.
    pub fn new(
        destination: u8,
        category: u8,
        parameter: u8,
        relative: bool,
        data: CameraData,
    ) -> Result<Self, ConfigurationError> {
        let Some(expected) = camera_parameter(category, parameter) else {
            return Err(ConfigurationError::UnknownCameraParameter {
                category,
                parameter,
            });
        };
        if expected.data_type != data.data_type() {
            return Err(ConfigurationError::CameraDataTypeMismatch {
                category,
                parameter,
                expected: expected.data_type.into(),
                actual: data.data_type().into(),
            });
        }
        if expected.elements != data.len() {
            return Err(ConfigurationError::CameraElementCount {
                category,
                parameter,
                expected: expected.elements,
                actual: data.len(),
            });
        }
        let encoded = data.encode()?;
        Ok(Self {
            destination,
            category,
            parameter,
            relative,
            data,
            encoded,
        })
    }

    /// Builds a trigger (no data) such as auto focus `0.1`.
    ///
    /// # Errors
    ///
    /// Returns an error when the parameter is not a trigger.
    pub fn trigger(destination: u8, category: u8, parameter: u8) -> Result<Self, ConfigurationError> {
        Self::new(destination, category, parameter, false, CameraData::Bool(Vec::new()))
    }

    #[must_use]
    pub const fn data(&self) -> &CameraData {
        &self.data
    }
}

command!(CameraControl, b"CCmd", |this, out| {
    out.put_u8(this.destination);
    out.put_u8(this.category);
    out.put_u8(this.parameter);
    out.put_u8(u8::from(this.relative));
    let data_type = this.data.data_type();
    out.put_u8(data_type.as_raw());

    let mut counts = [0u8; COUNT_BYTES];
    // Element counts come from the parameter table, which tops out at 5.
    counts[data_type.count_index()] = u8::try_from(this.data.len()).unwrap_or(u8::MAX);
    out.put_slice(&counts);

    if !this.data.is_empty() {
        out.put_slice(&this.encoded);
        if this.encoded.len() < MIN_DATA_LEN {
            out.put_bytes(0, MIN_DATA_LEN - this.encoded.len());
        }
    }
});

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::commands::Command;

    #[test]
    fn white_balance_header_and_data() {
        let command =
            CameraControl::new(2, 1, 2, false, CameraData::I16(vec![5600, -10])).expect("valid");
        let payload = command.payload();

        assert_eq!(vec![2, 1, 2, 0, 2], payload[..5].to_vec());
        assert_eq!(
            vec![0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0],
            payload[5..16].to_vec()
        );
        assert_eq!(vec![0x15, 0xE0, 0xFF, 0xF6, 0, 0, 0, 0], payload[16..].to_vec());
    }

    #[test]
    fn int32_count_sits_at_index_four() {
        let command =
            CameraControl::new(1, 1, 5, true, CameraData::I32(vec![10_000])).expect("valid");
        let payload = command.payload();

        assert_eq!(1, payload[3]);
        assert_eq!(3, payload[4]);
        assert_eq!(1, payload[9]);
        assert_eq!(0, payload[7]);
    }

    #[test]
    fn color_gain_fills_eight_bytes_without_padding() {
        let command = CameraControl::new(
            1,
            8,
            2,
            false,
            CameraData::Fixed16(vec![1.0, 1.0, 1.0, 0.5]),
        )
        .expect("valid");
        let payload = command.payload();

        assert_eq!(24, payload.len());
        assert_eq!(vec![0x08, 0, 0x08, 0, 0x08, 0, 0x04, 0], payload[16..].to_vec());
    }

    #[test]
    fn location_exceeds_minimum_data_length() {
        let command = CameraControl::new(1, 7, 3, false, CameraData::I64(vec![1, 2]))
            .expect("valid");
        assert_eq!(32, command.payload().len());
    }

    #[test]
    fn string_counts_as_one_element() {
        let command = CameraControl::new(1, 7, 1, false, CameraData::Utf8("en_US".into()))
            .expect("valid");
        let payload = command.payload();

        assert_eq!(1, payload[7]);
        assert_eq!(b"en_US\0\0\0".to_vec(), payload[16..].to_vec());
    }

    #[test]
    fn long_string_keeps_its_count_and_bytes() {
        let text = "x".repeat(300);
        let command =
            CameraControl::new(1, 7, 1, false, CameraData::Utf8(text.clone())).expect("valid");
        let payload = command.payload();

        assert_eq!(1, payload[7]);
        assert_eq!(16 + 300, payload.len());
        assert_eq!(text.as_bytes(), &payload[16..]);
    }

    #[rstest]
    #[case(16.0)]
    #[case(100.0)]
    #[case(-17.5)]
    fn fixed16_outside_wire_range_is_rejected(#[case] value: f64) {
        let result = CameraControl::new(1, 0, 0, false, CameraData::Fixed16(vec![value]));
        assert_matches!(
            result,
            Err(ConfigurationError::OutOfRange { name: "camera fixed16 value", value: v, .. })
                if v == value
        );
    }

    #[test]
    fn fixed16_range_applies_to_every_element() {
        let result = CameraControl::new(
            1,
            8,
            2,
            false,
            CameraData::Fixed16(vec![1.0, 1.0, 1.0, 20.0]),
        );
        assert_matches!(result, Err(ConfigurationError::OutOfRange { .. }));
    }

    #[test]
    fn trigger_has_no_data() {
        let command = CameraControl::trigger(1, 0, 1).expect("auto focus");
        assert_eq!(16, command.payload().len());
    }

    #[rstest]
    #[case(3, 0, CameraDataType::I16, 1)]
    #[case(4, 1, CameraDataType::I16, 1)]
    #[case(1, 0, CameraDataType::I8, 5)]
    #[case(8, 7, CameraDataType::Bool, 0)]
    #[case(11, 1, CameraDataType::I8, 2)]
    fn table_entries(
        #[case] category: u8,
        #[case] parameter: u8,
        #[case] data_type: CameraDataType,
        #[case] elements: usize,
    ) {
        assert_eq!(
            Some(CameraParameter { data_type, elements }),
            camera_parameter(category, parameter)
        );
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let result = CameraControl::new(1, 9, 0, false, CameraData::Bool(vec![true]));
        assert_matches!(
            result,
            Err(ConfigurationError::UnknownCameraParameter { category: 9, parameter: 0 })
        );
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = CameraControl::new(1, 0, 0, false, CameraData::I16(vec![1]));
        assert_matches!(
            result,
            Err(ConfigurationError::CameraDataTypeMismatch {
                expected: "fixed16",
                actual: "i16",
                ..
            })
        );
    }

    #[test]
    fn wrong_count_is_rejected() {
        let result = CameraControl::new(1, 8, 0, false, CameraData::Fixed16(vec![0.0; 3]));
        assert_matches!(
            result,
            Err(ConfigurationError::CameraElementCount { expected: 4, actual: 3, .. })
        );
    }
}
