//! Camera control echo.

use serde::Serialize;

use super::DecodeField;
use crate::codec::PayloadReader;
use crate::commands::{CameraData, CameraDataType};
use crate::error::FormatError;
use crate::transcode::fixed16_to_f64;

const HEADER_LEN: usize = 16;

/// Element count the device reports wrong for a few focus, aperture and
/// white balance parameters.
const fn count_override(category: u8, parameter: u8) -> Option<usize> {
    match (category, parameter) {
        (0, 0 | 2 | 3 | 4 | 6) => Some(1),
        (0, 1) => Some(0),
        (1, 2) => Some(2),
        _ => None,
    }
}

/// `CCdP`: one camera parameter as applied by the device.
///
/// `data` is `None` when the payload ends after the header or the data type
/// is not one the decoder knows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraControlData {
    pub destination: u8,
    pub category: u8,
    pub parameter: u8,
    pub raw_data_type: u8,
    pub element_count: usize,
    pub data: Option<CameraData>,
}

impl CameraControlData {
    #[must_use]
    pub const fn data_type(&self) -> Option<CameraDataType> {
        CameraDataType::from_raw(self.raw_data_type)
    }
}

fn read_values<'a, T>(
    reader: &mut PayloadReader<'a>,
    count: usize,
    width: usize,
    mut read: impl FnMut(&mut PayloadReader<'a>) -> Result<T, FormatError>,
) -> Result<Vec<T>, FormatError> {
    reader.expect_entries(count, width)?;
    (0..count).map(|_| read(reader)).collect()
}

impl DecodeField for CameraControlData {
    fn decode(reader: &mut PayloadReader<'_>) -> Result<Self, FormatError> {
        reader.expect_len(HEADER_LEN)?;
        let destination = reader.u8()?;
        let category = reader.u8()?;
        let parameter = reader.u8()?;
        let raw_data_type = reader.u8()?;
        let reported: usize = reader.take(8)?.iter().copied().map(usize::from).sum();
        let count = count_override(category, parameter).unwrap_or(reported);
        reader.seek(HEADER_LEN)?;

        let data = match CameraDataType::from_raw(raw_data_type) {
            _ if reader.len() <= HEADER_LEN => None,
            None => None,
            Some(CameraDataType::Bool) => {
                Some(CameraData::Bool(read_values(reader, count, 1, PayloadReader::bool)?))
            }
            Some(CameraDataType::I8) => {
                Some(CameraData::I8(read_values(reader, count, 1, PayloadReader::i8)?))
            }
            Some(CameraDataType::I16) => {
                Some(CameraData::I16(read_values(reader, count, 2, PayloadReader::i16)?))
            }
            Some(CameraDataType::I32) => {
                Some(CameraData::I32(read_values(reader, count, 4, PayloadReader::i32)?))
            }
            Some(CameraDataType::I64) => {
                Some(CameraData::I64(read_values(reader, count, 8, PayloadReader::i64)?))
            }
            Some(CameraDataType::Utf8) => {
                let raw = reader.rest();
                let end = raw.iter().position(|byte| *byte == 0).unwrap_or(raw.len());
                Some(CameraData::Utf8(String::from_utf8_lossy(&raw[..end]).into_owned()))
            }
            Some(CameraDataType::Fixed16) => Some(CameraData::Fixed16(read_values(
                reader,
                count,
                2,
                |reader| reader.i16().map(fixed16_to_f64),
            )?)),
        };

        Ok(Self {
            destination,
            category,
            parameter,
            raw_data_type,
            element_count: count,
            data,
        })
    }
}
