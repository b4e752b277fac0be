use crate::error::ConfigurationError;

/// Scale of the camera control 16-bit fixed-point format (5.11).
pub const FIXED16_SCALE: f64 = 2048.0;

/// Smallest value camera fixed16 can hold.
pub const FIXED16_MIN: f64 = i16::MIN as f64 / FIXED16_SCALE;

/// Largest value camera fixed16 can hold.
pub const FIXED16_MAX: f64 = i16::MAX as f64 / FIXED16_SCALE;

/// Encodes a value as camera fixed16, truncating toward zero.
///
/// # Errors
///
/// Returns an error when `value` is outside `FIXED16_MIN..=FIXED16_MAX`.
///
/// ```
/// use atem_codec::{fixed16_from_f64, fixed16_to_f64};
///
/// assert_eq!(1024, fixed16_from_f64(0.5)?);
/// assert_eq!(-2048, fixed16_from_f64(-1.0)?);
/// assert!(fixed16_from_f64(100.0).is_err());
/// assert_eq!(0.5, fixed16_to_f64(1024));
/// # Ok::<(), atem_codec::ConfigurationError>(())
/// ```
pub fn fixed16_from_f64(value: f64) -> Result<i16, ConfigurationError> {
    if !(FIXED16_MIN..=FIXED16_MAX).contains(&value) {
        return Err(ConfigurationError::OutOfRange {
            name: "camera fixed16 value",
            value,
            min: FIXED16_MIN,
            max: FIXED16_MAX,
        });
    }
    // Range checked above.
    Ok((value * FIXED16_SCALE) as i16)
}

/// Decodes a camera fixed16 value.
#[must_use]
pub fn fixed16_to_f64(raw: i16) -> f64 {
    f64::from(raw) / FIXED16_SCALE
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, 0)]
    #[case(1.0, 2048)]
    #[case(0.3, 614)]
    #[case(-0.3, -614)]
    #[case(-16.0, i16::MIN)]
    #[case(FIXED16_MAX, i16::MAX)]
    fn encodes_with_truncation(#[case] value: f64, #[case] expected: i16) {
        assert_eq!(expected, fixed16_from_f64(value).expect("in range"));
    }

    #[rstest]
    #[case(16.0)]
    #[case(100.0)]
    #[case(-16.001)]
    #[case(f64::NAN)]
    fn rejects_values_outside_the_wire_range(#[case] value: f64) {
        assert_matches!(
            fixed16_from_f64(value),
            Err(ConfigurationError::OutOfRange { name: "camera fixed16 value", .. })
        );
    }
}
