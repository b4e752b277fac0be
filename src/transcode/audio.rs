//! Audio meter curves.
//!
//! The legacy mixer and the Fairlight mixer report levels on two unrelated
//! scales. Keep them apart: feeding a Fairlight value through the legacy curve
//! (or the reverse) yields plausible-looking but wrong decibels.

/// Meter floor in dB.
pub const METER_FLOOR_DB: f64 = -60.0;

/// Raw legacy sample that represents 0 dBFS.
pub const LEGACY_FULL_SCALE: f64 = 128.0 * 65536.0;

/// Fairlight curve coefficient, `10^(40/20)`.
const FAIRLIGHT_COEFFICIENT: f64 = 100.0;
const FAIRLIGHT_RANGE: f64 = 10_000.0;

/// Converts a legacy mixer meter sample to dB.
///
/// A raw zero maps to the floor rather than negative infinity.
///
/// ```
/// use atem_codec::legacy_level_db;
///
/// assert_eq!(0.0, legacy_level_db(128 * 65536));
/// assert_eq!(-60.0, legacy_level_db(0));
/// ```
#[must_use]
pub fn legacy_level_db(raw: u32) -> f64 {
    if raw == 0 {
        return METER_FLOOR_DB;
    }
    20.0 * (f64::from(raw) / LEGACY_FULL_SCALE).log10()
}

/// Converts a Fairlight meter value in `-10000..=0` to dB.
///
/// A raw zero is full scale (0 dB), a raw `-10000` is the floor.
///
/// ```
/// use atem_codec::fairlight_level_db;
///
/// assert_eq!(0.0, fairlight_level_db(0));
/// assert_eq!(-60.0, fairlight_level_db(-10000));
/// ```
#[must_use]
pub fn fairlight_level_db(raw: i16) -> f64 {
    if raw == 0 {
        return 0.0;
    }
    let position = (f64::from(raw) + FAIRLIGHT_RANGE) / FAIRLIGHT_RANGE;
    if position == 0.0 {
        return METER_FLOOR_DB;
    }
    ((FAIRLIGHT_COEFFICIENT + 1.0).powf(position) - 1.0) / FAIRLIGHT_COEFFICIENT * 60.0 - 60.0
}
