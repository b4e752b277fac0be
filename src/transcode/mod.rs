mod audio;
mod color;
mod fixed;

pub use self::audio::{
    LEGACY_FULL_SCALE, METER_FLOOR_DB, fairlight_level_db, legacy_level_db,
};
pub use self::color::{Hls, HslColor, Hue, Permille, Rgb, YCbCr, hls_to_rgb, rgb_to_hls};
pub use self::fixed::{FIXED16_MAX, FIXED16_MIN, FIXED16_SCALE, fixed16_from_f64, fixed16_to_f64};
