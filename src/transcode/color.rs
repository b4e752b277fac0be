//! Color encodings: floating RGB/HLS at the API edge, fixed-point HSL for
//! color generators and offset YCbCr for the chroma key color picker.

use bytes::{BufMut, BytesMut};
use serde::Serialize;

use crate::codec::Pack;
use crate::error::ConfigurationError;

const HUE_MAX_TENTHS: u16 = 3599;
const PERMILLE_MAX: u16 = 1000;

const Y_OFFSET: f64 = 625.0;
const Y_SCALE: f64 = 8544.0;
const CHROMA_OFFSET: f64 = 5000.0;
const CHROMA_SCALE: f64 = 5000.0;

/// Floating RGB with each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }
}

/// Floating HLS with every component in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Hls {
    pub hue: f64,
    pub lightness: f64,
    pub saturation: f64,
}

/// Converts RGB to HLS.
///
/// ```
/// use atem_codec::{Rgb, rgb_to_hls};
///
/// let hls = rgb_to_hls(Rgb::new(1.0, 0.0, 0.0));
/// assert_eq!(0.0, hls.hue);
/// assert_eq!(0.5, hls.lightness);
/// assert_eq!(1.0, hls.saturation);
/// ```
#[must_use]
pub fn rgb_to_hls(rgb: Rgb) -> Hls {
    let Rgb { red, green, blue } = rgb;
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    let sum = max + min;
    let range = max - min;
    let lightness = sum / 2.0;

    if range == 0.0 {
        return Hls {
            hue: 0.0,
            lightness,
            saturation: 0.0,
        };
    }

    let saturation = if lightness <= 0.5 {
        range / sum
    } else {
        range / (2.0 - sum)
    };

    let red_distance = (max - red) / range;
    let green_distance = (max - green) / range;
    let blue_distance = (max - blue) / range;
    let sector = if red == max {
        blue_distance - green_distance
    } else if green == max {
        2.0 + red_distance - blue_distance
    } else {
        4.0 + green_distance - red_distance
    };

    Hls {
        hue: (sector / 6.0).rem_euclid(1.0),
        lightness,
        saturation,
    }
}

/// Converts HLS to RGB.
#[must_use]
pub fn hls_to_rgb(hls: Hls) -> Rgb {
    let Hls {
        hue,
        lightness,
        saturation,
    } = hls;
    if saturation == 0.0 {
        return Rgb::new(lightness, lightness, lightness);
    }

    let upper = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let lower = 2.0 * lightness - upper;

    Rgb::new(
        hue_channel(lower, upper, hue + 1.0 / 3.0),
        hue_channel(lower, upper, hue),
        hue_channel(lower, upper, hue - 1.0 / 3.0),
    )
}

fn hue_channel(lower: f64, upper: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        lower + (upper - lower) * hue * 6.0
    } else if hue < 0.5 {
        upper
    } else if hue < 2.0 / 3.0 {
        lower + (upper - lower) * (2.0 / 3.0 - hue) * 6.0
    } else {
        lower
    }
}

/// Hue in tenths of a degree, `0..=3599` on the wire.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, derive_more::Display, derive_more::Into,
)]
#[display("{_0}")]
pub struct Hue(u16);

impl Hue {
    /// Creates a hue from pre-scaled device units.
    ///
    /// # Errors
    ///
    /// Returns an error when `tenths` is above 3599.
    ///
    /// ```
    /// use atem_codec::Hue;
    ///
    /// assert_eq!(3599, Hue::from_tenths(3599)?.tenths());
    /// assert!(Hue::from_tenths(3600).is_err());
    /// # Ok::<(), atem_codec::ConfigurationError>(())
    /// ```
    pub fn from_tenths(tenths: u16) -> Result<Self, ConfigurationError> {
        if tenths > HUE_MAX_TENTHS {
            return Err(ConfigurationError::OutOfRange {
                name: "hue",
                value: f64::from(tenths),
                min: 0.0,
                max: f64::from(HUE_MAX_TENTHS),
            });
        }
        Ok(Self(tenths))
    }

    /// Creates a hue from degrees, truncating to tenths.
    ///
    /// # Errors
    ///
    /// Returns an error when `degrees` is outside `0.0..=359.9`.
    ///
    /// ```
    /// use atem_codec::Hue;
    ///
    /// assert_eq!(0, Hue::from_degrees(0.0)?.tenths());
    /// assert_eq!(3599, Hue::from_degrees(359.9)?.tenths());
    /// assert!(Hue::from_degrees(360.0).is_err());
    /// # Ok::<(), atem_codec::ConfigurationError>(())
    /// ```
    pub fn from_degrees(degrees: f64) -> Result<Self, ConfigurationError> {
        let tenths = (degrees * 10.0 + 1e-6).floor();
        if !(0.0..=f64::from(HUE_MAX_TENTHS)).contains(&tenths) {
            return Err(ConfigurationError::OutOfRange {
                name: "hue",
                value: degrees,
                min: 0.0,
                max: f64::from(HUE_MAX_TENTHS) / 10.0,
            });
        }
        // Range checked above.
        Ok(Self(tenths as u16))
    }

    #[must_use]
    pub const fn tenths(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn degrees(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Decodes a wire value without range validation.
    pub(crate) const fn from_wire(tenths: u16) -> Self {
        Self(tenths)
    }

    /// Converts a hue in turns (`0.0..1.0`), wrapping a full turn to zero.
    fn from_turns(turns: f64) -> Self {
        let tenths = (turns.rem_euclid(1.0) * 3600.0 + 1e-6).floor() as u16;
        Self(tenths % (HUE_MAX_TENTHS + 1))
    }
}

impl Pack for Hue {
    fn pack(&self, out: &mut BytesMut) {
        out.put_u16(self.0);
    }
}

/// A proportion in thousandths, `0..=1000` on the wire.
///
/// Used for saturation, luma and similar unit-interval parameters.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, derive_more::Display, derive_more::Into,
)]
#[display("{_0}")]
pub struct Permille(u16);

impl Permille {
    /// Creates a value from pre-scaled device units.
    ///
    /// # Errors
    ///
    /// Returns an error when `thousandths` is above 1000.
    pub fn from_thousandths(
        name: &'static str,
        thousandths: u16,
    ) -> Result<Self, ConfigurationError> {
        if thousandths > PERMILLE_MAX {
            return Err(ConfigurationError::OutOfRange {
                name,
                value: f64::from(thousandths),
                min: 0.0,
                max: f64::from(PERMILLE_MAX),
            });
        }
        Ok(Self(thousandths))
    }

    /// Creates a value from a fraction in `0.0..=1.0`, truncating to thousandths.
    ///
    /// # Errors
    ///
    /// Returns an error when `fraction` is outside `0.0..=1.0`.
    ///
    /// ```
    /// use atem_codec::Permille;
    ///
    /// assert_eq!(500, Permille::from_fraction("luma", 0.5)?.thousandths());
    /// assert!(Permille::from_fraction("luma", 1.5).is_err());
    /// # Ok::<(), atem_codec::ConfigurationError>(())
    /// ```
    pub fn from_fraction(name: &'static str, fraction: f64) -> Result<Self, ConfigurationError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ConfigurationError::OutOfRange {
                name,
                value: fraction,
                min: 0.0,
                max: 1.0,
            });
        }
        // Range checked above.
        Ok(Self((fraction * 1000.0 + 1e-9).floor() as u16))
    }

    #[must_use]
    pub const fn thousandths(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 1000.0
    }

    pub(crate) const fn from_wire(thousandths: u16) -> Self {
        Self(thousandths)
    }
}

impl Pack for Permille {
    fn pack(&self, out: &mut BytesMut) {
        out.put_u16(self.0);
    }
}

/// Fixed-point HSL as used by color generators and DVE borders.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize)]
pub struct HslColor {
    pub hue: Hue,
    pub saturation: Permille,
    pub luma: Permille,
}

impl HslColor {
    /// Converts floating RGB into device units.
    ///
    /// ```
    /// use atem_codec::{HslColor, Rgb};
    ///
    /// let color = HslColor::from_rgb(Rgb::new(0.0, 0.0, 1.0))?;
    /// assert_eq!(2400, color.hue.tenths());
    /// assert_eq!(1000, color.saturation.thousandths());
    /// assert_eq!(500, color.luma.thousandths());
    /// # Ok::<(), atem_codec::ConfigurationError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when a channel lies outside `0.0..=1.0`.
    pub fn from_rgb(rgb: Rgb) -> Result<Self, ConfigurationError> {
        for (name, channel) in [("red", rgb.red), ("green", rgb.green), ("blue", rgb.blue)] {
            if !(0.0..=1.0).contains(&channel) {
                return Err(ConfigurationError::OutOfRange {
                    name,
                    value: channel,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }

        let hls = rgb_to_hls(rgb);
        Ok(Self {
            hue: Hue::from_turns(hls.hue),
            saturation: Permille::from_fraction("saturation", hls.saturation)?,
            luma: Permille::from_fraction("luma", hls.lightness)?,
        })
    }

    /// Converts device units back to floating RGB.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hls_to_rgb(Hls {
            hue: self.hue.degrees() / 360.0,
            lightness: self.luma.fraction(),
            saturation: self.saturation.fraction(),
        })
    }
}

/// Raw color picker sample in the chroma keyer's offset YCbCr encoding.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize)]
pub struct YCbCr {
    pub y: u16,
    pub cb: u16,
    pub cr: u16,
}

impl YCbCr {
    /// Returns normalized `(Y, Cb, Cr)` with Y in `0..=1` and chroma in `-1..=1`.
    #[must_use]
    pub fn normalized(self) -> (f64, f64, f64) {
        (
            (f64::from(self.y) - Y_OFFSET) / Y_SCALE,
            (f64::from(self.cb) - CHROMA_OFFSET) / CHROMA_SCALE,
            (f64::from(self.cr) - CHROMA_OFFSET) / CHROMA_SCALE,
        )
    }

    /// Converts to RGB with each channel clamped to `0.0..=1.0`.
    ///
    /// ```
    /// use atem_codec::YCbCr;
    ///
    /// let white = YCbCr { y: 625 + 8544, cb: 5000, cr: 5000 }.to_rgb();
    /// assert_eq!((1.0, 1.0, 1.0), (white.red, white.green, white.blue));
    /// ```
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let (y, cb, cr) = self.normalized();
        Rgb::new(
            (y + 1.5748 * cr).clamp(0.0, 1.0),
            (y - 0.1873 * cb - 0.4681 * cr).clamp(0.0, 1.0),
            (y + 1.8556 * cb).clamp(0.0, 1.0),
        )
    }
}
