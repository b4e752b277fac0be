//! Small wire enumerations shared by commands and fields.

use std::fmt;

use bytes::{BufMut, BytesMut};
use serde::Serialize;

use crate::codec::Pack;

/// Declares a wire enumeration with an `Other` fallback for values the
/// catalog does not name.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident: $repr:ty {
            $( $(#[$variant_meta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant, )+
            /// A value without a name in this catalog.
            Other($repr),
        }

        impl $name {
            /// Returns the wire value.
            #[must_use]
            pub const fn as_raw(self) -> $repr {
                match self {
                    $( Self::$variant => $value, )+
                    Self::Other(raw) => raw,
                }
            }
        }

        impl From<$repr> for $name {
            fn from(raw: $repr) -> Self {
                match raw {
                    $( $value => Self::$variant, )+
                    other => Self::Other(other),
                }
            }
        }

        impl From<$name> for $repr {
            fn from(value: $name) -> Self {
                value.as_raw()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::from(0)
            }
        }

        impl Pack for $name {
            fn pack(&self, out: &mut BytesMut) {
                self.as_raw().pack(out);
            }
        }
    };
}

wire_enum! {
    /// Transition style of an M/E unit.
    pub enum TransitionStyle: u8 {
        Mix = 0,
        Dip = 1,
        Wipe = 2,
        Dve = 3,
        Sting = 4,
    }
}

wire_enum! {
    /// Upstream keyer type.
    pub enum KeyType: u8 {
        Luma = 0,
        Chroma = 1,
        Pattern = 2,
        Dve = 3,
    }
}

wire_enum! {
    /// Media pool slot kind loaded into a media player.
    pub enum MediaSourceType: u8 {
        Still = 1,
        Clip = 2,
    }
}

wire_enum! {
    /// Internal routing class of a video source.
    pub enum PortType: u8 {
        External = 0,
        Black = 1,
        ColorBars = 2,
        ColorGenerator = 3,
        MediaPlayer = 4,
        MediaPlayerKey = 5,
        SuperSource = 6,
        Passthrough = 7,
        MeOutput = 128,
        AuxOutput = 129,
        KeyMask = 130,
        MultiviewOutput = 131,
    }
}

wire_enum! {
    /// Mix state of a legacy audio channel.
    pub enum AudioMixOption: u8 {
        Off = 0,
        On = 1,
        AudioFollowVideo = 2,
    }
}

wire_enum! {
    /// Flying key keyframe slot.
    pub enum Keyframe: u8 {
        A = 1,
        B = 2,
    }
}

wire_enum! {
    /// Target of a flying key run.
    pub enum RunTo: u8 {
        A = 1,
        B = 2,
        Full = 3,
        Infinite = 4,
    }
}

wire_enum! {
    /// Device-side file transfer failure reason.
    pub enum TransferErrorCode: u8 {
        TryAgain = 1,
        NotFound = 2,
        NoLock = 5,
    }
}

/// Layers taking part in the next transition.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize)]
pub struct TransitionLayers(u8);

impl TransitionLayers {
    pub const BACKGROUND: Self = Self(1 << 0);
    pub const KEY1: Self = Self(1 << 1);
    pub const KEY2: Self = Self(1 << 2);
    pub const KEY3: Self = Self(1 << 3);
    pub const KEY4: Self = Self(1 << 4);

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns whether upstream key `keyer` (0-based) takes part.
    #[must_use]
    pub const fn has_key(self, keyer: u8) -> bool {
        keyer < 4 && self.0 & (1 << (keyer + 1)) != 0
    }
}

impl std::ops::BitOr for TransitionLayers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Pack for TransitionLayers {
    fn pack(&self, out: &mut BytesMut) {
        out.put_u8(self.0);
    }
}

/// Frame rate of a video mode.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum FrameRate {
    Fps23_98,
    Fps24,
    Fps25,
    Fps29_97,
    Fps30,
    Fps50,
    Fps59_94,
    Fps60,
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fps23_98 => "23.98",
            Self::Fps24 => "24",
            Self::Fps25 => "25",
            Self::Fps29_97 => "29.97",
            Self::Fps30 => "30",
            Self::Fps50 => "50",
            Self::Fps59_94 => "59.94",
            Self::Fps60 => "60",
        })
    }
}

/// Properties of a known video mode number.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct VideoFormat {
    /// Vertical line count (525, 625, 720, 1080, 2160 or 4320).
    pub lines: u16,
    pub interlaced: bool,
    pub rate: FrameRate,
    pub widescreen: bool,
}

impl VideoFormat {
    /// Active picture size as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        match self.lines {
            525 => (720, 480),
            625 => (720, 576),
            720 => (1280, 720),
            1080 => (1920, 1080),
            2160 => (3840, 2160),
            _ => (7680, 4320),
        }
    }

    #[must_use]
    pub const fn pixels(&self) -> u32 {
        let (width, height) = self.dimensions();
        width * height
    }
}

/// Video mode number as used by `CVdM`, `VidM` and `_VMC`.
///
/// ```
/// use atem_codec::VideoMode;
///
/// assert_eq!("1080p59.94", VideoMode::new(13).label());
/// assert_eq!("525i59.94 4:3", VideoMode::new(0).label());
/// assert_eq!("unknown [99]", VideoMode::new(99).label());
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize)]
pub struct VideoMode(u8);

impl VideoMode {
    #[must_use]
    pub const fn new(mode: u8) -> Self {
        Self(mode)
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Looks up the format of this mode, if the number is known.
    #[must_use]
    pub const fn format(self) -> Option<VideoFormat> {
        use FrameRate::{Fps23_98, Fps24, Fps25, Fps29_97, Fps30, Fps50, Fps59_94, Fps60};

        let (lines, interlaced, rate, widescreen) = match self.0 {
            0 => (525, true, Fps59_94, false),
            1 => (625, true, Fps50, false),
            2 => (525, true, Fps59_94, true),
            3 => (625, true, Fps50, true),
            4 => (720, false, Fps50, true),
            5 => (720, false, Fps59_94, true),
            6 => (1080, true, Fps50, true),
            7 => (1080, true, Fps59_94, true),
            8 => (1080, false, Fps23_98, true),
            9 => (1080, false, Fps24, true),
            10 => (1080, false, Fps25, true),
            11 => (1080, false, Fps29_97, true),
            12 => (1080, false, Fps50, true),
            13 => (1080, false, Fps59_94, true),
            14 => (2160, false, Fps23_98, true),
            15 => (2160, false, Fps24, true),
            16 => (2160, false, Fps25, true),
            17 => (2160, false, Fps29_97, true),
            18 => (2160, false, Fps50, true),
            19 => (2160, false, Fps59_94, true),
            20 => (4320, false, Fps23_98, true),
            21 => (4320, false, Fps24, true),
            22 => (4320, false, Fps25, true),
            23 => (4320, false, Fps29_97, true),
            24 => (4320, false, Fps50, true),
            25 => (4320, false, Fps59_94, true),
            26 => (1080, false, Fps30, true),
            27 => (1080, false, Fps60, true),
            _ => return None,
        };
        Some(VideoFormat {
            lines,
            interlaced,
            rate,
            widescreen,
        })
    }

    /// Human-readable label such as `1080i50` or `625i50 16:9`.
    #[must_use]
    pub fn label(self) -> String {
        let Some(format) = self.format() else {
            return format!("unknown [{}]", self.0);
        };
        let scan = if format.interlaced { 'i' } else { 'p' };
        let aspect = match (format.lines < 720, format.widescreen) {
            (false, _) => "",
            (true, true) => " 16:9",
            (true, false) => " 4:3",
        };
        format!("{}{scan}{}{aspect}", format.lines, format.rate)
    }

    /// Expands a capability bitfield where bit `n` stands for mode `n`.
    #[must_use]
    pub fn from_bitfield(bits: u32) -> Vec<Self> {
        (0..32u8)
            .filter(|bit| bits & (1 << bit) != 0)
            .map(Self)
            .collect()
    }
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
