//! Legacy (non-Fairlight) audio mixer commands.
//!
//! Volumes are linear `u16` values in `0..=65381`; balance is `-10000..=10000`.

use bon::Builder;
use bytes::BufMut;

use super::command;
use crate::codec::{FieldSet, MaskWidth};
use crate::types::AudioMixOption;

/// `CAMM`: master bus settings.
///
/// Bit 1 of the mask has no parameter.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Builder)]
pub struct AudioMasterProperties {
    pub volume: Option<u16>,
    pub follow_fade_to_black: Option<bool>,
}

command!(AudioMasterProperties, b"CAMM", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .pad(1)
        .optional(0, this.volume)
        .pad(2)
        .optional(2, this.follow_fade_to_black)
        .pad(1)
        .write_to(out);
});

/// `CAMm`: monitor bus settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Builder)]
pub struct AudioMonitorProperties {
    pub enabled: Option<bool>,
    pub volume: Option<u16>,
    pub mute: Option<bool>,
    pub solo: Option<bool>,
    pub solo_source: Option<u16>,
    pub dim: Option<bool>,
    pub dim_volume: Option<u16>,
}

command!(AudioMonitorProperties, b"CAMm", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .optional(0, this.enabled)
        .optional(1, this.volume)
        .optional(2, this.mute)
        .optional(3, this.solo)
        .optional(4, this.solo_source)
        .optional(5, this.dim)
        .pad(1)
        .optional(6, this.dim_volume)
        .write_to(out);
});

/// `CAMI`: channel strip settings for one audio source.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Builder)]
pub struct AudioInput {
    pub source: u16,
    pub mix_option: Option<AudioMixOption>,
    pub volume: Option<u16>,
    pub balance: Option<i16>,
}

command!(AudioInput, b"CAMI", |this, out| {
    FieldSet::new(MaskWidth::U8)
        .pad(1)
        .fixed(this.source)
        .optional(0, this.mix_option)
        .pad(1)
        .optional(1, this.volume)
        .optional(2, this.balance)
        .pad(2)
        .write_to(out);
});

/// `SALN`: subscribes to or stops legacy audio meter levels.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SendAudioLevels {
    pub enabled: bool,
}

impl SendAudioLevels {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

command!(SendAudioLevels, b"SALN", |this, out| {
    out.put_u8(u8::from(this.enabled));
    out.put_bytes(0, 3);
});

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::Command;

    #[test]
    fn master_follow_fade_to_black_uses_bit_two() {
        let command = AudioMasterProperties::builder()
            .follow_fade_to_black(true)
            .build();
        assert_eq!(vec![0b100, 0, 0, 0, 0, 0, 1, 0], command.payload());
    }

    #[test]
    fn master_volume_only() {
        let command = AudioMasterProperties::builder().volume(32768).build();
        assert_eq!(vec![0b001, 0, 0x80, 0, 0, 0, 0, 0], command.payload());
    }

    #[test]
    fn monitor_dim_volume_follows_padding() {
        let command = AudioMonitorProperties::builder()
            .solo_source(1301)
            .dim_volume(100)
            .build();
        assert_eq!(
            vec![0b101_0000, 0, 0, 0, 0, 0, 0x05, 0x15, 0, 0, 0, 100],
            command.payload()
        );
    }

    #[test]
    fn input_afv_and_balance() {
        let command = AudioInput::builder()
            .source(2)
            .mix_option(AudioMixOption::AudioFollowVideo)
            .balance(-10000)
            .build();
        assert_eq!(
            vec![0b101, 0, 0, 2, 2, 0, 0, 0, 0xD8, 0xF0, 0, 0],
            command.payload()
        );
    }

    #[test]
    fn send_levels_flag() {
        assert_eq!(vec![1, 0, 0, 0], SendAudioLevels::new(true).payload());
    }
}
