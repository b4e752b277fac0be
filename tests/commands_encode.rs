use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rstest::rstest;

use atem_codec::commands::{
    self, Command, Cut, DownstreamKeyTie, FadeToBlackRate, FairlightChannel, KeyOnAir,
    MediaPlayerSource, ProgramInput, TransitionPosition,
};
use atem_codec::{
    AudioMixOption, ConfigurationError, Direction, Envelope, Field, HslColor, Hue, Permille,
    PortType, Rgb, Tag, lookup_tag,
};
use serde_json::{Value, json};

#[rstest]
#[case(&Cut::new(0), *b"DCut", vec![0, 0, 0, 0])]
#[case(&ProgramInput::new(0, 2), *b"CPgI", vec![0, 0, 0, 2])]
#[case(&FadeToBlackRate::new(0, 25), *b"FtbC", vec![1, 0, 25, 0])]
#[case(&DownstreamKeyTie::new(1, true), *b"CDsT", vec![1, 1, 0, 0])]
#[case(&KeyOnAir::new(0, 2, true), *b"CKOn", vec![0, 2, 1, 0])]
fn frames_wrap_payload_in_envelope(
    #[case] command: &dyn Command,
    #[case] tag: [u8; 4],
    #[case] payload: Vec<u8>,
) {
    let frame = commands::encode(command).expect("small payload");

    assert_eq!(Envelope::encode(Tag::new(tag), &payload).expect("small payload"), frame);
    assert_eq!(payload.len() + 8, usize::from(u16::from_be_bytes([frame[0], frame[1]])));
}

#[rstest]
#[case(&Cut::new(0))]
#[case(&ProgramInput::new(0, 1))]
#[case(&FadeToBlackRate::new(0, 1))]
#[case(&DownstreamKeyTie::new(0, false))]
fn encoded_tags_are_listed_as_commands(#[case] command: &dyn Command) {
    let infos = lookup_tag(command.tag());
    assert!(
        infos.iter().any(|info| info.direction == Direction::Command),
        "{} is missing from the catalog",
        command.tag()
    );
}

#[test]
fn transition_position_is_bounded() {
    let position = TransitionPosition::new(0, 10_000).expect("upper bound is allowed");
    assert_eq!(vec![0, 0, 0x27, 0x10], position.payload());
    assert_matches!(
        TransitionPosition::new(0, 10_001),
        Err(ConfigurationError::OutOfRange { name: "transition position", .. })
    );
}

#[test]
fn media_player_clip_sets_clip_bit() {
    let command = MediaPlayerSource::builder()
        .player(1)
        .clip(1)
        .build()
        .expect("clip only");
    let frame = command.encode().expect("small payload");
    assert_eq!(b"MPSS", &frame[4..8]);
    assert_eq!(vec![0b101, 1, 2, 0, 1, 0, 0, 0], frame[8..].to_vec());
}

#[test]
fn color_set_by_command_reads_back_through_field() {
    let sent = HslColor::from_rgb(Rgb::new(0.0, 0.5, 1.0)).expect("valid rgb");
    let command = commands::ColorGenerator::from_hsl(1, sent);
    let payload = command.payload();
    assert_eq!(0b111, payload[0]);

    let mut echoed = vec![payload[1], 0];
    echoed.extend_from_slice(&payload[2..8]);
    let field = Field::decode(Tag::new(*b"ColV"), &echoed).expect("valid payload");
    let Field::ColorGenerator(color) = field else {
        panic!("expected a color generator field, got {field:?}");
    };

    assert_eq!(sent, color.color());
    assert_eq!(2100, color.hue.tenths());
    let rgb = color.rgb();
    for (expected, actual) in [(0.0, rgb.red), (0.5, rgb.green), (1.0, rgb.blue)] {
        assert!((expected - actual).abs() < 1e-3, "{expected} != {actual}");
    }
}

/// How a command writes one parameter slot.
#[derive(Debug, Clone, Copy)]
enum Wire {
    Flag,
    U8,
    U16,
    I16,
    I32,
    Text(usize),
    MixOption,
    Port,
    Channel,
}

impl Wire {
    /// The JSON a state field reports for the value at the start of `bytes`.
    fn read(self, bytes: &[u8]) -> Value {
        match self {
            Self::Flag => Value::Bool(bytes[0] != 0),
            Self::U8 => json!(bytes[0]),
            Self::U16 => json!(u16::from_be_bytes([bytes[0], bytes[1]])),
            Self::I16 => json!(i16::from_be_bytes([bytes[0], bytes[1]])),
            Self::I32 => json!(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
            Self::Text(len) => {
                let slot = &bytes[..len];
                let end = slot.iter().position(|&byte| byte == 0).unwrap_or(len);
                json!(String::from_utf8_lossy(&slot[..end]))
            }
            Self::MixOption => json!(AudioMixOption::from(bytes[0])),
            Self::Port => json!(PortType::from(bytes[1])),
            Self::Channel => json!(FairlightChannel::from_wire(bytes[0], bytes[1])),
        }
    }
}

/// A command payload offset and the state field member that reports it.
#[derive(Debug, Clone, Copy)]
struct Slot {
    offset: usize,
    wire: Wire,
    member: &'static str,
}

const fn slot(offset: usize, wire: Wire, member: &'static str) -> Slot {
    Slot {
        offset,
        wire,
        member,
    }
}

fn permille(thousandths: u16) -> Permille {
    Permille::from_thousandths("level", thousandths).expect("in range")
}

fn downstream_key_gain() -> Box<dyn Command> {
    Box::new(
        commands::DownstreamKeyGain::builder()
            .keyer(1)
            .premultiplied(true)
            .clip(permille(500))
            .gain(permille(700))
            .invert(true)
            .build(),
    )
}

fn key_luma() -> Box<dyn Command> {
    Box::new(
        commands::KeyLumaProperties::builder()
            .me(0)
            .keyer(1)
            .premultiplied(true)
            .clip(permille(250))
            .gain(permille(900))
            .invert(true)
            .build(),
    )
}

fn wipe() -> Box<dyn Command> {
    Box::new(
        commands::WipeSettings::builder()
            .me(0)
            .rate(30)
            .pattern(5)
            .width(100)
            .source(3000)
            .symmetry(5000)
            .softness(200)
            .position_x(7000)
            .position_y(3000)
            .reverse(true)
            .flip_flop(true)
            .build(),
    )
}

fn dve_transition() -> Box<dyn Command> {
    Box::new(
        commands::DveSettings::builder()
            .me(1)
            .rate(25)
            .style(3)
            .fill_source(2001)
            .key_source(2002)
            .key_enabled(true)
            .key_premultiplied(true)
            .key_clip(permille(500))
            .key_gain(permille(800))
            .key_invert(true)
            .reverse(true)
            .flip_flop(true)
            .build(),
    )
}

fn key_dve() -> Box<dyn Command> {
    Box::new(
        commands::KeyDveProperties::builder()
            .me(0)
            .keyer(1)
            .size_x(500)
            .size_y(500)
            .position_x(-8000)
            .position_y(4500)
            .rotation(3600)
            .border_enabled(true)
            .shadow_enabled(true)
            .border_bevel(2)
            .outer_width(150)
            .inner_width(100)
            .outer_softness(40)
            .inner_softness(30)
            .bevel_softness(20)
            .bevel_position(50)
            .border_opacity(80)
            .border_hue(Hue::from_tenths(2400).expect("in range"))
            .border_saturation(permille(1000))
            .border_luma(permille(500))
            .light_angle(36)
            .light_altitude(25)
            .mask_enabled(true)
            .mask_top(9000)
            .mask_bottom(-9000)
            .mask_left(-16000)
            .mask_right(16000)
            .rate(50)
            .build(),
    )
}

fn advanced_chroma() -> Box<dyn Command> {
    Box::new(
        commands::AdvancedChromaProperties::builder()
            .me(0)
            .keyer(0)
            .foreground(500)
            .background(400)
            .key_edge(300)
            .spill(600)
            .flare(200)
            .brightness(-100)
            .contrast(50)
            .saturation(1200)
            .red(-30)
            .green(40)
            .blue(-50)
            .build(),
    )
}

fn color_picker() -> Box<dyn Command> {
    Box::new(
        commands::AdvancedChromaColorPicker::builder()
            .me(0)
            .keyer(1)
            .cursor(true)
            .preview(true)
            .x(-4000)
            .y(2000)
            .size(1500)
            .luma(5000)
            .cb(4200)
            .cr(6100)
            .build(),
    )
}

fn audio_input() -> Box<dyn Command> {
    Box::new(
        commands::AudioInput::builder()
            .source(2)
            .mix_option(AudioMixOption::On)
            .volume(32768)
            .balance(-2500)
            .build(),
    )
}

fn fairlight_master() -> Box<dyn Command> {
    Box::new(
        commands::FairlightMasterProperties::builder()
            .eq_enabled(true)
            .eq_gain(-200)
            .dynamics_gain(500)
            .volume(-1000)
            .follow_fade_to_black(true)
            .build(),
    )
}

fn fairlight_strip() -> Box<dyn Command> {
    Box::new(
        commands::FairlightStripProperties::builder()
            .source(1301)
            .channel(FairlightChannel::Subchannel(1))
            .delay(3)
            .gain(-600)
            .eq_enabled(true)
            .eq_gain(-300)
            .dynamics_gain(200)
            .balance(-5000)
            .volume(-1500)
            .state(2)
            .build(),
    )
}

fn multiview() -> Box<dyn Command> {
    Box::new(
        commands::MultiviewProperties::builder()
            .multiviewer(1)
            .layout(0b1100)
            .swap_program_preview(true)
            .build(),
    )
}

fn input_labels() -> Box<dyn Command> {
    Box::new(
        commands::InputProperties::builder()
            .source(1)
            .long_name("Camera 1")
            .short_name("CAM1")
            .external_port(PortType::External)
            .build()
            .expect("labels fit"),
    )
}

#[rstest]
#[case::downstream_key(
    downstream_key_gain(),
    "0f",
    vec![
        slot(1, Wire::U8, "/data/keyer"),
        slot(2, Wire::Flag, "/data/premultiplied"),
        slot(4, Wire::U16, "/data/clip"),
        slot(6, Wire::U16, "/data/gain"),
        slot(8, Wire::Flag, "/data/invert"),
    ],
    *b"DskP",
    "01 00 19 01 01f4 02bc 01 00 0000 0000 0000 0000 0000",
)]
#[case::luma_key(
    key_luma(),
    "0f",
    vec![
        slot(1, Wire::U8, "/data/me"),
        slot(2, Wire::U8, "/data/keyer"),
        slot(3, Wire::Flag, "/data/premultiplied"),
        slot(4, Wire::U16, "/data/clip"),
        slot(6, Wire::U16, "/data/gain"),
        slot(8, Wire::Flag, "/data/invert"),
    ],
    *b"KeLm",
    "00 01 01 00 00fa 0384 01 000000",
)]
#[case::wipe(
    wipe(),
    "03ff",
    vec![
        slot(2, Wire::U8, "/data/me"),
        slot(3, Wire::U8, "/data/rate"),
        slot(4, Wire::U8, "/data/pattern"),
        slot(6, Wire::U16, "/data/border_width"),
        slot(8, Wire::U16, "/data/border_source"),
        slot(10, Wire::U16, "/data/symmetry"),
        slot(12, Wire::U16, "/data/softness"),
        slot(14, Wire::U16, "/data/position_x"),
        slot(16, Wire::U16, "/data/position_y"),
        slot(18, Wire::Flag, "/data/reverse"),
        slot(19, Wire::Flag, "/data/flip_flop"),
    ],
    *b"TWpP",
    "00 1e 05 00 0064 0bb8 1388 00c8 1b58 0bb8 01 01 0000",
)]
#[case::dve_transition(
    dve_transition(),
    "0ffd",
    vec![
        slot(2, Wire::U8, "/data/me"),
        slot(3, Wire::U8, "/data/rate"),
        slot(5, Wire::U8, "/data/style"),
        slot(6, Wire::U16, "/data/fill_source"),
        slot(8, Wire::U16, "/data/key_source"),
        slot(10, Wire::Flag, "/data/key_enabled"),
        slot(11, Wire::Flag, "/data/key_premultiplied"),
        slot(12, Wire::U16, "/data/key_clip"),
        slot(14, Wire::U16, "/data/key_gain"),
        slot(16, Wire::Flag, "/data/key_invert"),
        slot(17, Wire::Flag, "/data/reverse"),
        slot(18, Wire::Flag, "/data/flip_flop"),
    ],
    *b"TDvP",
    "01 19 00 03 07d1 07d2 01 01 01f4 0320 01 01 01 000000",
)]
#[case::key_dve(
    key_dve(),
    "03ffffff",
    vec![
        slot(4, Wire::U8, "/data/me"),
        slot(5, Wire::U8, "/data/keyer"),
        slot(8, Wire::I32, "/data/size_x"),
        slot(12, Wire::I32, "/data/size_y"),
        slot(16, Wire::I32, "/data/position_x"),
        slot(20, Wire::I32, "/data/position_y"),
        slot(24, Wire::I32, "/data/rotation"),
        slot(28, Wire::Flag, "/data/border_enabled"),
        slot(29, Wire::Flag, "/data/shadow_enabled"),
        slot(30, Wire::U8, "/data/border_bevel"),
        slot(32, Wire::U16, "/data/border_outer_width"),
        slot(34, Wire::U16, "/data/border_inner_width"),
        slot(36, Wire::U8, "/data/border_outer_softness"),
        slot(37, Wire::U8, "/data/border_inner_softness"),
        slot(38, Wire::U8, "/data/border_bevel_softness"),
        slot(39, Wire::U8, "/data/border_bevel_position"),
        slot(40, Wire::U8, "/data/border_opacity"),
        slot(42, Wire::U16, "/data/border_hue"),
        slot(44, Wire::U16, "/data/border_saturation"),
        slot(46, Wire::U16, "/data/border_luma"),
        slot(48, Wire::U16, "/data/light_angle"),
        slot(50, Wire::U8, "/data/light_altitude"),
        slot(51, Wire::Flag, "/data/mask_enabled"),
        slot(52, Wire::I16, "/data/mask_top"),
        slot(54, Wire::I16, "/data/mask_bottom"),
        slot(56, Wire::I16, "/data/mask_left"),
        slot(58, Wire::I16, "/data/mask_right"),
        slot(60, Wire::U8, "/data/rate"),
    ],
    *b"KeDV",
    "00 01 0000 000001f4 000001f4 ffffe0c0 00001194 00000e10 01 01 02 00 0096 0064 \
     28 1e 14 32 50 00 0960 03e8 01f4 0024 19 01 2328 dcd8 c180 3e80 32 000000",
)]
#[case::advanced_chroma(
    advanced_chroma(),
    "07ff",
    vec![
        slot(2, Wire::U8, "/data/me"),
        slot(3, Wire::U8, "/data/keyer"),
        slot(4, Wire::U16, "/data/foreground_level"),
        slot(6, Wire::U16, "/data/background_level"),
        slot(8, Wire::U16, "/data/key_edge"),
        slot(10, Wire::U16, "/data/spill_suppression"),
        slot(12, Wire::U16, "/data/flare_suppression"),
        slot(14, Wire::I16, "/data/brightness"),
        slot(16, Wire::I16, "/data/contrast"),
        slot(18, Wire::U16, "/data/saturation"),
        slot(20, Wire::I16, "/data/red"),
        slot(22, Wire::I16, "/data/green"),
        slot(24, Wire::I16, "/data/blue"),
    ],
    *b"KACk",
    "00 00 01f4 0190 012c 0258 00c8 ff9c 0032 04b0 ffe2 0028 ffce",
)]
#[case::color_picker(
    color_picker(),
    "ff",
    vec![
        slot(1, Wire::U8, "/data/me"),
        slot(2, Wire::U8, "/data/keyer"),
        slot(3, Wire::Flag, "/data/cursor"),
        slot(4, Wire::Flag, "/data/preview"),
        slot(6, Wire::I16, "/data/x"),
        slot(8, Wire::I16, "/data/y"),
        slot(10, Wire::U16, "/data/size"),
        slot(12, Wire::U16, "/data/color/y"),
        slot(14, Wire::I16, "/data/color/cb"),
        slot(16, Wire::I16, "/data/color/cr"),
    ],
    *b"KACC",
    "00 01 01 01 f060 07d0 05dc 1388 1068 17d4",
)]
#[case::audio_input(
    audio_input(),
    "07",
    vec![
        slot(2, Wire::U16, "/data/source"),
        slot(4, Wire::MixOption, "/data/mix_option"),
        slot(6, Wire::U16, "/data/volume"),
        slot(8, Wire::I16, "/data/balance"),
    ],
    *b"AMIP",
    "0002 00 0000 00 00 01 01 00 8000 f63c 0000",
)]
#[case::fairlight_master(
    fairlight_master(),
    "1f",
    vec![
        slot(17, Wire::Flag, "/data/eq_enabled"),
        slot(6, Wire::I16, "/data/eq_gain"),
        slot(10, Wire::U16, "/data/dynamics_gain"),
        slot(12, Wire::I32, "/data/volume"),
        slot(16, Wire::Flag, "/data/follow_fade_to_black"),
    ],
    *b"FAMP",
    "00 01 00000000 ff38 0000 01f4 fffffc18 01 000000",
)]
#[case::fairlight_strip(
    fairlight_strip(),
    "01fb",
    vec![
        slot(2, Wire::U16, "/data/source"),
        slot(14, Wire::Channel, "/data/channel"),
        slot(16, Wire::U8, "/data/delay"),
        slot(20, Wire::I32, "/data/gain"),
        slot(24, Wire::Flag, "/data/eq_enabled"),
        slot(30, Wire::I16, "/data/eq_gain"),
        slot(34, Wire::U16, "/data/dynamics_gain"),
        slot(36, Wire::I16, "/data/balance"),
        slot(40, Wire::I32, "/data/volume"),
        slot(44, Wire::U8, "/data/state"),
    ],
    *b"FASP",
    "0515 000000000000000000000000 ff01 00 03 00000000 fda8 0000000000 01 00000000 fed4 0000 \
     00c8 ec78 00000000 fa24 00 02 0000",
)]
#[case::multiview(
    multiview(),
    "03",
    vec![
        slot(1, Wire::U8, "/data/multiviewer"),
        slot(2, Wire::U8, "/data/layout"),
        slot(3, Wire::Flag, "/data/swap_program_preview"),
    ],
    *b"MvPr",
    "01 0c 01 00",
)]
#[case::input_labels(
    input_labels(),
    "07",
    vec![
        slot(2, Wire::U16, "/data/source"),
        slot(4, Wire::Text(20), "/data/long_name"),
        slot(24, Wire::Text(4), "/data/short_name"),
        slot(28, Wire::Port, "/data/port_type"),
    ],
    *b"InPr",
    "0001 43616d6572612031000000000000000000000000 43414d31 01 00 00 1f 00 00 00 00 1f 03",
)]
fn every_parameter_reads_back_through_its_state_field(
    #[case] command: Box<dyn Command>,
    #[case] mask: &str,
    #[case] slots: Vec<Slot>,
    #[case] state_tag: [u8; 4],
    #[case] state: &str,
) {
    let payload = command.payload();
    assert_eq!(mask, hex::encode(&payload[..mask.len() / 2]));

    let state: String = state.split_whitespace().collect();
    let field = Field::decode(Tag::new(state_tag), &hex::decode(state).expect("valid hex"))
        .expect("state payload decodes");
    let reported = serde_json::to_value(&field).expect("fields serialize");

    for slot in slots {
        let sent = slot.wire.read(&payload[slot.offset..]);
        let Some(observed) = reported.pointer(slot.member) else {
            panic!("{} is missing from {reported}", slot.member);
        };
        let agrees = match (sent.as_f64(), observed.as_f64()) {
            (Some(sent), Some(observed)) => (sent - observed).abs() <= 1.0,
            _ => &sent == observed,
        };
        assert!(agrees, "{}: sent {sent}, reported {observed}", slot.member);
    }
}
