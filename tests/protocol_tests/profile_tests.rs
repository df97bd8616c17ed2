//! Protocol Profile Tests

use vspark::protocol::{Mode, ProtocolProfile};
use vspark::VsparkError;

const ALL_MODES: [Mode; 7] = [
    Mode::Input,
    Mode::Output,
    Mode::InputPullup,
    Mode::InputPulldown,
    Mode::Analog,
    Mode::Pwm,
    Mode::Servo,
];

#[test]
fn test_standard_mode_table() {
    let p = ProtocolProfile::Standard;
    assert_eq!(p.mode_code(Mode::Input), Some(0));
    assert_eq!(p.mode_code(Mode::Output), Some(1));
    assert_eq!(p.mode_code(Mode::Analog), Some(2));
    assert_eq!(p.mode_code(Mode::Pwm), Some(3));
    assert_eq!(p.mode_code(Mode::Servo), Some(4));
    assert_eq!(p.mode_code(Mode::InputPullup), None);
    assert_eq!(p.mode_code(Mode::InputPulldown), None);
}

#[test]
fn test_legacy_mode_table() {
    let p = ProtocolProfile::Legacy;
    assert_eq!(p.mode_code(Mode::Input), Some(0));
    assert_eq!(p.mode_code(Mode::Output), Some(1));
    assert_eq!(p.mode_code(Mode::Pwm), Some(1));
    assert_eq!(p.mode_code(Mode::InputPullup), Some(2));
    assert_eq!(p.mode_code(Mode::InputPulldown), Some(3));
    assert_eq!(p.mode_code(Mode::Servo), Some(4));
    assert_eq!(p.mode_code(Mode::Analog), None);
}

#[test]
fn test_standard_codes_are_unique_and_decode_back() {
    let p = ProtocolProfile::Standard;
    for mode in ALL_MODES {
        if let Some(code) = p.mode_code(mode) {
            assert_eq!(p.mode_from_code(code), Some(mode));
        }
    }
}

#[test]
fn test_read_request_lengths() {
    assert_eq!(ProtocolProfile::Standard.read_request_len(), 2);
    assert_eq!(ProtocolProfile::Legacy.read_request_len(), 3);
    assert_eq!(ProtocolProfile::Standard.read_request_trailer(), None);
    assert_eq!(ProtocolProfile::Legacy.read_request_trailer(), Some(1));
}

#[test]
fn test_require_mode_code_error() {
    let err = ProtocolProfile::Legacy.require_mode_code(Mode::Analog).unwrap_err();
    assert!(matches!(err, VsparkError::UnsupportedMode { .. }));
    assert!(err.to_string().contains("ANALOG"));
    assert!(err.to_string().contains("legacy"));
}

#[test]
fn test_parse_profile_names() {
    assert_eq!("standard".parse::<ProtocolProfile>().unwrap(), ProtocolProfile::Standard);
    assert_eq!(" Legacy ".parse::<ProtocolProfile>().unwrap(), ProtocolProfile::Legacy);
    assert!(matches!("v3".parse::<ProtocolProfile>(), Err(VsparkError::Config(_))));
    assert_eq!(ProtocolProfile::default(), ProtocolProfile::Standard);
}

#[test]
fn test_parse_mode_names() {
    assert_eq!("input_pullup".parse::<Mode>().unwrap(), Mode::InputPullup);
    assert_eq!("SERVO".parse::<Mode>().unwrap(), Mode::Servo);
    assert_eq!("input-pulldown".parse::<Mode>().unwrap(), Mode::InputPulldown);
    assert!("BLINK".parse::<Mode>().is_err());
}
