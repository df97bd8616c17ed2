//! Codec Tests
//!
//! Tests for command frame encoding/decoding and read response decoding.

use std::io::Cursor;
use vspark::pins::PinCode;
use vspark::protocol::{
    Command, Level, Mode, OpCode, ProtocolProfile, SampleKind,
    encode, encode_command, decode_command,
    encode_read_response, decode_read_response,
    read_command, read_response, write_frame,
};
use vspark::VsparkError;

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_digital_write_frame() {
    let frame = encode(OpCode::DigitalWrite, PinCode::new(3), Some(1));
    assert_eq!(frame.as_bytes(), &[0x01, 3, 1]);
}

#[test]
fn test_encode_without_payload() {
    let frame = encode(OpCode::AnalogRead, PinCode::new(12), None);
    assert_eq!(frame.as_bytes(), &[0x04, 12]);
    assert_eq!(frame.opcode(), Some(OpCode::AnalogRead));
}

#[test]
fn test_encode_every_command_standard() {
    let pin = PinCode::new(10);
    let cases = [
        (Command::SetMode { pin, mode: Mode::Servo }, vec![0x00, 10, 4]),
        (Command::DigitalWrite { pin, level: Level::Low }, vec![0x01, 10, 0]),
        (Command::AnalogWrite { pin, value: 200 }, vec![0x02, 10, 200]),
        (Command::DigitalRead { pin }, vec![0x03, 10]),
        (Command::AnalogRead { pin }, vec![0x04, 10]),
        (Command::AlwaysSend { pin, kind: SampleKind::Analog }, vec![0x05, 10, 2]),
        (Command::ServoWrite { pin, degrees: 90 }, vec![0x41, 10, 90]),
    ];

    for (command, expected) in cases {
        let frame = encode_command(&command, ProtocolProfile::Standard).unwrap();
        assert_eq!(frame.as_bytes(), expected.as_slice(), "{:?}", command);
    }
}

#[test]
fn test_legacy_read_requests_carry_trailer() {
    let pin = PinCode::new(2);
    let digital = encode_command(&Command::DigitalRead { pin }, ProtocolProfile::Legacy).unwrap();
    let analog = encode_command(&Command::AnalogRead { pin }, ProtocolProfile::Legacy).unwrap();

    assert_eq!(digital.as_bytes(), &[0x03, 2, 1]);
    assert_eq!(analog.as_bytes(), &[0x04, 2, 1]);
}

#[test]
fn test_unsupported_mode_is_not_encoded() {
    let command = Command::SetMode { pin: PinCode::new(1), mode: Mode::InputPullup };
    let result = encode_command(&command, ProtocolProfile::Standard);

    assert!(matches!(result, Err(VsparkError::UnsupportedMode { .. })));
}

// =============================================================================
// Command Decoding Tests
// =============================================================================

#[test]
fn test_decode_recovers_encoded_commands() {
    let pin = PinCode::new(5);
    let commands = [
        Command::SetMode { pin, mode: Mode::Analog },
        Command::DigitalWrite { pin, level: Level::High },
        Command::DigitalRead { pin },
        Command::AlwaysSend { pin, kind: SampleKind::Digital },
    ];

    for command in commands {
        let frame = encode_command(&command, ProtocolProfile::Standard).unwrap();
        let decoded = decode_command(frame.as_bytes(), ProtocolProfile::Standard).unwrap();
        assert_eq!(decoded, command);
    }
}

#[test]
fn test_decode_legacy_pwm_reads_back_as_output() {
    let command = Command::SetMode { pin: PinCode::new(0), mode: Mode::Pwm };
    let frame = encode_command(&command, ProtocolProfile::Legacy).unwrap();
    assert_eq!(frame.as_bytes(), &[0x00, 0, 1]);

    let decoded = decode_command(frame.as_bytes(), ProtocolProfile::Legacy).unwrap();
    assert_eq!(decoded, Command::SetMode { pin: PinCode::new(0), mode: Mode::Output });
}

#[test]
fn test_decode_unknown_opcode() {
    let result = decode_command(&[0x7E, 1, 1], ProtocolProfile::Standard);
    assert!(matches!(result, Err(VsparkError::ProtocolDecode(_))));
}

#[test]
fn test_decode_wrong_length() {
    assert!(decode_command(&[], ProtocolProfile::Standard).is_err());
    assert!(decode_command(&[0x01, 3], ProtocolProfile::Standard).is_err());
    assert!(decode_command(&[0x03, 3, 1], ProtocolProfile::Standard).is_err());
    assert!(decode_command(&[0x03, 3], ProtocolProfile::Legacy).is_err());
}

#[test]
fn test_decode_unknown_mode_code() {
    let result = decode_command(&[0x00, 3, 9], ProtocolProfile::Standard);
    assert!(matches!(result, Err(VsparkError::ProtocolDecode(_))));
}

// =============================================================================
// Read Response Tests
// =============================================================================

#[test]
fn test_decode_value_uses_seven_bit_shift() {
    for lsb in 0u8..=127 {
        for msb in 0u8..=127 {
            let response = decode_read_response(&[0x04, 10, lsb, msb]).unwrap();
            assert_eq!(response.value(), u16::from(lsb) | (u16::from(msb) << 7));
        }
    }
}

#[test]
fn test_decode_known_value() {
    // 0x7F | 0x07 << 7 = 127 + 896
    let response = decode_read_response(&[0x04, 10, 0x7F, 0x07]).unwrap();
    assert_eq!(response.value(), 1023);
    assert_eq!(response.action, 0x04);
    assert_eq!(response.pin, PinCode::new(10));
}

#[test]
fn test_decode_response_wrong_length() {
    let cases: [&[u8]; 3] = [&[], &[0x03, 1, 0], &[0x03, 1, 0, 0, 0]];
    for bytes in cases {
        assert!(matches!(
            decode_read_response(bytes),
            Err(VsparkError::ProtocolDecode(_))
        ));
    }
}

#[test]
fn test_encode_response_splits_seven_bit_halves() {
    assert_eq!(encode_read_response(0x03, PinCode::new(7), 1), [0x03, 7, 1, 0]);
    assert_eq!(encode_read_response(0x04, PinCode::new(14), 4095), [0x04, 14, 0x7F, 0x1F]);
}

#[test]
fn test_read_request_and_synthetic_response() {
    let pin = PinCode::new(13);
    let request = encode_command(&Command::AnalogRead { pin }, ProtocolProfile::Standard).unwrap();
    assert_eq!(request.as_bytes(), &[0x04, 13]);

    let (lsb, msb) = (0x25u8, 0x11u8);
    let response = decode_read_response(&[0x04, 13, lsb, msb]).unwrap();
    assert_eq!(response.value(), 0x25 + 0x11 * 128);
}

// =============================================================================
// Stream Helper Tests
// =============================================================================

#[test]
fn test_read_commands_from_stream() {
    let mut stream = Cursor::new(vec![0x00, 7, 1, 0x03, 7, 0x41, 0, 45]);

    let first = read_command(&mut stream, ProtocolProfile::Standard).unwrap();
    let second = read_command(&mut stream, ProtocolProfile::Standard).unwrap();
    let third = read_command(&mut stream, ProtocolProfile::Standard).unwrap();

    assert_eq!(first, Command::SetMode { pin: PinCode::new(7), mode: Mode::Output });
    assert_eq!(second, Command::DigitalRead { pin: PinCode::new(7) });
    assert_eq!(third, Command::ServoWrite { pin: PinCode::new(0), degrees: 45 });

    assert!(matches!(
        read_command(&mut stream, ProtocolProfile::Standard),
        Err(VsparkError::Read(_))
    ));
}

#[test]
fn test_read_response_from_stream() {
    let mut stream = Cursor::new(vec![0x03, 2, 1, 0]);
    let response = read_response(&mut stream).unwrap();
    assert_eq!(response.value(), 1);
}

#[test]
fn test_read_response_short_stream() {
    let mut stream = Cursor::new(vec![0x03, 2]);
    assert!(matches!(read_response(&mut stream), Err(VsparkError::Read(_))));
}

#[test]
fn test_write_frame() {
    let mut out = Vec::new();
    let frame = encode(OpCode::ServoWrite, PinCode::new(1), Some(180));
    write_frame(&mut out, frame.as_bytes()).unwrap();
    assert_eq!(out, vec![0x41, 1, 180]);
}
