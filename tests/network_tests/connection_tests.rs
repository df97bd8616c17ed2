//! Tests for Connection
//!
//! These tests verify:
//! - Address resolution and dial failures
//! - Exact reads, including EOF before the full frame
//! - Read deadlines surfacing as timeouts

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use vspark::{Config, Connection, Spark, VsparkError};

// =============================================================================
// Helper Functions
// =============================================================================

fn local_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    (listener, addr)
}

fn test_config(addr: &str) -> Config {
    Config::builder()
        .device_addr(addr)
        .connect_timeout_ms(1000)
        .read_timeout_ms(200)
        .build()
}

// =============================================================================
// Connect Tests
// =============================================================================

#[test]
fn test_unparseable_address() {
    let result = Connection::connect("not an address", &Config::default());
    assert!(matches!(result, Err(VsparkError::AddressResolution { .. })));
}

#[test]
fn test_refused_connection() {
    let (listener, addr) = local_listener();
    drop(listener);

    let result = Connection::connect(&addr, &test_config(&addr));
    assert!(matches!(result, Err(VsparkError::Connection { .. })));
}

#[test]
fn test_connect_reports_peer() {
    let (listener, addr) = local_listener();
    let server = thread::spawn(move || listener.accept().map(|_| ()));

    let connection = Connection::connect(&addr, &test_config(&addr)).unwrap();
    assert_eq!(connection.peer_addr(), addr);
    server.join().unwrap().unwrap();
}

// =============================================================================
// I/O Tests
// =============================================================================

#[test]
fn test_write_then_read_exactly() {
    let (listener, addr) = local_listener();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 2];
        stream.read_exact(&mut request).unwrap();
        // Reply in two pieces; the client must still see one 4-byte frame
        stream.write_all(&[0x04, request[1]]).unwrap();
        stream.flush().unwrap();
        thread::sleep(Duration::from_millis(20));
        stream.write_all(&[0x01, 0x02]).unwrap();
        request
    });

    let mut connection = Connection::connect(&addr, &test_config(&addr)).unwrap();
    connection.write(&[0x04, 10]).unwrap();
    let response = connection.read_exactly(4).unwrap();

    assert_eq!(response, vec![0x04, 10, 0x01, 0x02]);
    assert_eq!(server.join().unwrap(), [0x04, 10]);
}

#[test]
fn test_eof_before_full_frame_is_read_error() {
    let (listener, addr) = local_listener();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream.write_all(&[0x03, 1]).unwrap();
        // stream dropped: peer closes after two bytes
    });

    let mut connection = Connection::connect(&addr, &test_config(&addr)).unwrap();
    server.join().unwrap();

    assert!(matches!(connection.read_exactly(4), Err(VsparkError::Read(_))));
}

#[test]
fn test_silent_device_times_out() {
    let (listener, addr) = local_listener();
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        thread::sleep(Duration::from_millis(800));
        drop(stream);
    });

    let spark = Spark::connect(&test_config(&addr)).unwrap();
    let result = spark.analog_read("A0");

    assert!(matches!(
        result,
        Err(VsparkError::Timeout { timeout_ms: 200, expected: 4 })
    ));
    server.join().unwrap();
}

#[test]
fn test_late_reply_is_never_returned_to_next_read() {
    let (listener, addr) = local_listener();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 2];
        stream.read_exact(&mut request).unwrap();

        // Reply to the first request only after the client gave up
        thread::sleep(Duration::from_millis(400));
        stream.write_all(&[0x04, request[1], 111, 0]).unwrap();

        // Answer a follow-up request with 222, if one ever arrives
        stream.set_read_timeout(Some(Duration::from_millis(600))).unwrap();
        let mut next = [0u8; 2];
        let followed_up = stream.read_exact(&mut next).is_ok();
        if followed_up {
            stream.write_all(&[0x04, next[1], 94, 1]).unwrap();
        }
        followed_up
    });

    let spark = Spark::connect(&test_config(&addr)).unwrap();
    assert!(matches!(
        spark.analog_read("A0"),
        Err(VsparkError::Timeout { .. })
    ));

    // Let the stale reply land in the socket buffer
    thread::sleep(Duration::from_millis(500));

    assert!(matches!(spark.analog_read("A1"), Err(VsparkError::Desynced)));
    assert!(spark.is_desynced());
    drop(spark);

    assert!(!server.join().unwrap(), "no request may follow a timeout");
}
