#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use ledgerlink_core::event::{decode_event, encode_event};

#[test]
fn decode_recovers_name_and_payload() {
    let frame = r#"{"eventName":"SensorEvent","payload":"aGVsbG8="}"#;
    let event = decode_event(frame).expect("valid frame");
    assert_eq!(event.name, "SensorEvent");
    assert_eq!(event.payload.as_ref(), b"hello");
}

#[test]
fn encode_then_decode_round_trips() {
    let frame = encode_event("StationControl", b"Send:http://example.com").expect("encodable");
    let event = decode_event(&frame).expect("valid frame");
    assert_eq!(event.name, "StationControl");
    assert_eq!(event.payload.as_ref(), b"Send:http://example.com");
}

#[test]
fn empty_payload_decodes_to_empty_bytes() {
    let frame = r#"{"eventName":"Ping","payload":""}"#;
    let event = decode_event(frame).expect("valid frame");
    assert!(event.payload.is_empty());
}

#[test]
fn malformed_base64_payload_is_a_decode_error() {
    let frame = r#"{"eventName":"SensorEvent","payload":"!!!not-base64!!!"}"#;
    let err = decode_event(frame).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "DECODE");
}

#[test]
fn unknown_envelope_fields_are_rejected() {
    let frame = r#"{"eventName":"SensorEvent","payload":"","txId":"abc"}"#;
    let err = decode_event(frame).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "DECODE");
}

#[test]
fn missing_fields_are_a_decode_error() {
    let err = decode_event(r#"{"eventName":"SensorEvent"}"#).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "DECODE");
    let err = decode_event("not json at all").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "DECODE");
}
