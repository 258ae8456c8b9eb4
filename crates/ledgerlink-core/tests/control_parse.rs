#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use ledgerlink_core::control::SubscriberUpdate;

#[test]
fn send_verb_parses_as_add() {
    let update = SubscriberUpdate::parse(b"Send:https://example.com/hook").expect("valid payload");
    assert_eq!(
        update,
        SubscriberUpdate::Add {
            url: "https://example.com/hook".to_string()
        }
    );
}

#[test]
fn stop_verb_parses_as_remove() {
    let update = SubscriberUpdate::parse(b"Stop:http://example.com/hook").expect("valid payload");
    assert_eq!(
        update,
        SubscriberUpdate::Remove {
            url: "http://example.com/hook".to_string()
        }
    );
}

#[test]
fn urls_with_ports_and_paths_survive_intact() {
    // The URL itself contains colons; only the first one separates the verb.
    let update =
        SubscriberUpdate::parse(b"Send:http://10.0.0.7:3000/sensors/data").expect("valid payload");
    assert_eq!(update.url(), "http://10.0.0.7:3000/sensors/data");
}

#[test]
fn surrounding_whitespace_is_trimmed_from_the_url() {
    let update = SubscriberUpdate::parse(b"Send: http://example.com/hook ").expect("valid payload");
    assert_eq!(update.url(), "http://example.com/hook");
}

#[test]
fn unknown_verb_is_a_decode_error() {
    let err = SubscriberUpdate::parse(b"Drop:http://example.com").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "DECODE");
}

#[test]
fn payload_without_a_colon_is_a_decode_error() {
    let err = SubscriberUpdate::parse(b"just-some-text").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "DECODE");
}

#[test]
fn empty_url_is_a_decode_error() {
    let err = SubscriberUpdate::parse(b"Send:").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "DECODE");
    let err = SubscriberUpdate::parse(b"Send:   ").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "DECODE");
}

#[test]
fn non_http_schemes_are_rejected() {
    let err = SubscriberUpdate::parse(b"Send:ftp://example.com/drop").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "DECODE");
}

#[test]
fn non_utf8_payload_is_a_decode_error() {
    let err = SubscriberUpdate::parse(&[0x53, 0x65, 0x6e, 0x64, 0x3a, 0xff, 0xfe])
        .expect_err("must fail");
    assert_eq!(err.kind().as_str(), "DECODE");
}
