#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::Path;

use ledgerlink_gateway::ConnectionProfile;

const VALID: &str = r#"
{
  "name": "test-net-org1",
  "version": "1.0.0",
  "client": { "organization": "Org1" },
  "organizations": {
    "Org1": {
      "mspid": "Org1MSP",
      "peers": ["peer0.org1"],
      "certificateAuthorities": ["ca.org1"]
    }
  },
  "peers": {
    "peer0.org1": { "url": "http://localhost:7051" }
  },
  "certificateAuthorities": {
    "ca.org1": { "url": "http://localhost:7054", "caName": "ca-org1" }
  }
}
"#;

#[test]
fn valid_profile_resolves_endpoints() {
    let profile = ConnectionProfile::load_from_str(VALID).expect("valid profile");
    assert_eq!(profile.name, "test-net-org1");
    assert_eq!(profile.msp_id().unwrap(), "Org1MSP");
    assert_eq!(profile.gateway_url().unwrap(), "http://localhost:7051");
    assert_eq!(profile.events_url().unwrap(), "ws://localhost:7051");
    let ca = profile.ca(None).expect("org lists a ca");
    assert_eq!(ca.url, "http://localhost:7054");
    assert_eq!(ca.ca_name.as_deref(), Some("ca-org1"));
    let named = profile.ca(Some("ca.org1")).expect("ca by key");
    assert_eq!(named.url, "http://localhost:7054");
}

#[test]
fn https_peer_swaps_to_wss() {
    let json = VALID.replace("http://localhost:7051", "https://peers.example.com:7051");
    let profile = ConnectionProfile::load_from_str(&json).expect("valid profile");
    assert_eq!(
        profile.events_url().unwrap(),
        "wss://peers.example.com:7051"
    );
}

#[test]
fn unknown_field_is_rejected() {
    let json = VALID.replace(
        r#""name": "test-net-org1","#,
        r#""name": "test-net-org1", "extra": true,"#,
    );
    let err = ConnectionProfile::load_from_str(&json).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn client_organization_must_exist() {
    let json = VALID.replace(r#""organization": "Org1""#, r#""organization": "Org9""#);
    let err = ConnectionProfile::load_from_str(&json).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn organization_without_peers_is_rejected() {
    let json = VALID.replace(r#""peers": ["peer0.org1"],"#, r#""peers": [],"#);
    let err = ConnectionProfile::load_from_str(&json).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn dangling_peer_reference_is_rejected() {
    let json = VALID.replace(r#""peers": ["peer0.org1"],"#, r#""peers": ["peer9.org1"],"#);
    let err = ConnectionProfile::load_from_str(&json).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn dangling_ca_reference_is_rejected() {
    let json = VALID.replace(
        r#""certificateAuthorities": ["ca.org1"]"#,
        r#""certificateAuthorities": ["ca.org9"]"#,
    );
    let err = ConnectionProfile::load_from_str(&json).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn non_http_peer_url_is_rejected() {
    let json = VALID.replace("http://localhost:7051", "grpc://localhost:7051");
    let err = ConnectionProfile::load_from_str(&json).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn unknown_ca_lookup_is_a_config_error() {
    let profile = ConnectionProfile::load_from_str(VALID).expect("valid profile");
    let err = profile.ca(Some("ca.org9")).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn default_ca_requires_a_listed_ca() {
    let json = VALID.replace(
        r#""certificateAuthorities": ["ca.org1"]"#,
        r#""certificateAuthorities": []"#,
    );
    let profile = ConnectionProfile::load_from_str(&json).expect("still a valid profile");
    let err = profile.ca(None).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn missing_profile_file_is_a_config_error() {
    let err = ConnectionProfile::load_from_file(Path::new("/nonexistent/connection.json"))
        .expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
    assert!(err.to_string().contains("/nonexistent/connection.json"));
}

#[test]
fn garbage_json_is_a_config_error() {
    let err = ConnectionProfile::load_from_str("version: 1").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}
