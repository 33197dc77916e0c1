//! Serialization of descriptor components with the `serde` feature.

#![cfg(feature = "serde")]

use std::time::Duration;

use otpauth_uri::{Algorithm, CodeLength, MetadataId, OtpKind, ParsePolicy};

#[test]
fn algorithm_uses_uri_name() {
    assert_eq!(serde_json::to_string(&Algorithm::Sha256).unwrap(), "\"SHA256\"");
    let alg: Algorithm = serde_json::from_str("\"sha512\"").unwrap();
    assert_eq!(alg, Algorithm::Sha512);
}

#[test]
fn unknown_algorithm_is_rejected() {
    assert!(serde_json::from_str::<Algorithm>("\"MD5\"").is_err());
}

#[test]
fn code_length_is_a_number() {
    assert_eq!(serde_json::to_string(&CodeLength::Eight).unwrap(), "8");
    let len: CodeLength = serde_json::from_str("7").unwrap();
    assert_eq!(len, CodeLength::Seven);
    assert!(serde_json::from_str::<CodeLength>("9").is_err());
}

#[test]
fn kind_roundtrip() {
    for kind in [
        OtpKind::CounterBased { counter: 42 },
        OtpKind::TimeBased {
            timestep: Duration::from_secs(30),
        },
    ] {
        let json = serde_json::to_string(&kind).unwrap();
        let back: OtpKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn kind_is_tagged() {
    let json = serde_json::to_value(OtpKind::CounterBased { counter: 5 }).unwrap();
    assert_eq!(json["counter_based"]["counter"], 5);
}

#[test]
fn policy_is_snake_case() {
    assert_eq!(serde_json::to_string(&ParsePolicy::Strict).unwrap(), "\"strict\"");
    let policy: ParsePolicy = serde_json::from_str("\"lenient\"").unwrap();
    assert_eq!(policy, ParsePolicy::Lenient);
}

#[test]
fn metadata_id_is_a_string() {
    let id = MetadataId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
    let back: MetadataId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn foreign_id_is_rejected() {
    assert!(serde_json::from_str::<MetadataId>("\"llm_01h455vb4pex5vsknk084sn02q\"").is_err());
}
