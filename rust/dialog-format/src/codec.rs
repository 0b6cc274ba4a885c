//! Multicodec codes for the formats the resolver is most likely to meet.
//!
//! Only the name lookup matters to the resolver; the codes themselves are
//! opaque keys into the format registry.

/// Raw binary
pub const RAW: u64 = 0x55;
/// CBOR (without IPLD link tagging)
pub const CBOR: u64 = 0x51;
/// MerkleDAG protobuf
pub const DAG_PB: u64 = 0x70;
/// MerkleDAG CBOR
pub const DAG_CBOR: u64 = 0x71;
/// Libp2p public key
pub const LIBP2P_KEY: u64 = 0x72;
/// Raw git object
pub const GIT_RAW: u64 = 0x78;
/// MerkleDAG JOSE
pub const DAG_JOSE: u64 = 0x85;
/// MerkleDAG COSE
pub const DAG_COSE: u64 = 0x86;
/// MerkleDAG JSON
pub const DAG_JSON: u64 = 0x0129;
/// JSON (links spelled as `{"/": "<cid>"}` mappings)
pub const JSON: u64 = 0x0200;

const NAMES: &[(u64, &str)] = &[
    (RAW, "raw"),
    (CBOR, "cbor"),
    (DAG_PB, "dag-pb"),
    (DAG_CBOR, "dag-cbor"),
    (LIBP2P_KEY, "libp2p-key"),
    (GIT_RAW, "git-raw"),
    (DAG_JOSE, "dag-jose"),
    (DAG_COSE, "dag-cose"),
    (DAG_JSON, "dag-json"),
    (JSON, "json"),
];

/// The multicodec name for `code`, if it is one we know about
pub fn codec_name(code: u64) -> Option<&'static str> {
    NAMES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
}

/// A human readable label for `code`: its multicodec name when known,
/// otherwise the code in hex
pub fn describe_codec(code: u64) -> String {
    match codec_name(code) {
        Some(name) => name.to_string(),
        None => format!("0x{code:x}"),
    }
}
