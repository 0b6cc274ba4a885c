use std::{fmt::Display, str::FromStr};

use ipld_core::cid::{Cid, Version, multihash::Multihash};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::{DAG_PB, FormatError};

/// The hash functions a [crate::Format] may use when deriving a [Cid]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA2-256 (multihash `0x12`)
    #[serde(rename = "sha2-256")]
    Sha2_256,
    /// SHA2-512 (multihash `0x13`)
    #[serde(rename = "sha2-512")]
    Sha2_512,
    /// BLAKE3 with a 32 byte digest (multihash `0x1e`)
    #[serde(rename = "blake3")]
    Blake3,
}

impl HashAlgorithm {
    /// The multihash code of this algorithm
    pub const fn code(&self) -> u64 {
        match self {
            HashAlgorithm::Sha2_256 => 0x12,
            HashAlgorithm::Sha2_512 => 0x13,
            HashAlgorithm::Blake3 => 0x1e,
        }
    }

    /// The multihash name of this algorithm
    pub const fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha2_256 => "sha2-256",
            HashAlgorithm::Sha2_512 => "sha2-512",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// Look up an algorithm by its multihash code
    pub fn from_code(code: u64) -> Option<Self> {
        [Self::Sha2_256, Self::Sha2_512, Self::Blake3]
            .into_iter()
            .find(|algorithm| algorithm.code() == code)
    }

    /// Hash `bytes` and wrap the digest as a [Multihash]
    pub fn digest(&self, bytes: &[u8]) -> Result<Multihash<64>, FormatError> {
        let wrapped = match self {
            HashAlgorithm::Sha2_256 => Multihash::wrap(self.code(), &Sha256::digest(bytes)),
            HashAlgorithm::Sha2_512 => Multihash::wrap(self.code(), &Sha512::digest(bytes)),
            HashAlgorithm::Blake3 => Multihash::wrap(self.code(), blake3::hash(bytes).as_bytes()),
        };
        wrapped.map_err(|error| FormatError::InvalidArgument(format!("{error}")))
    }
}

impl Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = FormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [Self::Sha2_256, Self::Sha2_512, Self::Blake3]
            .into_iter()
            .find(|algorithm| algorithm.name() == name)
            .ok_or_else(|| FormatError::InvalidArgument(format!("Unknown hash algorithm '{name}'")))
    }
}

/// The CID version to produce when storing a node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum CidVersion {
    /// Legacy base58 CIDs; only expressible for `dag-pb` with `sha2-256`
    V0,
    /// Self-describing CIDs carrying the format code
    #[default]
    V1,
}

impl TryFrom<u64> for CidVersion {
    type Error = FormatError;

    fn try_from(version: u64) -> Result<Self, Self::Error> {
        match version {
            0 => Ok(CidVersion::V0),
            1 => Ok(CidVersion::V1),
            other => Err(FormatError::InvalidArgument(format!(
                "Unsupported CID version {other}"
            ))),
        }
    }
}

impl From<CidVersion> for u64 {
    fn from(version: CidVersion) -> Self {
        match version {
            CidVersion::V0 => 0,
            CidVersion::V1 => 1,
        }
    }
}

impl From<CidVersion> for Version {
    fn from(version: CidVersion) -> Self {
        match version {
            CidVersion::V0 => Version::V0,
            CidVersion::V1 => Version::V1,
        }
    }
}

/// Options that steer [crate::Format::cid]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CidOptions {
    /// The hash to use; the format's default when absent
    pub hash: Option<HashAlgorithm>,
    /// The CID version to produce
    pub version: CidVersion,
}

/// Derive the [Cid] of `bytes` encoded with the format identified by `codec`
pub fn compute_cid(
    codec: u64,
    bytes: &[u8],
    hash: HashAlgorithm,
    version: CidVersion,
) -> Result<Cid, FormatError> {
    let digest = hash.digest(bytes)?;

    match version {
        CidVersion::V1 => Ok(Cid::new_v1(codec, digest)),
        CidVersion::V0 => {
            if codec != DAG_PB {
                return Err(FormatError::InvalidArgument(format!(
                    "CIDv0 can only address dag-pb nodes (got codec 0x{codec:x})"
                )));
            }
            Cid::new_v0(digest).map_err(|error| FormatError::InvalidArgument(format!("{error}")))
        }
    }
}
