use ipld_core::{cid::Cid, ipld::Ipld};

use crate::{
    CidOptions, FormatError, HashAlgorithm, LinkShape, Path, compute_cid, describe_codec,
};
use dialog_common::ConditionalSync;

/// The outcome of walking a [Path] inside a single encoded node
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// The value found after consuming as much of the path as the node
    /// allows. When a link interrupts the walk, this is the link.
    pub value: Ipld,
    /// The segments the node did not consume
    pub remainder: Path,
}

/// A [Format] is a codec for one serialization scheme, registered with the
/// resolver under its multicodec [Format::code].
///
/// Implementations only ever see one node's bytes at a time. When a walk
/// through [Format::resolve] reaches a link before the path is exhausted it
/// must stop and hand the link back, together with the unconsumed segments.
pub trait Format: ConditionalSync + 'static {
    /// The multicodec code this format encodes
    fn code(&self) -> u64;

    /// A human readable name, used in diagnostics
    fn name(&self) -> String {
        describe_codec(self.code())
    }

    /// The hash used when a caller does not ask for a specific one
    fn default_hash(&self) -> HashAlgorithm {
        HashAlgorithm::Sha2_256
    }

    /// Encode a node
    fn serialize(&self, node: &Ipld) -> Result<Vec<u8>, FormatError>;

    /// Decode a node
    fn deserialize(&self, bytes: &[u8]) -> Result<Ipld, FormatError>;

    /// Derive the [Cid] of already-encoded bytes
    fn cid(&self, bytes: &[u8], options: &CidOptions) -> Result<Cid, FormatError> {
        compute_cid(
            self.code(),
            bytes,
            options.hash.unwrap_or_else(|| self.default_hash()),
            options.version,
        )
    }

    /// Walk `path` inside the encoded node
    fn resolve(&self, bytes: &[u8], path: &Path) -> Result<Resolution, FormatError>;

    /// Every path that can be resolved inside the encoded node without
    /// crossing a link
    fn tree(&self, bytes: &[u8]) -> Result<Vec<String>, FormatError>;

    /// The paths of [Format::tree], each paired with the link found there,
    /// if any.
    ///
    /// The provided implementation calls [Format::resolve] once per listed
    /// path, so a format that decodes the whole node on every call pays for
    /// that decode per path. Such formats should override this to decode
    /// once. A listed path that the format cannot resolve carries no link.
    fn tree_with_links(&self, bytes: &[u8]) -> Result<Vec<(String, Option<Cid>)>, FormatError> {
        self.tree(bytes)?
            .into_iter()
            .map(|path| {
                let link = match self.resolve(bytes, &Path::parse(&path)) {
                    Ok(Resolution { value, .. }) => LinkShape::classify(&value).cid(),
                    Err(FormatError::PathNotFound(_)) => None,
                    Err(error) => return Err(error),
                };
                Ok((path, link))
            })
            .collect()
    }
}

impl std::fmt::Debug for dyn Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Format")
            .field("code", &self.code())
            .field("name", &self.name())
            .finish()
    }
}
