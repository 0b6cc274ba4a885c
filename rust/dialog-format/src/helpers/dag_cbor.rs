use ipld_core::{cid::Cid, ipld::Ipld};

use crate::{
    DAG_CBOR, Format, FormatError, Path, Resolution, ipld_paths, ipld_paths_with_links,
    resolve_ipld,
};

/// The `dag-cbor` format, backed by `serde_ipld_dagcbor`
#[derive(Clone, Copy, Debug, Default)]
pub struct DagCborFormat;

impl Format for DagCborFormat {
    fn code(&self) -> u64 {
        DAG_CBOR
    }

    fn serialize(&self, node: &Ipld) -> Result<Vec<u8>, FormatError> {
        serde_ipld_dagcbor::to_vec(node)
            .map_err(|error| FormatError::Serialization(format!("{error}")))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Ipld, FormatError> {
        serde_ipld_dagcbor::from_slice(bytes)
            .map_err(|error| FormatError::Deserialization(format!("{error}")))
    }

    fn resolve(&self, bytes: &[u8], path: &Path) -> Result<Resolution, FormatError> {
        resolve_ipld(self.deserialize(bytes)?, path)
    }

    fn tree(&self, bytes: &[u8]) -> Result<Vec<String>, FormatError> {
        Ok(ipld_paths(&self.deserialize(bytes)?))
    }

    fn tree_with_links(&self, bytes: &[u8]) -> Result<Vec<(String, Option<Cid>)>, FormatError> {
        Ok(ipld_paths_with_links(&self.deserialize(bytes)?))
    }
}
