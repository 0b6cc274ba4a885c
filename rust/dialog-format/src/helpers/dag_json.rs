use ipld_core::{cid::Cid, ipld::Ipld};

use crate::{
    DAG_JSON, Format, FormatError, Path, Resolution, ipld_paths, ipld_paths_with_links,
    resolve_ipld,
};

/// The `dag-json` format, backed by `serde_ipld_dagjson`
#[derive(Clone, Copy, Debug, Default)]
pub struct DagJsonFormat;

impl Format for DagJsonFormat {
    fn code(&self) -> u64 {
        DAG_JSON
    }

    fn serialize(&self, node: &Ipld) -> Result<Vec<u8>, FormatError> {
        serde_ipld_dagjson::to_vec(node)
            .map_err(|error| FormatError::Serialization(format!("{error}")))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Ipld, FormatError> {
        serde_ipld_dagjson::from_slice(bytes)
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
