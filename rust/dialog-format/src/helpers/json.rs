use ipld_core::{cid::Cid, ipld::Ipld};

use crate::{
    Format, FormatError, JSON, LINK_MARKER, Path, Resolution, ipld_paths,
    ipld_paths_with_links, resolve_ipld,
};

/// Plain JSON. It has no native link type, so links are written as
/// `{"/": "<cid>"}` mappings and recognised by shape when reading.
///
/// Plain JSON cannot carry every [Ipld] value faithfully: a link reads back
/// as its marker mapping rather than as [`Ipld::Link`], and byte strings
/// cannot be written at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormat;

impl JsonFormat {
    fn to_plain(node: &Ipld) -> Result<Ipld, FormatError> {
        Ok(match node {
            Ipld::Link(cid) => Ipld::Map(
                [(LINK_MARKER.to_string(), Ipld::String(cid.to_string()))]
                    .into_iter()
                    .collect(),
            ),
            Ipld::Bytes(_) => {
                return Err(FormatError::Serialization(
                    "Plain JSON has no representation for bytes".into(),
                ));
            }
            Ipld::Map(entries) => Ipld::Map(
                entries
                    .iter()
                    .map(|(key, value)| Ok::<_, FormatError>((key.clone(), Self::to_plain(value)?)))
                    .collect::<Result<_, _>>()?,
            ),
            Ipld::List(entries) => Ipld::List(
                entries
                    .iter()
                    .map(Self::to_plain)
                    .collect::<Result<_, _>>()?,
            ),
            other => other.clone(),
        })
    }
}

impl Format for JsonFormat {
    fn code(&self) -> u64 {
        JSON
    }

    fn serialize(&self, node: &Ipld) -> Result<Vec<u8>, FormatError> {
        serde_json::to_vec(&Self::to_plain(node)?)
            .map_err(|error| FormatError::Serialization(format!("{error}")))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Ipld, FormatError> {
        serde_json::from_slice(bytes)
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
