use std::sync::Arc;

use dialog_common::CancellationToken;
use dialog_format::{CidOptions, CidVersion, Format, HashAlgorithm};
use serde::{Deserialize, Serialize};

use crate::FormatLoader;

/// Construction-time configuration of a [crate::Resolver]
#[derive(Clone, Default)]
pub struct ResolverOptions {
    /// Formats registered before the resolver handles any request. These
    /// never trigger the loader.
    pub formats: Vec<Arc<dyn Format>>,
    /// Consulted for any format code that has not been registered
    pub loader: Option<Arc<dyn FormatLoader>>,
}

impl ResolverOptions {
    /// Add a format to register up front
    pub fn with_format(mut self, format: Arc<dyn Format>) -> Self {
        self.formats.push(format);
        self
    }

    /// Set the loader used for formats that are not registered
    pub fn with_loader(mut self, loader: Arc<dyn FormatLoader>) -> Self {
        self.loader = Some(loader);
        self
    }
}

impl std::fmt::Debug for ResolverOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverOptions")
            .field("formats", &self.formats)
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

/// Options for [crate::Resolver::put] and [crate::Resolver::put_many]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PutOptions {
    /// The hash to derive CIDs with; the format's default when absent
    pub hash: Option<HashAlgorithm>,
    /// The CID version to produce; version 1 when absent
    pub cid_version: Option<CidVersion>,
    /// Compute the CID without writing anything to the store
    pub only_hash: bool,
    /// Abandons the store write when fired
    #[serde(skip)]
    pub cancel: Option<CancellationToken>,
}

impl PutOptions {
    /// The [CidOptions] these options imply
    pub fn cid_options(&self) -> CidOptions {
        CidOptions {
            hash: self.hash,
            version: self.cid_version.unwrap_or_default(),
        }
    }
}

/// Options for [crate::Resolver::tree]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// Follow links and enumerate the linked nodes as well
    pub recursive: bool,
    /// Abandons the enumeration at the next block fetch when fired
    #[serde(skip)]
    pub cancel: Option<CancellationToken>,
}
