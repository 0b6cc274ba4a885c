#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use dialog_blockstore::{MeasuredBlockStore, MemoryBlockStore};
use dialog_format::{DagCborFormat, DagJsonFormat, Ipld, JsonFormat};
use dialog_resolver::{Resolver, ResolverOptions};

pub type TestResolver = Resolver<MeasuredBlockStore<MemoryBlockStore>>;

/// A resolver over a measured in-memory store that knows dag-cbor, dag-json
/// and plain json
pub fn make_resolver() -> Result<TestResolver> {
    Ok(Resolver::new(
        MeasuredBlockStore::new(MemoryBlockStore::default()),
        ResolverOptions::default()
            .with_format(Arc::new(DagCborFormat))
            .with_format(Arc::new(DagJsonFormat))
            .with_format(Arc::new(JsonFormat)),
    )?)
}

pub fn map<const N: usize>(entries: [(&str, Ipld); N]) -> Ipld {
    Ipld::Map(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}
