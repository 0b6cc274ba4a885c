use std::sync::Arc;

use async_stream::try_stream;
use dialog_blockstore::{Block, BlockStore, NodeStore};
use dialog_common::CancellationToken;
use dialog_format::{Cid, CidVersion, DAG_PB, Format, HashAlgorithm, Ipld};
use futures_core::Stream;
use tracing::trace;

use crate::{FormatRegistry, PutOptions, ResolverError, ResolverOptions};

/// Resolves paths through, enumerates, reads and writes a content-addressed
/// DAG whose nodes may be encoded in any registered [Format].
///
/// The [FormatRegistry] is the only state shared between calls. Reads are
/// never cached and writes are never buffered; every call is a fresh round
/// trip to the [BlockStore].
pub struct Resolver<Store>
where
    Store: BlockStore,
{
    pub(crate) registry: FormatRegistry,
    pub(crate) store: NodeStore<Store>,
}

impl<Store> Resolver<Store>
where
    Store: BlockStore,
{
    /// Assemble a resolver over `store`, registering the formats in
    /// `options`. Two formats sharing a code is an error.
    pub fn new(store: Store, options: ResolverOptions) -> Result<Self, ResolverError> {
        Ok(Self {
            registry: FormatRegistry::new(options.formats, options.loader)?,
            store: NodeStore::new(store),
        })
    }

    /// The [FormatRegistry] of this resolver
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// The [BlockStore] this resolver reads from and writes to
    pub fn store(&self) -> &Store {
        self.store.store()
    }

    /// Register a [Format]; fails if its code is already taken
    pub fn add_format(&self, format: Arc<dyn Format>) -> Result<(), ResolverError> {
        self.registry.add(format)
    }

    /// Unregister the format for `code`, if there is one
    pub fn remove_format(&self, code: u64) {
        self.registry.remove(code)
    }

    /// Fetch and decode the node identified by `cid`
    pub async fn get(
        &self,
        cid: &Cid,
        cancel: Option<&CancellationToken>,
    ) -> Result<Ipld, ResolverError> {
        let block = self.store.get(cid, cancel).await?;
        let format = self.registry.get(cid.codec(), cancel).await?;
        Ok(format.deserialize(block.bytes())?)
    }

    /// Lazily [Resolver::get] each of `cids`, in order. A failure is reported
    /// as the element that caused it and is not retried.
    pub fn get_many<'a, Cids>(
        &'a self,
        cids: Cids,
        cancel: Option<CancellationToken>,
    ) -> impl Stream<Item = Result<Ipld, ResolverError>> + 'a
    where
        Cids: IntoIterator<Item = Cid> + 'a,
    {
        try_stream! {
            for cid in cids {
                let node = self.get(&cid, cancel.as_ref()).await?;
                yield node;
            }
        }
    }

    /// Encode `node` with the format registered for `codec`, derive its
    /// [Cid] and (unless [PutOptions::only_hash] is set) store it.
    pub async fn put(
        &self,
        node: &Ipld,
        codec: u64,
        options: &PutOptions,
    ) -> Result<Cid, ResolverError> {
        validate_cid_options(codec, options)?;
        let format = self.registry.get(codec, options.cancel.as_ref()).await?;
        self.put_with(format.as_ref(), node, options).await
    }

    /// Lazily [Resolver::put] each of `nodes`, in order, yielding their
    /// [Cid]s. The format is looked up once, when the first element is
    /// requested.
    pub fn put_many<'a, Nodes>(
        &'a self,
        nodes: Nodes,
        codec: u64,
        options: PutOptions,
    ) -> impl Stream<Item = Result<Cid, ResolverError>> + 'a
    where
        Nodes: IntoIterator<Item = Ipld> + 'a,
    {
        try_stream! {
            validate_cid_options(codec, &options)?;
            let format = self.registry.get(codec, options.cancel.as_ref()).await?;

            for node in nodes {
                let cid = self.put_with(format.as_ref(), &node, &options).await?;
                yield cid;
            }
        }
    }

    /// Delete the block identified by `cid`
    pub async fn remove(
        &self,
        cid: &Cid,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), ResolverError> {
        Ok(self.store.delete(cid, cancel).await?)
    }

    /// Delete each of `cids`, in order. This is not atomic: when one
    /// deletion fails, the ones before it stay applied.
    pub async fn remove_many<Cids>(
        &self,
        cids: Cids,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), ResolverError>
    where
        Cids: IntoIterator<Item = Cid>,
    {
        for cid in cids {
            self.remove(&cid, cancel).await?;
        }
        Ok(())
    }

    async fn put_with(
        &self,
        format: &dyn Format,
        node: &Ipld,
        options: &PutOptions,
    ) -> Result<Cid, ResolverError> {
        let bytes = format.serialize(node)?;
        let cid = format.cid(&bytes, &options.cid_options())?;

        if options.only_hash {
            trace!(%cid, "Hashed node without storing it");
            return Ok(cid);
        }

        self.store
            .put(Block::new(cid, bytes), options.cancel.as_ref())
            .await?;
        Ok(cid)
    }
}

/// Reject CID version and hash combinations that can never succeed, before
/// any format is loaded
fn validate_cid_options(codec: u64, options: &PutOptions) -> Result<(), ResolverError> {
    if options.cid_version != Some(CidVersion::V0) {
        return Ok(());
    }
    if codec != DAG_PB {
        return Err(ResolverError::InvalidArgument(format!(
            "CIDv0 can only address dag-pb nodes (got codec 0x{codec:x})"
        )));
    }
    if matches!(options.hash, Some(hash) if hash != HashAlgorithm::Sha2_256) {
        return Err(ResolverError::InvalidArgument(
            "CIDv0 can only be derived with sha2-256".into(),
        ));
    }
    Ok(())
}

impl<Store> std::fmt::Debug for Resolver<Store>
where
    Store: BlockStore,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
