use dialog_common::{CancellationToken, cancellable};
use ipld_core::cid::Cid;
use tracing::trace;

use crate::{Block, BlockStore, BlockStoreError};

/// The resolver's narrow pass-through to a [BlockStore].
///
/// Every operation may be raced against a [CancellationToken]; a fired token
/// fails the in-flight call with [BlockStoreError::Cancelled]. A missing
/// block is reported as [BlockStoreError::NotFound] rather than as an empty
/// result. Nothing is cached and nothing is buffered.
#[derive(Clone)]
pub struct NodeStore<Store>
where
    Store: BlockStore,
{
    store: Store,
}

impl<Store> NodeStore<Store>
where
    Store: BlockStore,
{
    /// Wrap a [BlockStore]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The wrapped [BlockStore]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Fetch the [Block] stored against `cid`
    pub async fn get(
        &self,
        cid: &Cid,
        cancel: Option<&CancellationToken>,
    ) -> Result<Block, BlockStoreError> {
        trace!(%cid, "Reading block");
        match cancellable(cancel, self.store.get(cid)).await?? {
            Some(bytes) => Ok(Block::new(*cid, bytes)),
            None => Err(BlockStoreError::NotFound(*cid)),
        }
    }

    /// Persist a [Block]
    pub async fn put(
        &self,
        block: Block,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), BlockStoreError> {
        trace!(cid = %block.cid(), bytes = block.bytes().len(), "Writing block");
        cancellable(cancel, self.store.put(block)).await?
    }

    /// Forget the block stored against `cid`
    pub async fn delete(
        &self,
        cid: &Cid,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), BlockStoreError> {
        trace!(%cid, "Deleting block");
        cancellable(cancel, self.store.delete(cid)).await?
    }
}
