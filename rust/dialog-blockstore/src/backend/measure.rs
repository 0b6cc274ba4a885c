use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use ipld_core::cid::Cid;

use crate::{Block, BlockStore, BlockStoreError};

/// A [MeasuredBlockStore] acts as a proxy over a [BlockStore] implementation
/// that counts reads, writes and deletes. Counters are shared between clones.
#[derive(Clone)]
pub struct MeasuredBlockStore<Store>
where
    Store: BlockStore,
{
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    deletes: Arc<AtomicUsize>,
    store: Store,
}

impl<Store> MeasuredBlockStore<Store>
where
    Store: BlockStore,
{
    /// Wrap the provided [BlockStore] so that traffic to it may be measured
    pub fn new(store: Store) -> Self {
        Self {
            reads: Arc::new(AtomicUsize::default()),
            writes: Arc::new(AtomicUsize::default()),
            deletes: Arc::new(AtomicUsize::default()),
            store,
        }
    }

    /// The aggregate number of reads from the wrapped [BlockStore]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// The aggregate number of writes to the wrapped [BlockStore]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// The aggregate number of deletes against the wrapped [BlockStore]
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::Relaxed)
    }

    /// The wrapped [BlockStore]
    pub fn inner(&self) -> &Store {
        &self.store
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<Store> BlockStore for MeasuredBlockStore<Store>
where
    Store: BlockStore,
{
    async fn get(&self, cid: &Cid) -> Result<Option<Vec<u8>>, BlockStoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.store.get(cid).await
    }

    async fn put(&self, block: Block) -> Result<(), BlockStoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.store.put(block).await
    }

    async fn delete(&self, cid: &Cid) -> Result<(), BlockStoreError> {
        self.deletes.fetch_add(1, Ordering::Relaxed);
        self.store.delete(cid).await
    }
}
