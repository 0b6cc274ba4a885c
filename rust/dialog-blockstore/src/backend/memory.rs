use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use ipld_core::cid::Cid;
use tokio::sync::RwLock;

use crate::{Block, BlockStore, BlockStoreError};

/// A trivial implementation of [BlockStore] - backed by a [HashMap] - where
/// all blocks are kept in memory and never persisted.
#[derive(Clone, Default)]
pub struct MemoryBlockStore {
    blocks: Arc<RwLock<HashMap<Cid, Vec<u8>>>>,
}

impl MemoryBlockStore {
    /// True when a block is stored against `cid`
    pub async fn contains(&self, cid: &Cid) -> bool {
        self.blocks.read().await.contains_key(cid)
    }

    /// The number of blocks currently held
    pub async fn len(&self) -> usize {
        self.blocks.read().await.len()
    }

    /// True when no blocks are held
    pub async fn is_empty(&self) -> bool {
        self.blocks.read().await.is_empty()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl BlockStore for MemoryBlockStore {
    async fn get(&self, cid: &Cid) -> Result<Option<Vec<u8>>, BlockStoreError> {
        let blocks = self.blocks.read().await;
        Ok(blocks.get(cid).cloned())
    }

    async fn put(&self, block: Block) -> Result<(), BlockStoreError> {
        let (cid, bytes) = block.into_parts();
        let mut blocks = self.blocks.write().await;
        blocks.insert(cid, bytes);
        Ok(())
    }

    async fn delete(&self, cid: &Cid) -> Result<(), BlockStoreError> {
        let mut blocks = self.blocks.write().await;
        blocks.remove(cid);
        Ok(())
    }
}
