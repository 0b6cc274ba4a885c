use async_trait::async_trait;
use dialog_common::ConditionalSync;
use ipld_core::cid::Cid;

use crate::{Block, BlockStoreError};

mod memory;
pub use memory::*;

mod measure;
pub use measure::*;

#[cfg(not(target_arch = "wasm32"))]
mod fs;
#[cfg(not(target_arch = "wasm32"))]
pub use fs::*;

/// A [BlockStore] is a facade over some content-addressed persistence
/// substrate that can store, retrieve and forget blocks by [Cid].
///
/// Implementations share their state between clones, so a store handed to a
/// resolver and a clone kept by the caller observe the same blocks.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait BlockStore: Clone + ConditionalSync {
    /// Retrieve the bytes (if any) stored against the given [Cid]
    async fn get(&self, cid: &Cid) -> Result<Option<Vec<u8>>, BlockStoreError>;

    /// Store a [Block]. Storing a block that is already present is not an
    /// error.
    async fn put(&self, block: Block) -> Result<(), BlockStoreError>;

    /// Forget the block stored against the given [Cid]. Forgetting an absent
    /// block is not an error.
    async fn delete(&self, cid: &Cid) -> Result<(), BlockStoreError>;
}
