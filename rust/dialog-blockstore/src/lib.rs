#![warn(missing_docs)]

//! This crate holds the resolver's view of block storage: a [Block] of bytes
//! keyed by its [Cid], the [BlockStore] trait that any persistence substrate
//! implements, and the [NodeStore] adapter the resolver talks to.
//!
//! ```rust
//! # async fn example() -> Result<(), dialog_blockstore::BlockStoreError> {
//! use dialog_blockstore::{MemoryBlockStore, NodeStore};
//!
//! let store = NodeStore::new(MemoryBlockStore::default());
//! # Ok(())
//! # }
//! ```
//!
//! Stores never interpret the bytes they hold and never verify that the
//! bytes really hash to the [Cid] they are filed under.

pub use ipld_core::cid::Cid;

mod backend;
pub use backend::*;

mod block;
pub use block::*;

mod error;
pub use error::*;

mod node_store;
pub use node_store::*;
