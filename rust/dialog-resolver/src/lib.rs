#![warn(missing_docs)]

//! This crate resolves paths through a content-addressed DAG whose nodes may
//! be encoded in any number of pluggable [Format]s, crossing from node to
//! node (and from format to format) wherever the path meets a link.
//!
//! A [Resolver] is assembled from a [BlockStore] and a set of formats, given
//! up front and/or loaded on demand through a [FormatLoader]:
//!
//! ```rust
//! # async fn example() -> Result<(), dialog_resolver::ResolverError> {
//! use std::sync::Arc;
//! use dialog_blockstore::MemoryBlockStore;
//! use dialog_format::{DAG_CBOR, DagCborFormat, Ipld};
//! use dialog_resolver::{PutOptions, Resolver, ResolverOptions};
//! use futures_util::TryStreamExt;
//!
//! let resolver = Resolver::new(
//!     MemoryBlockStore::default(),
//!     ResolverOptions::default().with_format(Arc::new(DagCborFormat)),
//! )?;
//!
//! let cid = resolver
//!     .put(&Ipld::Integer(1), DAG_CBOR, &PutOptions::default())
//!     .await?;
//!
//! let steps: Vec<_> = resolver.resolve(cid, "/", None).try_collect().await?;
//! assert_eq!(steps[0].value, Ipld::Integer(1));
//! # Ok(())
//! # }
//! ```
//!
//! Every sequence the resolver hands out ([Resolver::resolve],
//! [Resolver::tree], [Resolver::get_many], [Resolver::put_many]) is a lazy
//! [futures_core::Stream]: no block is fetched until the caller asks for the
//! element that needs it.

pub use dialog_blockstore::BlockStore;
pub use dialog_common::CancellationToken;
pub use dialog_format::{Cid, Format, Ipld, Path};

mod error;
pub use error::*;

mod options;
pub use options::*;

mod registry;
pub use registry::*;

mod resolver;
pub use resolver::*;

mod resolve;
pub use resolve::*;

mod tree;
