#![warn(missing_docs)]

//! This crate describes the boundary between the DAG resolver and the
//! per-format codecs it drives. A [Format] knows how to turn a node into
//! bytes and back, how to derive a [Cid] for those bytes and how to walk a
//! [Path] within a single encoded node. Nothing here knows how to cross from
//! one node to another; that is the resolver's job.
//!
//! Values are modelled as [`Ipld`]. A link to another node is normally the
//! tagged [`Ipld::Link`] variant, but formats that do not tag links (plain
//! JSON, for instance) spell them as a one-key `{"/": "<cid>"}` mapping.
//! [LinkShape] recognises both so the resolver never has to guess:
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use dialog_format::{Ipld, LinkShape};
//!
//! let mut map = BTreeMap::new();
//! map.insert("/".to_string(), Ipld::String("not a cid".into()));
//!
//! assert_eq!(LinkShape::classify(&Ipld::Map(map)), LinkShape::Malformed);
//! ```

pub use ipld_core::cid::{self, Cid};
pub use ipld_core::ipld::Ipld;

mod codec;
pub use codec::*;

mod error;
pub use error::*;

mod format;
pub use format::*;

mod hash;
pub use hash::*;

mod link;
pub use link::*;

mod path;
pub use path::*;

/// Reference formats built on the `serde_ipld_*` codecs.
///
/// These are provided for tests and tooling; production deployments are
/// expected to register formats of their own.
#[cfg(any(test, feature = "helpers"))]
mod helpers;
#[cfg(any(test, feature = "helpers"))]
pub use helpers::*;
