use async_stream::try_stream;
use dialog_blockstore::BlockStore;
use dialog_common::CancellationToken;
use dialog_format::{Cid, Ipld, LinkShape, Path, Resolution};
use futures_core::Stream;
use tracing::{trace, warn};

use crate::{Resolver, ResolverError};

/// One hop of a path resolution
#[derive(Clone, Debug, PartialEq)]
pub struct ResolutionStep {
    /// What the path led to inside the node. A further hop is represented as
    /// [`Ipld::Link`].
    pub value: Ipld,
    /// The segments the node that produced this step did not consume
    pub remainder_path: Path,
}

impl ResolutionStep {
    /// The [Cid] of the next node, when this step ends at a link
    pub fn link(&self) -> Option<Cid> {
        match self.value {
            Ipld::Link(cid) => Some(cid),
            _ => None,
        }
    }
}

impl<Store> Resolver<Store>
where
    Store: BlockStore,
{
    /// Walk `path` starting at the node identified by `cid`, crossing into
    /// linked nodes as often as the path requires.
    ///
    /// One [ResolutionStep] is produced per node visited. The sequence ends
    /// with the first step whose value is not a link, or with the first
    /// failure. Each step costs one block fetch, performed only when the
    /// step is requested. The root path (`""` or `"/"`) produces a single
    /// step holding the whole decoded node.
    ///
    /// A `{"/": ...}` value that does not decode to a [Cid] is reported as
    /// [`Ipld::Null`] and ends the walk.
    pub fn resolve<'a>(
        &'a self,
        cid: Cid,
        path: &str,
        cancel: Option<CancellationToken>,
    ) -> impl Stream<Item = Result<ResolutionStep, ResolverError>> + use<'a, Store> {
        let path = Path::parse(path);

        try_stream! {
            if path.is_root() {
                let value = self.get(&cid, cancel.as_ref()).await?;
                yield ResolutionStep {
                    value,
                    remainder_path: Path::root(),
                };
            } else {
                let mut cid = cid;
                let mut path = path;

                loop {
                    let format = self.registry.get(cid.codec(), cancel.as_ref()).await?;
                    let block = self.store.get(&cid, cancel.as_ref()).await?;
                    let Resolution { value, remainder } = format.resolve(block.bytes(), &path)?;

                    let value = match LinkShape::classify(&value) {
                        LinkShape::Link(next) => Ipld::Link(next),
                        LinkShape::Malformed => {
                            warn!(%cid, %path, "Value shaped like a link is not a valid CID");
                            Ipld::Null
                        }
                        LinkShape::Data => value,
                    };

                    trace!(%cid, %path, %remainder, "Resolved path in node");

                    let step = ResolutionStep {
                        value,
                        remainder_path: remainder,
                    };
                    let next = step.link();
                    let remainder = step.remainder_path.clone();

                    yield step;

                    match next {
                        Some(next) => {
                            cid = next;
                            path = remainder;
                        }
                        None => break,
                    }
                }
            }
        }
    }
}
