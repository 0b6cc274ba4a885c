use std::collections::VecDeque;

use async_stream::try_stream;
use dialog_blockstore::BlockStore;
use dialog_format::{Cid, PATH_SEPARATOR, Path};
use futures_core::Stream;
use tracing::debug;

use crate::{Resolver, ResolverError, TreeOptions};

impl<Store> Resolver<Store>
where
    Store: BlockStore,
{
    /// Enumerate the paths reachable from the node identified by `cid`,
    /// relative to `offset`.
    ///
    /// Without [TreeOptions::recursive] only the paths the root node lists
    /// for itself are produced. With it, every link the node's format finds
    /// at a listed path (see [dialog_format::Format::tree_with_links]) is
    /// queued and its node's paths are produced after those already pending,
    /// prefixed with the path of the link (breadth first across links).
    ///
    /// Only paths strictly below `offset` are produced, and they are produced
    /// relative to it.
    pub fn tree<'a>(
        &'a self,
        cid: Cid,
        offset: &str,
        options: TreeOptions,
    ) -> impl Stream<Item = Result<String, ResolverError>> + use<'a, Store> {
        let offset = Path::parse(offset).to_string();

        try_stream! {
            let TreeOptions { recursive, cancel } = options;
            let mut queue = VecDeque::from([(cid, String::new())]);

            while let Some((cid, base_path)) = queue.pop_front() {
                let format = self.registry.get(cid.codec(), cancel.as_ref()).await?;
                let block = self.store.get(&cid, cancel.as_ref()).await?;
                let pending = if recursive {
                    format.tree_with_links(block.bytes())?
                } else {
                    format
                        .tree(block.bytes())?
                        .into_iter()
                        .map(|segment| (segment, None))
                        .collect()
                };

                debug!(%cid, %base_path, paths = pending.len(), "Expanding node");

                for (segment, link) in pending {
                    let full_path = format!("{base_path}{segment}");

                    if let Some(next) = link {
                        queue.push_back((next, format!("{full_path}{PATH_SEPARATOR}")));
                    }

                    if let Some(relative) = relative_to(&full_path, &offset) {
                        yield relative.to_string();
                    }
                }
            }
        }
    }
}

/// `path` with `offset` and its separator stripped, when `path` lies
/// strictly below `offset`
fn relative_to<'a>(path: &'a str, offset: &str) -> Option<&'a str> {
    let relative = if offset.is_empty() {
        path
    } else {
        path.strip_prefix(offset)?.strip_prefix(PATH_SEPARATOR)?
    };
    (!relative.is_empty()).then_some(relative)
}
